//! Inputs into the clip controller.

use serde::{Deserialize, Serialize};

use giftclip_playback_core::SessionId;

/// User intents sent by the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    /// One pointer position over the reveal surface, in logical units.
    PointerSample {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    PointerReleased,
    DownloadTapped,
    ReplayTapped,
    RetryTapped,
    /// A new identifier was observed. `None` or empty selects the default.
    IdentifierChanged {
        #[serde(default)]
        identifier: Option<String>,
    },
    /// The clip was invoked through a URL.
    DeepLinkOpened { url: String },
}

/// Callbacks from the host media backend. Each carries the session it was
/// issued for so late callbacks can be discarded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MediaSignal {
    Ready {
        session: SessionId,
    },
    Failed {
        session: SessionId,
        #[serde(default)]
        description: String,
    },
    EndOfStream {
        session: SessionId,
    },
}

impl MediaSignal {
    #[inline]
    pub fn session(&self) -> SessionId {
        match self {
            Self::Ready { session }
            | Self::Failed { session, .. }
            | Self::EndOfStream { session } => *session,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn intents_parse_from_tagged_json() {
        let i: Intent = serde_json::from_value(json!({
            "type": "pointer_sample", "x": 1.0, "y": 2.0, "width": 300.0, "height": 200.0
        }))
        .unwrap();
        assert_eq!(
            i,
            Intent::PointerSample {
                x: 1.0,
                y: 2.0,
                width: 300.0,
                height: 200.0
            }
        );
        let i: Intent = serde_json::from_value(json!({"type": "identifier_changed"})).unwrap();
        assert_eq!(i, Intent::IdentifierChanged { identifier: None });
    }

    #[test]
    fn signals_carry_session() {
        let s: MediaSignal =
            serde_json::from_value(json!({"type": "failed", "session": 4})).unwrap();
        assert_eq!(s.session(), SessionId(4));
        assert_eq!(
            s,
            MediaSignal::Failed {
                session: SessionId(4),
                description: String::new()
            }
        );
    }
}
