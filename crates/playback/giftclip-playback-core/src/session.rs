use serde::{Deserialize, Serialize};

use crate::error::MediaLoadError;
use crate::ids::SessionId;

/// Lifecycle of one media session.
///
/// Moves forward along Idle -> Loading -> {Ready | Failed} -> Playing ->
/// Completed. The only backwards edge is replay (Completed -> Playing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Idle,
    Loading,
    Ready,
    Failed,
    Playing,
    Completed,
}

impl SessionStatus {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Failed => "failed",
            Self::Playing => "playing",
            Self::Completed => "completed",
        }
    }

    /// Whether `self -> to` is an edge of the session graph.
    pub fn allows(self, to: SessionStatus) -> bool {
        use SessionStatus::*;
        matches!(
            (self, to),
            (Idle, Loading)
                | (Loading, Ready)
                | (Loading, Failed)
                | (Ready, Playing)
                | (Playing, Completed)
                | (Completed, Playing)
        )
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Failed)
    }

    /// What the presentation layer shows for this status.
    pub fn stage(&self) -> Stage {
        match self {
            Self::Idle | Self::Loading => Stage::Loading,
            Self::Ready => Stage::AwaitingReveal,
            Self::Playing => Stage::Playing,
            Self::Completed => Stage::Completed,
            Self::Failed => Stage::Error,
        }
    }
}

/// Presentation-facing view of the session status. `Ready` only lingers
/// while the reveal gate is closed, hence `AwaitingReveal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Loading,
    AwaitingReveal,
    Playing,
    Completed,
    Error,
}

/// One identifier-to-playback lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaSession {
    pub id: SessionId,
    /// Identifier as received; `None` when absent or empty.
    pub identifier: Option<String>,
    /// Identifier actually substituted into the template.
    pub effective_identifier: String,
    pub resolved_url: String,
    pub status: SessionStatus,
    /// Reveal gate satisfied (or not required).
    pub gate_open: bool,
    /// `video_viewed` already reported for this session.
    pub viewed: bool,
    /// End-of-stream will complete the current play-through.
    pub completion_armed: bool,
    /// Mirrored playback clock in seconds.
    pub position: f32,
    #[serde(default)]
    pub error: Option<MediaLoadError>,
}

impl MediaSession {
    pub(crate) fn new(
        id: SessionId,
        identifier: Option<String>,
        effective_identifier: String,
        resolved_url: String,
    ) -> Self {
        Self {
            id,
            identifier,
            effective_identifier,
            resolved_url,
            status: SessionStatus::Idle,
            gate_open: false,
            viewed: false,
            completion_armed: false,
            position: 0.0,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SessionStatus::*;

    #[test]
    fn forward_edges_only() {
        assert!(Idle.allows(Loading));
        assert!(Loading.allows(Failed));
        assert!(Completed.allows(Playing));
        assert!(!Failed.allows(Ready));
        assert!(!Playing.allows(Ready));
        assert!(!Ready.allows(Loading));
        assert!(!Completed.allows(Completed));
    }

    #[test]
    fn stages() {
        assert_eq!(Idle.stage(), Stage::Loading);
        assert_eq!(Ready.stage(), Stage::AwaitingReveal);
        assert_eq!(Failed.stage(), Stage::Error);
        assert!(Failed.is_terminal());
    }
}
