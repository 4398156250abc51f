//! Error types for the stage controller

use serde::{Deserialize, Serialize};

use crate::ids::SessionId;
use crate::session::SessionStatus;

/// Failure reported by the host media backend. The description is opaque and
/// shown to the user as-is.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("media failed to load: {description}")]
pub struct MediaLoadError {
    pub description: String,
}

impl MediaLoadError {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum StageError {
    /// The URL template could not produce a well-formed URL.
    #[error("cannot resolve media from template {template:?}: {reason}")]
    MediaResolution { template: String, reason: String },

    /// Backend-reported load failure.
    #[error(transparent)]
    MediaLoad(#[from] MediaLoadError),

    /// Callback for a session that is no longer current.
    #[error("stale callback for {session} (current: {current:?})")]
    StaleCallback {
        session: SessionId,
        current: Option<SessionId>,
    },

    /// Event not allowed from the current status; nothing was changed.
    #[error("cannot apply {event} while {from:?}")]
    InvalidTransition { from: SessionStatus, event: String },

    #[error("invalid media config: {reason}")]
    InvalidConfig { reason: String },
}

impl StageError {
    pub(crate) fn invalid(from: SessionStatus, event: &str) -> Self {
        Self::InvalidTransition {
            from,
            event: event.to_string(),
        }
    }

    /// Errors the orchestrator drops silently (after a debug log).
    #[inline]
    pub fn is_ignorable(&self) -> bool {
        matches!(
            self,
            Self::StaleCallback { .. } | Self::InvalidTransition { .. }
        )
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::MediaResolution { .. } => "resolution",
            Self::MediaLoad(_) => "load",
            Self::StaleCallback { .. } => "stale",
            Self::InvalidTransition { .. } => "transition",
            Self::InvalidConfig { .. } => "config",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignorable_errors() {
        let stale = StageError::StaleCallback {
            session: SessionId(1),
            current: Some(SessionId(2)),
        };
        assert!(stale.is_ignorable());
        assert_eq!(stale.category(), "stale");

        let load: StageError = MediaLoadError::new("404").into();
        assert!(!load.is_ignorable());
        assert_eq!(load.to_string(), "media failed to load: 404");
    }

    #[test]
    fn serialization() {
        let error = StageError::invalid(SessionStatus::Failed, "ready");
        let serialized = serde_json::to_string(&error).unwrap();
        let deserialized: StageError = serde_json::from_str(&serialized).unwrap();
        assert_eq!(error, deserialized);
    }
}
