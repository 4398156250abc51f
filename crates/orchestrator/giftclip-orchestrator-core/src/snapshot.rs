use serde::{Deserialize, Serialize};

use giftclip_playback_core::{SessionId, SessionStatus, Stage};
use giftclip_reveal_core::Strategy;

/// Read-only view of the controller for the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClipSnapshot {
    pub session: Option<SessionId>,
    pub identifier: Option<String>,
    pub effective_identifier: Option<String>,
    pub url: Option<String>,
    pub status: SessionStatus,
    pub stage: Stage,
    pub strategy: Strategy,
    /// Reveal coverage in [0, 1].
    pub coverage: f32,
    pub revealed: bool,
    /// Playback position in seconds.
    pub position: f32,
    pub error: Option<String>,
    pub actions_visible: bool,
}
