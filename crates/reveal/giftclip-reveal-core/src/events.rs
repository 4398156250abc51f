use serde::{Deserialize, Serialize};

use crate::config::Strategy;

/// Discrete signals emitted by the reveal engine.
///
/// `token` is the value the engine was created with; the orchestrator uses
/// the session id so late events from a superseded session can be dropped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum RevealEvent {
    /// Coverage exceeded the threshold; the UI may animate to 100%.
    ThresholdCrossed {
        token: u32,
        strategy: Strategy,
        coverage: f32,
    },
    /// The reveal is complete (after the settle delay where applicable).
    Revealed { token: u32, coverage: f32 },
}

impl RevealEvent {
    #[inline]
    pub fn token(&self) -> u32 {
        match self {
            Self::ThresholdCrossed { token, .. } | Self::Revealed { token, .. } => *token,
        }
    }
}
