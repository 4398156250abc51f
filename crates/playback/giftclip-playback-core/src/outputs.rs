//! Output contracts from the stage controller.
//!
//! Outputs carry media commands for the host player, semantic stage events for
//! the presentation layer and analytics events for the sink. Adapters drain
//! them after every call into the controller.

use serde::{Deserialize, Serialize};

use crate::analytics::AnalyticsEvent;
use crate::ids::SessionId;
use crate::media::MediaCommand;
use crate::session::SessionStatus;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum StageEvent {
    SessionOpened {
        session: SessionId,
        url: String,
    },
    SessionSuperseded {
        session: SessionId,
        by: SessionId,
    },
    StatusChanged {
        session: SessionId,
        from: SessionStatus,
        to: SessionStatus,
    },
    LoadFailed {
        session: SessionId,
        message: String,
    },
    /// End of stream for the current play-through; drives the post-video prompt.
    PlaybackFinished {
        session: SessionId,
    },
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub commands: Vec<MediaCommand>,
    #[serde(default)]
    pub events: Vec<StageEvent>,
    #[serde(default)]
    pub analytics: Vec<AnalyticsEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.commands.clear();
        self.events.clear();
        self.analytics.clear();
    }

    #[inline]
    pub fn push_command(&mut self, command: MediaCommand) {
        self.commands.push(command);
    }

    #[inline]
    pub fn push_event(&mut self, event: StageEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn push_analytics(&mut self, event: AnalyticsEvent) {
        self.analytics.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.events.is_empty() && self.analytics.is_empty()
    }
}
