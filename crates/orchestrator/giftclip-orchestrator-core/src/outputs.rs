use serde::{Deserialize, Serialize};

use giftclip_playback_core::{AnalyticsEvent, MediaCommand, StageEvent};
use giftclip_reveal_core::RevealEvent;

use crate::config::StoreLinks;

/// Events for the presentation layer, tagged by the component that raised them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", content = "event", rename_all = "snake_case")]
#[non_exhaustive]
pub enum ClipEvent {
    Stage(StageEvent),
    Reveal(RevealEvent),
    /// Open the full application's store page.
    OpenStore(StoreLinks),
    /// Show or hide the download/replay prompt shown after playback.
    PostVideoActions { visible: bool },
}

/// Everything produced by one controller frame.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ClipOutputs {
    #[serde(default)]
    pub commands: Vec<MediaCommand>,
    #[serde(default)]
    pub events: Vec<ClipEvent>,
    #[serde(default)]
    pub analytics: Vec<AnalyticsEvent>,
}

impl ClipOutputs {
    #[inline]
    pub fn clear(&mut self) {
        self.commands.clear();
        self.events.clear();
        self.analytics.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.events.is_empty() && self.analytics.is_empty()
    }

    /// Analytics event names in emission order.
    pub fn analytics_names(&self) -> Vec<&'static str> {
        self.analytics.iter().map(|e| e.kind.name()).collect()
    }
}
