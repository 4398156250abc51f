//! Analytics sinks. Delivery is best effort; a sink never fails the controller.

use std::sync::{Arc, Mutex, PoisonError};

use log::info;
use serde_json::Value as JsonValue;

use giftclip_playback_core::AnalyticsEvent;

pub trait AnalyticsSink: Send {
    fn record(&mut self, event: &AnalyticsEvent, platform: &str);
}

/// Writes each payload through the `log` facade at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl AnalyticsSink for LogSink {
    fn record(&mut self, event: &AnalyticsEvent, platform: &str) {
        info!(target: "giftclip::analytics", "{}", event.to_payload(platform));
    }
}

/// Drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl AnalyticsSink for NullSink {
    fn record(&mut self, _event: &AnalyticsEvent, _platform: &str) {}
}

/// Collects payloads in memory. Clones share the same buffer, so a host can
/// keep one clone while the controller owns another.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    payloads: Arc<Mutex<Vec<JsonValue>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payloads(&self) -> Vec<JsonValue> {
        self.payloads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// `event` field of every payload, in order.
    pub fn names(&self) -> Vec<String> {
        self.payloads()
            .iter()
            .filter_map(|p| p["event"].as_str().map(str::to_string))
            .collect()
    }

    pub fn drain(&self) -> Vec<JsonValue> {
        std::mem::take(&mut *self.payloads.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl AnalyticsSink for MemorySink {
    fn record(&mut self, event: &AnalyticsEvent, platform: &str) {
        self.payloads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.to_payload(platform));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use giftclip_playback_core::AnalyticsKind;

    #[test]
    fn memory_sink_clones_share_buffer() {
        let sink = MemorySink::new();
        let mut owned: Box<dyn AnalyticsSink> = Box::new(sink.clone());
        owned.record(
            &AnalyticsEvent::new(AnalyticsKind::DownloadButtonTapped),
            "app_clip",
        );
        assert_eq!(sink.names(), vec!["download_button_tapped"]);
        assert_eq!(sink.payloads()[0]["platform"], "app_clip");
        assert_eq!(sink.drain().len(), 1);
        assert!(sink.payloads().is_empty());
    }
}
