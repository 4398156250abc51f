//! Analytics vocabulary. Events are fire-and-forget; the core only builds
//! them and hands them to whatever sink the host provides.

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsKind {
    VideoViewed,
    VideoLoading,
    VideoLoaded,
    VideoLoadFailed,
    VideoCompleted,
    VideoReplayed,
    DownloadButtonTapped,
    ReplayButtonTapped,
    AppClipLaunched,
}

impl AnalyticsKind {
    /// Wire name used by the analytics backend.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::VideoViewed => "video_viewed",
            Self::VideoLoading => "video_loading",
            Self::VideoLoaded => "video_loaded",
            Self::VideoLoadFailed => "video_load_failed",
            Self::VideoCompleted => "video_completed",
            Self::VideoReplayed => "video_replayed",
            Self::DownloadButtonTapped => "download_button_tapped",
            Self::ReplayButtonTapped => "replay_button_tapped",
            Self::AppClipLaunched => "app_clip_launched",
        }
    }
}

/// Property value; analytics properties are flat primitives only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Primitive {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<bool> for Primitive {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Primitive {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for Primitive {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for Primitive {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f32> for Primitive {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<&str> for Primitive {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Primitive {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub id: Uuid,
    pub kind: AnalyticsKind,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub properties: IndexMap<String, Primitive>,
}

impl AnalyticsEvent {
    pub fn new(kind: AnalyticsKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            timestamp: Utc::now(),
            properties: IndexMap::new(),
        }
    }

    /// Builder-style property insert; a repeated key keeps the last value.
    pub fn with(mut self, key: &str, value: impl Into<Primitive>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    pub fn property(&self, key: &str) -> Option<&Primitive> {
        self.properties.get(key)
    }

    /// Flat JSON body for the analytics backend: `event`, `timestamp`
    /// (RFC 3339) and `platform`, merged with the free-form properties.
    /// Properties win on key collisions.
    pub fn to_payload(&self, platform: &str) -> JsonValue {
        let mut body = serde_json::Map::new();
        body.insert("event".to_string(), json!(self.kind.name()));
        body.insert(
            "timestamp".to_string(),
            json!(self
                .timestamp
                .to_rfc3339_opts(SecondsFormat::Secs, true)),
        );
        body.insert("platform".to_string(), json!(platform));
        for (key, value) in &self.properties {
            body.insert(
                key.clone(),
                serde_json::to_value(value).unwrap_or(JsonValue::Null),
            );
        }
        JsonValue::Object(body)
    }
}
