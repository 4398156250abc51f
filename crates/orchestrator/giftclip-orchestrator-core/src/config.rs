//! Top-level clip configuration, the JSON shape hosts pass in.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use giftclip_playback_core::MediaConfig;
use giftclip_reveal_core::RevealConfig;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipConfig {
    pub reveal: RevealConfig,
    pub media: MediaConfig,
    /// Deep links are only honoured for these hosts.
    pub deep_link_hosts: Vec<String>,
    /// Numeric App Store id of the full application.
    pub app_store_id: String,
    /// Reported as `platform` on every analytics payload.
    pub platform: String,
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self {
            reveal: RevealConfig::default(),
            media: MediaConfig::default(),
            deep_link_hosts: vec!["v.cameo.com".to_string(), "www.v.cameo.com".to_string()],
            app_store_id: "1258311581".to_string(),
            platform: "app_clip".to_string(),
        }
    }
}

/// Where the download button sends the user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreLinks {
    /// Opens the store app directly.
    pub primary: String,
    /// Web page used when the store scheme cannot be opened.
    pub fallback: String,
}

impl ClipConfig {
    /// Parse and validate a JSON config. Missing sections take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: ClipConfig = serde_json::from_str(json).context("failed to parse clip config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        self.reveal.validate().context("invalid reveal config")?;
        self.media.validate().context("invalid media config")?;
        if self.app_store_id.is_empty() || !self.app_store_id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(anyhow!(
                "app_store_id must be numeric, got {:?}",
                self.app_store_id
            ));
        }
        if self.platform.trim().is_empty() {
            return Err(anyhow!("platform must not be empty"));
        }
        Ok(())
    }

    pub fn store_links(&self) -> StoreLinks {
        StoreLinks {
            primary: format!("itms-apps://apps.apple.com/app/id{}", self.app_store_id),
            fallback: format!("https://apps.apple.com/app/id{}", self.app_store_id),
        }
    }
}
