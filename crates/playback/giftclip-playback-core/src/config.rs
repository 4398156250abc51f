//! Media resolution and gating configuration.

use serde::{Deserialize, Serialize};

use crate::error::StageError;

/// Placeholder substituted with the session's identifier.
pub const IDENTIFIER_PLACEHOLDER: &str = "{identifier}";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// CDN template; must contain `{identifier}` exactly once.
    pub url_template: String,
    /// Used when the deep link carries no (or an empty) identifier.
    pub default_identifier: String,
    /// When true, Ready waits for the reveal before playing.
    pub reveal_required: bool,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            url_template: "https://cdn.example/video/{identifier}-processed.mp4".to_string(),
            default_identifier: "6536b92a64a84efc4acbce6a".to_string(),
            reveal_required: true,
        }
    }
}

impl MediaConfig {
    pub fn validate(&self) -> Result<(), StageError> {
        if self.url_template.matches(IDENTIFIER_PLACEHOLDER).count() != 1 {
            return Err(StageError::MediaResolution {
                template: self.url_template.clone(),
                reason: format!("template must contain {IDENTIFIER_PLACEHOLDER} exactly once"),
            });
        }
        if self.default_identifier.trim().is_empty() {
            return Err(StageError::InvalidConfig {
                reason: "default_identifier must not be empty".to_string(),
            });
        }
        // The fallback must produce a usable URL, so every later resolution
        // can only fail on the caller's identifier.
        crate::media::resolve_media(self, None).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_validates() {
        assert!(MediaConfig::default().validate().is_ok());
    }

    #[test]
    fn template_without_placeholder_is_rejected() {
        let cfg = MediaConfig {
            url_template: "https://cdn.example/video/fixed.mp4".into(),
            ..MediaConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(StageError::MediaResolution { .. })
        ));
    }

    #[test]
    fn relative_template_is_rejected() {
        let cfg = MediaConfig {
            url_template: "video/{identifier}.mp4".into(),
            ..MediaConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn empty_default_identifier_is_rejected() {
        let cfg = MediaConfig {
            default_identifier: "  ".into(),
            ..MediaConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(StageError::InvalidConfig { .. })));
    }
}
