//! Media resolution and the command surface towards the host player.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::{MediaConfig, IDENTIFIER_PLACEHOLDER};
use crate::error::StageError;
use crate::ids::SessionId;

/// Build the media URL for `identifier`. Absent, empty or whitespace-only
/// identifiers fall back to the configured default.
pub fn resolve_media(cfg: &MediaConfig, identifier: Option<&str>) -> Result<String, StageError> {
    let id = effective_identifier(cfg, identifier);
    let candidate = cfg.url_template.replace(IDENTIFIER_PLACEHOLDER, id);
    match Url::parse(&candidate) {
        Ok(url) if url.has_host() => Ok(url.into()),
        Ok(_) => Err(StageError::MediaResolution {
            template: cfg.url_template.clone(),
            reason: format!("{candidate} has no host"),
        }),
        Err(e) => Err(StageError::MediaResolution {
            template: cfg.url_template.clone(),
            reason: e.to_string(),
        }),
    }
}

/// Identifier substituted into the template: trimmed, or the default when blank.
pub fn effective_identifier<'a>(cfg: &'a MediaConfig, identifier: Option<&'a str>) -> &'a str {
    match identifier.map(str::trim) {
        Some(id) if !id.is_empty() => id,
        _ => cfg.default_identifier.as_str(),
    }
}

/// Instructions for the host media backend, in the order they must run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MediaCommand {
    /// Start fetching `url`; callbacks must carry `session`.
    Load { session: SessionId, url: String },
    Play,
    SeekToStart,
}

/// Opaque playback service owned by the host.
pub trait MediaBackend {
    fn load(&mut self, session: SessionId, url: &str);
    fn play(&mut self);
    fn seek_to_start(&mut self);
}

/// Run `commands` against `backend` in order.
pub fn apply_commands<B: MediaBackend + ?Sized>(backend: &mut B, commands: &[MediaCommand]) {
    for cmd in commands {
        match cmd {
            MediaCommand::Load { session, url } => backend.load(*session, url),
            MediaCommand::Play => backend.play(),
            MediaCommand::SeekToStart => backend.seek_to_start(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_identifier() {
        let cfg = MediaConfig::default();
        assert_eq!(
            resolve_media(&cfg, Some("abc123")).unwrap(),
            "https://cdn.example/video/abc123-processed.mp4"
        );
    }

    #[test]
    fn empty_or_absent_uses_fallback() {
        let cfg = MediaConfig::default();
        let fallback = "https://cdn.example/video/6536b92a64a84efc4acbce6a-processed.mp4";
        assert_eq!(resolve_media(&cfg, None).unwrap(), fallback);
        assert_eq!(resolve_media(&cfg, Some("")).unwrap(), fallback);
        assert_eq!(resolve_media(&cfg, Some("   ")).unwrap(), fallback);
    }

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl MediaBackend for Recorder {
        fn load(&mut self, session: SessionId, url: &str) {
            self.0.push(format!("load {} {url}", session.0));
        }
        fn play(&mut self) {
            self.0.push("play".into());
        }
        fn seek_to_start(&mut self) {
            self.0.push("seek".into());
        }
    }

    #[test]
    fn commands_run_in_order() {
        let mut rec = Recorder::default();
        apply_commands(
            &mut rec,
            &[
                MediaCommand::Load {
                    session: SessionId(3),
                    url: "https://x.test/a.mp4".into(),
                },
                MediaCommand::SeekToStart,
                MediaCommand::Play,
            ],
        );
        assert_eq!(rec.0, vec!["load 3 https://x.test/a.mp4", "seek", "play"]);
    }
}
