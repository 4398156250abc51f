//! StageController: the per-session load/playback state machine.
//!
//! Methods:
//! - open_session, on_ready, on_failed, on_revealed, on_end_of_stream (callbacks)
//! - replay, retry (user intents), update (playback clock), take_outputs

use log::{debug, info, warn};

use crate::analytics::{AnalyticsEvent, AnalyticsKind};
use crate::config::MediaConfig;
use crate::error::{MediaLoadError, StageError};
use crate::ids::{IdAllocator, SessionId};
use crate::media::{effective_identifier, resolve_media, MediaCommand};
use crate::outputs::{Outputs, StageEvent};
use crate::session::{MediaSession, SessionStatus, Stage};

#[derive(Debug)]
pub struct StageController {
    cfg: MediaConfig,
    ids: IdAllocator,
    session: Option<MediaSession>,
    outputs: Outputs,
}

impl StageController {
    pub fn new(cfg: MediaConfig) -> Result<Self, StageError> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            ids: IdAllocator::new(),
            session: None,
            outputs: Outputs::default(),
        })
    }

    #[inline]
    pub fn config(&self) -> &MediaConfig {
        &self.cfg
    }

    #[inline]
    pub fn session(&self) -> Option<&MediaSession> {
        self.session.as_ref()
    }

    #[inline]
    pub fn session_id(&self) -> Option<SessionId> {
        self.session.as_ref().map(|s| s.id)
    }

    /// `Idle` until the first session is opened.
    pub fn status(&self) -> SessionStatus {
        self.session
            .as_ref()
            .map(|s| s.status)
            .unwrap_or(SessionStatus::Idle)
    }

    #[inline]
    pub fn stage(&self) -> Stage {
        self.status().stage()
    }

    pub fn position(&self) -> f32 {
        self.session.as_ref().map(|s| s.position).unwrap_or(0.0)
    }

    /// Drain commands and events produced since the last call.
    pub fn take_outputs(&mut self) -> Outputs {
        std::mem::take(&mut self.outputs)
    }

    /// Start a session for `identifier`, superseding the current one.
    /// Callbacks still in flight for the old session become stale.
    pub fn open_session(&mut self, identifier: Option<&str>) -> Result<SessionId, StageError> {
        let url = resolve_media(&self.cfg, identifier)?;
        let effective = effective_identifier(&self.cfg, identifier).to_string();
        let identifier = identifier
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        let id = self.ids.alloc_session();
        if let Some(old) = self.session.take() {
            debug!("{} superseded by {} while {}", old.id, id, old.status.name());
            self.outputs.push_event(StageEvent::SessionSuperseded {
                session: old.id,
                by: id,
            });
        }

        info!("opening {id} for video {effective} ({url})");
        let mut session = MediaSession::new(id, identifier, effective, url.clone());
        session.gate_open = !self.cfg.reveal_required;
        self.session = Some(session);
        self.outputs.push_event(StageEvent::SessionOpened {
            session: id,
            url: url.clone(),
        });
        self.transition(SessionStatus::Loading);
        self.outputs.push_command(MediaCommand::Load { session: id, url });
        Ok(id)
    }

    /// Backend reports the media is ready to play.
    pub fn on_ready(&mut self, session: SessionId) -> Result<(), StageError> {
        let status = self.current(session)?.status;
        if status != SessionStatus::Loading {
            return Err(StageError::invalid(status, "ready"));
        }
        self.transition(SessionStatus::Ready);
        if self.current(session)?.gate_open {
            self.enter_playing();
        }
        Ok(())
    }

    /// Backend reports the media could not be loaded. Terminal for the session.
    pub fn on_failed(
        &mut self,
        session: SessionId,
        description: impl Into<String>,
    ) -> Result<(), StageError> {
        let status = self.current(session)?.status;
        if status != SessionStatus::Loading {
            return Err(StageError::invalid(status, "failed"));
        }
        let error = MediaLoadError::new(description);
        warn!("{session} failed to load: {}", error.description);
        let message = error.to_string();
        if let Some(s) = self.session.as_mut() {
            s.error = Some(error);
        }
        self.transition(SessionStatus::Failed);
        self.outputs
            .push_event(StageEvent::LoadFailed { session, message });
        Ok(())
    }

    /// The reveal gesture completed for `session`. Idempotent.
    pub fn on_revealed(&mut self, session: SessionId) -> Result<(), StageError> {
        let s = self.current(session)?;
        if s.gate_open {
            return Ok(());
        }
        s.gate_open = true;
        if s.status == SessionStatus::Ready {
            self.enter_playing();
        }
        Ok(())
    }

    /// Backend reached the end of the stream.
    pub fn on_end_of_stream(&mut self, session: SessionId) -> Result<(), StageError> {
        let s = self.current(session)?;
        if s.status != SessionStatus::Playing || !s.completion_armed {
            return Err(StageError::invalid(s.status, "end_of_stream"));
        }
        s.completion_armed = false;
        info!("{session} finished playback");
        self.transition(SessionStatus::Completed);
        self.outputs
            .push_event(StageEvent::PlaybackFinished { session });
        Ok(())
    }

    /// Seek to the start and play again. Allowed from Completed, and
    /// permissively from Playing or from Ready once the reveal gate is open.
    /// Never re-runs the reveal gate, and never bypasses a closed one.
    pub fn replay(&mut self) -> Result<(), StageError> {
        let status = self.status();
        let gate_open = self.session.as_ref().is_some_and(|s| s.gate_open);
        let allowed = match status {
            SessionStatus::Completed | SessionStatus::Playing => true,
            SessionStatus::Ready => gate_open,
            _ => false,
        };
        if !allowed {
            return Err(StageError::invalid(status, "replay"));
        }
        self.outputs.push_command(MediaCommand::SeekToStart);
        self.enter_playing();
        let mut event = AnalyticsEvent::new(AnalyticsKind::VideoReplayed);
        if let Some(s) = self.session.as_ref() {
            event = event.with("video_id", s.effective_identifier.as_str());
        }
        self.outputs.push_analytics(event);
        Ok(())
    }

    /// Manual retry after a failure: a fresh session for the same identifier.
    pub fn retry(&mut self) -> Result<SessionId, StageError> {
        let status = self.status();
        if status != SessionStatus::Failed {
            return Err(StageError::invalid(status, "retry"));
        }
        let identifier = self.session.as_ref().and_then(|s| s.identifier.clone());
        self.open_session(identifier.as_deref())
    }

    /// Advance the mirrored playback clock by `dt` seconds while playing.
    pub fn update(&mut self, dt: f32) {
        if !(dt.is_finite() && dt > 0.0) {
            return;
        }
        if let Some(s) = self.session.as_mut() {
            if s.status == SessionStatus::Playing {
                s.position += dt;
            }
        }
    }

    fn current(&mut self, session: SessionId) -> Result<&mut MediaSession, StageError> {
        match self.session.as_mut() {
            Some(s) if s.id == session => Ok(s),
            other => Err(StageError::StaleCallback {
                session,
                current: other.map(|s| s.id),
            }),
        }
    }

    /// Enter (or restart) Playing from the start.
    fn enter_playing(&mut self) {
        let first_view = match self.session.as_mut() {
            Some(s) => {
                s.position = 0.0;
                s.completion_armed = true;
                !std::mem::replace(&mut s.viewed, true)
            }
            None => return,
        };
        if self.status() != SessionStatus::Playing {
            self.transition(SessionStatus::Playing);
        }
        self.outputs.push_command(MediaCommand::Play);
        if first_view {
            let event = self.session_event(AnalyticsKind::VideoViewed);
            self.outputs.push_analytics(event);
        }
    }

    fn transition(&mut self, to: SessionStatus) {
        let Some(s) = self.session.as_mut() else {
            return;
        };
        let from = s.status;
        debug_assert!(from.allows(to), "illegal transition {from:?} -> {to:?}");
        s.status = to;
        let session = s.id;
        debug!("{session}: {} -> {}", from.name(), to.name());
        self.outputs
            .push_event(StageEvent::StatusChanged { session, from, to });

        let kind = match to {
            SessionStatus::Loading => Some(AnalyticsKind::VideoLoading),
            SessionStatus::Ready => Some(AnalyticsKind::VideoLoaded),
            SessionStatus::Failed => Some(AnalyticsKind::VideoLoadFailed),
            SessionStatus::Completed => Some(AnalyticsKind::VideoCompleted),
            SessionStatus::Idle | SessionStatus::Playing => None,
        };
        if let Some(kind) = kind {
            let event = self.session_event(kind);
            self.outputs.push_analytics(event);
        }
    }

    fn session_event(&self, kind: AnalyticsKind) -> AnalyticsEvent {
        let mut event = AnalyticsEvent::new(kind);
        if let Some(s) = self.session.as_ref() {
            event = event
                .with("video_id", s.effective_identifier.as_str())
                .with("session", s.id.0);
            if kind == AnalyticsKind::VideoLoading {
                event = event.with("url", s.resolved_url.as_str());
            }
            if let Some(err) = s.error.as_ref() {
                event = event.with("error", err.description.as_str());
            }
        }
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(reveal_required: bool) -> StageController {
        StageController::new(MediaConfig {
            reveal_required,
            ..MediaConfig::default()
        })
        .expect("valid config")
    }

    #[test]
    fn starts_idle_without_session() {
        let c = controller(true);
        assert_eq!(c.status(), SessionStatus::Idle);
        assert_eq!(c.session_id(), None);
    }

    #[test]
    fn open_emits_load_command() {
        let mut c = controller(true);
        let id = c.open_session(Some("abc123")).unwrap();
        let out = c.take_outputs();
        assert_eq!(
            out.commands,
            vec![MediaCommand::Load {
                session: id,
                url: "https://cdn.example/video/abc123-processed.mp4".into()
            }]
        );
        assert_eq!(c.status(), SessionStatus::Loading);
        assert!(out
            .analytics
            .iter()
            .any(|e| e.kind == AnalyticsKind::VideoLoading));
    }

    #[test]
    fn ready_without_gate_plays_immediately() {
        let mut c = controller(false);
        let id = c.open_session(None).unwrap();
        c.on_ready(id).unwrap();
        assert_eq!(c.status(), SessionStatus::Playing);
        let out = c.take_outputs();
        assert!(out.commands.contains(&MediaCommand::Play));
    }

    #[test]
    fn reveal_before_ready_opens_gate_early() {
        let mut c = controller(true);
        let id = c.open_session(None).unwrap();
        c.on_revealed(id).unwrap();
        assert_eq!(c.status(), SessionStatus::Loading);
        c.on_ready(id).unwrap();
        assert_eq!(c.status(), SessionStatus::Playing);
    }

    #[test]
    fn clock_advances_only_while_playing() {
        let mut c = controller(false);
        let id = c.open_session(None).unwrap();
        c.update(1.0);
        assert_eq!(c.position(), 0.0);
        c.on_ready(id).unwrap();
        c.update(0.5);
        c.update(-3.0);
        assert_eq!(c.position(), 0.5);
    }

    #[test]
    fn replay_from_loading_is_rejected() {
        let mut c = controller(true);
        c.open_session(None).unwrap();
        let err = c.replay().unwrap_err();
        assert!(err.is_ignorable());
        assert_eq!(c.status(), SessionStatus::Loading);
    }
}
