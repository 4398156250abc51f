//! giftclip-orchestrator
//!
//! Couples one [`RevealEngine`] with one [`StageController`]: intents from the
//! presentation layer and callbacks from the media backend go in, media
//! commands, presentation events and analytics come out of [`ClipController::update`].
//!
//! Every new session rebuilds the reveal engine with the session id as its
//! token, so reveal progress never leaks from one session into the next.

pub mod config;
pub mod deeplink;
pub mod intents;
pub mod outputs;
pub mod shared;
pub mod sinks;
pub mod snapshot;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use uuid::Uuid;

use giftclip_playback_core::{
    effective_identifier, AnalyticsEvent, AnalyticsKind, SessionId, SessionStatus,
    StageController, StageError,
};
use giftclip_reveal_core::{Point, RevealEngine, RevealEvent, Size};

pub use giftclip_playback_core as playback;
pub use giftclip_reveal_core as reveal;

pub use crate::config::{ClipConfig, StoreLinks};
pub use crate::deeplink::parse_deep_link;
pub use crate::intents::{Intent, MediaSignal};
pub use crate::outputs::{ClipEvent, ClipOutputs};
pub use crate::shared::SharedClip;
pub use crate::sinks::{AnalyticsSink, LogSink, MemorySink, NullSink};
pub use crate::snapshot::ClipSnapshot;

pub struct ClipController {
    cfg: ClipConfig,
    stage: StageController,
    reveal: RevealEngine,
    sink: Box<dyn AnalyticsSink>,
    /// Funnel session, stable for the controller's lifetime.
    funnel_session: Uuid,
    actions_visible: bool,
    pending: ClipOutputs,
    frame: ClipOutputs,
}

impl std::fmt::Debug for ClipController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClipController")
            .field("session", &self.stage.session_id())
            .field("status", &self.stage.status())
            .field("coverage", &self.reveal.coverage())
            .field("actions_visible", &self.actions_visible)
            .finish()
    }
}

/// Drop errors that only mean "nothing to do" (stale or out-of-order input).
fn absorb<T>(result: Result<T, StageError>) -> Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(e) if e.is_ignorable() => {
            debug!("ignored {} error: {e}", e.category());
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

impl ClipController {
    /// Validate `cfg` and open the session for the default identifier.
    /// Analytics go to a [`LogSink`] until replaced with [`Self::with_sink`].
    pub fn new(cfg: ClipConfig) -> Result<Self> {
        cfg.validate()?;
        let mut stage = StageController::new(cfg.media.clone())?;
        let session = stage.open_session(None)?;
        let reveal = RevealEngine::new(&cfg.reveal, session.0).context("invalid reveal config")?;
        let mut pending = ClipOutputs::default();
        Self::collect_stage(&mut stage, &mut pending);
        Ok(Self {
            cfg,
            stage,
            reveal,
            sink: Box::new(LogSink),
            funnel_session: Uuid::new_v4(),
            actions_visible: false,
            pending,
            frame: ClipOutputs::default(),
        })
    }

    pub fn with_sink(mut self, sink: Box<dyn AnalyticsSink>) -> Self {
        self.sink = sink;
        self
    }

    #[inline]
    pub fn config(&self) -> &ClipConfig {
        &self.cfg
    }

    #[inline]
    pub fn stage(&self) -> &StageController {
        &self.stage
    }

    #[inline]
    pub fn reveal(&self) -> &RevealEngine {
        &self.reveal
    }

    #[inline]
    pub fn funnel_session(&self) -> Uuid {
        self.funnel_session
    }

    /// Apply one user intent. Stale or out-of-order intents are ignored.
    pub fn dispatch(&mut self, intent: Intent) -> Result<()> {
        match intent {
            Intent::PointerSample {
                x,
                y,
                width,
                height,
            } => {
                self.reveal
                    .apply_sample(Point::new(x, y), Size::new(width, height));
                self.pump_reveal();
            }
            Intent::PointerReleased => self.reveal.end_gesture(),
            Intent::DownloadTapped => {
                let event = self.video_event(AnalyticsKind::DownloadButtonTapped);
                self.pending.analytics.push(event);
                self.pending
                    .events
                    .push(ClipEvent::OpenStore(self.cfg.store_links()));
            }
            Intent::ReplayTapped => {
                // the tap is reported ahead of the replay's own events
                let event = self.video_event(AnalyticsKind::ReplayButtonTapped);
                if absorb(self.stage.replay())?.is_some() {
                    self.pending.analytics.push(event);
                    self.set_actions_visible(false);
                }
                self.collect();
            }
            Intent::RetryTapped => {
                if let Some(session) = absorb(self.stage.retry())? {
                    self.begin_session(session)?;
                }
                self.collect();
            }
            Intent::IdentifierChanged { identifier } => {
                self.open(identifier.as_deref())?;
            }
            Intent::DeepLinkOpened { url } => {
                match parse_deep_link(&url, &self.cfg.deep_link_hosts) {
                    Some(id) if self.is_live(Some(id.as_str())) => {
                        debug!("deep link {url} repeats live video {id}");
                    }
                    Some(id) => {
                        info!("deep link {url} -> video {id}");
                        let event = AnalyticsEvent::new(AnalyticsKind::AppClipLaunched)
                            .with("video_id", id.as_str())
                            .with("url", url.as_str());
                        self.pending.analytics.push(event);
                        self.open(Some(&id))?;
                    }
                    None => debug!("ignoring deep link {url}"),
                }
            }
        }
        Ok(())
    }

    /// Apply one media backend callback. Callbacks for superseded sessions,
    /// or that do not fit the current status, are ignored.
    pub fn signal(&mut self, signal: MediaSignal) -> Result<()> {
        match signal {
            MediaSignal::Ready { session } => {
                absorb(self.stage.on_ready(session))?;
            }
            MediaSignal::Failed {
                session,
                description,
            } => {
                absorb(self.stage.on_failed(session, description))?;
            }
            MediaSignal::EndOfStream { session } => {
                if absorb(self.stage.on_end_of_stream(session))?.is_some() {
                    self.set_actions_visible(true);
                }
            }
        }
        self.collect();
        Ok(())
    }

    /// Advance timers by `dt` seconds and return everything produced since
    /// the previous call. Analytics are forwarded to the sink here.
    pub fn update(&mut self, dt: f32) -> &ClipOutputs {
        self.stage.update(dt);
        self.reveal.update(dt);
        self.pump_reveal();
        self.collect();

        self.frame.clear();
        std::mem::swap(&mut self.frame, &mut self.pending);
        for event in &self.frame.analytics {
            self.sink.record(event, &self.cfg.platform);
        }
        &self.frame
    }

    /// Report a named funnel step under this controller's funnel session.
    pub fn track_funnel(&mut self, step: &str) {
        let event = AnalyticsEvent::new(AnalyticsKind::AppClipLaunched)
            .with("funnel_step", step)
            .with("session_id", self.funnel_session.to_string());
        self.pending.analytics.push(event);
    }

    pub fn snapshot(&self) -> ClipSnapshot {
        let session = self.stage.session();
        ClipSnapshot {
            session: session.map(|s| s.id),
            identifier: session.and_then(|s| s.identifier.clone()),
            effective_identifier: session.map(|s| s.effective_identifier.clone()),
            url: session.map(|s| s.resolved_url.clone()),
            status: self.stage.status(),
            stage: self.stage.stage(),
            strategy: self.reveal.strategy(),
            coverage: self.reveal.coverage(),
            revealed: self.reveal.revealed(),
            position: self.stage.position(),
            error: session
                .and_then(|s| s.error.as_ref())
                .map(|e| e.to_string()),
            actions_visible: self.actions_visible,
        }
    }

    /// Whether `identifier` resolves to the live session's video. A failed
    /// session never counts, so the same identifier can reload it.
    fn is_live(&self, identifier: Option<&str>) -> bool {
        let wanted = effective_identifier(self.stage.config(), identifier);
        self.stage.session().is_some_and(|s| {
            s.status != SessionStatus::Failed && s.effective_identifier == wanted
        })
    }

    /// Open a session for `identifier` unless it is already the live one.
    fn open(&mut self, identifier: Option<&str>) -> Result<()> {
        if self.is_live(identifier) {
            debug!("identifier {identifier:?} is already live");
            return Ok(());
        }
        let session = self.stage.open_session(identifier)?;
        self.begin_session(session)?;
        self.collect();
        Ok(())
    }

    /// Fresh reveal state for `session`; a pending settle of the old one is dropped.
    fn begin_session(&mut self, session: SessionId) -> Result<()> {
        if self.reveal.cancel_pending() {
            debug!("dropped pending reveal for token {}", self.reveal.token());
        }
        self.reveal =
            RevealEngine::new(&self.cfg.reveal, session.0).context("invalid reveal config")?;
        self.set_actions_visible(false);
        Ok(())
    }

    /// Forward reveal events; `Revealed` for the current session opens the gate.
    fn pump_reveal(&mut self) {
        for event in self.reveal.take_events() {
            let revealed = match &event {
                RevealEvent::Revealed { token, .. } => Some(SessionId(*token)),
                _ => None,
            };
            let current = self.stage.session_id();
            if revealed.is_some() && revealed != current {
                debug!("dropping reveal for {revealed:?}, current {current:?}");
                continue;
            }
            self.pending.events.push(ClipEvent::Reveal(event));
            if let Some(session) = revealed {
                if let Err(e) = absorb(self.stage.on_revealed(session)) {
                    warn!("reveal gate for {session} failed: {e:#}");
                }
                self.collect();
            }
        }
    }

    fn set_actions_visible(&mut self, visible: bool) {
        if self.actions_visible != visible {
            self.actions_visible = visible;
            self.pending
                .events
                .push(ClipEvent::PostVideoActions { visible });
        }
    }

    fn collect(&mut self) {
        Self::collect_stage(&mut self.stage, &mut self.pending);
    }

    fn collect_stage(stage: &mut StageController, into: &mut ClipOutputs) {
        let out = stage.take_outputs();
        into.commands.extend(out.commands);
        into.events.extend(out.events.into_iter().map(ClipEvent::Stage));
        into.analytics.extend(out.analytics);
    }

    fn video_event(&self, kind: AnalyticsKind) -> AnalyticsEvent {
        let mut event = AnalyticsEvent::new(kind);
        if let Some(s) = self.stage.session() {
            event = event.with("video_id", s.effective_identifier.as_str());
        }
        event
    }
}
