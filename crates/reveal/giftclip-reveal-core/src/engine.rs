//! RevealEngine: one coverage model plus the one-shot reveal latch.
//!
//! Methods:
//! - new / with_model, apply_sample, end_gesture, update (settle timer), take_events

use log::{debug, info};

use crate::config::{RevealConfig, Strategy};
use crate::error::RevealConfigError;
use crate::events::RevealEvent;
use crate::geometry::{Point, Size};
use crate::model::CoverageModel;
use crate::settle::SettleTimer;

#[derive(Debug)]
pub struct RevealEngine {
    model: Box<dyn CoverageModel>,
    token: u32,
    settle_delay: f32,
    revealed: bool,
    settled: bool,
    frozen_coverage: f32,
    timer: SettleTimer,
    events: Vec<RevealEvent>,
}

impl RevealEngine {
    /// Build an engine for the configured strategy. `token` tags every event.
    pub fn new(cfg: &RevealConfig, token: u32) -> Result<Self, RevealConfigError> {
        cfg.validate()?;
        Ok(Self::with_model(cfg.build_model(), cfg.settle_delay_secs(), token))
    }

    /// Build an engine around an arbitrary model (custom policies, tests).
    pub fn with_model(model: Box<dyn CoverageModel>, settle_delay_secs: f32, token: u32) -> Self {
        Self {
            model,
            token,
            settle_delay: settle_delay_secs.max(0.0),
            revealed: false,
            settled: false,
            frozen_coverage: 0.0,
            timer: SettleTimer::new(),
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn token(&self) -> u32 {
        self.token
    }

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.model.kind()
    }

    pub fn coverage(&self) -> f32 {
        if self.revealed {
            self.frozen_coverage
        } else {
            self.model.coverage()
        }
    }

    /// True from the moment the threshold is crossed; never reverts.
    #[inline]
    pub fn revealed(&self) -> bool {
        self.revealed
    }

    /// True once the `Revealed` event has been emitted.
    #[inline]
    pub fn settled(&self) -> bool {
        self.settled
    }

    #[inline]
    pub fn settle_pending(&self) -> bool {
        self.timer.is_pending()
    }

    pub fn model(&self) -> &dyn CoverageModel {
        self.model.as_ref()
    }

    /// Apply one pointer sample. No-op after the reveal has latched.
    pub fn apply_sample(&mut self, point: Point, surface: Size) -> f32 {
        if self.revealed {
            return self.frozen_coverage;
        }
        let coverage = self.model.apply(point, surface);
        if self.model.threshold_crossed() {
            self.latch(coverage);
        }
        self.coverage()
    }

    /// Pointer released. Partial progress is kept; only per-drag state resets.
    pub fn end_gesture(&mut self) {
        if !self.revealed {
            self.model.end_gesture();
        }
    }

    /// Advance the settle timer by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if let Some(token) = self.timer.advance(dt) {
            self.settle(token);
        }
    }

    /// Drop a pending `Revealed` without firing it.
    pub fn cancel_pending(&mut self) -> bool {
        self.timer.cancel().is_some()
    }

    /// Drain events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<RevealEvent> {
        std::mem::take(&mut self.events)
    }

    fn latch(&mut self, coverage: f32) {
        self.revealed = true;
        self.frozen_coverage = coverage;
        info!(
            "reveal threshold crossed (strategy={}, coverage={:.3}, token={})",
            self.model.kind().name(),
            coverage,
            self.token
        );
        self.events.push(RevealEvent::ThresholdCrossed {
            token: self.token,
            strategy: self.model.kind(),
            coverage,
        });
        if self.model.settles() && self.settle_delay > 0.0 {
            self.timer.arm(self.token, self.settle_delay);
        } else {
            self.settle(self.token);
        }
    }

    fn settle(&mut self, token: u32) {
        if self.settled {
            debug!("reveal already settled for token {token}");
            return;
        }
        self.settled = true;
        self.events.push(RevealEvent::Revealed {
            token,
            coverage: self.frozen_coverage,
        });
    }
}
