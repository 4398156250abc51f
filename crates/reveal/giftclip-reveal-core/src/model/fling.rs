use super::CoverageModel;
use crate::config::{FlingConfig, Strategy};
use crate::geometry::{Point, Size};

/// Single-gesture unwrap: only the net vertical displacement of the current
/// drag counts. There is no incremental coverage; it reads 0 until the drag
/// passes the threshold and 1 afterwards.
#[derive(Debug, Clone)]
pub struct FlingGesture {
    cfg: FlingConfig,
    origin: Option<Point>,
    offset: f32,
    triggered: bool,
}

impl FlingGesture {
    pub fn new(cfg: FlingConfig) -> Self {
        Self {
            cfg,
            origin: None,
            offset: 0.0,
            triggered: false,
        }
    }

    /// Vertical offset of the drag in progress; 0 when no drag is active.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn config(&self) -> &FlingConfig {
        &self.cfg
    }
}

impl CoverageModel for FlingGesture {
    fn apply(&mut self, point: Point, _surface: Size) -> f32 {
        if self.triggered || !point.is_finite() {
            return self.coverage();
        }
        let origin = *self.origin.get_or_insert(point);
        self.offset = point.y - origin.y;
        if self.offset < self.cfg.threshold {
            self.triggered = true;
        }
        self.coverage()
    }

    fn end_gesture(&mut self) {
        self.origin = None;
        self.offset = 0.0;
    }

    fn coverage(&self) -> f32 {
        if self.triggered {
            1.0
        } else {
            0.0
        }
    }

    fn threshold_crossed(&self) -> bool {
        self.triggered
    }

    fn settles(&self) -> bool {
        false
    }

    fn kind(&self) -> Strategy {
        Strategy::Fling
    }
}
