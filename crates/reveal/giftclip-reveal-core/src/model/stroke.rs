use std::f32::consts::PI;

use super::CoverageModel;
use crate::config::{Strategy, StrokeConfig};
use crate::geometry::{Point, Size};

/// Approximate erase-disk accounting.
///
/// Samples are down-sampled to `min_spacing` and each recorded sample stands
/// for a disk of `radius` erased from the overlay. Coverage is
/// `min(1, n * PI * r^2 * overlap_factor / area)`; it ignores where disks
/// actually overlap, so it is order-dependent.
#[derive(Debug, Clone)]
pub struct StrokeCoverage {
    cfg: StrokeConfig,
    surface: Option<Size>,
    strokes: Vec<Vec<Point>>,
    segment_open: bool,
    recorded: usize,
}

impl StrokeCoverage {
    pub fn new(cfg: StrokeConfig) -> Self {
        Self {
            cfg,
            surface: None,
            strokes: Vec::new(),
            segment_open: false,
            recorded: 0,
        }
    }

    /// Recorded samples grouped by gesture segment, in arrival order.
    pub fn strokes(&self) -> &[Vec<Point>] {
        &self.strokes
    }

    pub fn recorded_samples(&self) -> usize {
        self.recorded
    }

    pub fn disk_area(&self) -> f32 {
        PI * self.cfg.radius * self.cfg.radius
    }

    pub fn config(&self) -> &StrokeConfig {
        &self.cfg
    }
}

impl CoverageModel for StrokeCoverage {
    fn apply(&mut self, point: Point, surface: Size) -> f32 {
        if !point.is_finite() {
            return self.coverage();
        }
        let surface = match self.surface {
            Some(s) => s,
            None if surface.is_empty() => return 0.0,
            None => {
                self.surface = Some(surface);
                surface
            }
        };
        if !surface.contains(point) {
            return self.coverage();
        }

        if !self.segment_open {
            self.strokes.push(Vec::new());
            self.segment_open = true;
        }
        let Some(stroke) = self.strokes.last_mut() else {
            return self.coverage();
        };
        let keep = match stroke.last() {
            Some(last) => last.distance(point) >= self.cfg.min_spacing,
            None => true,
        };
        if keep {
            stroke.push(point);
            self.recorded += 1;
        }
        self.coverage()
    }

    fn end_gesture(&mut self) {
        self.segment_open = false;
    }

    fn coverage(&self) -> f32 {
        let area = self.surface.map(|s| s.area()).unwrap_or(0.0);
        if area <= 0.0 {
            return 0.0;
        }
        let erased = self.recorded as f32 * self.disk_area() * self.cfg.overlap_factor;
        (erased / area).min(1.0)
    }

    fn threshold_crossed(&self) -> bool {
        self.coverage() > self.cfg.threshold
    }

    fn kind(&self) -> Strategy {
        Strategy::Stroke
    }
}
