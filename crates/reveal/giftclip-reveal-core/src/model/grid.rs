use hashbrown::HashSet;

use super::CoverageModel;
use crate::config::{GridConfig, Strategy};
use crate::geometry::{Point, Size};

/// Exact cell accounting.
///
/// Each sample is joined to the previous sample of the same gesture by points
/// `step` units apart (clipped to the surface), and every point marks the cell
/// containing it. Cells are a set, so coverage depends only on which cells
/// were touched.
#[derive(Debug, Clone)]
pub struct GridCoverage {
    cfg: GridConfig,
    surface: Option<Size>,
    cells: HashSet<(u32, u32)>,
    last: Option<Point>,
}

impl GridCoverage {
    pub fn new(cfg: GridConfig) -> Self {
        Self {
            cfg,
            surface: None,
            cells: HashSet::new(),
            last: None,
        }
    }

    /// `ceil(W / cell) * ceil(H / cell)` for the latched surface, 0 before the first sample.
    pub fn total_cells(&self) -> u64 {
        match self.surface {
            Some(s) => {
                let cols = (s.width / self.cfg.cell_size).ceil() as u64;
                let rows = (s.height / self.cfg.cell_size).ceil() as u64;
                cols * rows
            }
            None => 0,
        }
    }

    pub fn revealed_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn is_cell_revealed(&self, col: u32, row: u32) -> bool {
        self.cells.contains(&(col, row))
    }

    pub fn config(&self) -> &GridConfig {
        &self.cfg
    }

    fn mark(&mut self, surface: Size, p: Point) {
        if !surface.contains(p) {
            return;
        }
        let col = (p.x / self.cfg.cell_size).floor() as u32;
        let row = (p.y / self.cfg.cell_size).floor() as u32;
        self.cells.insert((col, row));
    }
}

impl CoverageModel for GridCoverage {
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

        match self.last.and_then(|prev| surface.clip_segment(prev, point)) {
            // step only the on-surface part of the drag
            Some((from, to)) => {
                let dist = from.distance(to);
                let steps = ((dist / self.cfg.step).ceil() as usize).max(1);
                for i in 0..=steps {
                    let t = i as f32 / steps as f32;
                    self.mark(surface, from.lerp(to, t));
                }
            }
            None => self.mark(surface, point),
        }
        self.last = Some(point);
        self.coverage()
    }

    fn end_gesture(&mut self) {
        self.last = None;
    }

    fn coverage(&self) -> f32 {
        let total = self.total_cells();
        if total == 0 {
            return 0.0;
        }
        (self.cells.len() as f32 / total as f32).min(1.0)
    }

    fn threshold_crossed(&self) -> bool {
        self.coverage() > self.cfg.threshold
    }

    fn kind(&self) -> Strategy {
        Strategy::Grid
    }
}
