//! Coverage models behind one capability.

mod fling;
mod grid;
mod stroke;

pub use fling::FlingGesture;
pub use grid::GridCoverage;
pub use stroke::StrokeCoverage;

use crate::config::Strategy;
use crate::geometry::{Point, Size};

/// Accounting policy turning pointer samples into coverage.
///
/// Models only measure; latching `revealed`, freezing coverage and the settle
/// delay are handled by [`crate::RevealEngine`].
pub trait CoverageModel: Send + std::fmt::Debug {
    /// Apply one raw sample in arrival order and return the updated coverage.
    fn apply(&mut self, point: Point, surface: Size) -> f32;

    /// The pointer was released; ends the current gesture segment.
    fn end_gesture(&mut self);

    /// Current coverage in `[0, 1]`, non-decreasing between resets.
    fn coverage(&self) -> f32;

    /// True once the model's own threshold has been exceeded.
    fn threshold_crossed(&self) -> bool;

    /// Whether crossing waits for the settle delay before `Revealed` fires.
    fn settles(&self) -> bool {
        true
    }

    fn kind(&self) -> Strategy;
}
