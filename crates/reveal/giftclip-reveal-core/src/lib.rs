//! giftclip reveal core (engine-agnostic)
//!
//! Turns a stream of pointer samples over a 2D surface into a coverage
//! estimate and a single "revealed" transition. Three coverage models share
//! one [`CoverageModel`] contract:
//!
//! - [`GridCoverage`]: exact cell accounting with interpolated drags (default).
//! - [`StrokeCoverage`]: down-sampled erase disks with an overlap factor.
//! - [`FlingGesture`]: a single vertical fling past a displacement threshold.
//!
//! [`RevealEngine`] owns one model, latches `revealed`, and defers the
//! `Revealed` event by a settle delay advanced through `update(dt)`.

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod geometry;
pub mod model;
pub mod settle;

// Re-exports for consumers (orchestrator, wasm)
pub use config::{FlingConfig, GridConfig, RevealConfig, Strategy, StrokeConfig};
pub use engine::RevealEngine;
pub use error::RevealConfigError;
pub use events::RevealEvent;
pub use geometry::{Point, Size};
pub use model::{CoverageModel, FlingGesture, GridCoverage, StrokeCoverage};
pub use settle::SettleTimer;
