//! Reveal configuration: strategy selection and per-strategy tuning.
//!
//! Thresholds are strategy-specific; the grid model defaults to 0.40 and the
//! stroke model to 0.85 because their coverage figures are not comparable.

use serde::{Deserialize, Serialize};

use crate::error::RevealConfigError;
use crate::model::{CoverageModel, FlingGesture, GridCoverage, StrokeCoverage};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    Grid,
    Stroke,
    Fling,
}

impl Strategy {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Stroke => "stroke",
            Self::Fling => "fling",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Side of one square cell in logical units.
    pub cell_size: f32,
    /// Interpolation step between consecutive samples of one drag.
    pub step: f32,
    pub threshold: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: 50.0,
            step: 5.0,
            threshold: 0.40,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeConfig {
    /// Samples closer than this to the last recorded one are dropped.
    pub min_spacing: f32,
    /// Radius of the disk erased around each recorded sample.
    pub radius: f32,
    /// Calibration for self-overlap of neighbouring disks.
    pub overlap_factor: f32,
    pub threshold: f32,
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self {
            min_spacing: 20.0,
            radius: 40.0,
            overlap_factor: 0.7,
            threshold: 0.85,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlingConfig {
    /// Net vertical displacement (negative is upward) that unwraps.
    pub threshold: f32,
}

impl Default for FlingConfig {
    fn default() -> Self {
        Self { threshold: -100.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub strategy: Strategy,
    pub grid: GridConfig,
    pub stroke: StrokeConfig,
    pub fling: FlingConfig,
    /// Pause between threshold crossing and the `Revealed` event.
    pub settle_delay_ms: u32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Grid,
            grid: GridConfig::default(),
            stroke: StrokeConfig::default(),
            fling: FlingConfig::default(),
            settle_delay_ms: 300,
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), RevealConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(RevealConfigError::NonPositive { field, value })
    }
}

fn unit_open(field: &'static str, value: f32) -> Result<(), RevealConfigError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(RevealConfigError::ThresholdOutOfRange { field, value })
    }
}

impl RevealConfig {
    pub fn with_strategy(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    /// Validate every strategy section, not only the selected one, so a
    /// config can be switched between strategies without surprises.
    pub fn validate(&self) -> Result<(), RevealConfigError> {
        positive("grid.cell_size", self.grid.cell_size)?;
        positive("grid.step", self.grid.step)?;
        if self.grid.step > self.grid.cell_size {
            return Err(RevealConfigError::StepLargerThanCell {
                step: self.grid.step,
                cell_size: self.grid.cell_size,
            });
        }
        unit_open("grid.threshold", self.grid.threshold)?;

        positive("stroke.min_spacing", self.stroke.min_spacing)?;
        positive("stroke.radius", self.stroke.radius)?;
        positive("stroke.overlap_factor", self.stroke.overlap_factor)?;
        unit_open("stroke.threshold", self.stroke.threshold)?;

        if !(self.fling.threshold < 0.0 && self.fling.threshold.is_finite()) {
            return Err(RevealConfigError::FlingThresholdNotNegative {
                value: self.fling.threshold,
            });
        }
        Ok(())
    }

    /// Settle delay in seconds, the unit `update(dt)` works in.
    #[inline]
    pub fn settle_delay_secs(&self) -> f32 {
        self.settle_delay_ms as f32 / 1000.0
    }

    /// Build the coverage model for the selected strategy.
    pub fn build_model(&self) -> Box<dyn CoverageModel> {
        match self.strategy {
            Strategy::Grid => Box::new(GridCoverage::new(self.grid)),
            Strategy::Stroke => Box::new(StrokeCoverage::new(self.stroke)),
            Strategy::Fling => Box::new(FlingGesture::new(self.fling)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(RevealConfig::default().validate().is_ok());
        assert_eq!(RevealConfig::default().settle_delay_secs(), 0.3);
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let mut cfg = RevealConfig::default();
        cfg.stroke.threshold = 1.0;
        assert_eq!(
            cfg.validate(),
            Err(RevealConfigError::ThresholdOutOfRange {
                field: "stroke.threshold",
                value: 1.0
            })
        );
    }

    #[test]
    fn rejects_step_wider_than_cell() {
        let mut cfg = RevealConfig::default();
        cfg.grid.step = 60.0;
        assert!(matches!(
            cfg.validate(),
            Err(RevealConfigError::StepLargerThanCell { .. })
        ));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: RevealConfig =
            serde_json::from_str(r#"{ "strategy": "stroke", "stroke": { "threshold": 0.5 } }"#)
                .expect("parse");
        assert_eq!(cfg.strategy, Strategy::Stroke);
        assert_eq!(cfg.stroke.threshold, 0.5);
        assert_eq!(cfg.stroke.radius, 40.0);
        assert_eq!(cfg.settle_delay_ms, 300);
    }
}
