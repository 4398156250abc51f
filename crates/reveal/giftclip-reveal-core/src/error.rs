//! Errors for reveal configuration.

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum RevealConfigError {
    /// A length (cell size, step, radius, spacing) must be positive and finite.
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    /// Coverage thresholds live strictly between 0 and 1.
    #[error("{field} must be within (0, 1), got {value}")]
    ThresholdOutOfRange { field: &'static str, value: f32 },

    /// The fling threshold is an upward (negative) displacement.
    #[error("fling threshold must be negative, got {value}")]
    FlingThresholdNotNegative { value: f32 },

    #[error("interpolation step {step} must not exceed the cell size {cell_size}")]
    StepLargerThanCell { step: f32, cell_size: f32 },
}
