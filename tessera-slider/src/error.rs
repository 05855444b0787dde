//! Configuration errors.
//!
//! Only construction can fail. Once a slider exists every input is clamped or
//! snapped into a defined value instead of producing an error.

use thiserror::Error;

/// Errors returned when a slider domain cannot be built from its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SliderError {
    /// `min` or `max` is NaN or infinite.
    #[error("slider bounds must be finite (min = {min}, max = {max})")]
    NonFiniteBound {
        /// Requested lower bound.
        min: f32,
        /// Requested upper bound.
        max: f32,
    },
    /// `min` is greater than `max`.
    #[error("slider min ({min}) must not exceed max ({max})")]
    InvertedBounds {
        /// Requested lower bound.
        min: f32,
        /// Requested upper bound.
        max: f32,
    },
    /// `step` is NaN or infinite. Zero or negative steps are accepted and
    /// disable snapping.
    #[error("slider step must be finite, got {0}")]
    NonFiniteStep(f32),
}
