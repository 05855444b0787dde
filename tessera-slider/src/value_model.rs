//! Pure numeric model behind every slider.
//!
//! ## Usage
//!
//! Use these functions to restrict values to a domain, snap them to a step
//! grid, and convert between pointer positions, domain values and percents.
//! Nothing here holds state.

use crate::error::SliderError;

/// Default lower bound of a slider domain.
pub const DEFAULT_MIN: f32 = 0.0;
/// Default upper bound of a slider domain.
pub const DEFAULT_MAX: f32 = 100.0;
/// Default snapping increment.
pub const DEFAULT_STEP: f32 = 1.0;

/// Tolerance, in step units, absorbed when counting grid points in a span.
const GRID_EPSILON: f32 = 1e-4;

/// Restricts `v` to `[lo, hi]`.
///
/// NaN collapses to `lo`. Unlike [`f32::clamp`] this never panics, which
/// keeps malformed pointer input on the silent-fallback path.
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    v.max(lo).min(hi)
}

/// Number of whole steps that fit between `min` and `max`.
fn grid_steps(min: f32, max: f32, step: f32) -> f32 {
    ((max - min) / step + GRID_EPSILON).floor().max(0.0)
}

/// Rounds `raw` to the nearest multiple of `step` offset from `min`, then
/// clamps into `[min, max]`.
///
/// A `step` of zero or less disables snapping and only clamps. When `max`
/// does not sit on the step grid, the highest reachable value is the last
/// grid point below it, so snapping stays idempotent.
pub fn snap(raw: f32, min: f32, max: f32, step: f32) -> f32 {
    if !(step > 0.0 && step.is_finite()) {
        return clamp(raw, min, max);
    }
    let steps = ((raw - min) / step).round();
    let steps = clamp(steps, 0.0, grid_steps(min, max, step));
    clamp(steps.mul_add(step, min), min, max)
}

/// Maps a pointer x coordinate to a snapped domain value.
///
/// A track of zero or negative width cannot be measured against and yields
/// `min`.
pub fn position_to_value(
    pointer_x: f32,
    track_left_edge: f32,
    track_width: f32,
    min: f32,
    max: f32,
    step: f32,
) -> f32 {
    if !(track_width > 0.0) {
        return min;
    }
    let fraction = clamp((pointer_x - track_left_edge) / track_width, 0.0, 1.0);
    snap(fraction.mul_add(max - min, min), min, max, step)
}

/// Maps a domain value to a percent of the span. A degenerate domain
/// (`max == min`) reports `0`.
pub fn value_to_percent(v: f32, min: f32, max: f32) -> f32 {
    let span = max - min;
    if span <= 0.0 {
        return 0.0;
    }
    (v - min) / span * 100.0
}

/// Immutable `(min, max, step)` triple a slider lives in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    min: f32,
    max: f32,
    step: f32,
}

impl Default for Domain {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            step: DEFAULT_STEP,
        }
    }
}

impl Domain {
    /// Builds a domain, rejecting non-finite bounds and `min > max`.
    ///
    /// # Errors
    ///
    /// Returns [`SliderError`] when the bounds or step are not finite or the
    /// bounds are inverted.
    pub fn new(min: f32, max: f32, step: f32) -> Result<Self, SliderError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(SliderError::NonFiniteBound { min, max });
        }
        if min > max {
            return Err(SliderError::InvertedBounds { min, max });
        }
        if !step.is_finite() {
            return Err(SliderError::NonFiniteStep(step));
        }
        Ok(Self { min, max, step })
    }

    /// Lower bound.
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Snapping increment; zero or less means no snapping.
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Distance between the bounds.
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Whether values are snapped to a step grid.
    pub fn is_stepped(&self) -> bool {
        self.step > 0.0
    }

    /// [`clamp`] into this domain.
    pub fn clamp(&self, v: f32) -> f32 {
        clamp(v, self.min, self.max)
    }

    /// [`snap`] onto this domain's grid.
    pub fn snap(&self, raw: f32) -> f32 {
        snap(raw, self.min, self.max, self.step)
    }

    /// [`value_to_percent`] within this domain.
    pub fn percent(&self, v: f32) -> f32 {
        value_to_percent(v, self.min, self.max)
    }

    /// Number of grid intervals across the span, or `None` when unstepped.
    pub fn step_count(&self) -> Option<usize> {
        self.is_stepped()
            .then(|| grid_steps(self.min, self.max, self.step) as usize)
    }
}
