//! Ordering rules for the two-handle slider.
//!
//! The start handle may never pass the end handle and vice versa. Every
//! mutation of a [`RangeValue`] goes through one of these functions so the
//! pair stays ordered.

use crate::drag::Handle;

/// An ordered `(start, end)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RangeValue {
    /// Lower endpoint.
    pub start: f32,
    /// Upper endpoint.
    pub end: f32,
}

impl RangeValue {
    /// Builds a range from two endpoints in either order.
    pub fn new(a: f32, b: f32) -> Self {
        let (start, end) = order_pair(a, b);
        Self { start, end }
    }

    /// Value halfway between the endpoints.
    pub fn midpoint(&self) -> f32 {
        (self.start + self.end) / 2.0
    }

    /// Distance covered by the range.
    pub fn len(&self) -> f32 {
        self.end - self.start
    }

    /// Whether both endpoints coincide.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<(f32, f32)> for RangeValue {
    fn from((a, b): (f32, f32)) -> Self {
        Self::new(a, b)
    }
}

impl From<RangeValue> for (f32, f32) {
    fn from(range: RangeValue) -> Self {
        (range.start, range.end)
    }
}

/// Returns `(min(a, b), max(a, b))`.
pub fn order_pair(a: f32, b: f32) -> (f32, f32) {
    if b < a { (b, a) } else { (a, b) }
}

/// New start position: the candidate, held at or below the current end.
pub fn move_start(candidate: f32, current_end: f32) -> f32 {
    candidate.min(current_end)
}

/// New end position: the candidate, held at or above the current start.
pub fn move_end(candidate: f32, current_start: f32) -> f32 {
    candidate.max(current_start)
}

/// Resolves a press on the bare track.
///
/// Clicks below the midpoint of the range move the start handle, all others
/// move the end handle. Returns the chosen handle together with the updated
/// range.
pub fn route_track_click(click_value: f32, current: RangeValue) -> (Handle, RangeValue) {
    if click_value < current.midpoint() {
        let start = move_start(click_value, current.end);
        (Handle::Start, RangeValue { start, ..current })
    } else {
        let end = move_end(click_value, current.start);
        (Handle::End, RangeValue { end, ..current })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_pair() {
        assert_eq!(order_pair(3.0, 9.0), (3.0, 9.0));
        assert_eq!(order_pair(9.0, 3.0), (3.0, 9.0));
        assert_eq!(order_pair(4.0, 4.0), (4.0, 4.0));
        assert_eq!(RangeValue::from((80.0, 20.0)), RangeValue { start: 20.0, end: 80.0 });
    }

    #[test]
    fn test_len_and_empty() {
        let range = RangeValue::new(70.0, 25.0);
        assert_eq!(range.len(), 45.0);
        assert!(!range.is_empty());
        assert!(RangeValue::new(40.0, 40.0).is_empty());
        assert_eq!(RangeValue::new(40.0, 40.0).len(), 0.0);
    }

    #[test]
    fn test_move_start_never_passes_end() {
        assert_eq!(move_start(90.0, 80.0), 80.0);
        assert_eq!(move_start(10.0, 80.0), 10.0);
    }

    #[test]
    fn test_move_end_never_passes_start() {
        assert_eq!(move_end(5.0, 20.0), 20.0);
        assert_eq!(move_end(95.0, 20.0), 95.0);
    }

    #[test]
    fn test_track_click_below_midpoint_moves_start() {
        let current = RangeValue::new(20.0, 80.0);
        let (handle, next) = route_track_click(10.0, current);
        assert_eq!(handle, Handle::Start);
        assert_eq!(next, RangeValue::new(10.0, 80.0));

        let (handle, next) = route_track_click(45.0, current);
        assert_eq!(handle, Handle::Start);
        assert_eq!(next, RangeValue::new(45.0, 80.0));
    }

    #[test]
    fn test_track_click_at_or_above_midpoint_moves_end() {
        let current = RangeValue::new(20.0, 80.0);
        let (handle, next) = route_track_click(50.0, current);
        assert_eq!(handle, Handle::End);
        assert_eq!(next, RangeValue::new(20.0, 50.0));

        let (handle, next) = route_track_click(99.0, current);
        assert_eq!(handle, Handle::End);
        assert_eq!(next.end, 99.0);
    }

    #[test]
    fn test_track_click_keeps_order_on_collapsed_range() {
        let current = RangeValue::new(40.0, 40.0);
        for click in [0.0, 39.0, 40.0, 41.0, 100.0] {
            let (_, next) = route_track_click(click, current);
            assert!(next.start <= next.end, "click {click} produced {next:?}");
        }
    }
}
