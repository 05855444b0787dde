use crate::value_model::{Domain, position_to_value, value_to_percent};

/// Horizontal extent of the track in pointer coordinates.
///
/// `left` is the x position of the track's minimum end and `width` the
/// distance to its maximum end. The presentation layer reports it after each
/// layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackGeometry {
    /// X position of the minimum end.
    pub left: f32,
    /// Distance from the minimum end to the maximum end.
    pub width: f32,
}

impl TrackGeometry {
    /// Geometry from explicit edges.
    pub const fn new(left: f32, width: f32) -> Self {
        Self { left, width }
    }

    /// Geometry of a track laid out between two half handles.
    ///
    /// Handle centers stop `handle_gap + handle_width / 2` inside each edge
    /// of the component, so that is where the usable track starts and ends.
    pub fn from_component(
        component_x: f32,
        component_width: f32,
        handle_width: f32,
        handle_gap: f32,
    ) -> Self {
        let left = component_x + handle_gap + handle_width / 2.0;
        let width = (component_width - handle_width - handle_gap * 2.0).max(0.0);
        Self { left, width }
    }

    /// Whether pointer positions can be mapped onto this track.
    pub fn is_measurable(&self) -> bool {
        self.width > 0.0
    }

    /// Snapped domain value under `pointer_x`. Unmeasurable tracks yield the
    /// domain minimum.
    pub fn value_at(&self, pointer_x: f32, domain: &Domain) -> f32 {
        if !self.is_measurable() {
            tracing::debug!(width = self.width, "track has no width; falling back to min");
        }
        position_to_value(
            pointer_x,
            self.left,
            self.width,
            domain.min(),
            domain.max(),
            domain.step(),
        )
    }

    /// Pointer x of a handle sitting at `value`.
    pub fn x_for_value(&self, value: f32, domain: &Domain) -> f32 {
        let fraction = value_to_percent(domain.clamp(value), domain.min(), domain.max()) / 100.0;
        fraction.mul_add(self.width.max(0.0), self.left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_component_insets_by_half_handle_and_gap() {
        let geometry = TrackGeometry::from_component(10.0, 240.0, 16.0, 6.0);
        assert_eq!(geometry.left, 10.0 + 6.0 + 8.0);
        assert_eq!(geometry.width, 240.0 - 16.0 - 12.0);
    }

    #[test]
    fn test_from_component_too_narrow() {
        let geometry = TrackGeometry::from_component(0.0, 10.0, 16.0, 6.0);
        assert_eq!(geometry.width, 0.0);
        assert!(!geometry.is_measurable());
        assert_eq!(geometry.value_at(5.0, &Domain::default()), 0.0);
    }

    #[test]
    fn test_value_and_x_agree() {
        let domain = Domain::default();
        let geometry = TrackGeometry::new(20.0, 200.0);
        for value in [0.0, 25.0, 50.0, 100.0] {
            let x = geometry.x_for_value(value, &domain);
            assert_eq!(geometry.value_at(x, &domain), value);
        }
    }
}
