use crate::model::{DisplayPoint, VectorPoint};

/// Road artwork placement on the Foxhole world map tiles
pub const FOXHOLE_PROJECTION: CoordinateProjector = CoordinateProjector::new(107.0, -140.0, 0.12);

/// Affine map between vector space and display space.
///
/// A vector point `(x, y)` lands at
/// `lng = origin_lng + scale * x`, `lat = origin_lat - scale * y`.
/// The y axis flips because SVG y grows downward while latitude grows upward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateProjector {
    origin_lng: f64,
    origin_lat: f64,
    scale: f64,
}

impl CoordinateProjector {
    /// `scale` must be non-zero
    pub const fn new(origin_lng: f64, origin_lat: f64, scale: f64) -> Self {
        Self {
            origin_lng,
            origin_lat,
            scale,
        }
    }

    pub fn to_display_space(&self, point: VectorPoint) -> DisplayPoint {
        DisplayPoint::new(
            self.origin_lat - self.scale * point.y(),
            self.origin_lng + self.scale * point.x(),
        )
    }

    pub fn to_vector_space(&self, point: DisplayPoint) -> VectorPoint {
        VectorPoint::new(
            (point.lng() - self.origin_lng) / self.scale,
            (self.origin_lat - point.lat()) / self.scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn vector_origin_maps_to_projection_origin() {
        let display = FOXHOLE_PROJECTION.to_display_space(VectorPoint::new(0.0, 0.0));
        assert_eq!(display, DisplayPoint::new(-140.0, 107.0));
    }

    #[test]
    fn matches_viewer_road_overlay() {
        // the viewer placed road point [x, y] at [-140 + y * -0.12, 107 + x * 0.12]
        let display = FOXHOLE_PROJECTION.to_display_space(VectorPoint::new(500.0, 250.0));
        assert!((display.lat() - (-140.0 - 30.0)).abs() < EPS);
        assert!((display.lng() - (107.0 + 60.0)).abs() < EPS);
    }

    #[test]
    fn to_vector_space_inverts_display_space() {
        let vector = FOXHOLE_PROJECTION.to_vector_space(DisplayPoint::new(-170.0, 167.0));
        assert!((vector.x() - 500.0).abs() < 1e-6);
        assert!((vector.y() - 250.0).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn display_round_trip(lat in -256.0f64..0.0, lng in -50.0f64..306.0) {
            let point = DisplayPoint::new(lat, lng);
            let back = FOXHOLE_PROJECTION.to_display_space(FOXHOLE_PROJECTION.to_vector_space(point));
            prop_assert!((back.lat() - lat).abs() < EPS);
            prop_assert!((back.lng() - lng).abs() < EPS);
        }

        #[test]
        fn vector_round_trip(x in -1000.0f64..3000.0, y in -1000.0f64..3000.0) {
            let point = VectorPoint::new(x, y);
            let back = FOXHOLE_PROJECTION.to_vector_space(FOXHOLE_PROJECTION.to_display_space(point));
            prop_assert!((back.x() - x).abs() < 1e-6);
            prop_assert!((back.y() - y).abs() < 1e-6);
        }
    }
}
