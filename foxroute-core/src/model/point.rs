//! Points in the two coordinate spaces of the map.
//!
//! Road artwork is authored in *vector space* (SVG user units, y grows
//! downward). The viewer positions everything in *display space*
//! (Leaflet `CRS.Simple` lat/lng). The two are separate types so a point
//! can only cross between them through a
//! [`CoordinateProjector`](crate::projection::CoordinateProjector).

use std::fmt;

use geo::{Distance as _, Euclidean, Point};

use crate::Distance;

/// Point in the road artwork's coordinate system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorPoint(Point<f64>);

impl VectorPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self(Point::new(x, y))
    }

    pub fn x(&self) -> f64 {
        self.0.x()
    }

    pub fn y(&self) -> f64 {
        self.0.y()
    }

    pub fn geometry(&self) -> Point<f64> {
        self.0
    }

    pub fn is_finite(&self) -> bool {
        self.x().is_finite() && self.y().is_finite()
    }

    /// Straight-line distance to `other`
    pub fn distance(&self, other: &Self) -> Distance {
        Euclidean.distance(self.0, other.0)
    }
}

impl fmt::Display for VectorPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x(), self.y())
    }
}

/// Point in the map viewer's coordinate system.
///
/// Stored as `x = lng`, `y = lat`, the same convention `geo` uses for
/// geographic points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayPoint(Point<f64>);

impl DisplayPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self(Point::new(lng, lat))
    }

    pub fn lat(&self) -> f64 {
        self.0.y()
    }

    pub fn lng(&self) -> f64 {
        self.0.x()
    }

    pub fn geometry(&self) -> Point<f64> {
        self.0
    }
}

impl fmt::Display for DisplayPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(lat={}, lng={})", self.lat(), self.lng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_distance_is_euclidean() {
        let a = VectorPoint::new(0.0, 0.0);
        let b = VectorPoint::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
        assert!((b.distance(&a) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn display_point_keeps_leaflet_order() {
        let p = DisplayPoint::new(-128.0, 64.0);
        assert_eq!(p.lat(), -128.0);
        assert_eq!(p.lng(), 64.0);
        assert_eq!(p.geometry().x(), 64.0);
    }
}
