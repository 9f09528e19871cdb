//! Planar geometry used by the measurement overlay.

use serde::{Deserialize, Serialize};

/// A 2D coordinate in overlay-local pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this point shifted by the given offsets.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Direction of the vector from `self` to `other`, in radians.
    fn heading_to(self, other: Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Interior angle at `vertex`, in degrees, formed by the rays towards `from`
/// and `to`.
///
/// The result is always the non-reflex measure in `[0, 180]`. Coincident
/// points produce `0.0` because both headings collapse to the same value.
pub fn angle_at(from: Point, vertex: Point, to: Point) -> f64 {
    let radians = vertex.heading_to(to) - vertex.heading_to(from);
    let degrees = radians.to_degrees().abs();
    if degrees > 180.0 {
        360.0 - degrees
    } else {
        degrees
    }
}

/// Interior angles along a polyline: one value per interior vertex.
///
/// `angles[i]` is measured at `points[i + 1]`. Fewer than three points yield
/// an empty sequence.
pub fn polyline_angles(points: &[Point]) -> Vec<f64> {
    points
        .windows(3)
        .map(|w| angle_at(w[0], w[1], w[2]))
        .collect()
}
