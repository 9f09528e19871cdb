use serde::{Deserialize, Serialize};

use crate::geometry::{polyline_angles, Point};

/// Ordered record of the points placed on the paused frame together with the
/// interior angles derived from them.
///
/// Points only ever grow until [`PointLedger::reset`]. The angle sequence is
/// rebuilt in full on every mutation, so `angles.len()` is always
/// `points.len().saturating_sub(2)` and `angles[i]` belongs to `points[i + 1]`.
///
/// Serialises as the bare point list; angles are rebuilt on the way back in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Point>", into = "Vec<Point>")]
pub struct PointLedger {
    points: Vec<Point>,
    angles: Vec<f64>,
}

impl PointLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a point and recomputes the angle sequence.
    ///
    /// The playback gate check lives with the caller; the ledger itself
    /// accepts any point it is handed.
    pub fn push(&mut self, point: Point) {
        self.points.push(point);
        self.recompute();
    }

    /// Clears points and angles together.
    pub fn reset(&mut self) {
        self.points.clear();
        self.angles.clear();
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Pairs every interior vertex with the angle measured at it.
    pub fn vertex_angles(&self) -> impl Iterator<Item = (Point, f64)> + '_ {
        self.points
            .iter()
            .skip(1)
            .copied()
            .zip(self.angles.iter().copied())
    }

    fn recompute(&mut self) {
        self.angles = polyline_angles(&self.points);
    }
}

impl From<Vec<Point>> for PointLedger {
    fn from(points: Vec<Point>) -> Self {
        let mut ledger = Self {
            points,
            angles: Vec::new(),
        };
        ledger.recompute();
        ledger
    }
}

impl From<PointLedger> for Vec<Point> {
    fn from(ledger: PointLedger) -> Self {
        ledger.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger_from(points: &[(f64, f64)]) -> PointLedger {
        let mut ledger = PointLedger::new();
        for &point in points {
            ledger.push(point.into());
        }
        ledger
    }

    #[test]
    fn short_polylines_have_no_angles() {
        let mut ledger = PointLedger::new();
        assert!(ledger.angles().is_empty());
        ledger.push(Point::new(1.0, 1.0));
        assert!(ledger.angles().is_empty());
        ledger.push(Point::new(2.0, 5.0));
        assert!(ledger.angles().is_empty());
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn angle_count_tracks_point_count() {
        let mut ledger = PointLedger::new();
        for n in 1..=8usize {
            ledger.push(Point::new(n as f64 * 3.0, (n * n) as f64));
            assert_eq!(ledger.angles().len(), n.saturating_sub(2));
        }
    }

    #[test]
    fn appending_keeps_existing_angles() {
        let mut ledger = ledger_from(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let before = ledger.angles().to_vec();
        ledger.push(Point::new(-4.0, 30.0));
        assert_eq!(&ledger.angles()[..1], before.as_slice());
        assert_eq!(ledger.angles().len(), 2);
    }

    #[test]
    fn right_angle_scenario() {
        let ledger = ledger_from(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        assert_eq!(ledger.angles().len(), 1);
        assert_eq!(format!("{:.2}", ledger.angles()[0]), "90.00");
    }

    #[test]
    fn reset_clears_everything() {
        let mut ledger = ledger_from(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (3.0, 3.0)]);
        ledger.reset();
        assert!(ledger.is_empty());
        assert!(ledger.points().is_empty());
        assert!(ledger.angles().is_empty());

        ledger.reset();
        assert_eq!(ledger, PointLedger::new());
    }

    #[test]
    fn preserves_placement_order() {
        let ledger = ledger_from(&[(50.0, 50.0), (0.0, 0.0), (25.0, 5.0)]);
        let xs: Vec<f64> = ledger.points().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![50.0, 0.0, 25.0]);
    }

    #[test]
    fn vertex_angles_label_middle_points() {
        let ledger = ledger_from(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        let labelled: Vec<Point> = ledger.vertex_angles().map(|(point, _)| point).collect();
        assert_eq!(labelled, vec![Point::new(10.0, 0.0), Point::new(10.0, 10.0)]);
    }

    #[test]
    fn json_round_trip_rebuilds_angles() {
        let ledger = ledger_from(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let json = serde_json::to_string(&ledger).unwrap();
        assert_eq!(json, r#"[{"x":0.0,"y":0.0},{"x":10.0,"y":0.0},{"x":10.0,"y":10.0}]"#);

        let restored: PointLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, ledger);
        assert_eq!(restored.angles().len(), 1);
    }

    #[test]
    fn deserialised_points_always_carry_their_angles() {
        let ledger: PointLedger =
            serde_json::from_str(r#"[{"x":0,"y":0},{"x":10,"y":0},{"x":10,"y":10},{"x":0,"y":10}]"#)
                .unwrap();
        assert_eq!(ledger.angles().len(), ledger.len() - 2);
        assert!((ledger.angles()[1] - 90.0).abs() < 1e-9);

        let empty: PointLedger = serde_json::from_str("[]").unwrap();
        assert!(empty.is_empty() && empty.angles().is_empty());
    }
}
