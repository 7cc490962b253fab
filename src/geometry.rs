//! Geometry kernel.
//!
//! Pure functions for point orientation and segment intersection. Nothing here
//! knows about colors or game state.

use serde::{Deserialize, Serialize};

/// A point on the play area.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite (no NaN or infinity).
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({"x": self.x, "y": self.y})
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Rotational sense of an ordered point triplet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

impl Orientation {
    /// The opposite rotational sense. Collinear stays collinear.
    pub fn reversed(self) -> Self {
        match self {
            Self::Collinear => Self::Collinear,
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
        }
    }
}

/// Orientation of the triplet `(p, q, r)`.
///
/// Positive cross product is reported as clockwise, negative as
/// counter-clockwise. Zero-length inputs come out collinear.
pub fn orientation(p: Point, q: Point, r: Point) -> Orientation {
    let val = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
    if val > 0.0 {
        Orientation::Clockwise
    } else if val < 0.0 {
        Orientation::CounterClockwise
    } else {
        Orientation::Collinear
    }
}

/// For collinear `p`, `q`, `r`: whether `q` lies within the bounding box of `p` and `r`.
pub fn on_segment(p: Point, q: Point, r: Point) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// Whether segment `p1-q1` intersects segment `p2-q2`.
///
/// Touching endpoints and collinear overlap count as intersecting.
pub fn segments_intersect(p1: Point, q1: Point, p2: Point, q2: Point) -> bool {
    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    // Each segment straddles the other's supporting line
    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == Orientation::Collinear && on_segment(p1, p2, q1))
        || (o2 == Orientation::Collinear && on_segment(p1, q2, q1))
        || (o3 == Orientation::Collinear && on_segment(p2, p1, q2))
        || (o4 == Orientation::Collinear && on_segment(p2, q1, q2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_orientation_basic() {
        assert_eq!(
            orientation(pt(0.0, 0.0), pt(1.0, 1.0), pt(2.0, 2.0)),
            Orientation::Collinear
        );
        // (1-0)*(2-1) - (1-0)*(0-1) = 2
        assert_eq!(
            orientation(pt(0.0, 0.0), pt(1.0, 1.0), pt(2.0, 0.0)),
            Orientation::Clockwise
        );
        assert_eq!(
            orientation(pt(0.0, 0.0), pt(1.0, 1.0), pt(0.0, 2.0)),
            Orientation::CounterClockwise
        );
    }

    #[test]
    fn test_orientation_degenerate() {
        let p = pt(3.0, 4.0);
        assert_eq!(orientation(p, p, p), Orientation::Collinear);
        assert_eq!(orientation(p, p, pt(9.0, -1.0)), Orientation::Collinear);
    }

    #[test]
    fn test_on_segment() {
        assert!(on_segment(pt(0.0, 0.0), pt(1.0, 1.0), pt(2.0, 2.0)));
        assert!(on_segment(pt(2.0, 2.0), pt(2.0, 2.0), pt(0.0, 0.0))); // Endpoint
        assert!(!on_segment(pt(0.0, 0.0), pt(3.0, 3.0), pt(2.0, 2.0)));
    }

    #[test]
    fn test_proper_crossing() {
        assert!(segments_intersect(
            pt(0.0, 0.0),
            pt(1.0, 1.0),
            pt(0.0, 1.0),
            pt(1.0, 0.0)
        ));
    }

    #[test]
    fn test_disjoint() {
        assert!(!segments_intersect(
            pt(0.0, 0.0),
            pt(1.0, 1.0),
            pt(5.0, 5.0),
            pt(6.0, 7.0)
        ));
        // Parallel, not collinear
        assert!(!segments_intersect(
            pt(0.0, 0.0),
            pt(4.0, 0.0),
            pt(0.0, 1.0),
            pt(4.0, 1.0)
        ));
    }

    #[test]
    fn test_touching_endpoint_counts() {
        // T-junction: second segment ends on the first
        assert!(segments_intersect(
            pt(0.0, 0.0),
            pt(4.0, 0.0),
            pt(2.0, 3.0),
            pt(2.0, 0.0)
        ));
        // Shared endpoint, chained end to end
        assert!(segments_intersect(
            pt(0.0, 0.0),
            pt(1.0, 1.0),
            pt(1.0, 1.0),
            pt(2.0, 0.0)
        ));
    }

    #[test]
    fn test_collinear_cases() {
        // Overlapping
        assert!(segments_intersect(
            pt(0.0, 0.0),
            pt(3.0, 0.0),
            pt(2.0, 0.0),
            pt(5.0, 0.0)
        ));
        // Same line, gap between them
        assert!(!segments_intersect(
            pt(0.0, 0.0),
            pt(1.0, 0.0),
            pt(2.0, 0.0),
            pt(3.0, 0.0)
        ));
        // Coincident
        assert!(segments_intersect(
            pt(0.0, 0.0),
            pt(2.0, 2.0),
            pt(0.0, 0.0),
            pt(2.0, 2.0)
        ));
    }

    fn coord() -> impl Strategy<Value = f64> {
        // Integer-valued coordinates keep the cross product exact
        (-1000i32..1000).prop_map(f64::from)
    }

    fn point() -> impl Strategy<Value = Point> {
        (coord(), coord()).prop_map(|(x, y)| Point::new(x, y))
    }

    proptest! {
        #[test]
        fn orientation_is_antisymmetric(p in point(), q in point(), r in point()) {
            prop_assert_eq!(orientation(p, q, r), orientation(r, q, p).reversed());
        }

        #[test]
        fn intersection_ignores_segment_order(
            p1 in point(), q1 in point(), p2 in point(), q2 in point(),
        ) {
            prop_assert_eq!(
                segments_intersect(p1, q1, p2, q2),
                segments_intersect(p2, q2, p1, q1)
            );
        }

        #[test]
        fn intersection_ignores_endpoint_order(
            p1 in point(), q1 in point(), p2 in point(), q2 in point(),
        ) {
            let expected = segments_intersect(p1, q1, p2, q2);
            prop_assert_eq!(segments_intersect(q1, p1, p2, q2), expected);
            prop_assert_eq!(segments_intersect(p1, q1, q2, p2), expected);
            prop_assert_eq!(segments_intersect(q1, p1, q2, p2), expected);
        }
    }
}
