//! # Intersection Primitives
//!
//! Parametric segment intersection and ray-casting containment. The
//! tolerances are named constants so their boundary behavior can be pinned by
//! tests instead of being re-derived.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Determinant magnitude below which two segments count as parallel.
pub const PARALLEL_EPSILON: f64 = 1e-10;

/// Slack on the segment parameters: `t ∈ [−1e-6, 1 + 1e-6]` is accepted.
pub const PARAMETER_TOLERANCE: f64 = 1e-6;

/// Distance (mm) under which two plan points are the same point.
pub const POINT_MERGE_TOLERANCE: f64 = 1e-6;

/// Numeric tolerances used by the beam trimmer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimTolerances {
    pub parallel_epsilon: f64,
    pub parameter_tolerance: f64,
    pub point_merge_tolerance: f64,
}

impl Default for TrimTolerances {
    fn default() -> Self {
        TrimTolerances {
            parallel_epsilon: PARALLEL_EPSILON,
            parameter_tolerance: PARAMETER_TOLERANCE,
            point_merge_tolerance: POINT_MERGE_TOLERANCE,
        }
    }
}

/// Intersection of segments `p1→p2` and `p3→p4`.
///
/// Solves `p1 + t1·d1 = p3 + t2·d2`. Parallel and collinear pairs return
/// `None`. The returned point is clamped onto `p1→p2`, so a hit accepted
/// through the parameter slack never lies beyond the first segment.
///
/// ```rust
/// use nalgebra::Point2;
/// use wall_core::trimming::{segment_intersection, TrimTolerances};
///
/// let hit = segment_intersection(
///     Point2::new(0.0, 0.0), Point2::new(10.0, 10.0),
///     Point2::new(0.0, 10.0), Point2::new(10.0, 0.0),
///     &TrimTolerances::default(),
/// );
/// assert_eq!(hit, Some(Point2::new(5.0, 5.0)));
/// ```
pub fn segment_intersection(
    p1: Point2<f64>,
    p2: Point2<f64>,
    p3: Point2<f64>,
    p4: Point2<f64>,
    tolerances: &TrimTolerances,
) -> Option<Point2<f64>> {
    let d1 = p2 - p1;
    let d2 = p4 - p3;
    let det = d1.perp(&d2);
    if det.abs() < tolerances.parallel_epsilon {
        return None;
    }

    let w = p3 - p1;
    let t1 = w.perp(&d2) / det;
    let t2 = w.perp(&d1) / det;

    let lo = -tolerances.parameter_tolerance;
    let hi = 1.0 + tolerances.parameter_tolerance;
    if (lo..=hi).contains(&t1) && (lo..=hi).contains(&t2) {
        Some(p1 + d1 * t1.clamp(0.0, 1.0))
    } else {
        None
    }
}

/// Ray-casting parity test.
///
/// Works on closed rings (repeated last vertex) and open vertex lists alike.
/// Points exactly on an edge may land on either side.
pub fn point_in_polygon(point: &Point2<f64>, ring: &[Point2<f64>]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = ring[i];
        let b = ring[j];
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
