//! # Wall Outline
//!
//! Plan-view polygon rings of a core wall, used both for drawing and as the
//! obstacle set for [`crate::trimming::BeamTrimmer`].
//!
//! Every ring is closed (first vertex repeated at the end). The first ring is
//! always the outer boundary; tube openings follow as separate rings, bottom
//! before top. Callers that receive a flat vertex list split it back into
//! rings with [`split_closed_rings`].
//!
//! ## Example
//!
//! ```rust
//! use wall_core::geometry::{CoreWallGeometry, OpeningPlacement};
//! use wall_core::outline::{split_closed_rings, WallOutline};
//!
//! let geometry = CoreWallGeometry::tube_with_openings(
//!     500.0, 6000.0, 8000.0, 2000.0, None, OpeningPlacement::TopAndBottom,
//! ).unwrap();
//! let outline = WallOutline::generate(&geometry);
//! assert_eq!(outline.rings().len(), 3);
//!
//! let flat = outline.flatten();
//! assert_eq!(split_closed_rings(&flat).len(), 3);
//! ```

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::geometry::{CoreWallGeometry, OpeningSide, WallShape};

/// What a ring represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RingKind {
    Outer,
    Opening(OpeningSide),
}

/// A closed polygon ring in plan coordinates (mm).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallRing {
    pub kind: RingKind,
    pub vertices: Vec<Point2<f64>>,
}

impl WallRing {
    /// Build a closed ring from its corners, appending the closing vertex.
    pub fn closed(kind: RingKind, corners: &[Point2<f64>]) -> Self {
        let mut vertices = corners.to_vec();
        if let Some(first) = corners.first() {
            vertices.push(*first);
        }
        WallRing { kind, vertices }
    }

    /// Axis-aligned rectangle ring, counter-clockwise from the lower-left corner.
    pub fn rectangle(kind: RingKind, x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::closed(
            kind,
            &[
                Point2::new(x0, y0),
                Point2::new(x1, y0),
                Point2::new(x1, y1),
                Point2::new(x0, y1),
            ],
        )
    }

    pub fn is_closed(&self) -> bool {
        self.vertices.len() >= 4 && self.vertices.first() == self.vertices.last()
    }

    /// Consecutive vertex pairs. The closing vertex makes the last pair wrap.
    pub fn edges(&self) -> impl Iterator<Item = (Point2<f64>, Point2<f64>)> + '_ {
        self.vertices.windows(2).map(|w| (w[0], w[1]))
    }

    /// Enclosed area by the shoelace formula (mm², always positive).
    pub fn area(&self) -> f64 {
        let twice: f64 = self
            .edges()
            .map(|(p, q)| p.x * q.y - q.x * p.y)
            .sum();
        twice.abs() / 2.0
    }
}

/// Ordered set of closed rings describing the wall footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallOutline {
    rings: Vec<WallRing>,
}

impl WallOutline {
    /// Generate the outline of a validated geometry.
    pub fn generate(geometry: &CoreWallGeometry) -> Self {
        let t = geometry.wall_thickness();
        let rings = match *geometry.shape() {
            WallShape::ISection {
                flange_width,
                web_length,
            } => vec![i_section_ring(t, flange_width, web_length)],
            WallShape::Tube {
                length_x,
                length_y,
                opening,
            } => {
                let mut rings = vec![WallRing::rectangle(RingKind::Outer, 0.0, 0.0, length_x, length_y)];
                if let Some(opening) = opening {
                    let x0 = (length_x - opening.width) / 2.0;
                    let x1 = (length_x + opening.width) / 2.0;
                    for side in opening.placement.sides() {
                        let (y0, y1) = match side {
                            OpeningSide::Bottom => (0.0, t),
                            OpeningSide::Top => (length_y - t, length_y),
                        };
                        rings.push(WallRing::rectangle(RingKind::Opening(*side), x0, y0, x1, y1));
                    }
                }
                rings
            }
        };
        WallOutline { rings }
    }

    /// Build an outline from rings supplied by a caller. The first ring is
    /// treated as the outer boundary.
    pub fn from_rings(rings: Vec<WallRing>) -> Self {
        WallOutline { rings }
    }

    pub fn rings(&self) -> &[WallRing] {
        &self.rings
    }

    pub fn outer(&self) -> Option<&WallRing> {
        self.rings.first()
    }

    pub fn openings(&self) -> &[WallRing] {
        self.rings.get(1..).unwrap_or(&[])
    }

    /// All rings concatenated into one vertex list.
    pub fn flatten(&self) -> Vec<Point2<f64>> {
        self.rings
            .iter()
            .flat_map(|r| r.vertices.iter().copied())
            .collect()
    }

    /// `(min, max)` corners over every vertex, `None` for an empty outline.
    pub fn bounding_box(&self) -> Option<(Point2<f64>, Point2<f64>)> {
        let mut vertices = self.rings.iter().flat_map(|r| r.vertices.iter());
        let first = *vertices.next()?;
        Some(vertices.fold((first, first), |(lo, hi), v| {
            (
                Point2::new(lo.x.min(v.x), lo.y.min(v.y)),
                Point2::new(hi.x.max(v.x), hi.y.max(v.y)),
            )
        }))
    }
}

/// Twelve corners traced counter-clockwise from the origin, plus closure.
fn i_section_ring(t: f64, bf: f64, hw: f64) -> WallRing {
    let xl = (bf - t) / 2.0;
    let xr = (bf + t) / 2.0;
    WallRing::closed(
        RingKind::Outer,
        &[
            Point2::new(0.0, 0.0),
            Point2::new(bf, 0.0),
            Point2::new(bf, t),
            Point2::new(xr, t),
            Point2::new(xr, hw - t),
            Point2::new(bf, hw - t),
            Point2::new(bf, hw),
            Point2::new(0.0, hw),
            Point2::new(0.0, hw - t),
            Point2::new(xl, hw - t),
            Point2::new(xl, t),
            Point2::new(0.0, t),
        ],
    )
}

/// Split a flat vertex list into closed rings.
///
/// A ring ends at the first vertex (after its third) that repeats the ring's
/// starting vertex. A trailing unclosed run is returned as-is.
pub fn split_closed_rings(points: &[Point2<f64>]) -> Vec<Vec<Point2<f64>>> {
    let mut rings = Vec::new();
    let mut current: Vec<Point2<f64>> = Vec::new();
    for p in points {
        current.push(*p);
        if current.len() >= 4 && current.first() == Some(p) {
            rings.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        rings.push(current);
    }
    rings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::OpeningPlacement;
    use crate::section::section_properties;
    use approx::assert_relative_eq;

    fn tube(placement: OpeningPlacement) -> CoreWallGeometry {
        CoreWallGeometry::tube_with_openings(500.0, 6000.0, 8000.0, 2000.0, None, placement).unwrap()
    }

    #[test]
    fn test_i_section_single_13_vertex_ring() {
        let geometry = CoreWallGeometry::i_section(500.0, 3000.0, 6000.0).unwrap();
        let outline = WallOutline::generate(&geometry);
        assert_eq!(outline.rings().len(), 1);
        let ring = &outline.rings()[0];
        assert_eq!(ring.vertices.len(), 13);
        assert!(ring.is_closed());
        assert_eq!(ring.kind, RingKind::Outer);
        assert!(outline.openings().is_empty());
    }

    #[test]
    fn test_i_section_plan_area_matches_section_area() {
        let geometry = CoreWallGeometry::i_section(500.0, 3000.0, 6000.0).unwrap();
        let outline = WallOutline::generate(&geometry);
        let props = section_properties(&geometry);
        assert_relative_eq!(outline.rings()[0].area(), props.area, max_relative = 1e-12);
    }

    #[test]
    fn test_tube_ring_counts() {
        for placement in OpeningPlacement::ALL {
            let outline = WallOutline::generate(&tube(placement));
            assert_eq!(outline.rings().len(), 1 + placement.opening_count());
            for ring in outline.rings() {
                assert_eq!(ring.vertices.len(), 5);
                assert!(ring.is_closed());
            }
        }
    }

    #[test]
    fn test_tube_openings_bottom_before_top() {
        let outline = WallOutline::generate(&tube(OpeningPlacement::TopAndBottom));
        let kinds: Vec<RingKind> = outline.rings().iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RingKind::Outer,
                RingKind::Opening(OpeningSide::Bottom),
                RingKind::Opening(OpeningSide::Top)
            ]
        );
        let bottom = &outline.openings()[0];
        assert_eq!(bottom.vertices[0], Point2::new(2000.0, 0.0));
        assert_eq!(bottom.vertices[2], Point2::new(4000.0, 500.0));
        let top = &outline.openings()[1];
        assert_eq!(top.vertices[0], Point2::new(2000.0, 7500.0));
        assert_eq!(top.vertices[2], Point2::new(4000.0, 8000.0));
    }

    #[test]
    fn test_flatten_split_round_trip() {
        let i = CoreWallGeometry::i_section(500.0, 3000.0, 6000.0).unwrap();
        assert_eq!(split_closed_rings(&WallOutline::generate(&i).flatten()).len(), 1);

        for placement in OpeningPlacement::ALL {
            let outline = WallOutline::generate(&tube(placement));
            let split = split_closed_rings(&outline.flatten());
            assert_eq!(split.len(), placement.opening_count() + 1);
            for (ring, original) in split.iter().zip(outline.rings()) {
                assert_eq!(ring, &original.vertices);
            }
        }
    }

    #[test]
    fn test_bounding_box() {
        let outline = WallOutline::generate(&tube(OpeningPlacement::Top));
        let (lo, hi) = outline.bounding_box().unwrap();
        assert_eq!(lo, Point2::new(0.0, 0.0));
        assert_eq!(hi, Point2::new(6000.0, 8000.0));
        assert!(WallOutline::from_rings(Vec::new()).bounding_box().is_none());
    }

    #[test]
    fn test_outline_serialization() {
        let outline = WallOutline::generate(&tube(OpeningPlacement::Bottom));
        let json = serde_json::to_string(&outline).unwrap();
        assert!(json.contains("{\"opening\":\"bottom\"}"));
        let back: WallOutline = serde_json::from_str(&json).unwrap();
        assert_eq!(outline, back);
    }
}
