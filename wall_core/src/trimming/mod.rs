//! # Beam Trimming
//!
//! Cuts floor beams back to the face of the core wall and classifies their
//! end connections: a beam that frames into the wall gets a moment connection
//! at the trimmed end, a free end stays pinned.
//!
//! ## Decision table
//!
//! | Situation                                   | Result                              |
//! |---------------------------------------------|-------------------------------------|
//! | no intersection                             | unchanged, both ends pinned         |
//! | start inside a ring, ≥1 intersection        | start → nearest hit, moment         |
//! | end inside a ring, ≥1 intersection          | end → farthest hit, moment          |
//! | neither inside, ≥2 intersections            | both ends → nearest/farthest        |
//! | neither inside, 1 intersection (not a touch)| unchanged + [`TrimWarningKind::SingleCrossing`] |
//! | any case with >2 intersections              | as above + [`TrimWarningKind::MultipleCrossings`] |
//!
//! Problems that still leave a usable beam are reported as [`TrimWarning`]s
//! next to the result. Only beams with no usable geometry are errors.
//!
//! ## Example
//!
//! ```rust
//! use nalgebra::Point2;
//! use wall_core::geometry::CoreWallGeometry;
//! use wall_core::outline::WallOutline;
//! use wall_core::trimming::{BeamSegment, BeamTrimmer, ConnectionType};
//!
//! let geometry = CoreWallGeometry::tube(500.0, 6000.0, 8000.0).unwrap();
//! let trimmer = BeamTrimmer::new(WallOutline::generate(&geometry));
//!
//! // Beam running from the shaft out to a column at x = 11 m
//! let beam = BeamSegment::new(Point2::new(3000.0, 4000.0), Point2::new(11000.0, 4000.0), 300.0);
//! let outcome = trimmer.trim_beam(&beam).unwrap();
//!
//! assert!(outcome.beam.trimmed_start);
//! assert_eq!(outcome.beam.trimmed_geometry.start, Point2::new(6000.0, 4000.0));
//! assert_eq!(outcome.beam.start_connection, ConnectionType::Moment);
//! assert_eq!(outcome.beam.end_connection, ConnectionType::Pinned);
//! ```

mod intersect;

pub use intersect::{
    point_in_polygon, segment_intersection, TrimTolerances, PARALLEL_EPSILON,
    PARAMETER_TOLERANCE, POINT_MERGE_TOLERANCE,
};

use std::fmt;

use nalgebra::{distance, Point2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{WallError, WallResult};
use crate::outline::WallOutline;

// ============================================================================
// Beam types
// ============================================================================

/// A straight segment in plan (mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: Point2<f64>,
    pub end: Point2<f64>,
}

impl LineSegment {
    pub fn new(start: Point2<f64>, end: Point2<f64>) -> Self {
        LineSegment { start, end }
    }

    pub fn length(&self) -> f64 {
        distance(&self.start, &self.end)
    }
}

/// A floor beam centerline as drawn by the framing layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamSegment {
    pub start: Point2<f64>,
    pub end: Point2<f64>,
    /// Beam width (mm), carried through untouched
    pub width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl BeamSegment {
    pub fn new(start: Point2<f64>, end: Point2<f64>, width: f64) -> Self {
        BeamSegment {
            start,
            end,
            width,
            id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn segment(&self) -> LineSegment {
        LineSegment::new(self.start, self.end)
    }

    pub fn length(&self) -> f64 {
        self.segment().length()
    }

    /// Name used in logs and warnings: the id, else the position in the batch.
    pub fn label(&self, index: usize) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => format!("#{}", index),
        }
    }
}

/// End condition handed to the FEM model builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionType {
    /// Framed into the wall
    Moment,
    /// Free end
    Pinned,
    /// Reserved for the model builder; never produced by trimming
    Fixed,
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionType::Moment => "moment",
            ConnectionType::Pinned => "pinned",
            ConnectionType::Fixed => "fixed",
        };
        f.pad(name)
    }
}

/// Result of trimming one beam.
///
/// `trimmed_geometry` is always a sub-segment of `original_geometry`, equal to
/// it exactly when neither end was trimmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrimmedBeam {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub original_geometry: LineSegment,
    pub trimmed_geometry: LineSegment,
    pub start_connection: ConnectionType,
    pub end_connection: ConnectionType,
    pub trimmed_start: bool,
    pub trimmed_end: bool,
    /// Wall crossings sorted by distance from the original start
    pub intersection_points: Vec<Point2<f64>>,
}

impl TrimmedBeam {
    pub fn original_length(&self) -> f64 {
        self.original_geometry.length()
    }

    pub fn trimmed_length(&self) -> f64 {
        self.trimmed_geometry.length()
    }

    pub fn is_trimmed(&self) -> bool {
        self.trimmed_start || self.trimmed_end
    }
}

// ============================================================================
// Warnings
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrimWarningKind {
    /// Neither end inside the wall but the beam crosses one face only
    SingleCrossing,
    /// More than two wall edges crossed; the kept span still passes through wall
    MultipleCrossings,
    /// Trimming would leave a zero-length beam
    CollapsedSegment,
}

/// A recoverable trimming problem. The beam is still returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrimWarning {
    pub beam: String,
    pub kind: TrimWarningKind,
    pub intersection_count: usize,
}

impl TrimWarning {
    fn new(beam: &str, kind: TrimWarningKind, intersection_count: usize) -> Self {
        TrimWarning {
            beam: beam.to_string(),
            kind,
            intersection_count,
        }
    }
}

impl fmt::Display for TrimWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TrimWarningKind::SingleCrossing => write!(
                f,
                "beam {} crosses the wall once with neither end inside; left untrimmed",
                self.beam
            ),
            TrimWarningKind::MultipleCrossings => write!(
                f,
                "beam {} crosses the wall {} times; kept span still passes through wall",
                self.beam, self.intersection_count
            ),
            TrimWarningKind::CollapsedSegment => write!(
                f,
                "beam {} would collapse to zero length; left untrimmed",
                self.beam
            ),
        }
    }
}

/// A trimmed beam plus any warnings raised while trimming it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrimOutcome {
    pub beam: TrimmedBeam,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<TrimWarning>,
}

/// Per-beam results of [`BeamTrimmer::trim_multiple_beams`], in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct TrimBatch {
    outcomes: Vec<WallResult<TrimOutcome>>,
}

impl TrimBatch {
    pub fn outcomes(&self) -> &[WallResult<TrimOutcome>] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<WallResult<TrimOutcome>> {
        self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn trimmed_beams(&self) -> impl Iterator<Item = &TrimmedBeam> {
        self.outcomes.iter().filter_map(|o| o.as_ref().ok()).map(|o| &o.beam)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &TrimWarning> {
        self.outcomes
            .iter()
            .filter_map(|o| o.as_ref().ok())
            .flat_map(|o| o.warnings.iter())
    }

    /// Rejected beams as `(input index, error)`.
    pub fn errors(&self) -> impl Iterator<Item = (usize, &WallError)> {
        self.outcomes
            .iter()
            .enumerate()
            .filter_map(|(i, o)| o.as_ref().err().map(|e| (i, e)))
    }
}

// ============================================================================
// Trimmer
// ============================================================================

/// Trims beams against a fixed wall outline.
///
/// Holds the outline read-only, so one trimmer can be shared across threads.
#[derive(Debug, Clone)]
pub struct BeamTrimmer {
    outline: WallOutline,
    tolerances: TrimTolerances,
    parallel: bool,
}

impl BeamTrimmer {
    pub fn new(outline: WallOutline) -> Self {
        BeamTrimmer {
            outline,
            tolerances: TrimTolerances::default(),
            parallel: true,
        }
    }

    pub fn with_tolerances(mut self, tolerances: TrimTolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    /// Toggle rayon for [`trim_multiple_beams`](Self::trim_multiple_beams).
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn outline(&self) -> &WallOutline {
        &self.outline
    }

    pub fn tolerances(&self) -> &TrimTolerances {
        &self.tolerances
    }

    /// Crossings of the beam centerline with every ring edge, sorted by
    /// distance from the beam start, with coincident hits merged.
    pub fn detect_intersection(&self, beam: &BeamSegment) -> Vec<Point2<f64>> {
        let mut hits: Vec<(f64, Point2<f64>)> = self
            .outline
            .rings()
            .iter()
            .flat_map(|ring| ring.edges())
            .filter_map(|(a, b)| segment_intersection(beam.start, beam.end, a, b, &self.tolerances))
            .map(|p| (distance(&beam.start, &p), p))
            .collect();
        hits.sort_by(|a, b| a.0.total_cmp(&b.0));

        let merge = self.tolerances.point_merge_tolerance;
        let mut points: Vec<Point2<f64>> = Vec::with_capacity(hits.len());
        for (_, p) in hits {
            match points.last() {
                Some(last) if distance(last, &p) <= merge => {}
                _ => points.push(p),
            }
        }
        points
    }

    /// Whether a point lies inside any ring of the outline.
    pub fn is_inside(&self, point: &Point2<f64>) -> bool {
        self.outline
            .rings()
            .iter()
            .any(|ring| point_in_polygon(point, &ring.vertices))
    }

    /// Trim a single beam.
    pub fn trim_beam(&self, beam: &BeamSegment) -> WallResult<TrimOutcome> {
        self.trim_labeled(beam, &beam.label(0))
    }

    /// Trim every beam independently. One bad beam never affects the others.
    pub fn trim_multiple_beams(&self, beams: &[BeamSegment]) -> TrimBatch {
        let trim = |(index, beam): (usize, &BeamSegment)| self.trim_labeled(beam, &beam.label(index));
        let outcomes: Vec<WallResult<TrimOutcome>> = if self.parallel {
            beams.par_iter().enumerate().map(trim).collect()
        } else {
            beams.iter().enumerate().map(trim).collect()
        };
        let batch = TrimBatch { outcomes };

        log::info!(
            "Trimmed {} beams: {} cut at the wall, {} warnings, {} rejected",
            batch.len(),
            batch.trimmed_beams().filter(|b| b.is_trimmed()).count(),
            batch.warnings().count(),
            batch.errors().count()
        );
        batch
    }

    fn validate_beam(&self, beam: &BeamSegment, label: &str) -> WallResult<()> {
        let coords = [beam.start.x, beam.start.y, beam.end.x, beam.end.y];
        if coords.iter().any(|c| !c.is_finite()) {
            return Err(WallError::degenerate_beam(label, "Endpoint coordinates must be finite"));
        }
        if !beam.width.is_finite() || beam.width < 0.0 {
            return Err(WallError::degenerate_beam(
                label,
                format!("Width must be finite and non-negative, got {}", beam.width),
            ));
        }
        if beam.length() <= self.tolerances.point_merge_tolerance {
            return Err(WallError::degenerate_beam(label, "Beam has zero length"));
        }
        Ok(())
    }

    fn trim_labeled(&self, beam: &BeamSegment, label: &str) -> WallResult<TrimOutcome> {
        self.validate_beam(beam, label)?;

        let hits = self.detect_intersection(beam);
        log::trace!("beam {}: intersections {:?}", label, hits);

        if hits.is_empty() {
            log::debug!("beam {}: clear of the wall", label);
            return Ok(self.finish(beam, label, beam.start, beam.end, hits, Vec::new()));
        }
        let first = hits[0];
        let last = hits[hits.len() - 1];

        let start_inside = self.is_inside(&beam.start);
        let end_inside = self.is_inside(&beam.end);
        let mut start = beam.start;
        let mut end = beam.end;
        let mut warnings = Vec::new();

        // More than two hits means the kept span still runs through wall,
        // whichever end rule applies.
        if hits.len() > 2 {
            warnings.push(TrimWarning::new(
                label,
                TrimWarningKind::MultipleCrossings,
                hits.len(),
            ));
        }

        match (start_inside, end_inside) {
            (false, false) if hits.len() == 1 => {
                if !self.touches_endpoint(beam, &first) {
                    warnings.push(TrimWarning::new(label, TrimWarningKind::SingleCrossing, 1));
                }
                return Ok(self.finish(beam, label, start, end, hits, warnings));
            }
            (false, false) => {
                start = first;
                end = last;
            }
            (start_inside, end_inside) => {
                if start_inside {
                    start = first;
                }
                if end_inside {
                    end = last;
                }
            }
        }

        if distance(&start, &end) <= self.tolerances.point_merge_tolerance {
            warnings.push(TrimWarning::new(
                label,
                TrimWarningKind::CollapsedSegment,
                hits.len(),
            ));
            start = beam.start;
            end = beam.end;
        }

        Ok(self.finish(beam, label, start, end, hits, warnings))
    }

    fn touches_endpoint(&self, beam: &BeamSegment, point: &Point2<f64>) -> bool {
        let tol = self.tolerances.point_merge_tolerance;
        distance(point, &beam.start) <= tol || distance(point, &beam.end) <= tol
    }

    /// Snap untrimmed ends back to the original and assign connections.
    fn finish(
        &self,
        beam: &BeamSegment,
        label: &str,
        start: Point2<f64>,
        end: Point2<f64>,
        intersection_points: Vec<Point2<f64>>,
        warnings: Vec<TrimWarning>,
    ) -> TrimOutcome {
        let tol = self.tolerances.point_merge_tolerance;
        let trimmed_start = distance(&start, &beam.start) > tol;
        let trimmed_end = distance(&end, &beam.end) > tol;

        let connection = |trimmed: bool| {
            if trimmed {
                ConnectionType::Moment
            } else {
                ConnectionType::Pinned
            }
        };

        let trimmed = TrimmedBeam {
            id: beam.id.clone(),
            original_geometry: beam.segment(),
            trimmed_geometry: LineSegment::new(
                if trimmed_start { start } else { beam.start },
                if trimmed_end { end } else { beam.end },
            ),
            start_connection: connection(trimmed_start),
            end_connection: connection(trimmed_end),
            trimmed_start,
            trimmed_end,
            intersection_points,
        };

        for warning in &warnings {
            log::warn!("{}", warning);
        }
        log::debug!(
            "beam {}: {} hits, start {} ({}), end {} ({}), length {:.1} -> {:.1} mm",
            label,
            trimmed.intersection_points.len(),
            if trimmed_start { "trimmed" } else { "kept" },
            trimmed.start_connection,
            if trimmed_end { "trimmed" } else { "kept" },
            trimmed.end_connection,
            trimmed.original_length(),
            trimmed.trimmed_length()
        );

        TrimOutcome {
            beam: trimmed,
            warnings,
        }
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{CoreWallGeometry, OpeningPlacement};
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new(x, y)
    }

    fn beam(x0: f64, y0: f64, x1: f64, y1: f64) -> BeamSegment {
        BeamSegment::new(p(x0, y0), p(x1, y1), 300.0)
    }

    fn assert_near(actual: Point2<f64>, expected: Point2<f64>) {
        assert!(
            distance(&actual, &expected) < 1e-6,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    /// Closed 6 m × 8 m tube, 500 mm walls
    fn tube_trimmer() -> BeamTrimmer {
        let geometry = CoreWallGeometry::tube(500.0, 6000.0, 8000.0).unwrap();
        BeamTrimmer::new(WallOutline::generate(&geometry))
    }

    /// 3 m flanges, 6 m web, 500 mm walls
    fn i_section_trimmer() -> BeamTrimmer {
        let geometry = CoreWallGeometry::i_section(500.0, 3000.0, 6000.0).unwrap();
        BeamTrimmer::new(WallOutline::generate(&geometry))
    }

    #[test]
    fn test_beam_clear_of_wall_unchanged() {
        let b = beam(8000.0, 0.0, 8000.0, 9000.0);
        let out = tube_trimmer().trim_beam(&b).unwrap();
        assert_eq!(out.beam.trimmed_geometry, b.segment());
        assert_eq!(out.beam.start_connection, ConnectionType::Pinned);
        assert_eq!(out.beam.end_connection, ConnectionType::Pinned);
        assert!(!out.beam.is_trimmed());
        assert!(out.beam.intersection_points.is_empty());
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_pass_through_trims_both_ends() {
        // Crosses the tube at x = 0 and x = 6000
        let b = beam(-2000.0, 4000.0, 14000.0, 4000.0);
        let out = tube_trimmer().trim_beam(&b).unwrap();
        assert!(out.beam.trimmed_start && out.beam.trimmed_end);
        assert_eq!(out.beam.start_connection, ConnectionType::Moment);
        assert_eq!(out.beam.end_connection, ConnectionType::Moment);
        assert_near(out.beam.trimmed_geometry.start, p(0.0, 4000.0));
        assert_near(out.beam.trimmed_geometry.end, p(6000.0, 4000.0));
        assert_eq!(out.beam.original_geometry, b.segment());
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_start_inside_trims_start_only() {
        let b = beam(3000.0, 4000.0, 3000.0, 12000.0);
        let out = tube_trimmer().trim_beam(&b).unwrap();
        assert!(out.beam.trimmed_start);
        assert!(!out.beam.trimmed_end);
        assert_near(out.beam.trimmed_geometry.start, p(3000.0, 8000.0));
        assert_eq!(out.beam.trimmed_geometry.end, b.end);
        assert_eq!(out.beam.start_connection, ConnectionType::Moment);
        assert_eq!(out.beam.end_connection, ConnectionType::Pinned);
    }

    #[test]
    fn test_end_inside_trims_end_only() {
        let b = beam(-5000.0, 2000.0, 2000.0, 2000.0);
        let out = tube_trimmer().trim_beam(&b).unwrap();
        assert!(!out.beam.trimmed_start);
        assert!(out.beam.trimmed_end);
        assert_eq!(out.beam.trimmed_geometry.start, b.start);
        assert_near(out.beam.trimmed_geometry.end, p(0.0, 2000.0));
        assert_eq!(out.beam.start_connection, ConnectionType::Pinned);
        assert_eq!(out.beam.end_connection, ConnectionType::Moment);
    }

    #[test]
    fn test_beam_ending_on_face_is_a_touch() {
        let b = beam(-5000.0, 4000.0, 0.0, 4000.0);
        let out = tube_trimmer().trim_beam(&b).unwrap();
        assert_eq!(out.beam.intersection_points.len(), 1);
        assert!(!out.beam.is_trimmed());
        assert_eq!(out.beam.trimmed_geometry, b.segment());
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_corner_graze_warns_single_crossing() {
        // Touches the (6000, 0) corner only; both edge hits merge into one
        let b = beam(5000.0, -1000.0, 7000.0, 1000.0);
        let out = tube_trimmer().trim_beam(&b).unwrap();
        assert_eq!(out.beam.intersection_points.len(), 1);
        assert_near(out.beam.intersection_points[0], p(6000.0, 0.0));
        assert!(!out.beam.is_trimmed());
        assert_eq!(out.beam.start_connection, ConnectionType::Pinned);
        assert_eq!(out.beam.end_connection, ConnectionType::Pinned);
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].kind, TrimWarningKind::SingleCrossing);
        assert_eq!(out.warnings[0].beam, "#0");
    }

    #[test]
    fn test_notch_beam_trimmed_at_flange_face() {
        // Starts in the open notch beside the web, ends inside the top flange
        let trimmer = i_section_trimmer();
        let b = beam(2500.0, 3000.0, 2500.0, 5800.0);
        assert!(!trimmer.is_inside(&b.start));
        assert!(trimmer.is_inside(&b.end));
        let out = trimmer.trim_beam(&b).unwrap();
        assert_eq!(out.beam.intersection_points.len(), 1);
        assert!(!out.beam.trimmed_start);
        assert!(out.beam.trimmed_end);
        assert_near(out.beam.trimmed_geometry.end, p(2500.0, 5500.0));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_web_crossing_trims_to_web_faces() {
        let b = beam(-1000.0, 1000.0, 4000.0, 1000.0);
        let out = i_section_trimmer().trim_beam(&b).unwrap();
        assert_eq!(out.beam.intersection_points.len(), 2);
        assert_near(out.beam.trimmed_geometry.start, p(1250.0, 1000.0));
        assert_near(out.beam.trimmed_geometry.end, p(1750.0, 1000.0));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_multiple_crossings_warns_and_trims_outermost() {
        // x = 1000 passes through both flanges: four face crossings
        let b = beam(1000.0, -1000.0, 1000.0, 7000.0);
        let out = i_section_trimmer().trim_beam(&b).unwrap();
        assert_eq!(out.beam.intersection_points.len(), 4);
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].kind, TrimWarningKind::MultipleCrossings);
        assert_eq!(out.warnings[0].intersection_count, 4);
        assert_near(out.beam.trimmed_geometry.start, p(1000.0, 0.0));
        assert_near(out.beam.trimmed_geometry.end, p(1000.0, 6000.0));
        assert_eq!(out.beam.start_connection, ConnectionType::Moment);
        assert_eq!(out.beam.end_connection, ConnectionType::Moment);
    }

    #[test]
    fn test_inside_start_with_extra_crossings_warns() {
        // Starts inside the bottom flange, then runs up through the top flange
        let trimmer = i_section_trimmer();
        let b = beam(1000.0, 250.0, 1000.0, 7000.0);
        assert!(trimmer.is_inside(&b.start));
        let out = trimmer.trim_beam(&b).unwrap();
        assert_eq!(out.beam.intersection_points.len(), 3);
        assert!(out.beam.trimmed_start);
        assert!(!out.beam.trimmed_end);
        assert_near(out.beam.trimmed_geometry.start, p(1000.0, 500.0));
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].kind, TrimWarningKind::MultipleCrossings);
        assert_eq!(out.warnings[0].intersection_count, 3);
    }

    #[test]
    fn test_vertex_crossing_merged() {
        // Diagonal through the tube corners (0, 0) and (6000, 8000)
        let b = beam(-3000.0, -4000.0, 9000.0, 12000.0);
        let out = tube_trimmer().trim_beam(&b).unwrap();
        assert_eq!(out.beam.intersection_points.len(), 2);
        assert!(out.warnings.is_empty());
        assert_relative_eq!(out.beam.trimmed_length(), 10000.0, max_relative = 1e-9);
    }

    #[test]
    fn test_collapsed_segment_warns() {
        // Start in the bottom door ring, end in the shaft: both inside, one
        // hit at the door head, so the trim would leave a point
        let geometry = CoreWallGeometry::tube_with_openings(
            500.0,
            6000.0,
            8000.0,
            2000.0,
            None,
            OpeningPlacement::Bottom,
        )
        .unwrap();
        let trimmer = BeamTrimmer::new(WallOutline::generate(&geometry));
        let b = beam(3000.0, 250.0, 3000.0, 4000.0);
        let out = trimmer.trim_beam(&b).unwrap();
        assert_eq!(out.beam.intersection_points.len(), 1);
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].kind, TrimWarningKind::CollapsedSegment);
        assert!(!out.beam.is_trimmed());
        assert_eq!(out.beam.trimmed_geometry, b.segment());
        assert_eq!(out.beam.start_connection, ConnectionType::Pinned);
    }

    #[test]
    fn test_zero_length_beam_rejected() {
        let err = tube_trimmer().trim_beam(&beam(100.0, 100.0, 100.0, 100.0)).unwrap_err();
        assert_eq!(err.error_code(), "DEGENERATE_BEAM");

        let err = tube_trimmer()
            .trim_beam(&beam(f64::NAN, 0.0, 100.0, 100.0))
            .unwrap_err();
        assert_eq!(err.error_code(), "DEGENERATE_BEAM");
    }

    #[test]
    fn test_collinear_face_edge_ignored() {
        // Runs along the bottom face; only the two corner edges register
        let b = beam(-1000.0, 0.0, 7000.0, 0.0);
        let out = tube_trimmer().trim_beam(&b).unwrap();
        assert_eq!(out.beam.intersection_points.len(), 2);
        assert_near(out.beam.intersection_points[0], p(0.0, 0.0));
        assert_near(out.beam.intersection_points[1], p(6000.0, 0.0));
    }

    #[test]
    fn test_tube_opening_rings_are_obstacles() {
        let geometry = CoreWallGeometry::tube_with_openings(
            500.0,
            6000.0,
            8000.0,
            2000.0,
            None,
            OpeningPlacement::Bottom,
        )
        .unwrap();
        let trimmer = BeamTrimmer::new(WallOutline::generate(&geometry));
        // Straight up through the door: y = 0 (outer and door sill merged),
        // the door head at y = 500, then the top face
        let b = beam(3000.0, -2000.0, 3000.0, 10000.0);
        let out = trimmer.trim_beam(&b).unwrap();
        assert_eq!(out.beam.intersection_points.len(), 3);
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].kind, TrimWarningKind::MultipleCrossings);
        assert_near(out.beam.trimmed_geometry.start, p(3000.0, 0.0));
        assert_near(out.beam.trimmed_geometry.end, p(3000.0, 8000.0));
    }

    #[test]
    fn test_length_invariant() {
        let trimmer = tube_trimmer();
        let beams = [
            beam(-2000.0, 4000.0, 14000.0, 4000.0),
            beam(3000.0, 4000.0, 3000.0, 12000.0),
            beam(8000.0, 0.0, 8000.0, 9000.0),
            beam(-5000.0, 4000.0, 0.0, 4000.0),
            beam(5000.0, -1000.0, 7000.0, 1000.0),
            beam(-3000.0, -1000.0, 9000.0, 9500.0),
        ];
        for b in &beams {
            let out = trimmer.trim_beam(b).unwrap().beam;
            if out.is_trimmed() {
                assert!(out.trimmed_length() < out.original_length());
            } else {
                assert_eq!(out.trimmed_length(), out.original_length());
            }
        }
    }

    #[test]
    fn test_batch_keeps_order_and_errors() {
        let beams = vec![
            beam(-2000.0, 4000.0, 14000.0, 4000.0).with_id("B1"),
            beam(0.0, 0.0, 0.0, 0.0),
            beam(8000.0, 0.0, 8000.0, 9000.0).with_id("B3"),
        ];
        let batch = tube_trimmer().trim_multiple_beams(&beams);
        assert_eq!(batch.len(), 3);
        let errors: Vec<_> = batch.errors().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, 1);
        assert_eq!(
            errors[0].1,
            &WallError::degenerate_beam("#1", "Beam has zero length")
        );
        let ids: Vec<_> = batch.trimmed_beams().map(|b| b.id.clone()).collect();
        assert_eq!(ids, vec![Some("B1".to_string()), Some("B3".to_string())]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let beams: Vec<BeamSegment> = (0..64)
            .map(|i| {
                let y = -1000.0 + 150.0 * i as f64;
                beam(-2000.0, y, 3000.0 + 50.0 * i as f64, y + 300.0)
            })
            .collect();
        let parallel = tube_trimmer().trim_multiple_beams(&beams);
        let sequential = tube_trimmer().with_parallelism(false).trim_multiple_beams(&beams);
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_trimmed_beam_serialization() {
        let out = tube_trimmer()
            .trim_beam(&beam(-2000.0, 4000.0, 14000.0, 4000.0).with_id("B1"))
            .unwrap();
        let json = serde_json::to_string(&out).unwrap();
        assert!(json.contains("\"start_connection\":\"moment\""));
        assert!(!json.contains("warnings"));
        let back: TrimOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, out);
    }
}
