//! # Design Reports
//!
//! Everything the engine produced for one [`DesignRequest`](crate::request::DesignRequest):
//! section properties in both unit systems, the plan outline, trimmed beams
//! with their warnings, beams that were rejected, and coupling beams.
//!
//! Reports are written with [`crate::file_io::save_report`] and consumed by
//! the FEM model builder and the plan viewer.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::coupling::CouplingBeam;
use crate::errors::WallError;
use crate::outline::WallOutline;
use crate::section::{SectionProperties, SiSectionProperties};
use crate::trimming::{BeamSegment, TrimBatch, TrimWarning, TrimmedBeam};

/// A beam the trimmer could not process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedBeam {
    /// Position in the request's beam list
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub error: WallError,
}

/// Engine output for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignReport {
    pub id: Uuid,
    pub generated: DateTime<Utc>,
    pub job_id: String,
    pub section: SectionProperties,
    pub section_si: SiSectionProperties,
    pub outline: WallOutline,
    /// Successfully trimmed beams, in request order
    pub trimmed_beams: Vec<TrimmedBeam>,
    #[serde(default)]
    pub warnings: Vec<TrimWarning>,
    #[serde(default)]
    pub rejected_beams: Vec<RejectedBeam>,
    #[serde(default)]
    pub coupling_beams: Vec<CouplingBeam>,
}

impl DesignReport {
    /// Build a report from component results. `beams` is the input list the
    /// batch was produced from, used to name rejected beams.
    pub fn assemble(
        job_id: String,
        section: SectionProperties,
        outline: WallOutline,
        batch: TrimBatch,
        beams: &[BeamSegment],
        coupling_beams: Vec<CouplingBeam>,
    ) -> Self {
        let mut trimmed_beams = Vec::with_capacity(batch.len());
        let mut warnings = Vec::new();
        let mut rejected_beams = Vec::new();

        for (index, outcome) in batch.into_outcomes().into_iter().enumerate() {
            match outcome {
                Ok(outcome) => {
                    trimmed_beams.push(outcome.beam);
                    warnings.extend(outcome.warnings);
                }
                Err(error) => rejected_beams.push(RejectedBeam {
                    index,
                    id: beams.get(index).and_then(|b| b.id.clone()),
                    error,
                }),
            }
        }

        DesignReport {
            id: Uuid::new_v4(),
            generated: Utc::now(),
            job_id,
            section,
            section_si: section.to_si(),
            outline,
            trimmed_beams,
            warnings,
            rejected_beams,
            coupling_beams,
        }
    }

    /// Beams cut back at one or both ends.
    pub fn cut_beam_count(&self) -> usize {
        self.trimmed_beams.iter().filter(|b| b.is_trimmed()).count()
    }

    pub fn deep_beam_count(&self) -> usize {
        self.coupling_beams.iter().filter(|b| b.is_deep_beam()).count()
    }

    /// One-line summary for logs.
    pub fn summary(&self) -> String {
        format!(
            "Report {} for job '{}': {} beams ({} cut, {} rejected), {} warnings, {} coupling beams ({} deep)",
            self.id,
            self.job_id,
            self.trimmed_beams.len() + self.rejected_beams.len(),
            self.cut_beam_count(),
            self.rejected_beams.len(),
            self.warnings.len(),
            self.coupling_beams.len(),
            self.deep_beam_count()
        )
    }

    /// Multi-line plain-text rendering for terminals.
    pub fn to_text(&self) -> String {
        let s = &self.section;
        let mut out = String::new();
        let _ = writeln!(out, "Job {}  (report {})", self.job_id, self.id);
        let _ = writeln!(out, "Generated {}", self.generated.to_rfc3339());
        let _ = writeln!(out);
        let _ = writeln!(out, "SECTION PROPERTIES");
        let _ = writeln!(out, "  Area              {:>14.4e} mm²", s.area);
        let _ = writeln!(out, "  I_xx              {:>14.4e} mm⁴", s.i_xx);
        let _ = writeln!(out, "  I_yy              {:>14.4e} mm⁴", s.i_yy);
        let _ = writeln!(out, "  J                 {:>14.4e} mm⁴", s.torsion_constant);
        let _ = writeln!(out, "  Centroid          ({:.1}, {:.1}) mm", s.centroid_x, s.centroid_y);
        let _ = writeln!(out, "  r_x / r_y         {:.1} / {:.1} mm", s.radius_of_gyration_x(), s.radius_of_gyration_y());
        let _ = writeln!(out);
        let _ = writeln!(out, "OUTLINE: {} ring(s)", self.outline.rings().len());
        let _ = writeln!(out);
        let _ = writeln!(out, "BEAMS");
        // Unnamed beams go by their request position, as in warnings
        let rejected: Vec<usize> = self.rejected_beams.iter().map(|r| r.index).collect();
        let positions = (0..).filter(|i| !rejected.contains(i));
        for (beam, i) in self.trimmed_beams.iter().zip(positions) {
            let name = beam.id.clone().unwrap_or_else(|| format!("#{}", i));
            let g = &beam.trimmed_geometry;
            let _ = writeln!(
                out,
                "  {:<8} ({:>8.1}, {:>8.1}) -> ({:>8.1}, {:>8.1})  {:>6} / {:<6}  {:.0} of {:.0} mm",
                name,
                g.start.x,
                g.start.y,
                g.end.x,
                g.end.y,
                beam.start_connection,
                beam.end_connection,
                beam.trimmed_length(),
                beam.original_length()
            );
        }
        for rejected in &self.rejected_beams {
            let _ = writeln!(out, "  rejected #{}: {}", rejected.index, rejected.error);
        }
        for warning in &self.warnings {
            let _ = writeln!(out, "  warning: {}", warning);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "COUPLING BEAMS");
        if self.coupling_beams.is_empty() {
            let _ = writeln!(out, "  none");
        }
        for beam in &self.coupling_beams {
            let _ = writeln!(
                out,
                "  {:?} at ({:.0}, {:.0}): span {:.0} mm, depth {:.0} mm, ratio {:.2}{}",
                beam.side,
                beam.location_x,
                beam.location_y,
                beam.clear_span,
                beam.depth,
                beam.span_to_depth_ratio(),
                if beam.is_deep_beam() { "  DEEP" } else { "" }
            );
        }
        out
    }
}
