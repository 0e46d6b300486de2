//! # Design Requests
//!
//! A `DesignRequest` is the root document a caller hands to the engine: the
//! wall geometry, the floor's candidate beams, optional story clearances for
//! coupling beams, and the engine settings. Requests serialize to JSON.
//!
//! ## Structure
//!
//! ```text
//! DesignRequest
//! ├── meta: RequestMetadata (schema version, engineer, job id, timestamps)
//! ├── settings: EngineSettings (trim tolerances, parallel trimming)
//! ├── geometry: CoreWallGeometry (validated on load)
//! ├── story: Option<StoryClearances>
//! └── beams: Vec<BeamSegment>
//! ```
//!
//! ## Example
//!
//! ```rust
//! use nalgebra::Point2;
//! use wall_core::geometry::CoreWallGeometry;
//! use wall_core::request::DesignRequest;
//! use wall_core::trimming::BeamSegment;
//!
//! let geometry = CoreWallGeometry::tube(500.0, 6000.0, 8000.0).unwrap();
//! let mut request = DesignRequest::new("Jane Engineer", "25-042", geometry);
//! request.add_beam(BeamSegment::new(Point2::new(3000.0, 4000.0), Point2::new(11000.0, 4000.0), 300.0));
//!
//! let report = request.evaluate();
//! assert_eq!(report.trimmed_beams.len(), 1);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::coupling::{generate_coupling_beams, StoryClearances};
use crate::geometry::CoreWallGeometry;
use crate::outline::WallOutline;
use crate::report::DesignReport;
use crate::section::section_properties;
use crate::trimming::{BeamSegment, BeamTrimmer, TrimTolerances};

/// Current schema version for request files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root request document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignRequest {
    pub meta: RequestMetadata,

    #[serde(default)]
    pub settings: EngineSettings,

    /// Validated on deserialization; an invalid geometry fails the load
    pub geometry: CoreWallGeometry,

    /// Needed for coupling beams; without it none are generated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story: Option<StoryClearances>,

    /// Candidate floor beams, trimmed in this order
    #[serde(default)]
    pub beams: Vec<BeamSegment>,
}

impl DesignRequest {
    /// Create a request with no beams and default settings.
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, geometry: CoreWallGeometry) -> Self {
        let now = Utc::now();
        DesignRequest {
            meta: RequestMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                created: now,
                modified: now,
            },
            settings: EngineSettings::default(),
            geometry,
            story: None,
            beams: Vec::new(),
        }
    }

    pub fn with_story(mut self, story: StoryClearances) -> Self {
        self.story = Some(story);
        self.touch();
        self
    }

    pub fn add_beam(&mut self, beam: BeamSegment) {
        self.beams.push(beam);
        self.touch();
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// A trimmer over this request's outline, configured from its settings.
    pub fn trimmer(&self) -> BeamTrimmer {
        BeamTrimmer::new(WallOutline::generate(&self.geometry))
            .with_tolerances(self.settings.tolerances)
            .with_parallelism(self.settings.parallel_trimming)
    }

    /// Run every component over the request.
    ///
    /// Never fails as a whole: beams that cannot be trimmed are listed in
    /// [`DesignReport::rejected_beams`] and the rest still come back.
    pub fn evaluate(&self) -> DesignReport {
        log::info!(
            "Evaluating job '{}': {}, {} beams",
            self.meta.job_id,
            self.geometry,
            self.beams.len()
        );

        let section = section_properties(&self.geometry);
        let trimmer = self.trimmer();
        let batch = trimmer.trim_multiple_beams(&self.beams);
        let coupling_beams = self
            .story
            .as_ref()
            .map(|story| generate_coupling_beams(&self.geometry, story))
            .unwrap_or_default();

        let report = DesignReport::assemble(
            self.meta.job_id.clone(),
            section,
            trimmer.outline().clone(),
            batch,
            &self.beams,
            coupling_beams,
        );
        log::info!("{}", report.summary());
        report
    }
}

/// Request metadata stored in the file header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

/// Engine settings carried with each request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Intersection tolerances for the beam trimmer
    pub tolerances: TrimTolerances,

    /// Trim beams on the rayon pool; results are identical either way
    pub parallel_trimming: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            tolerances: TrimTolerances::default(),
            parallel_trimming: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::OpeningPlacement;
    use crate::trimming::{ConnectionType, PARALLEL_EPSILON};
    use nalgebra::Point2;

    fn contract_tube() -> CoreWallGeometry {
        CoreWallGeometry::tube_with_openings(
            500.0,
            6000.0,
            8000.0,
            2000.0,
            None,
            OpeningPlacement::TopAndBottom,
        )
        .unwrap()
    }

    fn beam(x0: f64, y0: f64, x1: f64, y1: f64) -> BeamSegment {
        BeamSegment::new(Point2::new(x0, y0), Point2::new(x1, y1), 300.0)
    }

    #[test]
    fn test_request_creation() {
        let request = DesignRequest::new("John Doe", "25-001", contract_tube());
        assert_eq!(request.meta.engineer, "John Doe");
        assert_eq!(request.meta.job_id, "25-001");
        assert_eq!(request.meta.version, SCHEMA_VERSION);
        assert!(request.settings.parallel_trimming);
        assert!(request.beams.is_empty());
    }

    #[test]
    fn test_evaluate_end_to_end() {
        let story = StoryClearances::new(3500.0, 200.0, 200.0).unwrap();
        let mut request = DesignRequest::new("Engineer", "25-002", contract_tube()).with_story(story);
        request.add_beam(beam(-2000.0, 4000.0, 14000.0, 4000.0).with_id("B1"));
        request.add_beam(beam(9000.0, -1000.0, 9000.0, 9000.0).with_id("B2"));
        request.add_beam(beam(500.0, 500.0, 500.0, 500.0).with_id("B3"));

        let report = request.evaluate();
        assert_eq!(report.job_id, "25-002");
        assert_eq!(report.outline.rings().len(), 3);
        assert_eq!(report.coupling_beams.len(), 2);
        assert!(report.coupling_beams.iter().all(|b| b.is_deep_beam()));

        assert_eq!(report.trimmed_beams.len(), 2);
        let b1 = &report.trimmed_beams[0];
        assert_eq!(b1.id.as_deref(), Some("B1"));
        assert_eq!(b1.start_connection, ConnectionType::Moment);
        let b2 = &report.trimmed_beams[1];
        assert!(!b2.is_trimmed());

        assert_eq!(report.rejected_beams.len(), 1);
        assert_eq!(report.rejected_beams[0].index, 2);
        assert_eq!(report.rejected_beams[0].id.as_deref(), Some("B3"));
        assert_eq!(report.rejected_beams[0].error.error_code(), "DEGENERATE_BEAM");
    }

    #[test]
    fn test_no_story_no_coupling_beams() {
        let report = DesignRequest::new("E", "J", contract_tube()).evaluate();
        assert!(report.coupling_beams.is_empty());
        assert!(report.trimmed_beams.is_empty());
    }

    #[test]
    fn test_settings_default_when_missing() {
        let request = DesignRequest::new("E", "J", contract_tube());
        let mut value = serde_json::to_value(&request).unwrap();
        value.as_object_mut().unwrap().remove("settings");
        let back: DesignRequest = serde_json::from_value(value).unwrap();
        assert_eq!(back.settings, EngineSettings::default());
        assert_eq!(back.settings.tolerances.parallel_epsilon, PARALLEL_EPSILON);
    }

    #[test]
    fn test_request_serialization_roundtrip() {
        let mut request = DesignRequest::new("Jane Engineer", "25-042", contract_tube())
            .with_story(StoryClearances::new(3500.0, 200.0, 200.0).unwrap());
        request.add_beam(beam(0.0, -1000.0, 0.0, 9000.0).with_id("G1"));
        let json = serde_json::to_string_pretty(&request).unwrap();
        assert!(json.contains("Jane Engineer"));
        assert!(json.contains("\"top_and_bottom\""));

        let back: DesignRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
    }

    #[test]
    fn test_invalid_geometry_fails_to_load() {
        let request = DesignRequest::new("E", "J", contract_tube());
        let mut value = serde_json::to_value(&request).unwrap();
        value["geometry"]["opening_width"] = serde_json::json!(5500.0);
        let err = serde_json::from_value::<DesignRequest>(value).unwrap_err();
        assert!(err.to_string().contains("Opening too large"));
    }
}
