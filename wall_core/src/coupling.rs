//! # Coupling Beams
//!
//! Beams that link the wall piers across an opening. The FEM model builder
//! uses them to decide between ordinary flexural elements and deep-beam
//! (strut-and-tie) modelling.
//!
//! Depth rules differ by configuration:
//! - I-section: the beam spans between flange tips and takes the full story
//!   height less clearances.
//! - Tube: the beam sits over the door opening and takes the opening height
//!   less clearances.
//!
//! A beam whose depth would be zero or negative is not produced.
//!
//! ## Example
//!
//! ```rust
//! use wall_core::coupling::{generate_coupling_beams, StoryClearances};
//! use wall_core::geometry::{CoreWallGeometry, OpeningPlacement};
//!
//! let geometry = CoreWallGeometry::tube_with_openings(
//!     500.0, 6000.0, 8000.0, 2000.0, None, OpeningPlacement::TopAndBottom,
//! ).unwrap();
//! let story = StoryClearances::new(3500.0, 200.0, 200.0).unwrap();
//!
//! let beams = generate_coupling_beams(&geometry, &story);
//! assert_eq!(beams.len(), 2);
//! assert_eq!(beams[0].depth, 1600.0);
//! assert!(beams[0].is_deep_beam());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{WallError, WallResult};
use crate::geometry::{CoreWallGeometry, OpeningSide, WallShape};

/// Span-to-depth ratio below which a coupling beam is treated as deep.
pub const DEEP_BEAM_SPAN_TO_DEPTH_LIMIT: f64 = 2.0;

/// Story height and the clearances deducted from coupling beam depth (mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoryClearancesInput")]
pub struct StoryClearances {
    story_height: f64,
    top_clearance: f64,
    bottom_clearance: f64,
}

/// Unvalidated wire form of [`StoryClearances`].
#[derive(Deserialize)]
struct StoryClearancesInput {
    story_height: f64,
    #[serde(default)]
    top_clearance: f64,
    #[serde(default)]
    bottom_clearance: f64,
}

impl TryFrom<StoryClearancesInput> for StoryClearances {
    type Error = WallError;

    fn try_from(input: StoryClearancesInput) -> WallResult<Self> {
        StoryClearances::new(input.story_height, input.top_clearance, input.bottom_clearance)
    }
}

impl StoryClearances {
    pub fn new(story_height: f64, top_clearance: f64, bottom_clearance: f64) -> WallResult<Self> {
        if !story_height.is_finite() || story_height <= 0.0 {
            return Err(WallError::invalid_input(
                "story_height",
                story_height.to_string(),
                "Story height must be positive",
            ));
        }
        for (field, value) in [
            ("top_clearance", top_clearance),
            ("bottom_clearance", bottom_clearance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(WallError::invalid_input(
                    field,
                    value.to_string(),
                    "Clearance must be zero or positive",
                ));
            }
        }
        Ok(StoryClearances {
            story_height,
            top_clearance,
            bottom_clearance,
        })
    }

    pub fn story_height(&self) -> f64 {
        self.story_height
    }

    pub fn top_clearance(&self) -> f64 {
        self.top_clearance
    }

    pub fn bottom_clearance(&self) -> f64 {
        self.bottom_clearance
    }

    /// Clear height left from `height` after both clearances.
    fn clear_depth(&self, height: f64) -> f64 {
        height - self.top_clearance - self.bottom_clearance
    }
}

/// A coupling beam over an opening or between flange tips.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CouplingBeam {
    pub side: OpeningSide,
    /// Clear span between the piers (mm)
    pub clear_span: f64,
    pub depth: f64,
    pub width: f64,
    pub location_x: f64,
    pub location_y: f64,
    /// Door height for tube openings; `None` on I-sections
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_height: Option<f64>,
}

impl CouplingBeam {
    pub fn span_to_depth_ratio(&self) -> f64 {
        self.clear_span / self.depth
    }

    pub fn is_deep_beam(&self) -> bool {
        self.span_to_depth_ratio() < DEEP_BEAM_SPAN_TO_DEPTH_LIMIT
    }
}

/// Coupling beams for a validated geometry, bottom before top.
pub fn generate_coupling_beams(
    geometry: &CoreWallGeometry,
    story: &StoryClearances,
) -> Vec<CouplingBeam> {
    let t = geometry.wall_thickness();
    let candidates: Vec<CouplingBeam> = match *geometry.shape() {
        WallShape::ISection {
            flange_width,
            web_length,
        } => {
            let depth = story.clear_depth(story.story_height());
            [(OpeningSide::Bottom, 0.0), (OpeningSide::Top, web_length)]
                .into_iter()
                .map(|(side, location_y)| CouplingBeam {
                    side,
                    clear_span: flange_width,
                    depth,
                    width: t,
                    location_x: flange_width / 2.0,
                    location_y,
                    opening_height: None,
                })
                .collect()
        }
        WallShape::Tube {
            length_x,
            length_y,
            opening,
        } => match opening {
            None => Vec::new(),
            Some(opening) => opening
                .placement
                .sides()
                .iter()
                .map(|side| CouplingBeam {
                    side: *side,
                    clear_span: opening.width,
                    depth: story.clear_depth(opening.height),
                    width: t,
                    location_x: length_x / 2.0,
                    location_y: match side {
                        OpeningSide::Bottom => 0.0,
                        OpeningSide::Top => length_y,
                    },
                    opening_height: Some(opening.height),
                })
                .collect(),
        },
    };

    let beams: Vec<CouplingBeam> = candidates.into_iter().filter(|b| b.depth > 0.0).collect();
    log::debug!(
        "{} coupling beams ({} deep) for {}",
        beams.len(),
        beams.iter().filter(|b| b.is_deep_beam()).count(),
        geometry.config()
    );
    beams
}
