//! # Core Wall Geometry
//!
//! The validated parameter set every other component works from. A
//! [`CoreWallGeometry`] can only be obtained through validation, so once a
//! caller holds one, every section property and outline computation over it
//! is total.
//!
//! ## Configurations
//!
//! - **I-section**: two flanges of width `flange_width` joined by a web of
//!   total length `web_length`, all of thickness `wall_thickness`.
//! - **Tube with openings**: a closed `length_x × length_y` rectangle with
//!   zero, one or two door openings centered on the bottom and/or top faces.
//!
//! ## Example
//!
//! ```rust
//! use wall_core::geometry::{CoreWallGeometry, OpeningPlacement};
//!
//! let tube = CoreWallGeometry::tube_with_openings(
//!     500.0, 6000.0, 8000.0, 2000.0, None, OpeningPlacement::TopAndBottom,
//! ).unwrap();
//! assert_eq!(tube.opening_count(), 2);
//! assert_eq!(tube.effective_opening_height(), Some(2000.0));
//!
//! // Openings must fit strictly inside the hollow
//! assert!(CoreWallGeometry::tube_with_openings(
//!     500.0, 6000.0, 8000.0, 5000.0, None, OpeningPlacement::Top,
//! ).is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::equations::{hollow_rectangle_area, hollow_rectangle_moment_of_inertia};
use crate::errors::{WallError, WallResult};

// ============================================================================
// Configuration tags
// ============================================================================

/// Plan shape of the core wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoreWallConfiguration {
    /// Two flanges joined by a web
    ISection,
    /// Closed rectangular tube, optionally pierced by openings
    TubeWithOpenings,
}

impl CoreWallConfiguration {
    pub fn display_name(&self) -> &'static str {
        match self {
            CoreWallConfiguration::ISection => "I-section",
            CoreWallConfiguration::TubeWithOpenings => "Tube with openings",
        }
    }
}

impl fmt::Display for CoreWallConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Face of the tube that carries an opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpeningSide {
    /// Face along `y = 0`
    Bottom,
    /// Face along `y = length_y`
    Top,
}

/// Which tube faces carry an opening.
///
/// Values coming from outside the engine go through
/// [`OpeningPlacement::normalize`], which also accepts the tokens written by
/// the older dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum OpeningPlacement {
    /// Closed tube
    #[default]
    None,
    /// One opening on the top face
    Top,
    /// One opening on the bottom face
    Bottom,
    /// One opening on each of the top and bottom faces
    TopAndBottom,
}

impl OpeningPlacement {
    pub const ALL: [OpeningPlacement; 4] = [
        OpeningPlacement::None,
        OpeningPlacement::Top,
        OpeningPlacement::Bottom,
        OpeningPlacement::TopAndBottom,
    ];

    /// Parse a placement token.
    ///
    /// Canonical tokens are `none`, `top`, `bottom` and `top_and_bottom`.
    /// The older dashboard always opened both faces and wrote `Top`, `Bottom`,
    /// `Both` (or their upper-case forms) or `top_bot`; all of these mean
    /// [`OpeningPlacement::TopAndBottom`].
    /// `NONE` and the empty string mean [`OpeningPlacement::None`].
    ///
    /// ```rust
    /// use wall_core::geometry::OpeningPlacement;
    ///
    /// assert_eq!(OpeningPlacement::normalize("top").unwrap(), OpeningPlacement::Top);
    /// assert_eq!(OpeningPlacement::normalize("Top").unwrap(), OpeningPlacement::TopAndBottom);
    /// assert_eq!(OpeningPlacement::normalize("TOP").unwrap(), OpeningPlacement::TopAndBottom);
    /// assert_eq!(OpeningPlacement::normalize("BOTH").unwrap(), OpeningPlacement::TopAndBottom);
    /// assert!(OpeningPlacement::normalize("left").is_err());
    /// ```
    pub fn normalize(token: &str) -> WallResult<Self> {
        match token.trim() {
            "none" | "NONE" | "" => Ok(OpeningPlacement::None),
            "top" => Ok(OpeningPlacement::Top),
            "bottom" => Ok(OpeningPlacement::Bottom),
            "top_and_bottom" => Ok(OpeningPlacement::TopAndBottom),
            "Top" | "Bottom" | "Both" | "TOP" | "BOTTOM" | "BOTH" | "top_bot" => {
                Ok(OpeningPlacement::TopAndBottom)
            }
            other => Err(WallError::invalid_input(
                "opening_placement",
                other,
                "Expected one of none, top, bottom, top_and_bottom",
            )),
        }
    }

    /// Canonical token, as written by [`Serialize`].
    pub fn token(&self) -> &'static str {
        match self {
            OpeningPlacement::None => "none",
            OpeningPlacement::Top => "top",
            OpeningPlacement::Bottom => "bottom",
            OpeningPlacement::TopAndBottom => "top_and_bottom",
        }
    }

    /// Faces carrying an opening, bottom before top.
    pub fn sides(&self) -> &'static [OpeningSide] {
        match self {
            OpeningPlacement::None => &[],
            OpeningPlacement::Top => &[OpeningSide::Top],
            OpeningPlacement::Bottom => &[OpeningSide::Bottom],
            OpeningPlacement::TopAndBottom => &[OpeningSide::Bottom, OpeningSide::Top],
        }
    }

    pub fn opening_count(&self) -> usize {
        self.sides().len()
    }
}

impl TryFrom<String> for OpeningPlacement {
    type Error = WallError;

    fn try_from(token: String) -> WallResult<Self> {
        OpeningPlacement::normalize(&token)
    }
}

impl fmt::Display for OpeningPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

// ============================================================================
// Raw input
// ============================================================================

/// Unvalidated geometry parameters, exactly as supplied by a caller.
///
/// ## JSON Example
///
/// ```json
/// {
///   "config": "tube_with_openings",
///   "wall_thickness": 500.0,
///   "length_x": 6000.0,
///   "length_y": 8000.0,
///   "opening_width": 2000.0,
///   "opening_placement": "top_and_bottom"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreWallGeometryInput {
    pub config: CoreWallConfiguration,

    /// Wall thickness (mm)
    pub wall_thickness: f64,

    /// I-section flange width (mm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flange_width: Option<f64>,

    /// I-section overall web length, flange outer face to outer face (mm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_length: Option<f64>,

    /// Tube outer dimension along x (mm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_x: Option<f64>,

    /// Tube outer dimension along y (mm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_y: Option<f64>,

    /// Opening width along the face (mm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_width: Option<f64>,

    /// Opening height (mm); `opening_width` is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_height: Option<f64>,

    #[serde(default)]
    pub opening_placement: OpeningPlacement,
}

impl CoreWallGeometryInput {
    /// Validate the parameters and build the immutable geometry.
    pub fn validate(self) -> WallResult<CoreWallGeometry> {
        let t = self.wall_thickness;
        require_positive("wall_thickness", t)?;

        let shape = match self.config {
            CoreWallConfiguration::ISection => {
                let flange_width = require_dimension("flange_width", self.flange_width)?;
                let web_length = require_dimension("web_length", self.web_length)?;
                require_exceeds_double_thickness("flange_width", flange_width, t)?;
                require_exceeds_double_thickness("web_length", web_length, t)?;
                WallShape::ISection {
                    flange_width,
                    web_length,
                }
            }
            CoreWallConfiguration::TubeWithOpenings => {
                let length_x = require_dimension("length_x", self.length_x)?;
                let length_y = require_dimension("length_y", self.length_y)?;
                require_exceeds_double_thickness("length_x", length_x, t)?;
                require_exceeds_double_thickness("length_y", length_y, t)?;

                let opening = match self.opening_placement {
                    OpeningPlacement::None => None,
                    placement => {
                        let width = require_dimension("opening_width", self.opening_width)?;
                        require_positive("opening_width", width)?;
                        let height = self.opening_height.unwrap_or(width);
                        require_positive("opening_height", height)?;

                        let inner_width = length_x - 2.0 * t;
                        let inner_height = length_y - 2.0 * t;
                        if width >= inner_width {
                            return Err(WallError::opening_too_large(
                                "opening_width",
                                width,
                                inner_width,
                            ));
                        }
                        if height >= inner_height {
                            return Err(WallError::opening_too_large(
                                "opening_height",
                                height,
                                inner_height,
                            ));
                        }
                        Some(TubeOpening {
                            width,
                            height,
                            placement,
                        })
                    }
                };

                let shape = WallShape::Tube {
                    length_x,
                    length_y,
                    opening,
                };
                require_positive_net_section(&shape, t)?;
                shape
            }
        };

        let geometry = CoreWallGeometry {
            wall_thickness: t,
            shape,
        };
        log::debug!("validated core wall geometry: {}", geometry);
        Ok(geometry)
    }
}

fn require_dimension(field: &str, value: Option<f64>) -> WallResult<f64> {
    value.ok_or_else(|| WallError::missing_dimension(field))
}

fn require_positive(field: &str, value: f64) -> WallResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(WallError::degenerate_geometry(
            field,
            value.to_string(),
            "Must be a finite positive length",
        ));
    }
    Ok(())
}

fn require_exceeds_double_thickness(field: &str, value: f64, t: f64) -> WallResult<()> {
    if !value.is_finite() || value <= 2.0 * t {
        return Err(WallError::degenerate_geometry(
            field,
            value.to_string(),
            format!("Must exceed twice the wall thickness ({} mm)", 2.0 * t),
        ));
    }
    Ok(())
}

fn require_positive_net_section(shape: &WallShape, t: f64) -> WallResult<()> {
    if let WallShape::Tube {
        length_x,
        length_y,
        opening,
    } = shape
    {
        let (k, w, h) = opening
            .map(|o| (o.placement.opening_count(), o.width, o.height))
            .unwrap_or((0, 0.0, 0.0));
        let checks = [
            ("area", hollow_rectangle_area(*length_x, *length_y, t, k, w, h)),
            (
                "i_xx",
                hollow_rectangle_moment_of_inertia(*length_x, *length_y, t, k, w, h),
            ),
            (
                "i_yy",
                hollow_rectangle_moment_of_inertia(*length_y, *length_x, t, k, h, w),
            ),
        ];
        for (property, value) in checks {
            if value <= 0.0 {
                return Err(WallError::degenerate_geometry(
                    "opening_width",
                    w.to_string(),
                    format!("Openings remove all of the net {} ({})", property, value),
                ));
            }
        }
    }
    Ok(())
}

// ============================================================================
// Validated geometry
// ============================================================================

/// An opening cut through a tube face. Only exists for non-`None` placements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TubeOpening {
    /// Width along the face (mm)
    pub width: f64,
    /// Effective height (mm), already defaulted from the width
    pub height: f64,
    pub placement: OpeningPlacement,
}

/// Configuration-specific dimensions of a validated geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WallShape {
    ISection {
        flange_width: f64,
        web_length: f64,
    },
    Tube {
        length_x: f64,
        length_y: f64,
        opening: Option<TubeOpening>,
    },
}

/// Validated, immutable core wall geometry (all lengths in mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CoreWallGeometryInput", into = "CoreWallGeometryInput")]
pub struct CoreWallGeometry {
    wall_thickness: f64,
    shape: WallShape,
}

impl CoreWallGeometry {
    /// Build an I-section geometry.
    pub fn i_section(wall_thickness: f64, flange_width: f64, web_length: f64) -> WallResult<Self> {
        CoreWallGeometryInput {
            config: CoreWallConfiguration::ISection,
            wall_thickness,
            flange_width: Some(flange_width),
            web_length: Some(web_length),
            length_x: None,
            length_y: None,
            opening_width: None,
            opening_height: None,
            opening_placement: OpeningPlacement::None,
        }
        .validate()
    }

    /// Build a closed tube without openings.
    pub fn tube(wall_thickness: f64, length_x: f64, length_y: f64) -> WallResult<Self> {
        Self::tube_input(wall_thickness, length_x, length_y, None, None, OpeningPlacement::None)
            .validate()
    }

    /// Build a tube with openings. `opening_height` defaults to `opening_width`.
    pub fn tube_with_openings(
        wall_thickness: f64,
        length_x: f64,
        length_y: f64,
        opening_width: f64,
        opening_height: Option<f64>,
        placement: OpeningPlacement,
    ) -> WallResult<Self> {
        Self::tube_input(
            wall_thickness,
            length_x,
            length_y,
            Some(opening_width),
            opening_height,
            placement,
        )
        .validate()
    }

    fn tube_input(
        wall_thickness: f64,
        length_x: f64,
        length_y: f64,
        opening_width: Option<f64>,
        opening_height: Option<f64>,
        opening_placement: OpeningPlacement,
    ) -> CoreWallGeometryInput {
        CoreWallGeometryInput {
            config: CoreWallConfiguration::TubeWithOpenings,
            wall_thickness,
            flange_width: None,
            web_length: None,
            length_x: Some(length_x),
            length_y: Some(length_y),
            opening_width,
            opening_height,
            opening_placement,
        }
    }

    pub fn config(&self) -> CoreWallConfiguration {
        match self.shape {
            WallShape::ISection { .. } => CoreWallConfiguration::ISection,
            WallShape::Tube { .. } => CoreWallConfiguration::TubeWithOpenings,
        }
    }

    pub fn wall_thickness(&self) -> f64 {
        self.wall_thickness
    }

    pub fn shape(&self) -> &WallShape {
        &self.shape
    }

    /// Tube opening, if the placement is not `None`.
    pub fn opening(&self) -> Option<&TubeOpening> {
        match &self.shape {
            WallShape::Tube { opening, .. } => opening.as_ref(),
            WallShape::ISection { .. } => None,
        }
    }

    /// Opening placement; always `None` for an I-section.
    pub fn opening_placement(&self) -> OpeningPlacement {
        self.opening()
            .map(|o| o.placement)
            .unwrap_or(OpeningPlacement::None)
    }

    /// Number of physical openings (0, 1 or 2).
    pub fn opening_count(&self) -> usize {
        self.opening_placement().opening_count()
    }

    /// Opening height after defaulting to the opening width.
    pub fn effective_opening_height(&self) -> Option<f64> {
        self.opening().map(|o| o.height)
    }
}

impl TryFrom<CoreWallGeometryInput> for CoreWallGeometry {
    type Error = WallError;

    fn try_from(input: CoreWallGeometryInput) -> WallResult<Self> {
        input.validate()
    }
}

impl From<CoreWallGeometry> for CoreWallGeometryInput {
    fn from(geometry: CoreWallGeometry) -> Self {
        match geometry.shape {
            WallShape::ISection {
                flange_width,
                web_length,
            } => CoreWallGeometryInput {
                config: CoreWallConfiguration::ISection,
                wall_thickness: geometry.wall_thickness,
                flange_width: Some(flange_width),
                web_length: Some(web_length),
                length_x: None,
                length_y: None,
                opening_width: None,
                opening_height: None,
                opening_placement: OpeningPlacement::None,
            },
            WallShape::Tube {
                length_x,
                length_y,
                opening,
            } => CoreWallGeometry::tube_input(
                geometry.wall_thickness,
                length_x,
                length_y,
                opening.map(|o| o.width),
                opening.map(|o| o.height),
                opening
                    .map(|o| o.placement)
                    .unwrap_or(OpeningPlacement::None),
            ),
        }
    }
}

impl fmt::Display for CoreWallGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.shape {
            WallShape::ISection {
                flange_width,
                web_length,
            } => write!(
                f,
                "I-section t={} bf={} hw={}",
                self.wall_thickness, flange_width, web_length
            ),
            WallShape::Tube {
                length_x,
                length_y,
                opening,
            } => {
                write!(f, "tube t={} {}x{}", self.wall_thickness, length_x, length_y)?;
                if let Some(o) = opening {
                    write!(f, " openings={} {}x{}", o.placement, o.width, o.height)?;
                }
                Ok(())
            }
        }
    }
}
