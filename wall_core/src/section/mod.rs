//! # Section Properties
//!
//! Elastic section properties of the two core wall configurations. Both
//! calculators implement [`SectionPropertyCalculator`]; [`CoreWallSection`]
//! dispatches over them so the model builder never needs to know which shape
//! it holds.
//!
//! ## Coordinate System
//!
//! Plan coordinates in millimetres with the origin at the lower-left corner of
//! the wall's bounding box. The same system is used by [`crate::outline`], so
//! centroids can be drawn directly on the outline.
//!
//! ## Example
//!
//! ```rust
//! use wall_core::geometry::CoreWallGeometry;
//! use wall_core::section::{CoreWallSection, SectionPropertyCalculator};
//!
//! let geometry = CoreWallGeometry::i_section(500.0, 3000.0, 6000.0).unwrap();
//! let props = CoreWallSection::from_geometry(&geometry).properties();
//! assert_eq!(props.area, 5_500_000.0);
//! assert_eq!(props.i_xy, 0.0);
//! ```

pub mod i_section;
pub mod tube;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::equations::radius_of_gyration;
use crate::geometry::{CoreWallGeometry, WallShape};
use crate::units::{Meters, Millimeters, Mm4, SqM, SqMm, M4};

pub use i_section::ISectionCalculator;
pub use tube::TubeCalculator;

/// Common capability set of every section calculator.
pub trait SectionPropertyCalculator {
    /// Net cross-sectional area (mm²)
    fn area(&self) -> f64;

    /// Elastic centroid in plan coordinates (mm)
    fn centroid(&self) -> Point2<f64>;

    /// Second moment about the horizontal centroidal axis (mm⁴)
    fn i_xx(&self) -> f64;

    /// Second moment about the vertical centroidal axis (mm⁴)
    fn i_yy(&self) -> f64;

    /// Product of inertia (mm⁴). Both configurations are symmetric about
    /// their centroidal axes.
    fn i_xy(&self) -> f64 {
        0.0
    }

    /// St. Venant torsion constant (mm⁴)
    fn torsion_constant(&self) -> f64;

    /// Shear center (mm). Coincides with the centroid for doubly symmetric
    /// sections.
    fn shear_center(&self) -> Point2<f64> {
        self.centroid()
    }

    /// Collect every property into one serializable record.
    fn properties(&self) -> SectionProperties {
        let centroid = self.centroid();
        let shear_center = self.shear_center();
        SectionProperties {
            area: self.area(),
            i_xx: self.i_xx(),
            i_yy: self.i_yy(),
            i_xy: self.i_xy(),
            torsion_constant: self.torsion_constant(),
            centroid_x: centroid.x,
            centroid_y: centroid.y,
            shear_center_x: shear_center.x,
            shear_center_y: shear_center.y,
        }
    }
}

/// A section calculator for either configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoreWallSection {
    ISection(ISectionCalculator),
    Tube(TubeCalculator),
}

impl CoreWallSection {
    /// Pick the calculator matching the geometry's configuration.
    ///
    /// Infallible: a validated geometry always satisfies its own calculator's
    /// preconditions.
    pub fn from_geometry(geometry: &CoreWallGeometry) -> Self {
        let t = geometry.wall_thickness();
        match *geometry.shape() {
            WallShape::ISection {
                flange_width,
                web_length,
            } => CoreWallSection::ISection(ISectionCalculator {
                wall_thickness: t,
                flange_width,
                web_length,
            }),
            WallShape::Tube {
                length_x,
                length_y,
                opening,
            } => CoreWallSection::Tube(TubeCalculator {
                wall_thickness: t,
                length_x,
                length_y,
                opening,
            }),
        }
    }

    fn inner(&self) -> &dyn SectionPropertyCalculator {
        match self {
            CoreWallSection::ISection(calc) => calc,
            CoreWallSection::Tube(calc) => calc,
        }
    }
}

impl SectionPropertyCalculator for CoreWallSection {
    fn area(&self) -> f64 {
        self.inner().area()
    }

    fn centroid(&self) -> Point2<f64> {
        self.inner().centroid()
    }

    fn i_xx(&self) -> f64 {
        self.inner().i_xx()
    }

    fn i_yy(&self) -> f64 {
        self.inner().i_yy()
    }

    fn i_xy(&self) -> f64 {
        self.inner().i_xy()
    }

    fn torsion_constant(&self) -> f64 {
        self.inner().torsion_constant()
    }

    fn shear_center(&self) -> Point2<f64> {
        self.inner().shear_center()
    }
}

/// Compute all section properties of a validated geometry.
pub fn section_properties(geometry: &CoreWallGeometry) -> SectionProperties {
    let props = CoreWallSection::from_geometry(geometry).properties();
    log::debug!(
        "section properties for {}: A={:.0} Ixx={:.4e} Iyy={:.4e} J={:.4e}",
        geometry,
        props.area,
        props.i_xx,
        props.i_yy,
        props.torsion_constant
    );
    props
}

/// Elastic section properties in mm-based units.
///
/// ## JSON Example
///
/// ```json
/// {
///   "area": 5500000.0,
///   "i_xx": 27958333333333.3,
///   "i_yy": 2302083333333.3,
///   "i_xy": 0.0,
///   "torsion_constant": 458333333333.3,
///   "centroid_x": 1500.0,
///   "centroid_y": 3000.0,
///   "shear_center_x": 1500.0,
///   "shear_center_y": 3000.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionProperties {
    /// Area (mm²)
    pub area: f64,
    /// Second moment about the horizontal centroidal axis (mm⁴)
    pub i_xx: f64,
    /// Second moment about the vertical centroidal axis (mm⁴)
    pub i_yy: f64,
    /// Product of inertia (mm⁴)
    pub i_xy: f64,
    /// Torsion constant (mm⁴)
    pub torsion_constant: f64,
    pub centroid_x: f64,
    pub centroid_y: f64,
    pub shear_center_x: f64,
    pub shear_center_y: f64,
}

impl SectionProperties {
    /// Radius of gyration about the horizontal axis (mm)
    pub fn radius_of_gyration_x(&self) -> f64 {
        radius_of_gyration(self.i_xx, self.area)
    }

    /// Radius of gyration about the vertical axis (mm)
    pub fn radius_of_gyration_y(&self) -> f64 {
        radius_of_gyration(self.i_yy, self.area)
    }

    /// Polar second moment I_xx + I_yy (mm⁴)
    pub fn polar_moment(&self) -> f64 {
        self.i_xx + self.i_yy
    }

    /// Convert to metre-based units for the FEM model builder.
    pub fn to_si(&self) -> SiSectionProperties {
        SiSectionProperties {
            area: SqMm(self.area).into(),
            i_xx: Mm4(self.i_xx).into(),
            i_yy: Mm4(self.i_yy).into(),
            i_xy: Mm4(self.i_xy).into(),
            torsion_constant: Mm4(self.torsion_constant).into(),
            centroid_x: Millimeters(self.centroid_x).into(),
            centroid_y: Millimeters(self.centroid_y).into(),
        }
    }
}

/// Section properties in metre-based units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiSectionProperties {
    pub area: SqM,
    pub i_xx: M4,
    pub i_yy: M4,
    pub i_xy: M4,
    pub torsion_constant: M4,
    pub centroid_x: Meters,
    pub centroid_y: Meters,
}
