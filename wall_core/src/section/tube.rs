//! # Tube Core Wall with Openings
//!
//! A closed rectangular tube `L_x × L_y` of wall thickness `t`, optionally
//! pierced by one door opening centered on the bottom face and/or one on the
//! top face.
//!
//! Area and second moments use the subtraction method: gross rectangle, minus
//! the hollow, minus each opening about its own centroid. Torsion uses Bredt's
//! closed-cell formula on the as-if-solid tube, reduced by a penalty for the
//! length of wall the openings remove.

use nalgebra::Point2;

use super::SectionPropertyCalculator;
use crate::equations::{
    bredt_torsion, hollow_rectangle_area, hollow_rectangle_moment_of_inertia,
    opening_torsion_penalty, rectangular_cell_contour_integral,
};
use crate::errors::{WallError, WallResult};
use crate::geometry::{CoreWallConfiguration, CoreWallGeometry, TubeOpening, WallShape};

/// Section property calculator for the tube configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubeCalculator {
    pub(crate) wall_thickness: f64,
    pub(crate) length_x: f64,
    pub(crate) length_y: f64,
    pub(crate) opening: Option<TubeOpening>,
}

impl TubeCalculator {
    /// Build the calculator, rejecting I-section geometries.
    pub fn new(geometry: &CoreWallGeometry) -> WallResult<Self> {
        match *geometry.shape() {
            WallShape::Tube {
                length_x,
                length_y,
                opening,
            } => Ok(TubeCalculator {
                wall_thickness: geometry.wall_thickness(),
                length_x,
                length_y,
                opening,
            }),
            WallShape::ISection { .. } => Err(WallError::wrong_configuration(
                CoreWallConfiguration::TubeWithOpenings.display_name(),
                geometry.config().display_name(),
            )),
        }
    }

    /// `(k, width, height)` of the openings; zeros for a closed tube.
    fn openings(&self) -> (usize, f64, f64) {
        self.opening
            .map(|o| (o.placement.opening_count(), o.width, o.height))
            .unwrap_or((0, 0.0, 0.0))
    }

    /// Centerline dimensions of the closed cell.
    fn centerline(&self) -> (f64, f64) {
        (
            self.length_x - self.wall_thickness,
            self.length_y - self.wall_thickness,
        )
    }

    /// Bredt torsion constant before the opening penalty.
    pub fn closed_cell_torsion_constant(&self) -> f64 {
        let (b_m, d_m) = self.centerline();
        bredt_torsion(
            b_m * d_m,
            rectangular_cell_contour_integral(b_m, d_m, self.wall_thickness),
        )
    }

    /// Factor in `[0.3, 1]` applied to the closed-cell torsion constant.
    pub fn torsion_penalty(&self) -> f64 {
        let (k, w, _) = self.openings();
        opening_torsion_penalty(k, w, self.length_x)
    }
}

impl SectionPropertyCalculator for TubeCalculator {
    fn area(&self) -> f64 {
        let (k, w, h) = self.openings();
        hollow_rectangle_area(self.length_x, self.length_y, self.wall_thickness, k, w, h)
    }

    fn centroid(&self) -> Point2<f64> {
        Point2::new(self.length_x / 2.0, self.length_y / 2.0)
    }

    fn i_xx(&self) -> f64 {
        let (k, w, h) = self.openings();
        hollow_rectangle_moment_of_inertia(self.length_x, self.length_y, self.wall_thickness, k, w, h)
    }

    fn i_yy(&self) -> f64 {
        let (k, w, h) = self.openings();
        hollow_rectangle_moment_of_inertia(self.length_y, self.length_x, self.wall_thickness, k, h, w)
    }

    fn torsion_constant(&self) -> f64 {
        self.closed_cell_torsion_constant() * self.torsion_penalty()
    }
}
