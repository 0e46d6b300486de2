//! # I-Section Core Wall
//!
//! Two flange walls of width `b_f` joined at mid-width by a web wall, all of
//! thickness `t`. `h_w` is measured between the outer faces of the flanges.
//!
//! ```text
//!   y
//!   ▲  ┌───────────────┐  ← top flange, y ∈ [h_w − t, h_w]
//!   │  └─────┐   ┌─────┘
//!   │        │   │        ← web, centered on x = b_f / 2
//!   │  ┌─────┘   └─────┐
//!   │  └───────────────┘  ← bottom flange, y ∈ [0, t]
//!   └────────────────────► x
//! ```
//!
//! Properties are composed panel by panel with the parallel axis theorem; the
//! torsion constant uses the open thin-walled approximation.

use nalgebra::Point2;

use super::SectionPropertyCalculator;
use crate::equations::{
    composite_centroid, open_section_torsion, parallel_axis, rectangular_area,
    rectangular_moment_of_inertia,
};
use crate::errors::{WallError, WallResult};
use crate::geometry::{CoreWallConfiguration, CoreWallGeometry, WallShape};

/// One rectangular wall panel of the section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Panel {
    /// Extent along x (mm)
    pub width: f64,
    /// Extent along y (mm)
    pub depth: f64,
    /// Panel centroid (mm)
    pub centroid: Point2<f64>,
}

impl Panel {
    pub fn area(&self) -> f64 {
        rectangular_area(self.width, self.depth)
    }
}

/// Section property calculator for the I-section configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ISectionCalculator {
    pub(crate) wall_thickness: f64,
    pub(crate) flange_width: f64,
    pub(crate) web_length: f64,
}

impl ISectionCalculator {
    /// Build the calculator, rejecting tube geometries.
    pub fn new(geometry: &CoreWallGeometry) -> WallResult<Self> {
        match *geometry.shape() {
            WallShape::ISection {
                flange_width,
                web_length,
            } => Ok(ISectionCalculator {
                wall_thickness: geometry.wall_thickness(),
                flange_width,
                web_length,
            }),
            WallShape::Tube { .. } => Err(WallError::wrong_configuration(
                CoreWallConfiguration::ISection.display_name(),
                geometry.config().display_name(),
            )),
        }
    }

    /// Clear length of the web between the flanges.
    pub fn clear_web_length(&self) -> f64 {
        self.web_length - 2.0 * self.wall_thickness
    }

    /// Bottom flange, web, top flange.
    pub fn panels(&self) -> [Panel; 3] {
        let t = self.wall_thickness;
        let bf = self.flange_width;
        let hw = self.web_length;
        let mid_x = bf / 2.0;
        [
            Panel {
                width: bf,
                depth: t,
                centroid: Point2::new(mid_x, t / 2.0),
            },
            Panel {
                width: t,
                depth: self.clear_web_length(),
                centroid: Point2::new(mid_x, hw / 2.0),
            },
            Panel {
                width: bf,
                depth: t,
                centroid: Point2::new(mid_x, hw - t / 2.0),
            },
        ]
    }
}

impl SectionPropertyCalculator for ISectionCalculator {
    fn area(&self) -> f64 {
        // 2·b_f·t + (h_w − 2t)·t
        self.panels().iter().map(Panel::area).sum()
    }

    fn centroid(&self) -> Point2<f64> {
        let panels = self.panels();
        let y_parts: Vec<(f64, f64)> = panels.iter().map(|p| (p.area(), p.centroid.y)).collect();
        Point2::new(self.flange_width / 2.0, composite_centroid(&y_parts))
    }

    fn i_xx(&self) -> f64 {
        let y_bar = self.centroid().y;
        self.panels()
            .iter()
            .map(|p| {
                parallel_axis(
                    rectangular_moment_of_inertia(p.width, p.depth),
                    p.area(),
                    p.centroid.y - y_bar,
                )
            })
            .sum()
    }

    fn i_yy(&self) -> f64 {
        let x_bar = self.centroid().x;
        self.panels()
            .iter()
            .map(|p| {
                parallel_axis(
                    rectangular_moment_of_inertia(p.depth, p.width),
                    p.area(),
                    p.centroid.x - x_bar,
                )
            })
            .sum()
    }

    fn torsion_constant(&self) -> f64 {
        let t = self.wall_thickness;
        open_section_torsion(&[
            (self.flange_width, t),
            (self.flange_width, t),
            (self.clear_web_length(), t),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn calc(t: f64, bf: f64, hw: f64) -> ISectionCalculator {
        let geometry = CoreWallGeometry::i_section(t, bf, hw).unwrap();
        ISectionCalculator::new(&geometry).unwrap()
    }

    #[test]
    fn test_worked_example() {
        let c = calc(500.0, 3000.0, 6000.0);
        assert_relative_eq!(c.area(), 5_500_000.0, max_relative = 1e-4);
        let centroid = c.centroid();
        assert_relative_eq!(centroid.x, 1500.0);
        assert_relative_eq!(centroid.y, 3000.0, max_relative = 1e-12);
        assert_relative_eq!(c.i_xx(), 27_958_333_333_333.0, max_relative = 1e-4);
        assert_relative_eq!(c.i_yy(), 2_302_083_333_333.0, max_relative = 1e-4);
        assert_relative_eq!(c.torsion_constant(), 458_333_333_333.0, max_relative = 1e-4);
    }

    #[test]
    fn test_area_formula_holds() {
        for (t, bf, hw) in [(500.0, 3000.0, 6000.0), (250.0, 4200.0, 7100.0), (350.0, 800.0, 12000.0)] {
            let c = calc(t, bf, hw);
            let expected = 2.0 * bf * t + (hw - 2.0 * t) * t;
            assert_relative_eq!(c.area(), expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_symmetric_centroid_at_mid_depth() {
        let c = calc(300.0, 2500.0, 9000.0);
        assert_relative_eq!(c.centroid().y, 4500.0, max_relative = 1e-12);
        assert_eq!(c.i_xy(), 0.0);
        assert_eq!(c.shear_center(), c.centroid());
    }

    #[test]
    fn test_rejects_tube() {
        let tube = CoreWallGeometry::tube(500.0, 6000.0, 8000.0).unwrap();
        let err = ISectionCalculator::new(&tube).unwrap_err();
        assert_eq!(err.error_code(), "WRONG_CONFIGURATION");
    }

    #[test]
    fn test_panels_cover_full_height() {
        let c = calc(500.0, 3000.0, 6000.0);
        let [bottom, web, top] = c.panels();
        assert_eq!(bottom.centroid.y - bottom.depth / 2.0, 0.0);
        assert_eq!(top.centroid.y + top.depth / 2.0, 6000.0);
        assert_eq!(web.depth, 5000.0);
    }
}
