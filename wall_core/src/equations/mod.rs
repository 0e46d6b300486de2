//! # Structural Equations
//!
//! Closed-form section formulas shared by the section calculators and the
//! geometry validation. Keeping them in one place makes each formula easy to
//! verify against its reference.
//!
//! ## Modules
//!
//! - [`section`] - Panel, hollow-rectangle and thin-walled torsion formulas
//!
//! ## Conventions
//!
//! - All lengths in millimetres, areas in mm², second moments in mm⁴
//! - `x` runs along the plan width, `y` along the plan depth
//! - `I_xx` is about the horizontal centroidal axis (resists bending from
//!   loads acting in `y`)

pub mod section;

pub use section::{
    bredt_torsion,
    composite_centroid,
    hollow_rectangle_area,
    hollow_rectangle_moment_of_inertia,
    open_section_torsion,
    opening_torsion_penalty,
    parallel_axis,
    radius_of_gyration,
    rectangular_area,
    rectangular_cell_contour_integral,
    rectangular_moment_of_inertia,
    TORSION_PENALTY_FLOOR,
};
