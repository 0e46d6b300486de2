//! # Cross-Section Property Formulas
//!
//! Closed-form building blocks for core wall section properties. The section
//! calculators compose these; they are kept free of any wall-specific types so
//! each formula can be checked against a textbook in isolation.
//!
//! ## Notation
//!
//! - `A` = Cross-sectional area
//! - `I` = Second moment of area
//! - `J` = Torsion constant
//! - `b` = Width of a panel (parallel to the bending axis)
//! - `d` = Depth of a panel (perpendicular to the bending axis)
//! - `t` = Wall thickness
//!
//! ## References
//!
//! - Roark's Formulas for Stress and Strain, 8th Edition, Chapter 10 (torsion)
//! - Megson, Structural and Stress Analysis, Chapter 18 (thin-walled sections)

// =============================================================================
// RECTANGULAR PANELS
// =============================================================================

/// Area of a rectangular panel
///
/// # Formula
/// A = b × d
///
/// # Example
/// ```rust
/// use wall_core::equations::section::rectangular_area;
///
/// let a = rectangular_area(3000.0, 500.0);
/// assert_eq!(a, 1_500_000.0);
/// ```
#[inline]
pub fn rectangular_area(b: f64, d: f64) -> f64 {
    b * d
}

/// Second moment of area of a rectangle about its own centroidal axis
///
/// ```text
///     ┌─────────┐
///     │         │
///   d │ ════════│ ← axis at d/2
///     │         │
///     └─────────┘
///          b
/// ```
///
/// # Formula
/// I = bd³/12
///
/// Swap the arguments for the perpendicular axis.
///
/// # Example
/// ```rust
/// use wall_core::equations::section::rectangular_moment_of_inertia;
///
/// // 500 mm web, 5000 mm long, bending about its long axis
/// let i = rectangular_moment_of_inertia(500.0, 5000.0);
/// assert!((i - 5.208333e12).abs() / 5.208333e12 < 1e-6);
/// ```
#[inline]
pub fn rectangular_moment_of_inertia(b: f64, d: f64) -> f64 {
    b * d.powi(3) / 12.0
}

// =============================================================================
// COMPOSITION
// =============================================================================

/// Transfer a local second moment to a parallel axis
///
/// # Formula
/// I = I_local + A·e²
///
/// # Arguments
/// * `i_local` - Second moment about the part's own centroid
/// * `area` - Area of the part
/// * `offset` - Distance between the part centroid and the target axis
///
/// # Example
/// ```rust
/// use wall_core::equations::section::parallel_axis;
///
/// let i = parallel_axis(3.125e10, 1.5e6, 2750.0);
/// assert!((i - 1.1375e13).abs() / 1.1375e13 < 1e-9);
/// ```
#[inline]
pub fn parallel_axis(i_local: f64, area: f64, offset: f64) -> f64 {
    i_local + area * offset * offset
}

/// Centroid coordinate of a compound shape by first moment of area
///
/// # Formula
/// x̄ = Σ(Aᵢ·xᵢ) / ΣAᵢ
///
/// Each part is given as `(area, centroid_coordinate)`. Returns `0.0` when the
/// parts carry no area.
///
/// # Example
/// ```rust
/// use wall_core::equations::section::composite_centroid;
///
/// let y = composite_centroid(&[(1.5e6, 250.0), (2.5e6, 3000.0), (1.5e6, 5750.0)]);
/// assert!((y - 3000.0).abs() < 1e-9);
/// ```
pub fn composite_centroid(parts: &[(f64, f64)]) -> f64 {
    let total_area: f64 = parts.iter().map(|(a, _)| a).sum();
    if total_area == 0.0 {
        return 0.0;
    }
    parts.iter().map(|(a, x)| a * x).sum::<f64>() / total_area
}

/// Radius of gyration r = √(I/A)
#[inline]
pub fn radius_of_gyration(i: f64, area: f64) -> f64 {
    (i / area).sqrt()
}

// =============================================================================
// HOLLOW RECTANGLES
// =============================================================================

/// Net second moment of a rectangular tube with centered rectangular cutouts
///
/// ```text
///     ┌────┬──┬────┐
///     │    └──┘    │  ← cutout ow × oh, centered on the face
///     │  ┌──────┐  │
///   d │  │ void │  │
///     │  └──────┘  │
///     │    ┌──┐    │
///     └────┴──┴────┘
///           b
/// ```
///
/// # Formula
/// I = bd³/12 − (b−2t)(d−2t)³/12 − k·(ow·oh³/12)
///
/// Cutouts are taken about their own centroid (no offset term), matching the
/// subtraction method used for preliminary core sizing.
///
/// # Arguments
/// * `b`, `d` - Outer width and depth (depth is perpendicular to the axis)
/// * `t` - Wall thickness
/// * `cutouts` - Number of cutouts `k`
/// * `ow`, `oh` - Cutout width and depth in the same orientation as `b`, `d`
pub fn hollow_rectangle_moment_of_inertia(
    b: f64,
    d: f64,
    t: f64,
    cutouts: usize,
    ow: f64,
    oh: f64,
) -> f64 {
    rectangular_moment_of_inertia(b, d)
        - rectangular_moment_of_inertia(b - 2.0 * t, d - 2.0 * t)
        - cutouts as f64 * rectangular_moment_of_inertia(ow, oh)
}

/// Net area of a rectangular tube with `cutouts` rectangular openings
///
/// # Formula
/// A = bd − (b−2t)(d−2t) − k·ow·oh
///
/// # Example
/// ```rust
/// use wall_core::equations::section::hollow_rectangle_area;
///
/// let a = hollow_rectangle_area(6000.0, 8000.0, 500.0, 2, 2000.0, 2000.0);
/// assert_eq!(a, 5_000_000.0);
/// ```
pub fn hollow_rectangle_area(b: f64, d: f64, t: f64, cutouts: usize, ow: f64, oh: f64) -> f64 {
    rectangular_area(b, d)
        - rectangular_area(b - 2.0 * t, d - 2.0 * t)
        - cutouts as f64 * rectangular_area(ow, oh)
}

// =============================================================================
// THIN-WALLED TORSION
// =============================================================================

/// Smallest fraction of closed-cell torsional stiffness kept after openings.
pub const TORSION_PENALTY_FLOOR: f64 = 0.3;

/// Torsion constant of an open thin-walled section
///
/// # Formula
/// J ≈ Σ (1/3)·bᵢ·tᵢ³
///
/// Each panel is given as `(length, thickness)`.
///
/// # Example
/// ```rust
/// use wall_core::equations::section::open_section_torsion;
///
/// let j = open_section_torsion(&[(3000.0, 500.0), (3000.0, 500.0), (5000.0, 500.0)]);
/// assert!((j - 4.583333e11).abs() / 4.583333e11 < 1e-6);
/// ```
pub fn open_section_torsion(panels: &[(f64, f64)]) -> f64 {
    panels.iter().map(|(b, t)| b * t.powi(3) / 3.0).sum()
}

/// Torsion constant of a single closed cell (Bredt-Batho)
///
/// # Formula
/// J = 4·A_m² / ∮(ds/t)
///
/// # Arguments
/// * `enclosed_area` - Area enclosed by the wall centerline, A_m
/// * `contour_integral` - ∮ds/t around the centerline
#[inline]
pub fn bredt_torsion(enclosed_area: f64, contour_integral: f64) -> f64 {
    4.0 * enclosed_area * enclosed_area / contour_integral
}

/// ∮ds/t for a rectangular cell of uniform thickness
///
/// # Formula
/// ∮ds/t = 2(b_m + d_m)/t
///
/// `b_m` and `d_m` are centerline dimensions.
#[inline]
pub fn rectangular_cell_contour_integral(b_m: f64, d_m: f64, t: f64) -> f64 {
    2.0 * (b_m + d_m) / t
}

/// Reduction factor applied to closed-cell torsion when openings cut the wall
///
/// # Formula
/// φ = max(0.3, 1 − k·w / L_face)
///
/// where `L_face` is the outer length of the face the openings sit on and
/// `k·w` the total width they remove from it.
///
/// # Example
/// ```rust
/// use wall_core::equations::section::opening_torsion_penalty;
///
/// assert_eq!(opening_torsion_penalty(0, 2000.0, 6000.0), 1.0);
/// assert_eq!(opening_torsion_penalty(2, 4000.0, 6000.0), 0.3);
/// ```
pub fn opening_torsion_penalty(openings: usize, opening_width: f64, face_length: f64) -> f64 {
    if openings == 0 || face_length <= 0.0 {
        return 1.0;
    }
    let ratio = openings as f64 * opening_width / face_length;
    (1.0 - ratio).max(TORSION_PENALTY_FLOOR)
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rectangle_basics() {
        assert_eq!(rectangular_area(1500.0, 300.0), 450_000.0);
        // I = 3000 * 500^3 / 12 = 3.125e10
        assert_relative_eq!(rectangular_moment_of_inertia(3000.0, 500.0), 3.125e10);
    }

    #[test]
    fn test_parallel_axis_zero_offset() {
        assert_eq!(parallel_axis(42.0, 1000.0, 0.0), 42.0);
    }

    #[test]
    fn test_composite_centroid_unequal_parts() {
        // 1 unit at 0, 3 units at 4 -> 3.0
        assert_relative_eq!(composite_centroid(&[(1.0, 0.0), (3.0, 4.0)]), 3.0);
        assert_eq!(composite_centroid(&[]), 0.0);
    }

    #[test]
    fn test_hollow_rectangle_matches_difference() {
        let solid = rectangular_moment_of_inertia(6000.0, 8000.0);
        let void = rectangular_moment_of_inertia(5000.0, 7000.0);
        let net = hollow_rectangle_moment_of_inertia(6000.0, 8000.0, 500.0, 0, 0.0, 0.0);
        assert_relative_eq!(net, solid - void, max_relative = 1e-12);
    }

    #[test]
    fn test_hollow_rectangle_cutouts() {
        let without = hollow_rectangle_moment_of_inertia(6000.0, 8000.0, 500.0, 0, 2000.0, 2000.0);
        let with_two = hollow_rectangle_moment_of_inertia(6000.0, 8000.0, 500.0, 2, 2000.0, 2000.0);
        assert_relative_eq!(
            without - with_two,
            2.0 * rectangular_moment_of_inertia(2000.0, 2000.0),
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_bredt_square_cell() {
        // Square cell, centerline 1000, t = 100: A_m = 1e6, ∮ds/t = 40
        let contour = rectangular_cell_contour_integral(1000.0, 1000.0, 100.0);
        assert_relative_eq!(contour, 40.0);
        assert_relative_eq!(bredt_torsion(1.0e6, contour), 1.0e11);
    }

    #[test]
    fn test_torsion_penalty_floor() {
        let phi = opening_torsion_penalty(1, 2000.0, 6000.0);
        assert_relative_eq!(phi, 1.0 - 2000.0 / 6000.0);
        assert_eq!(opening_torsion_penalty(2, 2500.0, 6000.0), TORSION_PENALTY_FLOOR);
    }

    #[test]
    fn test_radius_of_gyration_consistency() {
        let i = rectangular_moment_of_inertia(500.0, 3000.0);
        let a = rectangular_area(500.0, 3000.0);
        let r = radius_of_gyration(i, a);
        assert_relative_eq!(a * r * r, i, max_relative = 1e-12);
    }
}
