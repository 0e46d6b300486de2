//! # Unit Types
//!
//! Lightweight newtype wrappers for the metric units the engine exchanges with
//! its collaborators. Everything inside the engine is millimetre based; the
//! FEM model builder works in metres, so the mm to m conversions live here
//! rather than being scattered as magic `1e-6`/`1e-12` factors.
//!
//! ## Example
//!
//! ```rust
//! use wall_core::units::{Meters, Millimeters, Mm4, M4};
//!
//! let t = Millimeters(500.0);
//! let t_m: Meters = t.into();
//! assert_eq!(t_m.0, 0.5);
//!
//! let i: M4 = Mm4(2.0e12).into();
//! assert!((i.0 - 2.0).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1.0e3)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqMm(pub f64);

/// Area in square metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqM(pub f64);

impl From<SqMm> for SqM {
    fn from(a: SqMm) -> Self {
        SqM(a.0 / 1.0e6)
    }
}

// ============================================================================
// Section Properties
// ============================================================================

/// Second moment of area (or torsion constant) in mm^4
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mm4(pub f64);

/// Second moment of area (or torsion constant) in m^4
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct M4(pub f64);

impl From<Mm4> for M4 {
    fn from(i: Mm4) -> Self {
        M4(i.0 / 1.0e12)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mm_to_m() {
        let m: Meters = Millimeters(6000.0).into();
        assert_eq!(m.0, 6.0);
    }

    #[test]
    fn test_area_conversion() {
        let a: SqM = SqMm(5_500_000.0).into();
        assert!((a.0 - 5.5).abs() < 1e-12);
    }

    #[test]
    fn test_fourth_power_conversion() {
        let i: M4 = Mm4(2.7958333e13).into();
        assert!((i.0 - 27.958333).abs() < 1e-9);
    }

    #[test]
    fn test_serialization() {
        let t = Millimeters(250.0);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "250.0");
    }
}
