//! # wall_core - Core Wall Geometry and Beam Trimming Engine
//!
//! `wall_core` sizes a building's lateral core wall and reconciles it with the
//! floor framing grid. From a handful of parameters it computes elastic section
//! properties and a plan outline, trims framing beams to the wall face with the
//! right end connections, and generates coupling beams over wall openings.
//!
//! ## Design Philosophy
//!
//! - **Validated at the boundary**: a [`CoreWallGeometry`] cannot exist in an
//!   invalid state, so every downstream computation is total
//! - **JSON-First**: All value types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Recoverable warnings**: trimming problems come back alongside results
//!
//! ## Quick Start
//!
//! ```rust
//! use wall_core::geometry::{CoreWallGeometry, OpeningPlacement};
//! use wall_core::section::section_properties;
//! use wall_core::outline::WallOutline;
//!
//! let geometry = CoreWallGeometry::tube_with_openings(
//!     500.0, 6000.0, 8000.0, 2000.0, None, OpeningPlacement::TopAndBottom,
//! ).unwrap();
//!
//! let props = section_properties(&geometry);
//! assert!(props.torsion_constant > 0.0);
//!
//! let outline = WallOutline::generate(&geometry);
//! assert_eq!(outline.rings().len(), 3);
//! ```
//!
//! ## Modules
//!
//! - [`geometry`] - Wall configurations, opening placement, validated geometry
//! - [`section`] - Section property calculators
//! - [`equations`] - Closed-form section formulas
//! - [`outline`] - Plan-view polygon rings
//! - [`trimming`] - Beam/wall intersection and trimming
//! - [`coupling`] - Coupling beams over openings
//! - [`request`] / [`report`] - Engine input and output documents
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Request loading and atomic report saves

pub mod coupling;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod geometry;
pub mod outline;
pub mod report;
pub mod request;
pub mod section;
pub mod trimming;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use coupling::{generate_coupling_beams, CouplingBeam, StoryClearances};
pub use errors::{WallError, WallResult};
pub use file_io::{load_request, save_report};
pub use geometry::{CoreWallConfiguration, CoreWallGeometry, OpeningPlacement};
pub use outline::WallOutline;
pub use report::DesignReport;
pub use request::{DesignRequest, EngineSettings};
pub use section::{section_properties, SectionProperties};
pub use trimming::{BeamSegment, BeamTrimmer, ConnectionType, TrimmedBeam};
