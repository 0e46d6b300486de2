//! # Error Types
//!
//! Structured error types for wall_core. Configuration errors are raised at
//! the boundary where a geometry value is built, never deferred into a later
//! property call. Recoverable trimming problems are not errors at all; see
//! [`crate::trimming::TrimWarning`].
//!
//! ## Example
//!
//! ```rust
//! use wall_core::errors::{WallError, WallResult};
//!
//! fn validate_thickness(t_mm: f64) -> WallResult<()> {
//!     if t_mm <= 0.0 {
//!         return Err(WallError::degenerate_geometry(
//!             "wall_thickness",
//!             t_mm.to_string(),
//!             "Wall thickness must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_thickness(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for wall_core operations
pub type WallResult<T> = Result<T, WallError>;

/// Structured error type for core wall operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum WallError {
    /// A calculator was asked to handle the wrong wall configuration
    #[error("Wrong configuration: expected {expected}, found {found}")]
    WrongConfiguration { expected: String, found: String },

    /// A dimension required by the configuration is absent
    #[error("Missing required dimension: {field}")]
    MissingDimension { field: String },

    /// A dimension is present but produces an impossible section
    #[error("Degenerate geometry for '{field}': {value} - {reason}")]
    DegenerateGeometry {
        field: String,
        value: String,
        reason: String,
    },

    /// A tube opening does not fit strictly inside the hollow
    #[error("Opening too large: '{field}' = {value} mm must be less than {limit} mm")]
    OpeningTooLarge {
        field: String,
        value: String,
        limit: String,
    },

    /// An input value is invalid (out of range, unknown token, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A beam segment cannot be trimmed because it has no usable geometry
    #[error("Degenerate beam {beam}: {reason}")]
    DegenerateBeam { beam: String, reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl WallError {
    /// Create a WrongConfiguration error
    pub fn wrong_configuration(expected: impl Into<String>, found: impl Into<String>) -> Self {
        WallError::WrongConfiguration {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a MissingDimension error
    pub fn missing_dimension(field: impl Into<String>) -> Self {
        WallError::MissingDimension {
            field: field.into(),
        }
    }

    /// Create a DegenerateGeometry error
    pub fn degenerate_geometry(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        WallError::DegenerateGeometry {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an OpeningTooLarge error
    pub fn opening_too_large(field: impl Into<String>, value: f64, limit: f64) -> Self {
        WallError::OpeningTooLarge {
            field: field.into(),
            value: value.to_string(),
            limit: limit.to_string(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        WallError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a DegenerateBeam error. `beam` is the beam id or its batch index.
    pub fn degenerate_beam(beam: impl Into<String>, reason: impl Into<String>) -> Self {
        WallError::DegenerateBeam {
            beam: beam.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        WallError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for errors raised while building a geometry or its calculators.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            WallError::WrongConfiguration { .. }
                | WallError::MissingDimension { .. }
                | WallError::DegenerateGeometry { .. }
                | WallError::OpeningTooLarge { .. }
                | WallError::InvalidInput { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            WallError::WrongConfiguration { .. } => "WRONG_CONFIGURATION",
            WallError::MissingDimension { .. } => "MISSING_DIMENSION",
            WallError::DegenerateGeometry { .. } => "DEGENERATE_GEOMETRY",
            WallError::OpeningTooLarge { .. } => "OPENING_TOO_LARGE",
            WallError::InvalidInput { .. } => "INVALID_INPUT",
            WallError::DegenerateBeam { .. } => "DEGENERATE_BEAM",
            WallError::FileError { .. } => "FILE_ERROR",
            WallError::SerializationError { .. } => "SERIALIZATION_ERROR",
            WallError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}
