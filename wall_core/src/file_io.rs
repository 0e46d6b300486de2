//! # File I/O Module
//!
//! Reads design requests and writes requests and reports as JSON:
//! - **Atomic saves**: Write to a `.tmp` sibling, sync, then rename
//! - **Version validation**: Requests from a newer schema are refused
//!
//! ## Example
//!
//! ```rust,no_run
//! use wall_core::file_io::{load_request, save_report};
//! use std::path::Path;
//!
//! let request = load_request(Path::new("level3.json"))?;
//! let report = request.evaluate();
//! save_report(&report, Path::new("level3.report.json"))?;
//! # Ok::<(), wall_core::errors::WallError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::errors::{WallError, WallResult};
use crate::report::DesignReport;
use crate::request::{DesignRequest, SCHEMA_VERSION};

/// Save a request with atomic write semantics.
pub fn save_request(request: &DesignRequest, path: &Path) -> WallResult<()> {
    write_json_atomic(request, path)
}

/// Save a report with atomic write semantics.
///
/// The save process:
/// 1. Serialize the report to JSON
/// 2. Write to a temporary file next to the target
/// 3. Sync to disk (fsync)
/// 4. Rename over the target (atomic on most filesystems)
pub fn save_report(report: &DesignReport, path: &Path) -> WallResult<()> {
    write_json_atomic(report, path)?;
    log::info!("Saved report {} to {}", report.id, path.display());
    Ok(())
}

/// Load a request from a file.
///
/// # Returns
///
/// * `Ok(DesignRequest)` - Loaded, with its geometry validated
/// * `Err(WallError::VersionMismatch)` - File version is incompatible
/// * `Err(WallError::SerializationError)` - Invalid JSON or invalid geometry
/// * `Err(WallError::FileError)` - I/O error
pub fn load_request(path: &Path) -> WallResult<DesignRequest> {
    let mut file = File::open(path)
        .map_err(|e| WallError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| WallError::file_error("read", path.display().to_string(), e.to_string()))?;

    let request = parse_request(&contents).map_err(|e| match e {
        WallError::SerializationError { reason } => WallError::SerializationError {
            reason: format!("Invalid request in {}: {}", path.display(), reason),
        },
        other => other,
    })?;

    log::debug!(
        "Loaded request '{}' ({} beams) from {}",
        request.meta.job_id,
        request.beams.len(),
        path.display()
    );
    Ok(request)
}

/// Parse a request from JSON text, validating its schema version.
pub fn parse_request(json: &str) -> WallResult<DesignRequest> {
    let request: DesignRequest =
        serde_json::from_str(json).map_err(|e| WallError::SerializationError {
            reason: e.to_string(),
        })?;
    validate_version(&request.meta.version)?;
    Ok(request)
}

fn write_json_atomic<T: Serialize>(value: &T, path: &Path) -> WallResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| WallError::SerializationError {
        reason: e.to_string(),
    })?;

    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        WallError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        WallError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        WallError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        WallError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// `report.json` -> `report.json.tmp`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let extension = tmp
        .extension()
        .map(|e| format!("{}.tmp", e.to_string_lossy()))
        .unwrap_or_else(|| "tmp".to_string());
    tmp.set_extension(extension);
    tmp
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> WallResult<()> {
    let mismatch = || WallError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let parse = |v: &str| -> Option<Vec<u32>> { v.split('.').map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version).ok_or_else(mismatch)?;
    let current_parts = parse(SCHEMA_VERSION).ok_or_else(mismatch)?;

    let (file_major, current_major) = match (file_parts.first(), current_parts.first()) {
        (Some(f), Some(c)) => (*f, *c),
        _ => return Err(mismatch()),
    };

    // Major version must match
    if file_major != current_major {
        return Err(mismatch());
    }

    // For 0.x versions, a newer minor may carry breaking changes
    if current_major == 0 {
        if let (Some(f), Some(c)) = (file_parts.get(1), current_parts.get(1)) {
            if f > c {
                return Err(mismatch());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coupling::StoryClearances;
    use crate::geometry::{CoreWallGeometry, OpeningPlacement};
    use crate::trimming::BeamSegment;
    use nalgebra::Point2;
    use std::env::temp_dir;

    fn temp_path(name: &str) -> PathBuf {
        temp_dir().join(format!("wall_core_test_{}_{}.json", name, std::process::id()))
    }

    fn request() -> DesignRequest {
        let geometry = CoreWallGeometry::tube_with_openings(
            500.0,
            6000.0,
            8000.0,
            2000.0,
            None,
            OpeningPlacement::TopAndBottom,
        )
        .unwrap();
        let mut request = DesignRequest::new("Test Engineer", "TEST-001", geometry)
            .with_story(StoryClearances::new(3500.0, 200.0, 200.0).unwrap());
        request.add_beam(
            BeamSegment::new(Point2::new(-2000.0, 4000.0), Point2::new(14000.0, 4000.0), 300.0)
                .with_id("B1"),
        );
        request
    }

    #[test]
    fn test_tmp_path_generation() {
        assert_eq!(
            tmp_path_for(Path::new("/path/to/report.json")),
            Path::new("/path/to/report.json.tmp")
        );
        assert_eq!(tmp_path_for(Path::new("/path/to/report")), Path::new("/path/to/report.tmp"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_path("roundtrip");
        let original = request();
        save_request(&original, &path).unwrap();

        let loaded = load_request(&path).unwrap();
        assert_eq!(loaded, original);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_leaves_no_tmp_file() {
        let path = temp_path("atomic");
        let report = request().evaluate();
        save_report(&report, &path).unwrap();

        assert!(path.exists());
        assert!(!tmp_path_for(&path).exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_request(&temp_path("does_not_exist")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_invalid_geometry_rejected_on_load() {
        let path = temp_path("invalid_geometry");
        let mut value = serde_json::to_value(request()).unwrap();
        value["geometry"]["wall_thickness"] = serde_json::json!(-5.0);
        fs::write(&path, value.to_string()).unwrap();

        let err = load_request(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        assert!(err.to_string().contains("wall_thickness"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_newer_schema_rejected() {
        let mut value = serde_json::to_value(request()).unwrap();
        value["meta"]["version"] = serde_json::json!("0.2.0");
        let err = parse_request(&value.to_string()).unwrap_err();
        assert_eq!(
            err,
            WallError::VersionMismatch {
                file_version: "0.2.0".to_string(),
                expected_version: SCHEMA_VERSION.to_string(),
            }
        );
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.0").is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("0.0.9").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("").is_err());
        assert!(validate_version("zero.one").is_err());
    }
}
