//! # File I/O Module
//!
//! Handles material library files and table export:
//! - **Atomic saves**: write to .tmp, sync, rename to prevent corruption
//! - **Version validation**: ensure schema compatibility on load
//! - **CSV export**: one file per damaged-plasticity table
//!
//! ## Example
//!
//! ```rust,no_run
//! use cdp_core::file_io::{save_library, load_library};
//! use cdp_core::library::MaterialLibrary;
//! use std::path::Path;
//!
//! let library = MaterialLibrary::new("Engineer", "Model-SimplyBeam");
//! let path = Path::new("materials.cdpl");
//!
//! save_library(&library, path)?;
//! let loaded = load_library(path)?;
//! # Ok::<(), cdp_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::definition::{MaterialDefinition, TableRow};
use crate::errors::{CalcError, CalcResult};
use crate::library::{MaterialLibrary, SCHEMA_VERSION};

/// Save a library to a file with atomic write semantics.
///
/// The save process:
/// 1. Serialize library to JSON
/// 2. Write to a temporary file (`<ext>.tmp`)
/// 3. Sync to disk (fsync)
/// 4. Rename the temporary file over the target
///
/// The temporary file is removed if any step after its creation fails.
pub fn save_library(library: &MaterialLibrary, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(library)?;
    let tmp_path = tmp_path_for(path);

    let result = write_synced(&tmp_path, json.as_bytes()).and_then(|()| {
        fs::rename(&tmp_path, path).map_err(|e| {
            CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
        })
    });
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result?;

    info!(path = %path.display(), materials = library.len(), "saved material library");
    Ok(())
}

fn write_synced(path: &Path, bytes: &[u8]) -> CalcResult<()> {
    let mut file = File::create(path).map_err(|e| {
        CalcError::file_error("create temp file", path.display().to_string(), e.to_string())
    })?;

    file.write_all(bytes).map_err(|e| {
        CalcError::file_error("write temp file", path.display().to_string(), e.to_string())
    })?;

    file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", path.display().to_string(), e.to_string())
    })
}

/// Load a library from a file.
///
/// # Returns
///
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_library(path: &Path) -> CalcResult<MaterialLibrary> {
    let mut file = File::open(path).map_err(|e| {
        CalcError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    let library: MaterialLibrary = serde_json::from_str(&contents).map_err(|e| {
        CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e))
    })?;

    validate_version(&library.meta.version)?;

    info!(path = %path.display(), materials = library.len(), "loaded material library");
    Ok(library)
}

/// Load an existing library, or start a new one if the file does not exist.
pub fn load_or_create_library(
    path: &Path,
    author: &str,
    model_name: &str,
) -> CalcResult<MaterialLibrary> {
    if path.exists() {
        load_library(path)
    } else {
        Ok(MaterialLibrary::new(author, model_name))
    }
}

/// Write the four damaged-plasticity tables of `definition` as CSV files.
///
/// Files are named `<material>_<table>.csv` inside `dir`. Returns the written
/// paths in table order; fails if the definition has no damaged-plasticity
/// behavior.
pub fn export_tables_csv(definition: &MaterialDefinition, dir: &Path) -> CalcResult<Vec<PathBuf>> {
    let tables = definition.cdp_tables().ok_or_else(|| {
        CalcError::invalid_input(
            "behavior",
            definition.behavior_name(),
            format!("Material '{}' has no damaged-plasticity tables", definition.name),
        )
    })?;

    fs::create_dir_all(dir).map_err(|e| {
        CalcError::file_error("create directory", dir.display().to_string(), e.to_string())
    })?;

    let mut written = Vec::with_capacity(4);
    for (table_name, header, rows) in tables.named_tables() {
        let path = dir.join(format!("{}_{}.csv", definition.name, table_name));
        write_table_csv(&path, header, rows)?;
        written.push(path);
    }

    info!(material = %definition.name, dir = %dir.display(), "exported damaged-plasticity tables");
    Ok(written)
}

/// Write a two-column table with a header row.
pub fn write_table_csv(path: &Path, header: [&str; 2], rows: &[TableRow]) -> CalcResult<()> {
    let file = File::create(path).map_err(|e| {
        CalcError::file_error("create", path.display().to_string(), e.to_string())
    })?;
    let mut writer = BufWriter::new(file);

    let write_err = |e: std::io::Error| {
        CalcError::file_error("write", path.display().to_string(), e.to_string())
    };

    writeln!(writer, "{},{}", header[0], header[1]).map_err(write_err)?;
    for [a, b] in rows {
        writeln!(writer, "{},{}", a, b).map_err(write_err)?;
    }
    writer.flush().map_err(write_err)
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let extension = path
        .extension()
        .map(|e| format!("{}.tmp", e.to_string_lossy()))
        .unwrap_or_else(|| "tmp".to_string());
    path.with_extension(extension)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // For 0.x versions, a newer minor may carry breaking changes
    if current_parts[0] == 0
        && file_parts.len() > 1
        && current_parts.len() > 1
        && file_parts[1] > current_parts[1]
    {
        return Err(mismatch());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{ConcreteMaterial, Material, SteelGrade, SteelMaterial};
    use std::env::temp_dir;

    fn temp_library_path(name: &str) -> PathBuf {
        temp_dir().join(format!("cdp_test_{}.cdpl", name))
    }

    #[test]
    fn test_tmp_path_generation() {
        assert_eq!(
            tmp_path_for(Path::new("/path/to/materials.cdpl")),
            Path::new("/path/to/materials.cdpl.tmp")
        );
        assert_eq!(tmp_path_for(Path::new("materials")), Path::new("materials.tmp"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_library_path("roundtrip");

        let mut library = MaterialLibrary::new("Test Engineer", "Model-Test");
        library.define(&Material::Concrete(ConcreteMaterial::default())).unwrap();
        library
            .define(&Material::Steel(SteelMaterial::from_grade(SteelGrade::HRB400)))
            .unwrap();
        save_library(&library, &path).unwrap();

        let loaded = load_library(&path).unwrap();
        assert_eq!(loaded.meta.author, "Test Engineer");
        assert_eq!(loaded.len(), 2);
        let tables = loaded.require("C30").unwrap().cdp_tables().unwrap();
        assert_eq!(tables.tension_damage.len(), 43);
        assert_eq!(tables.compression_damage[0], [0.0, 0.0]);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_library_path("atomic");
        let tmp_path = tmp_path_for(&path);

        save_library(&MaterialLibrary::default(), &path).unwrap();

        assert!(!tmp_path.exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_failed_save_removes_tmp_file() {
        // A non-empty directory at the target makes the final rename fail
        let path = temp_library_path("occupied_target");
        let tmp_path = tmp_path_for(&path);
        fs::create_dir_all(path.join("occupied")).unwrap();

        let err = save_library(&MaterialLibrary::default(), &path).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
        assert!(!tmp_path.exists());

        let _ = fs::remove_dir_all(&path);
    }

    #[test]
    fn test_load_rejects_newer_schema() {
        let path = temp_library_path("newer_schema");

        let mut library = MaterialLibrary::default();
        library.meta.version = "0.9.0".to_string();
        save_library(&library, &path).unwrap();

        let err = load_library(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_library(&temp_library_path("does_not_exist")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_or_create() {
        let path = temp_library_path("load_or_create");
        let _ = fs::remove_file(&path);

        let library = load_or_create_library(&path, "Engineer", "Model-New").unwrap();
        assert_eq!(library.meta.model_name, "Model-New");
        assert!(library.is_empty());
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.0").is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }

    #[test]
    fn test_export_tables_csv() {
        let dir = temp_dir().join("cdp_test_export");
        let def = ConcreteMaterial::default().definition().unwrap();

        let paths = export_tables_csv(&def, &dir).unwrap();
        assert_eq!(paths.len(), 4);
        assert!(paths[0].ends_with("C30_compression_hardening.csv"));

        let contents = fs::read_to_string(&paths[2]).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("damage,inelastic_strain"));
        assert_eq!(lines.next(), Some("0,0"));
        assert_eq!(contents.lines().count(), 51);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_export_rejects_steel() {
        let def = SteelMaterial::from_grade(SteelGrade::HRB400).definition().unwrap();
        let err = export_tables_csv(&def, &temp_dir()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
