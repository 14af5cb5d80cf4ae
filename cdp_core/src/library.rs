//! # Material Library
//!
//! The `MaterialLibrary` is the root container for the material definitions
//! of one model. Libraries serialize to `.cdpl` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! MaterialLibrary
//! ├── meta: LibraryMetadata (version, author, model name, timestamps)
//! ├── settings: LibrarySettings (code edition, representative strength, defaults)
//! └── materials: BTreeMap<String, MaterialDefinition> (keyed by material name)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use cdp_core::library::MaterialLibrary;
//! use cdp_core::materials::{Material, SteelGrade, SteelMaterial};
//!
//! let mut library = MaterialLibrary::new("Jane Engineer", "Model-SimplyBeam");
//! library.define(&Material::Steel(SteelMaterial::from_grade(SteelGrade::HRB400))).unwrap();
//!
//! let json = serde_json::to_string_pretty(&library).unwrap();
//! assert!(json.contains("HRB400"));
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::definition::MaterialDefinition;
use crate::errors::{CalcError, CalcResult};
use crate::materials::concrete::{DEFAULT_DENSITY, DEFAULT_POISSON};
use crate::materials::{CdpPlasticity, ConcreteMaterial, Material};
use crate::strength::{ConcreteGrade, RepresentativeStrength};

/// Current schema version for .cdpl files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root library container.
///
/// Materials are keyed by name; a name is defined at most once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialLibrary {
    pub meta: LibraryMetadata,

    pub settings: LibrarySettings,

    /// Computed definitions, ordered by name for stable files
    pub materials: BTreeMap<String, MaterialDefinition>,
}

impl MaterialLibrary {
    /// Create a new empty library.
    pub fn new(author: impl Into<String>, model_name: impl Into<String>) -> Self {
        let now = Utc::now();
        MaterialLibrary {
            meta: LibraryMetadata {
                version: SCHEMA_VERSION.to_string(),
                author: author.into(),
                model_name: model_name.into(),
                created: now,
                modified: now,
            },
            settings: LibrarySettings::default(),
            materials: BTreeMap::new(),
        }
    }

    /// Define a material, or return the existing entry with the same name.
    ///
    /// An existing entry is never recomputed or replaced, so defining the
    /// same concrete twice computes its curves once.
    pub fn define(&mut self, material: &Material) -> CalcResult<&MaterialDefinition> {
        let name = material.name().to_string();
        if self.materials.contains_key(&name) {
            debug!(name = %name, "material already defined, reusing");
        } else {
            let definition = material.definition()?;
            debug!(name = %name, behavior = definition.behavior_name(), "defined material");
            self.materials.insert(name.clone(), definition);
            self.touch();
        }
        self.get(&name)
            .ok_or_else(|| CalcError::material_not_found(name.as_str()))
    }

    /// Concrete for `grade` using this library's settings.
    pub fn concrete_for_grade(&self, grade: ConcreteGrade) -> CalcResult<ConcreteMaterial> {
        Ok(ConcreteMaterial::from_grade(grade, self.settings.representative)?
            .with_density(self.settings.concrete_density)
            .with_poisson(self.settings.concrete_poisson)
            .with_plasticity(self.settings.plasticity))
    }

    pub fn get(&self, name: &str) -> Option<&MaterialDefinition> {
        self.materials.get(name)
    }

    /// Look up a material, failing with `MaterialNotFound`.
    pub fn require(&self, name: &str) -> CalcResult<&MaterialDefinition> {
        self.get(name).ok_or_else(|| CalcError::material_not_found(name))
    }

    /// Remove a material by name.
    pub fn remove(&mut self, name: &str) -> Option<MaterialDefinition> {
        let removed = self.materials.remove(name);
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.materials.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for MaterialLibrary {
    fn default() -> Self {
        MaterialLibrary::new("", "")
    }
}

/// Library metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    pub author: String,

    /// Name of the host model the materials belong to
    pub model_name: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

/// Defaults applied when concrete is created from a grade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibrarySettings {
    /// Design code edition (e.g., "GB50010-2010(2024)")
    pub code: String,

    /// Representative strength fed into the curves
    pub representative: RepresentativeStrength,

    /// Concrete density (t/mm³)
    pub concrete_density: f64,

    pub concrete_poisson: f64,

    pub plasticity: CdpPlasticity,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        LibrarySettings {
            code: "GB50010-2010(2024)".to_string(),
            representative: RepresentativeStrength::Characteristic,
            concrete_density: DEFAULT_DENSITY,
            concrete_poisson: DEFAULT_POISSON,
            plasticity: CdpPlasticity::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{SteelGrade, SteelMaterial};

    #[test]
    fn test_library_creation() {
        let library = MaterialLibrary::new("John Doe", "Model-SimplyBeam");
        assert_eq!(library.meta.author, "John Doe");
        assert_eq!(library.meta.model_name, "Model-SimplyBeam");
        assert_eq!(library.meta.version, SCHEMA_VERSION);
        assert!(library.is_empty());
    }

    #[test]
    fn test_define_is_idempotent_by_name() {
        let mut library = MaterialLibrary::default();
        let first = Material::Concrete(ConcreteMaterial::default());
        library.define(&first).unwrap();

        // Same name, different constants: the existing entry wins
        let second = Material::Concrete(ConcreteMaterial::new("C30", 14.3, 1.43, 30000.0));
        let def = library.define(&second).unwrap();
        let tables = def.cdp_tables().unwrap();
        assert!((tables.compression_hardening[0][0] - 11.711185).abs() < 1e-9);
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn test_define_propagates_errors() {
        let mut library = MaterialLibrary::default();
        let bad = Material::Concrete(ConcreteMaterial::new("Bad", 20.0, 2.0, -1.0));
        assert!(library.define(&bad).is_err());
        assert!(library.is_empty());
    }

    #[test]
    fn test_add_remove_and_names() {
        let mut library = MaterialLibrary::default();
        library
            .define(&Material::Steel(SteelMaterial::from_grade(SteelGrade::HRB400)))
            .unwrap();
        library
            .define(&Material::Steel(SteelMaterial::from_grade(SteelGrade::HPB300)))
            .unwrap();

        let names: Vec<&str> = library.names().collect();
        assert_eq!(names, vec!["HPB300", "HRB400"]);

        assert!(library.remove("HRB400").is_some());
        assert!(library.remove("HRB400").is_none());
        assert!(library.require("HRB400").is_err());
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn test_concrete_for_grade_uses_settings() {
        let mut library = MaterialLibrary::default();
        library.settings.representative = RepresentativeStrength::Design;
        library.settings.concrete_density = 2.2e-9;

        let c30 = library.concrete_for_grade(ConcreteGrade::C30).unwrap();
        assert!((c30.fcr - 14.331428571).abs() < 1e-8);
        assert_eq!(c30.density, 2.2e-9);
    }

    #[test]
    fn test_library_serialization() {
        let mut library = MaterialLibrary::new("Jane Engineer", "Model-A");
        library.define(&Material::Concrete(ConcreteMaterial::default())).unwrap();
        let json = serde_json::to_string_pretty(&library).unwrap();

        assert!(json.contains("Jane Engineer"));
        assert!(json.contains("GB50010-2010(2024)"));
        assert!(json.contains("DamagedPlasticity"));

        let roundtrip: MaterialLibrary = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta.author, "Jane Engineer");
        assert_eq!(roundtrip.len(), 1);
    }
}
