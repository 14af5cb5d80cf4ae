//! # Materials
//!
//! Material inputs for reinforced-concrete beam models.
//!
//! ## Material Types
//!
//! - **Concrete**: damaged-plasticity concrete per GB 50010 Appendix C
//! - **Steel**: bilinear reinforcement / structural steel presets
//!
//! ## Example
//!
//! ```rust
//! use cdp_core::materials::{Material, ConcreteMaterial, SteelGrade, SteelMaterial};
//!
//! let concrete = Material::Concrete(ConcreteMaterial::default());
//! let rebar = Material::Steel(SteelMaterial::from_grade(SteelGrade::HRB400));
//!
//! let def = concrete.definition().unwrap();
//! assert_eq!(def.name, "C30");
//! assert_eq!(rebar.name(), "HRB400");
//! ```

pub mod concrete;
pub mod steel;

pub use concrete::{CdpPlasticity, ConcreteMaterial};
pub use steel::{SteelGrade, SteelMaterial};

use serde::{Deserialize, Serialize};

use crate::definition::MaterialDefinition;
use crate::errors::CalcResult;

/// Any material the model builder can request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Material {
    Concrete(ConcreteMaterial),
    Steel(SteelMaterial),
}

impl Material {
    pub fn name(&self) -> &str {
        match self {
            Material::Concrete(c) => &c.name,
            Material::Steel(s) => &s.name,
        }
    }

    pub fn material_type(&self) -> &'static str {
        match self {
            Material::Concrete(_) => "Concrete",
            Material::Steel(_) => "Steel",
        }
    }

    /// Compute the host-ready definition
    pub fn definition(&self) -> CalcResult<MaterialDefinition> {
        match self {
            Material::Concrete(c) => c.definition(),
            Material::Steel(s) => s.definition(),
        }
    }
}
