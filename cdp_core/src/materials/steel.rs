//! Steel Materials (Bilinear)
//!
//! Reinforcement and structural steel presets with a bilinear hardening
//! law: yield at `fy`, ultimate `fu` reached at a plastic strain of 0.1.
//! Presets without strengths (rigid loading plates) are elastic only.
//!
//! ## Presets
//!
//! | Preset     | E (MPa)  | fy  | fu  |
//! |------------|----------|-----|-----|
//! | RigidSteel | 210000   | -   | -   |
//! | HPB300     | 210000   | 300 | 420 |
//! | HRB335     | 200000   | 335 | 455 |
//! | HRB400     | 200000   | 400 | 540 |
//! | HRB500     | 200000   | 500 | 630 |
//! | Bolt       | 206000   | 640 | 800 |
//! | Q235       | 200000   | 235 | 370 |
//! | Q345       | 200000   | 345 | 470 |
//! | Q355       | 200000   | 355 | 470 |

use serde::{Deserialize, Serialize};

use crate::cdp::validate_positive;
use crate::definition::{ElasticProperties, MaterialBehavior, MaterialDefinition, TableRow};
use crate::errors::{CalcError, CalcResult};

/// Steel density (t/mm³)
pub const STEEL_DENSITY: f64 = 7.85e-9;

/// Plastic strain at which the ultimate stress is reached
pub const ULTIMATE_PLASTIC_STRAIN: f64 = 0.1;

/// Named steel presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SteelGrade {
    /// Stiff elastic steel for loading pads and supports
    RigidSteel,
    HPB300,
    HRB335,
    HRB400,
    HRB500,
    /// High-strength bolt, fy = 640, fu = 800
    Bolt,
    Q235,
    Q345,
    Q355,
}

impl SteelGrade {
    pub const ALL: [SteelGrade; 9] = [
        SteelGrade::RigidSteel,
        SteelGrade::HPB300,
        SteelGrade::HRB335,
        SteelGrade::HRB400,
        SteelGrade::HRB500,
        SteelGrade::Bolt,
        SteelGrade::Q235,
        SteelGrade::Q345,
        SteelGrade::Q355,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            SteelGrade::RigidSteel => "RigidSteel",
            SteelGrade::HPB300 => "HPB300",
            SteelGrade::HRB335 => "HRB335",
            SteelGrade::HRB400 => "HRB400",
            SteelGrade::HRB500 => "HRB500",
            SteelGrade::Bolt => "Bolt",
            SteelGrade::Q235 => "Q235",
            SteelGrade::Q345 => "Q345",
            SteelGrade::Q355 => "Q355",
        }
    }

    /// Parse from common string representations (case-insensitive)
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_uppercase().replace(['-', '_', ' '], "").as_str() {
            "RIGIDSTEEL" | "RIGID" => Ok(SteelGrade::RigidSteel),
            "HPB300" => Ok(SteelGrade::HPB300),
            "HRB335" => Ok(SteelGrade::HRB335),
            "HRB400" => Ok(SteelGrade::HRB400),
            "HRB500" => Ok(SteelGrade::HRB500),
            "BOLT" | "BOLT64" => Ok(SteelGrade::Bolt),
            "Q235" => Ok(SteelGrade::Q235),
            "Q345" => Ok(SteelGrade::Q345),
            "Q355" => Ok(SteelGrade::Q355),
            _ => Err(CalcError::material_not_found(s)),
        }
    }

    /// Elastic modulus (MPa)
    pub fn elastic_modulus(&self) -> f64 {
        match self {
            SteelGrade::RigidSteel | SteelGrade::HPB300 => 2.1e5,
            SteelGrade::Bolt => 2.06e5,
            _ => 2.0e5,
        }
    }

    /// `(fy, fu)` in MPa, `None` for elastic-only presets
    pub fn strengths(&self) -> Option<(f64, f64)> {
        match self {
            SteelGrade::RigidSteel => None,
            SteelGrade::HPB300 => Some((300.0, 420.0)),
            SteelGrade::HRB335 => Some((335.0, 455.0)),
            SteelGrade::HRB400 => Some((400.0, 540.0)),
            SteelGrade::HRB500 => Some((500.0, 630.0)),
            SteelGrade::Bolt => Some((640.0, 800.0)),
            SteelGrade::Q235 => Some((235.0, 370.0)),
            SteelGrade::Q345 => Some((345.0, 470.0)),
            SteelGrade::Q355 => Some((355.0, 470.0)),
        }
    }
}

/// Steel material with an optional bilinear plastic law.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteelMaterial {
    pub name: String,
    /// Density (t/mm³)
    pub density: f64,
    /// Elastic modulus Es (MPa)
    pub es: f64,
    pub poisson: f64,
    /// Yield stress (MPa)
    pub yield_strength: Option<f64>,
    /// Ultimate stress (MPa)
    pub ultimate_strength: Option<f64>,
}

impl SteelMaterial {
    /// Material from a preset, named after the preset code.
    pub fn from_grade(grade: SteelGrade) -> Self {
        let (fy, fu) = match grade.strengths() {
            Some((fy, fu)) => (Some(fy), Some(fu)),
            None => (None, None),
        };
        SteelMaterial {
            name: grade.code().to_string(),
            density: STEEL_DENSITY,
            es: grade.elastic_modulus(),
            poisson: 0.3,
            yield_strength: fy,
            ultimate_strength: fu,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// `[(fy, 0.0), (fu, 0.1)]` when both strengths are set.
    pub fn plastic_table(&self) -> Option<Vec<TableRow>> {
        match (self.yield_strength, self.ultimate_strength) {
            (Some(fy), Some(fu)) => Some(vec![[fy, 0.0], [fu, ULTIMATE_PLASTIC_STRAIN]]),
            _ => None,
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        validate_positive("density", self.density)?;
        validate_positive("es", self.es)?;
        if let (Some(fy), Some(fu)) = (self.yield_strength, self.ultimate_strength) {
            validate_positive("yield_strength", fy)?;
            if fu < fy {
                return Err(CalcError::invalid_input(
                    "ultimate_strength",
                    fu.to_string(),
                    format!("Ultimate strength must not be below yield strength {}", fy),
                ));
            }
        }
        Ok(())
    }

    pub fn definition(&self) -> CalcResult<MaterialDefinition> {
        self.validate()?;
        let behavior = match self.plastic_table() {
            Some(table) => MaterialBehavior::Plastic { table },
            None => MaterialBehavior::Elastic,
        };
        Ok(MaterialDefinition {
            name: self.name.clone(),
            density: self.density,
            elastic: ElasticProperties {
                modulus: self.es,
                poisson: self.poisson,
            },
            behavior,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hrb400_table() {
        let steel = SteelMaterial::from_grade(SteelGrade::HRB400);
        assert_eq!(steel.es, 2e5);
        assert_eq!(steel.plastic_table().unwrap(), vec![[400.0, 0.0], [540.0, 0.1]]);
    }

    #[test]
    fn test_rigid_steel_is_elastic() {
        let def = SteelMaterial::from_grade(SteelGrade::RigidSteel).definition().unwrap();
        assert_eq!(def.behavior, MaterialBehavior::Elastic);
        assert_eq!(def.elastic.modulus, 2.1e5);
    }

    #[test]
    fn test_grade_parsing() {
        assert_eq!(SteelGrade::from_str_flexible("hrb400").unwrap(), SteelGrade::HRB400);
        assert_eq!(SteelGrade::from_str_flexible("Bolt64").unwrap(), SteelGrade::Bolt);
        assert_eq!(SteelGrade::from_str_flexible("rigid steel").unwrap(), SteelGrade::RigidSteel);
        assert!(SteelGrade::from_str_flexible("S355").is_err());
    }

    #[test]
    fn test_all_presets_valid() {
        for grade in SteelGrade::ALL {
            let def = SteelMaterial::from_grade(grade).definition().unwrap();
            assert_eq!(def.name, grade.code());
            assert_eq!(def.density, STEEL_DENSITY);
        }
    }

    #[test]
    fn test_ultimate_below_yield_rejected() {
        let mut steel = SteelMaterial::from_grade(SteelGrade::Q235).named("Weak");
        steel.ultimate_strength = Some(200.0);
        let err = steel.definition().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
