//! # Material Definitions
//!
//! Host-independent form of the data a CAE material definition needs:
//! density, elastic constants and one behavior block. The tables use the
//! same column order as the host's tabular input so an adapter can insert
//! them row by row.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "name": "HRB400",
//!   "density": 7.85e-9,
//!   "elastic": { "modulus": 200000.0, "poisson": 0.3 },
//!   "behavior": { "type": "Plastic", "table": [[400.0, 0.0], [540.0, 0.1]] }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::cdp::DamageCurve;
use crate::materials::CdpPlasticity;

/// One two-column table row.
pub type TableRow = [f64; 2];

/// Isotropic elastic constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElasticProperties {
    /// Young's modulus (MPa)
    pub modulus: f64,
    /// Poisson's ratio
    pub poisson: f64,
}

/// The four damaged-plasticity tables plus the plasticity parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CdpTables {
    pub plasticity: CdpPlasticity,
    /// `(true stress, inelastic strain)`
    pub compression_hardening: Vec<TableRow>,
    /// `(true stress, cracking strain)`
    pub tension_stiffening: Vec<TableRow>,
    /// `(damage, inelastic strain)`
    pub compression_damage: Vec<TableRow>,
    /// `(damage, cracking strain)`
    pub tension_damage: Vec<TableRow>,
}

impl CdpTables {
    /// Stack the curve columns into host table rows.
    pub fn from_curves(
        plasticity: CdpPlasticity,
        compression: &DamageCurve,
        tension: &DamageCurve,
    ) -> Self {
        CdpTables {
            plasticity,
            compression_hardening: stack(&compression.true_stress, &compression.plastic_strain),
            tension_stiffening: stack(&tension.true_stress, &tension.plastic_strain),
            compression_damage: stack(&compression.damage, &compression.plastic_strain),
            tension_damage: stack(&tension.damage, &tension.plastic_strain),
        }
    }

    /// Named tables in a fixed order, for export.
    pub fn named_tables(&self) -> [(&'static str, [&'static str; 2], &[TableRow]); 4] {
        [
            (
                "compression_hardening",
                ["stress", "inelastic_strain"],
                self.compression_hardening.as_slice(),
            ),
            (
                "tension_stiffening",
                ["stress", "cracking_strain"],
                self.tension_stiffening.as_slice(),
            ),
            (
                "compression_damage",
                ["damage", "inelastic_strain"],
                self.compression_damage.as_slice(),
            ),
            (
                "tension_damage",
                ["damage", "cracking_strain"],
                self.tension_damage.as_slice(),
            ),
        ]
    }
}

fn stack(first: &[f64], second: &[f64]) -> Vec<TableRow> {
    first.iter().zip(second).map(|(&a, &b)| [a, b]).collect()
}

/// Inelastic behavior attached to a material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MaterialBehavior {
    /// Linear elastic only
    Elastic,
    /// Isotropic hardening table `(yield stress, plastic strain)`
    Plastic { table: Vec<TableRow> },
    /// Concrete damaged plasticity
    DamagedPlasticity(CdpTables),
}

/// Complete material record ready for a host adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDefinition {
    pub name: String,
    /// Mass density (t/mm³)
    pub density: f64,
    pub elastic: ElasticProperties,
    pub behavior: MaterialBehavior,
}

impl MaterialDefinition {
    pub fn behavior_name(&self) -> &'static str {
        match self.behavior {
            MaterialBehavior::Elastic => "Elastic",
            MaterialBehavior::Plastic { .. } => "Plastic",
            MaterialBehavior::DamagedPlasticity(_) => "DamagedPlasticity",
        }
    }

    pub fn cdp_tables(&self) -> Option<&CdpTables> {
        match &self.behavior {
            MaterialBehavior::DamagedPlasticity(tables) => Some(tables),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cdp::{compute_compression, compute_tension};

    fn c30_tables() -> CdpTables {
        let compression = compute_compression(20.1, 30000.0).unwrap();
        let tension = compute_tension(2.01, 30000.0).unwrap();
        CdpTables::from_curves(CdpPlasticity::default(), &compression, &tension)
    }

    #[test]
    fn test_tables_start_at_origin() {
        let tables = c30_tables();
        assert_eq!(tables.compression_damage[0], [0.0, 0.0]);
        assert_eq!(tables.tension_damage[0], [0.0, 0.0]);
        assert_eq!(tables.compression_hardening[0][1], 0.0);
        assert!((tables.compression_hardening[0][0] - 11.711185).abs() < 1e-9);
    }

    #[test]
    fn test_table_lengths() {
        let tables = c30_tables();
        assert_eq!(tables.compression_hardening.len(), 50);
        assert_eq!(tables.compression_damage.len(), 50);
        assert_eq!(tables.tension_stiffening.len(), 43);
        assert_eq!(tables.tension_damage.len(), 43);
    }

    #[test]
    fn test_damage_and_hardening_share_strain_column() {
        let tables = c30_tables();
        for (h, d) in tables.compression_hardening.iter().zip(&tables.compression_damage) {
            assert_eq!(h[1], d[1]);
        }
    }

    #[test]
    fn test_behavior_serialization() {
        let def = MaterialDefinition {
            name: "HRB400".to_string(),
            density: 7.85e-9,
            elastic: ElasticProperties {
                modulus: 2e5,
                poisson: 0.3,
            },
            behavior: MaterialBehavior::Plastic {
                table: vec![[400.0, 0.0], [540.0, 0.1]],
            },
        };
        let json = serde_json::to_string(&def).unwrap();
        assert!(json.contains("\"type\":\"Plastic\""));
        let roundtrip: MaterialDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.name, "HRB400");
        assert_eq!(roundtrip.behavior, def.behavior);
        assert!(roundtrip.cdp_tables().is_none());
        assert_eq!(roundtrip.behavior_name(), "Plastic");
    }
}
