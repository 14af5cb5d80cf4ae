//! Concrete Materials (Damaged Plasticity)
//!
//! A concrete material bundles the representative constants that drive the
//! uniaxial curves with the remaining inputs of a damaged-plasticity
//! definition: density, Poisson's ratio and the plasticity parameters.
//!
//! Units are N, mm, t (stress in MPa, density in t/mm³).

use serde::{Deserialize, Serialize};

use crate::cdp::{compute_compression, compute_tension, DamageCurve, MaterialConstants};
use crate::definition::{CdpTables, ElasticProperties, MaterialBehavior, MaterialDefinition};
use crate::errors::{CalcError, CalcResult};
use crate::strength::{elastic_modulus, ConcreteGrade, RepresentativeStrength};

/// Default concrete density (t/mm³)
pub const DEFAULT_DENSITY: f64 = 2.4e-9;
/// Default Poisson's ratio for concrete
pub const DEFAULT_POISSON: f64 = 0.2;

/// Plasticity parameters of the damaged-plasticity model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CdpPlasticity {
    /// Dilation angle ψ (degrees)
    pub dilation_angle: f64,
    /// Flow potential eccentricity
    pub eccentricity: f64,
    /// Ratio of biaxial to uniaxial compressive yield stress
    pub fb0_fc0: f64,
    /// Ratio of the second stress invariant on the tensile meridian (K)
    pub k: f64,
    /// Viscosity parameter
    pub viscosity: f64,
}

impl Default for CdpPlasticity {
    fn default() -> Self {
        CdpPlasticity {
            dilation_angle: 30.0,
            eccentricity: 0.1,
            fb0_fc0: 1.16,
            k: 0.6667,
            viscosity: 0.005,
        }
    }
}

impl CdpPlasticity {
    /// Parameters as the single host table row
    pub fn as_row(&self) -> [f64; 5] {
        [
            self.dilation_angle,
            self.eccentricity,
            self.fb0_fc0,
            self.k,
            self.viscosity,
        ]
    }
}

/// Concrete material for damaged-plasticity analysis.
///
/// ## JSON Example
///
/// ```json
/// {
///   "name": "C30",
///   "fcr": 20.1,
///   "ftr": 2.01,
///   "er": 30000.0,
///   "density": 2.4e-9,
///   "poisson": 0.2,
///   "plasticity": {
///     "dilation_angle": 30.0, "eccentricity": 0.1, "fb0_fc0": 1.16,
///     "k": 0.6667, "viscosity": 0.005
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcreteMaterial {
    /// Material name, unique within a library
    pub name: String,
    /// Representative compressive strength (MPa): fc, fck or fcm
    pub fcr: f64,
    /// Representative tensile strength (MPa): ft, ftk or ftm
    pub ftr: f64,
    /// Elastic modulus (MPa)
    pub er: f64,
    /// Density (t/mm³), typically 2.2e-9 to 2.4e-9
    pub density: f64,
    /// Poisson's ratio
    pub poisson: f64,
    /// Damaged-plasticity parameters
    pub plasticity: CdpPlasticity,
}

impl Default for ConcreteMaterial {
    fn default() -> Self {
        ConcreteMaterial::new("C30", 20.1, 2.01, 30000.0)
    }
}

impl ConcreteMaterial {
    /// Create a material with default density, Poisson's ratio and plasticity.
    pub fn new(name: impl Into<String>, fcr: f64, ftr: f64, er: f64) -> Self {
        ConcreteMaterial {
            name: name.into(),
            fcr,
            ftr,
            er,
            density: DEFAULT_DENSITY,
            poisson: DEFAULT_POISSON,
            plasticity: CdpPlasticity::default(),
        }
    }

    /// Build from a strength grade: strengths from the cube-strength conversion,
    /// modulus from the code formula.
    ///
    /// ```rust
    /// use cdp_core::materials::ConcreteMaterial;
    /// use cdp_core::strength::{ConcreteGrade, RepresentativeStrength};
    ///
    /// let c30 =
    ///     ConcreteMaterial::from_grade(ConcreteGrade::C30, RepresentativeStrength::Characteristic)
    ///         .unwrap();
    /// assert_eq!(c30.name, "C30");
    /// assert!((c30.fcr - 20.064).abs() < 1e-9);
    /// ```
    pub fn from_grade(
        grade: ConcreteGrade,
        representative: RepresentativeStrength,
    ) -> CalcResult<Self> {
        let (fcr, ftr) = grade.conversion().representative(representative);
        let er = elastic_modulus(grade.cube_strength())?;
        Ok(ConcreteMaterial::new(grade.display_name(), fcr, ftr, er))
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    pub fn with_poisson(mut self, poisson: f64) -> Self {
        self.poisson = poisson;
        self
    }

    pub fn with_plasticity(mut self, plasticity: CdpPlasticity) -> Self {
        self.plasticity = plasticity;
        self
    }

    pub fn constants(&self) -> MaterialConstants {
        MaterialConstants::new(self.fcr, self.ftr, self.er)
    }

    /// Check the non-curve inputs; the curve constants are checked by the generators.
    pub fn validate(&self) -> CalcResult<()> {
        self.constants().validate()?;
        if !(self.density > 0.0 && self.density.is_finite()) {
            return Err(CalcError::invalid_constant("density", self.density, "Must be positive"));
        }
        if !(self.poisson >= 0.0 && self.poisson < 0.5) {
            return Err(CalcError::invalid_input(
                "poisson",
                self.poisson.to_string(),
                "Poisson's ratio must lie in [0, 0.5)",
            ));
        }
        Ok(())
    }

    pub fn compression_curve(&self) -> CalcResult<DamageCurve> {
        compute_compression(self.fcr, self.er)
    }

    pub fn tension_curve(&self) -> CalcResult<DamageCurve> {
        compute_tension(self.ftr, self.er)
    }

    /// Compute both curves and assemble the full material definition.
    pub fn definition(&self) -> CalcResult<MaterialDefinition> {
        self.validate()?;
        let compression = self.compression_curve()?;
        let tension = self.tension_curve()?;

        Ok(MaterialDefinition {
            name: self.name.clone(),
            density: self.density,
            elastic: ElasticProperties {
                modulus: self.er,
                poisson: self.poisson,
            },
            behavior: MaterialBehavior::DamagedPlasticity(CdpTables::from_curves(
                self.plasticity,
                &compression,
                &tension,
            )),
        })
    }
}
