//! # Concrete Damaged Plasticity Curves
//!
//! Uniaxial compression and tension laws for concrete per GB 50010-2010
//! Appendix C, converted into the damage / true stress / inelastic strain
//! tables a damaged-plasticity material definition expects.
//!
//! ## Pipeline
//!
//! ```text
//! x (strain grid) ──► ε = x·ε0 ──► σ = (1 − d_c)·Er·ε          (nominal)
//!                                 d  = 1 − √(σ / (Er·ε))        (damage factor)
//!                                 σt = σ·(1 + ε), εt = ln(1 + ε) (true)
//!                                 εin = εt − σt / Er            (inelastic)
//! ```
//!
//! The evolution parameter `d_c` is the only part that differs between the
//! compression and tension branches; see [`compression`] and [`tension`].
//!
//! ## Example
//!
//! ```rust
//! use cdp_core::cdp::{compute_compression, compute_tension};
//!
//! let compression = compute_compression(20.1, 30000.0).unwrap();
//! let tension = compute_tension(2.01, 30000.0).unwrap();
//!
//! assert_eq!(compression.len(), 50);
//! assert_eq!(tension.len(), 43);
//! assert_eq!(compression.damage[0], 0.0);
//! ```

pub mod compression;
pub mod grid;
pub mod tension;

pub use compression::compute_compression;
pub use grid::{StrainGrid, COMPRESSION_GRID, TENSION_GRID};
pub use tension::compute_tension;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::strength::gb_ref;

/// Decimals kept for the damage factor.
pub const DAMAGE_DECIMALS: i32 = 5;
/// Decimals kept for true stress (MPa).
pub const STRESS_DECIMALS: i32 = 6;
/// Decimals kept for inelastic / plastic strain.
pub const STRAIN_DECIMALS: i32 = 6;

/// Which side of the uniaxial law a curve describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveBranch {
    Compression,
    Tension,
}

impl CurveBranch {
    /// Code clause defining the uniaxial law for this branch.
    pub fn clause(&self) -> &'static str {
        match self {
            CurveBranch::Compression => gb_ref::COMPRESSION_CURVE,
            CurveBranch::Tension => gb_ref::TENSION_CURVE,
        }
    }
}

impl fmt::Display for CurveBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveBranch::Compression => write!(f, "compression"),
            CurveBranch::Tension => write!(f, "tension"),
        }
    }
}

/// Representative material constants for one concrete.
///
/// All values in N/mm² (MPa).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialConstants {
    /// Representative uniaxial compressive strength f_c,r
    pub fcr: f64,
    /// Representative uniaxial tensile strength f_t,r
    pub ftr: f64,
    /// Elastic modulus E_c
    pub er: f64,
}

impl MaterialConstants {
    pub fn new(fcr: f64, ftr: f64, er: f64) -> Self {
        MaterialConstants { fcr, ftr, er }
    }

    /// Reject non-positive or non-finite constants.
    pub fn validate(&self) -> CalcResult<()> {
        validate_positive("fcr", self.fcr)?;
        validate_positive("ftr", self.ftr)?;
        validate_positive("er", self.er)
    }
}

/// Derived parameters of one branch, kept alongside the tables for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveParameters {
    /// Peak strain ε0 (ε_c,r or ε_t,r)
    pub peak_strain: f64,
    /// Descending branch shape parameter α
    pub alpha: f64,
    /// Ascending branch exponent n (compression only)
    pub exponent: Option<f64>,
    /// ρ = f / (Er·ε0)
    pub rho: f64,
}

/// One damage-plasticity branch, sampled on its strain grid.
///
/// The three vectors are parallel. Values are rounded and the first row is
/// pinned to the origin (`damage[0] = 0`, `plastic_strain[0] = 0`), which is
/// the layout the host's tabular material data requires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageCurve {
    pub branch: CurveBranch,
    pub parameters: CurveParameters,
    /// Damage factor d ∈ [0, 1]
    pub damage: Vec<f64>,
    /// True stress (MPa)
    pub true_stress: Vec<f64>,
    /// Inelastic (compression) or cracking (tension) strain
    pub plastic_strain: Vec<f64>,
}

impl DamageCurve {
    pub fn len(&self) -> usize {
        self.damage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.damage.is_empty()
    }

    /// `(damage, true_stress, plastic_strain)` rows in grid order.
    pub fn rows(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.damage
            .iter()
            .zip(&self.true_stress)
            .zip(&self.plastic_strain)
            .map(|((&d, &s), &e)| (d, s, e))
    }

    /// Split into the plain `(damage, true_stress, plastic_strain)` triple.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        (self.damage, self.true_stress, self.plastic_strain)
    }

    fn round_values(&mut self) {
        for d in &mut self.damage {
            *d = round_to(*d, DAMAGE_DECIMALS);
        }
        for s in &mut self.true_stress {
            *s = round_to(*s, STRESS_DECIMALS);
        }
        for e in &mut self.plastic_strain {
            *e = round_to(*e, STRAIN_DECIMALS);
        }
    }

    /// Pin the first row to zero damage and zero strain.
    fn normalize_origin(&mut self) {
        if let Some(d) = self.damage.first_mut() {
            *d = 0.0;
        }
        if let Some(e) = self.plastic_strain.first_mut() {
            *e = 0.0;
        }
    }
}

/// Round half to even at a fixed number of decimals.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

pub(crate) fn validate_positive(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid_constant(field, value, "Must be a finite number"));
    }
    if value <= 0.0 {
        return Err(CalcError::invalid_constant(field, value, "Must be positive"));
    }
    Ok(())
}

/// `er·ε0` must exceed the strength, otherwise n is singular (equal) or
/// ρ exceeds one and the damage law has no physical meaning.
pub(crate) fn check_curve_fit(
    branch: CurveBranch,
    er: f64,
    peak_strain: f64,
    strength: f64,
) -> CalcResult<()> {
    let elastic_stress = er * peak_strain;
    if elastic_stress <= strength {
        return Err(CalcError::DegenerateCurveFit {
            branch,
            elastic_stress,
            strength,
        });
    }
    Ok(())
}

/// Run the common nominal → damage → true → inelastic pipeline.
///
/// `evolution` maps a strain multiplier `x` to the damage evolution
/// parameter `d_c` (or `d_t`).
pub(crate) fn build_curve(
    branch: CurveBranch,
    grid: &StrainGrid,
    er: f64,
    parameters: CurveParameters,
    evolution: impl Fn(f64) -> f64,
) -> CalcResult<DamageCurve> {
    let n = grid.len();
    let mut damage = Vec::with_capacity(n);
    let mut true_stress = Vec::with_capacity(n);
    let mut plastic_strain = Vec::with_capacity(n);

    for (index, &x) in grid.points().iter().enumerate() {
        let dc = evolution(x);
        let strain_nominal = x * parameters.peak_strain;
        let stress_nominal = (1.0 - dc) * er * strain_nominal;

        let radicand = stress_nominal / (er * strain_nominal);
        // NaN fails this comparison too
        if !(radicand >= 0.0) {
            return Err(CalcError::NegativeRadicand {
                branch,
                index,
                radicand,
            });
        }
        let d = 1.0 - radicand.sqrt();
        if d < 0.0 {
            return Err(CalcError::DamageOutOfRange {
                branch,
                index,
                damage: d,
            });
        }

        let stress_true = stress_nominal * (1.0 + strain_nominal);
        let strain_true = (1.0 + strain_nominal).ln();

        damage.push(d);
        true_stress.push(stress_true);
        plastic_strain.push(strain_true - stress_true / er);
    }

    let mut curve = DamageCurve {
        branch,
        parameters,
        damage,
        true_stress,
        plastic_strain,
    };
    curve.round_values();
    curve.normalize_origin();
    Ok(curve)
}
