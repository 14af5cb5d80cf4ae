//! Tension branch (GB 50010-2010, C.2.3).
//!
//! ```text
//! ε_t,r = 65·f_t,r^0.54·1e-6
//! α_t   = 0.312·f_t,r²
//! ρ_t   = f_t,r / (E_c·ε_t,r)
//!
//! d_t = 1 − ρ_t·(1.2 − 0.2·x⁵)              x ≤ 1
//! d_t = 1 − ρ_t / (α_t·(x − 1)^1.7 + x)     x > 1
//! ```
//!
//! The tension grid starts at exactly `x = 1.0`, so only its first sample
//! takes the ascending formula.

use tracing::debug;

use super::{
    build_curve, check_curve_fit, validate_positive, CurveBranch, CurveParameters, DamageCurve,
    TENSION_GRID,
};
use crate::errors::CalcResult;

/// Peak tensile strain ε_t,r for a representative strength `ftr` (MPa).
pub fn peak_strain(ftr: f64) -> f64 {
    65.0 * ftr.powf(0.54) * 1e-6
}

/// Descending branch parameter α_t.
pub fn descending_alpha(ftr: f64) -> f64 {
    0.312 * ftr.powi(2)
}

pub fn parameters(ftr: f64, er: f64) -> CalcResult<CurveParameters> {
    validate_positive("ftr", ftr)?;
    validate_positive("er", er)?;

    let eps0 = peak_strain(ftr);
    check_curve_fit(CurveBranch::Tension, er, eps0, ftr)?;

    Ok(CurveParameters {
        peak_strain: eps0,
        alpha: descending_alpha(ftr),
        exponent: None,
        rho: ftr / (er * eps0),
    })
}

/// Tension damage curve for `(ftr, er)`.
///
/// Returns the 43-point damage / true stress / cracking strain tables.
pub fn compute_tension(ftr: f64, er: f64) -> CalcResult<DamageCurve> {
    let params = parameters(ftr, er)?;
    let CurveParameters { alpha, rho, .. } = params;

    debug!(
        ftr,
        er,
        peak_strain = params.peak_strain,
        alpha,
        rho,
        samples = TENSION_GRID.len(),
        "computing tension curve"
    );

    build_curve(CurveBranch::Tension, &TENSION_GRID, er, params, |x| {
        if x <= 1.0 {
            1.0 - rho * (1.2 - 0.2 * x.powi(5))
        } else {
            1.0 - rho / (alpha * (x - 1.0).powf(1.7) + x)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;

    fn c30() -> DamageCurve {
        compute_tension(2.01, 30000.0).unwrap()
    }

    #[test]
    fn test_parameters() {
        let p = parameters(2.01, 30000.0).unwrap();
        assert!((p.peak_strain - 9.4763093e-5).abs() < 1e-12);
        assert!((p.alpha - 1.2605112).abs() < 1e-9);
        assert!((p.rho - 0.7070263098).abs() < 1e-9);
        assert!(p.exponent.is_none());
    }

    #[test]
    fn test_length_matches_grid() {
        let curve = c30();
        assert_eq!(curve.len(), 43);
        assert_eq!(curve.true_stress.len(), 43);
        assert_eq!(curve.plastic_strain.len(), 43);
    }

    #[test]
    fn test_golden_endpoints() {
        let curve = c30();
        assert_eq!(curve.damage[0], 0.0);
        assert!((curve.true_stress[0] - 2.01019).abs() < 1e-9);
        assert_eq!(curve.plastic_strain[0], 0.0);

        assert!((curve.damage[42] - 0.97284).abs() < 1e-9);
        assert!((curve.true_stress[42] - 0.103264).abs() < 1e-9);
        assert!((curve.plastic_strain[42] - 0.004629).abs() < 1e-9);
    }

    #[test]
    fn test_first_sample_uses_ascending_formula() {
        // At x = 1 the ascending law gives σ = ρ·Er·ε0 = ftr, so true stress is ftr·(1 + ε0)
        let curve = c30();
        let eps0 = peak_strain(2.01);
        assert!((curve.true_stress[0] - 2.01 * (1.0 + eps0)).abs() < 1e-6);
        assert!((curve.damage[1] - 0.25729).abs() < 1e-9);
        assert!((curve.true_stress[1] - 1.882069).abs() < 1e-9);
    }

    #[test]
    fn test_damage_bounded_and_increasing() {
        for ftr in [1.1, 2.01, 2.64, 3.1] {
            let curve = compute_tension(ftr, 32500.0).unwrap();
            assert!(curve.damage.iter().all(|&d| (0.0..=1.0).contains(&d)));
            assert!(curve.damage.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn test_invalid_constants() {
        let err = compute_tension(0.0, 30000.0).unwrap_err();
        assert!(matches!(
            err,
            CalcError::InvalidMaterialConstant { ref field, .. } if field == "ftr"
        ));
        let err = compute_tension(2.0, f64::INFINITY).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_MATERIAL_CONSTANT");
    }

    #[test]
    fn test_degenerate_fit() {
        // Tiny modulus: er·ε_t,r drops below ftr
        let err = compute_tension(2.01, 1000.0).unwrap_err();
        assert!(matches!(
            err,
            CalcError::DegenerateCurveFit { branch: CurveBranch::Tension, .. }
        ));
    }

    #[test]
    fn test_into_parts() {
        let (d, s, e) = c30().into_parts();
        assert_eq!(d.len(), s.len());
        assert_eq!(s.len(), e.len());
    }
}
