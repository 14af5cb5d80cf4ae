//! Compression branch (GB 50010-2010, C.2.4).
//!
//! ```text
//! ε_c,r = (700 + 172·√f_c,r)·1e-6
//! α_c   = 0.157·f_c,r^0.785 − 0.905
//! n     = E_c·ε_c,r / (E_c·ε_c,r − f_c,r)
//! ρ_c   = f_c,r / (E_c·ε_c,r)
//!
//! d_c = 1 − ρ_c·n / (n − 1 + x^n)          x ≤ 1
//! d_c = 1 − ρ_c / (α_c·(x − 1)² + x)       x > 1
//! ```

use tracing::debug;

use super::{
    build_curve, check_curve_fit, validate_positive, CurveBranch, CurveParameters, DamageCurve,
    COMPRESSION_GRID,
};
use crate::errors::CalcResult;

/// Peak compressive strain ε_c,r for a representative strength `fcr` (MPa).
pub fn peak_strain(fcr: f64) -> f64 {
    (700.0 + 172.0 * fcr.sqrt()) * 1e-6
}

/// Descending branch parameter α_c.
pub fn descending_alpha(fcr: f64) -> f64 {
    0.157 * fcr.powf(0.785) - 0.905
}

/// Derive the compression curve parameters, rejecting a singular fit.
pub fn parameters(fcr: f64, er: f64) -> CalcResult<CurveParameters> {
    fit(fcr, er).map(|(params, _)| params)
}

fn fit(fcr: f64, er: f64) -> CalcResult<(CurveParameters, f64)> {
    validate_positive("fcr", fcr)?;
    validate_positive("er", er)?;

    let eps0 = peak_strain(fcr);
    check_curve_fit(CurveBranch::Compression, er, eps0, fcr)?;

    let elastic_stress = er * eps0;
    let n = elastic_stress / (elastic_stress - fcr);
    let params = CurveParameters {
        peak_strain: eps0,
        alpha: descending_alpha(fcr),
        exponent: Some(n),
        rho: fcr / elastic_stress,
    };
    Ok((params, n))
}

/// Compression damage curve for `(fcr, er)`.
///
/// Returns the 50-point damage / true stress / inelastic strain tables. The
/// design domain is C20–C80; values outside it are computed but not checked.
pub fn compute_compression(fcr: f64, er: f64) -> CalcResult<DamageCurve> {
    let (params, n) = fit(fcr, er)?;
    let CurveParameters { alpha, rho, .. } = params;

    debug!(
        fcr,
        er,
        peak_strain = params.peak_strain,
        alpha,
        n,
        rho,
        samples = COMPRESSION_GRID.len(),
        "computing compression curve"
    );

    build_curve(CurveBranch::Compression, &COMPRESSION_GRID, er, params, |x| {
        if x <= 1.0 {
            1.0 - rho * n / (n - 1.0 + x.powf(n))
        } else {
            1.0 - rho / (alpha * (x - 1.0).powi(2) + x)
        }
    })
}
