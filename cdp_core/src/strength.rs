//! # Concrete Strength Conversions
//!
//! Derives axial strengths and the elastic modulus from the characteristic
//! cube strength f_cu,k per GB 50010-2010 (2024 edition).
//!
//! ## Formulas
//!
//! ```text
//! f_ck = 0.88·α1·α2·f_cu,k
//! f_tk = 0.88·0.395·f_cu,k^0.55·(1 − 1.645·δc)^0.45·α2
//! E_c  = 10⁵ / (2.2 + 34.7 / f_cu,k)
//! ```
//!
//! | Grade      | α1                  | α2                 |
//! |------------|---------------------|--------------------|
//! | ≤ C40      | 0.76                | 1.00               |
//! | C45 – C50  | 0.76                | 1.00 → 0.87 (C80)  |
//! | > C50      | 0.76 → 0.82 (C80)   | 1.00 → 0.87 (C80)  |
//!
//! ## Example
//!
//! ```rust
//! use cdp_core::strength::{convert_cube_strength, elastic_modulus};
//!
//! let c30 = convert_cube_strength(30.0, None).unwrap();
//! assert!((c30.fck - 20.064).abs() < 1e-9);
//!
//! let ec = elastic_modulus(30.0).unwrap();
//! assert_eq!(ec, 29791.46);
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cdp::{round_to, validate_positive};
use crate::errors::{CalcError, CalcResult};

/// GB 50010 clause references for traceability in reports.
pub mod gb_ref {
    /// Characteristic axial compressive / tensile strengths
    pub const CHARACTERISTIC_STRENGTH: &str = "GB 50010 4.1.3";
    /// Design strengths, γc = 1.4
    pub const DESIGN_STRENGTH: &str = "GB 50010 4.1.4";
    /// Elastic modulus of concrete
    pub const ELASTIC_MODULUS: &str = "GB 50010 4.1.5";
    /// Uniaxial tensile stress-strain law
    pub const TENSION_CURVE: &str = "GB 50010 C.2.3";
    /// Uniaxial compressive stress-strain law
    pub const COMPRESSION_CURVE: &str = "GB 50010 C.2.4";
}

/// Partial factor for concrete material strength.
pub const GAMMA_C: f64 = 1.4;

/// Strength range the empirical formulas are calibrated for (C20–C80).
pub const DESIGN_DOMAIN_MPA: (f64, f64) = (20.0, 80.0);

/// Concrete strength grades C20 through C80.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConcreteGrade {
    C20,
    C25,
    C30,
    C35,
    C40,
    C45,
    C50,
    C55,
    C60,
    C65,
    C70,
    C75,
    C80,
}

impl ConcreteGrade {
    /// All grades for selection lists
    pub const ALL: [ConcreteGrade; 13] = [
        ConcreteGrade::C20,
        ConcreteGrade::C25,
        ConcreteGrade::C30,
        ConcreteGrade::C35,
        ConcreteGrade::C40,
        ConcreteGrade::C45,
        ConcreteGrade::C50,
        ConcreteGrade::C55,
        ConcreteGrade::C60,
        ConcreteGrade::C65,
        ConcreteGrade::C70,
        ConcreteGrade::C75,
        ConcreteGrade::C80,
    ];

    /// Characteristic cube strength f_cu,k (MPa)
    pub fn cube_strength(&self) -> f64 {
        match self {
            ConcreteGrade::C20 => 20.0,
            ConcreteGrade::C25 => 25.0,
            ConcreteGrade::C30 => 30.0,
            ConcreteGrade::C35 => 35.0,
            ConcreteGrade::C40 => 40.0,
            ConcreteGrade::C45 => 45.0,
            ConcreteGrade::C50 => 50.0,
            ConcreteGrade::C55 => 55.0,
            ConcreteGrade::C60 => 60.0,
            ConcreteGrade::C65 => 65.0,
            ConcreteGrade::C70 => 70.0,
            ConcreteGrade::C75 => 75.0,
            ConcreteGrade::C80 => 80.0,
        }
    }

    /// Display name, also used as the default material name
    pub fn display_name(&self) -> &'static str {
        match self {
            ConcreteGrade::C20 => "C20",
            ConcreteGrade::C25 => "C25",
            ConcreteGrade::C30 => "C30",
            ConcreteGrade::C35 => "C35",
            ConcreteGrade::C40 => "C40",
            ConcreteGrade::C45 => "C45",
            ConcreteGrade::C50 => "C50",
            ConcreteGrade::C55 => "C55",
            ConcreteGrade::C60 => "C60",
            ConcreteGrade::C65 => "C65",
            ConcreteGrade::C70 => "C70",
            ConcreteGrade::C75 => "C75",
            ConcreteGrade::C80 => "C80",
        }
    }

    /// Parse "C30", "c30" or "30"
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('C')
            .or_else(|| trimmed.strip_prefix('c'))
            .unwrap_or(trimmed);
        ConcreteGrade::ALL
            .iter()
            .copied()
            .find(|g| &g.display_name()[1..] == digits)
            .ok_or_else(|| CalcError::material_not_found(s))
    }

    /// Characteristic strengths for this grade
    pub fn conversion(&self) -> StrengthConversion {
        StrengthConversion::compute(self.cube_strength(), default_delta_c(self.cube_strength()))
    }
}

/// Which representative value of the axial strengths to feed the curves.
///
/// The uniaxial laws accept design, characteristic or mean values
/// (f_c / f_ck / f_cm); which one depends on the purpose of the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RepresentativeStrength {
    /// f_c = f_ck / γc
    Design,
    /// f_ck, f_tk
    #[default]
    Characteristic,
    /// f_cm = f_ck / (1 − 1.645·δc)
    Mean,
}

impl RepresentativeStrength {
    pub const ALL: [RepresentativeStrength; 3] = [
        RepresentativeStrength::Design,
        RepresentativeStrength::Characteristic,
        RepresentativeStrength::Mean,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            RepresentativeStrength::Design => "Design (fc, ft)",
            RepresentativeStrength::Characteristic => "Characteristic (fck, ftk)",
            RepresentativeStrength::Mean => "Mean (fcm, ftm)",
        }
    }

    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.to_lowercase().as_str() {
            "design" | "d" | "fc" => Ok(RepresentativeStrength::Design),
            "characteristic" | "k" | "fck" => Ok(RepresentativeStrength::Characteristic),
            "mean" | "m" | "fcm" => Ok(RepresentativeStrength::Mean),
            _ => Err(CalcError::invalid_input(
                "representative",
                s,
                "Expected design, characteristic or mean",
            )),
        }
    }
}

/// Result of converting a cube strength to axial strengths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrengthConversion {
    /// Characteristic cube strength f_cu,k (MPa)
    pub fcu_k: f64,
    /// Prism-to-cube ratio α1
    pub alpha1: f64,
    /// Brittleness reduction α2
    pub alpha2: f64,
    /// Coefficient of variation δc
    pub delta_c: f64,
    /// Characteristic axial compressive strength (MPa)
    pub fck: f64,
    /// Characteristic axial tensile strength (MPa)
    pub ftk: f64,
}

impl StrengthConversion {
    fn compute(fcu_k: f64, delta_c: f64) -> Self {
        let alpha1 = if fcu_k <= 50.0 {
            0.76
        } else {
            interp(fcu_k, (50.0, 0.76), (80.0, 0.82))
        };
        let alpha2 = if fcu_k <= 40.0 {
            1.0
        } else {
            interp(fcu_k, (40.0, 1.0), (80.0, 0.87))
        };

        StrengthConversion {
            fcu_k,
            alpha1,
            alpha2,
            delta_c,
            fck: 0.88 * alpha1 * alpha2 * fcu_k,
            ftk: 0.88 * 0.395 * fcu_k.powf(0.55) * (1.0 - 1.645 * delta_c).powf(0.45) * alpha2,
        }
    }

    /// `(fc, ft)` design strengths
    pub fn design(&self) -> (f64, f64) {
        (self.fck / GAMMA_C, self.ftk / GAMMA_C)
    }

    /// `(fcm, ftm)` mean strengths
    pub fn mean(&self) -> (f64, f64) {
        let factor = 1.0 - 1.645 * self.delta_c;
        (self.fck / factor, self.ftk / factor)
    }

    /// `(fcr, ftr)` for the requested representative value
    pub fn representative(&self, which: RepresentativeStrength) -> (f64, f64) {
        match which {
            RepresentativeStrength::Design => self.design(),
            RepresentativeStrength::Characteristic => (self.fck, self.ftk),
            RepresentativeStrength::Mean => self.mean(),
        }
    }
}

/// Default coefficient of variation δc by strength bucket.
pub fn default_delta_c(fcu_k: f64) -> f64 {
    if fcu_k <= 20.0 {
        0.18
    } else if fcu_k <= 25.0 {
        0.16
    } else if fcu_k <= 30.0 {
        0.14
    } else if fcu_k <= 35.0 {
        0.13
    } else if fcu_k <= 45.0 {
        0.12
    } else if fcu_k <= 55.0 {
        0.11
    } else {
        0.10
    }
}

/// Linear interpolation between two points, clamped to the end values.
fn interp(x: f64, (x0, y0): (f64, f64), (x1, y1): (f64, f64)) -> f64 {
    if x <= x0 {
        y0
    } else if x >= x1 {
        y1
    } else {
        y0 + (x - x0) * (y1 - y0) / (x1 - x0)
    }
}

fn warn_if_out_of_domain(fcu_k: f64) {
    let (lo, hi) = DESIGN_DOMAIN_MPA;
    if fcu_k < lo || fcu_k > hi {
        warn!(fcu_k, "cube strength outside the C20-C80 calibration range");
    }
}

/// Convert a characteristic cube strength to `(fck, ftk)`.
///
/// `delta_c` overrides the coefficient of variation; when `None` the code
/// bucket for `fcu_k` is used. It must lie in `[0, 1/1.645)`.
pub fn convert_cube_strength(fcu_k: f64, delta_c: Option<f64>) -> CalcResult<StrengthConversion> {
    validate_positive("fcu_k", fcu_k)?;
    warn_if_out_of_domain(fcu_k);

    let delta_c = match delta_c {
        Some(dc) => {
            if !dc.is_finite() || dc < 0.0 || 1.645 * dc >= 1.0 {
                return Err(CalcError::invalid_input(
                    "delta_c",
                    dc.to_string(),
                    "Coefficient of variation must lie in [0, 1/1.645)",
                ));
            }
            dc
        }
        None => default_delta_c(fcu_k),
    };

    Ok(StrengthConversion::compute(fcu_k, delta_c))
}

/// Elastic modulus E_c (MPa) from the cube strength, rounded to 3 decimals.
pub fn elastic_modulus(fcu_k: f64) -> CalcResult<f64> {
    validate_positive("fcu_k", fcu_k)?;
    warn_if_out_of_domain(fcu_k);
    Ok(round_to(1e5 / (2.2 + 34.7 / fcu_k), 3))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_c30() {
        let c = convert_cube_strength(30.0, None).unwrap();
        assert_eq!(c.alpha1, 0.76);
        assert_eq!(c.alpha2, 1.0);
        assert_eq!(c.delta_c, 0.14);
        assert!((c.fck - 20.064).abs() < 1e-9);
        assert!((c.ftk - 2.006047106).abs() < 1e-8);
    }

    #[test]
    fn test_convert_interpolated_grades() {
        // α2 interpolates above C40, α1 above C50
        let c50 = convert_cube_strength(50.0, None).unwrap();
        assert_eq!(c50.alpha1, 0.76);
        assert!((c50.alpha2 - 0.9675).abs() < 1e-12);
        assert_eq!(c50.delta_c, 0.11);
        assert!((c50.fck - 32.3532).abs() < 1e-9);

        let c60 = convert_cube_strength(60.0, None).unwrap();
        assert!((c60.alpha1 - 0.78).abs() < 1e-12);
        assert!((c60.alpha2 - 0.935).abs() < 1e-12);
        assert!((c60.fck - 38.50704).abs() < 1e-9);
        assert!((c60.ftk - 2.849380650).abs() < 1e-8);

        let c80 = convert_cube_strength(80.0, None).unwrap();
        assert!((c80.alpha1 - 0.82).abs() < 1e-12);
        assert!((c80.alpha2 - 0.87).abs() < 1e-12);
    }

    #[test]
    fn test_interp_clamps_beyond_c80() {
        let c = convert_cube_strength(90.0, None).unwrap();
        assert_eq!(c.alpha1, 0.82);
        assert_eq!(c.alpha2, 0.87);
    }

    #[test]
    fn test_delta_c_buckets() {
        assert_eq!(default_delta_c(20.0), 0.18);
        assert_eq!(default_delta_c(25.0), 0.16);
        assert_eq!(default_delta_c(30.0), 0.14);
        assert_eq!(default_delta_c(35.0), 0.13);
        assert_eq!(default_delta_c(45.0), 0.12);
        assert_eq!(default_delta_c(55.0), 0.11);
        assert_eq!(default_delta_c(60.0), 0.10);
    }

    #[test]
    fn test_delta_c_override() {
        let c = convert_cube_strength(30.0, Some(0.10)).unwrap();
        assert_eq!(c.delta_c, 0.10);
        assert!(c.ftk > convert_cube_strength(30.0, None).unwrap().ftk);

        assert!(convert_cube_strength(30.0, Some(0.7)).is_err());
        assert!(convert_cube_strength(30.0, Some(-0.1)).is_err());
    }

    #[test]
    fn test_representative_values() {
        let c = convert_cube_strength(30.0, None).unwrap();
        let (fc, ft) = c.representative(RepresentativeStrength::Design);
        assert!((fc - 14.331428571).abs() < 1e-8);
        assert!((ft - 1.432890790).abs() < 1e-8);

        let (fcm, _) = c.representative(RepresentativeStrength::Mean);
        assert!((fcm - 26.067298948).abs() < 1e-8);

        assert_eq!(c.representative(RepresentativeStrength::Characteristic), (c.fck, c.ftk));
    }

    #[test]
    fn test_elastic_modulus() {
        let expected = (1e5 / (2.2 + 34.7 / 30.0) * 1000.0_f64).round() / 1000.0;
        assert_eq!(elastic_modulus(30.0).unwrap(), expected);
        assert_eq!(elastic_modulus(30.0).unwrap(), 29791.46);
        assert_eq!(elastic_modulus(50.0).unwrap(), 34554.25);
        assert!(elastic_modulus(0.0).is_err());
    }

    #[test]
    fn test_invalid_cube_strength() {
        let err = convert_cube_strength(-5.0, None).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_MATERIAL_CONSTANT");
    }

    #[test]
    fn test_grade_parsing() {
        assert_eq!(ConcreteGrade::from_str_flexible("C30").unwrap(), ConcreteGrade::C30);
        assert_eq!(ConcreteGrade::from_str_flexible("c45").unwrap(), ConcreteGrade::C45);
        assert_eq!(ConcreteGrade::from_str_flexible("80").unwrap(), ConcreteGrade::C80);
        assert!(ConcreteGrade::from_str_flexible("C33").is_err());
        assert!(ConcreteGrade::from_str_flexible("").is_err());
    }

    #[test]
    fn test_grade_conversion_matches_function() {
        for grade in ConcreteGrade::ALL {
            let direct = convert_cube_strength(grade.cube_strength(), None).unwrap();
            assert_eq!(grade.conversion(), direct);
        }
    }

    #[test]
    fn test_representative_parsing() {
        assert_eq!(
            RepresentativeStrength::from_str_flexible("Mean").unwrap(),
            RepresentativeStrength::Mean
        );
        assert!(RepresentativeStrength::from_str_flexible("nominal").is_err());
    }
}
