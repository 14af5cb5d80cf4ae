//! # Error Types
//!
//! Structured error types for cdp_core. Curve generation is pure computation,
//! so every failure here is raised synchronously to the caller. A material
//! whose curve cannot be computed must not be handed to the solver, so
//! callers are expected to abort rather than recover.
//!
//! ## Example
//!
//! ```rust
//! use cdp_core::errors::{CalcError, CalcResult};
//!
//! fn validate_strength(fcr: f64) -> CalcResult<()> {
//!     if fcr <= 0.0 {
//!         return Err(CalcError::invalid_constant("fcr", fcr, "Strength must be positive"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_strength(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cdp::CurveBranch;

/// Result type alias for cdp_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for curve generation and material handling.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A material constant is non-positive or not finite
    #[error("Invalid material constant '{field}': {value} - {reason}")]
    InvalidMaterialConstant {
        field: String,
        value: String,
        reason: String,
    },

    /// `er * ε0 <= f`, the curve-fit exponent is singular or non-physical
    #[error(
        "Degenerate {branch} curve fit: er*eps0 = {elastic_stress} must exceed strength {strength}"
    )]
    DegenerateCurveFit {
        branch: CurveBranch,
        elastic_stress: f64,
        strength: f64,
    },

    /// The damage-factor square root received a negative argument
    #[error("Negative radicand in {branch} damage factor at sample {index}: {radicand}")]
    NegativeRadicand {
        branch: CurveBranch,
        index: usize,
        radicand: f64,
    },

    /// The damage factor came out below zero
    #[error("Damage factor out of range in {branch} curve at sample {index}: {damage}")]
    DamageOutOfRange {
        branch: CurveBranch,
        index: usize,
        damage: f64,
    },

    /// An input value is invalid (out of range, inconsistent, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Grade, preset or library entry not found
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidMaterialConstant error
    pub fn invalid_constant(
        field: impl Into<String>,
        value: f64,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidMaterialConstant {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// True for failures that come from the curve math itself rather than the inputs
    pub fn is_computation_error(&self) -> bool {
        matches!(
            self,
            CalcError::DegenerateCurveFit { .. }
                | CalcError::NegativeRadicand { .. }
                | CalcError::DamageOutOfRange { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidMaterialConstant { .. } => "INVALID_MATERIAL_CONSTANT",
            CalcError::DegenerateCurveFit { .. } => "DEGENERATE_CURVE_FIT",
            CalcError::NegativeRadicand { .. } => "NEGATIVE_RADICAND",
            CalcError::DamageOutOfRange { .. } => "DAMAGE_OUT_OF_RANGE",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::NegativeRadicand {
            branch: CurveBranch::Compression,
            index: 3,
            radicand: -0.25,
        };
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"NegativeRadicand\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CalcError::invalid_constant("er", 0.0, "must be positive").error_code(),
            "INVALID_MATERIAL_CONSTANT"
        );
        assert_eq!(CalcError::material_not_found("C99").error_code(), "MATERIAL_NOT_FOUND");
    }

    #[test]
    fn test_computation_error_classification() {
        let degenerate = CalcError::DegenerateCurveFit {
            branch: CurveBranch::Tension,
            elastic_stress: 1.0,
            strength: 1.0,
        };
        assert!(degenerate.is_computation_error());
        assert!(!CalcError::invalid_input("delta_c", "0.9", "too large").is_computation_error());
    }

    #[test]
    fn test_display_mentions_branch() {
        let error = CalcError::DegenerateCurveFit {
            branch: CurveBranch::Compression,
            elastic_stress: 20.0,
            strength: 20.0,
        };
        assert!(error.to_string().contains("compression"));
    }
}
