//! # cdp_core - Concrete Damaged Plasticity Material Engine
//!
//! `cdp_core` computes the constitutive tables a finite-element host needs
//! for reinforced-concrete models: concrete compression / tension damage
//! curves per GB 50010-2010 Appendix C, code strength conversions, and
//! bilinear steel presets. The host application only consumes the tables;
//! nothing here depends on a host session.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions from material constants to tables
//! - **JSON-First**: All inputs and outputs implement Serialize/Deserialize
//! - **Rich Errors**: Degenerate inputs surface as structured errors, never NaN
//!
//! ## Quick Start
//!
//! ```rust
//! use cdp_core::{compute_compression, compute_tension};
//!
//! let (d, stress, strain) = compute_compression(20.1, 30000.0).unwrap().into_parts();
//! assert_eq!(d.len(), stress.len());
//! assert_eq!(strain[0], 0.0);
//!
//! let tension = compute_tension(2.01, 30000.0).unwrap();
//! assert_eq!(tension.len(), 43);
//! ```
//!
//! ## Modules
//!
//! - [`cdp`] - Compression and tension damage curves
//! - [`strength`] - Cube strength conversion and elastic modulus
//! - [`materials`] - Concrete and steel material inputs
//! - [`definition`] - Host-ready material definitions and tables
//! - [`library`] - Named material collection with settings
//! - [`file_io`] - Library files and CSV export
//! - [`errors`] - Structured error types

pub mod cdp;
pub mod definition;
pub mod errors;
pub mod file_io;
pub mod library;
pub mod materials;
pub mod strength;

// Re-export commonly used types at crate root for convenience
pub use cdp::{compute_compression, compute_tension, DamageCurve, MaterialConstants};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_library, save_library};
pub use library::MaterialLibrary;
pub use strength::{convert_cube_strength, elastic_modulus};
