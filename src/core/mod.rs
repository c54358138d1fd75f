// src/core/mod.rs

//! Core data structures and types

// Declare modules within core
pub mod error;
pub mod grid;
pub mod field;
pub mod amplitudes;
pub mod context;

// Re-export public types for convenient access via `brightdark::core::TypeName`
pub use error::{ModelError, ModelResult};
pub use grid::{linspace, SpatialGrid};
pub use field::{ComplexField, IntensityProfile};
pub use amplitudes::AmplitudeParameters;
pub use context::ModelContext;

pub mod constants;
pub use constants::model_constants::{FRAC_1_SQRT_2, PI, TAU}; // Re-export
