//! Error handling logic

use thiserror::Error;

/// Error types raised by the interference model.
///
/// Degenerate numerics (a zero-norm field, a zero visibility denominator,
/// an empty post-selection window) are *not* errors: the analyzer returns a
/// defined fallback for those. Errors are reserved for inputs that have no
/// meaningful value at all.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The formula is undefined for the given input (e.g. a Gaussian of zero width).
    #[error("Domain error: {message}")]
    Domain {
        /// Domain failure message
        message: String,
    },

    /// A scalar parameter is outside its accepted range.
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Name of the offending parameter
        name: &'static str,
        /// InvalidParameter failure message
        message: String,
    },

    /// Two sampled quantities do not share the same grid.
    #[error("Dimension mismatch: expected {expected} samples, found {found}")]
    DimensionMismatch {
        /// Length of the reference sequence
        expected: usize,
        /// Length of the sequence that disagreed
        found: usize,
    },

    /// Amplitudes violate `|α|² + |β|² = 1` beyond the requested tolerance.
    #[error("Normalization violated: |alpha|^2 + |beta|^2 = {norm_sq} (tolerance {tolerance})")]
    Normalization {
        /// Observed squared norm
        norm_sq: f64,
        /// Tolerance that was exceeded
        tolerance: f64,
    },

    /// A job file could not be interpreted.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ModelError {
    /// Shorthand for [`ModelError::InvalidParameter`].
    pub(crate) fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        ModelError::InvalidParameter { name, message: message.into() }
    }

    /// Fails with [`ModelError::DimensionMismatch`] unless both lengths agree.
    pub(crate) fn ensure_same_len(expected: usize, found: usize) -> Result<(), Self> {
        if expected == found {
            Ok(())
        } else {
            Err(ModelError::DimensionMismatch { expected, found })
        }
    }
}

impl From<toml::de::Error> for ModelError {
    fn from(e: toml::de::Error) -> Self {
        ModelError::Config(e.to_string())
    }
}

/// Result alias used across the crate.
pub type ModelResult<T> = Result<T, ModelError>;
