// src/wavefunction/mod.rs

//! Gaussian bright/dark states and their superposition.
//!
//! A state is a Gaussian envelope `exp(-(x-c)²/(2σ²))`, optionally carrying
//! a propagating phase `exp(i·k·x)`. The bright component is the one a
//! detector can register; the dark component only shows up through
//! interference once the two are superposed with a complex weight.

use crate::core::{AmplitudeParameters, ComplexField, ModelError, ModelResult, SpatialGrid};
use crate::core::constants::tolerances::NORM_TOLERANCE;
use log::{debug, warn};
use num_complex::Complex;
use serde::{Deserialize, Serialize};

/// A Gaussian wave packet description, evaluated on demand against a grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianState {
    pub center: f64,
    pub sigma: f64,
    /// Propagating-phase wavenumber `k`; `None` leaves the envelope real.
    #[serde(default)]
    pub wavenumber: Option<f64>,
}

impl GaussianState {
    pub fn new(center: f64, sigma: f64) -> Self {
        Self { center, sigma, wavenumber: None }
    }

    /// Adds the `exp(i·k·x)` factor.
    pub fn with_wavenumber(self, k: f64) -> Self {
        Self { wavenumber: Some(k), ..self }
    }

    pub fn evaluate(&self, grid: &SpatialGrid) -> ModelResult<ComplexField> {
        gaussian_envelope(grid, self.center, self.sigma, self.wavenumber)
    }
}

/// Rejects widths for which the Gaussian is undefined.
fn check_sigma(sigma: f64) -> ModelResult<()> {
    if sigma.is_finite() && sigma > 0.0 {
        Ok(())
    } else {
        Err(ModelError::Domain {
            message: format!("Gaussian width must be finite and positive, got sigma={}", sigma),
        })
    }
}

/// Samples `exp(-(x-center)²/(2·sigma²))`, times `exp(i·k·x)` when a
/// wavenumber is given.
///
/// # Errors
/// * `ModelError::Domain` if `sigma` is zero, negative or not finite.
/// * `ModelError::InvalidParameter` if `center` or the wavenumber is not finite.
pub fn gaussian_envelope(
    grid: &SpatialGrid,
    center: f64,
    sigma: f64,
    wavenumber: Option<f64>,
) -> ModelResult<ComplexField> {
    check_sigma(sigma)?;
    if !center.is_finite() {
        return Err(ModelError::invalid("center", format!("must be finite, got {}", center)));
    }
    if let Some(k) = wavenumber {
        if !k.is_finite() {
            return Err(ModelError::invalid("wavenumber", format!("must be finite, got {}", k)));
        }
    }

    let two_sigma_sq = 2.0 * sigma * sigma;
    let samples = grid.map(|x| {
        let envelope = (-(x - center).powi(2) / two_sigma_sq).exp();
        match wavenumber {
            Some(k) => Complex::from_polar(envelope, k * x),
            None => Complex::new(envelope, 0.0),
        }
    });
    Ok(ComplexField::new(samples))
}

/// The detectable component.
pub fn bright(
    grid: &SpatialGrid,
    center: f64,
    sigma: f64,
    wavenumber: Option<f64>,
) -> ModelResult<ComplexField> {
    gaussian_envelope(grid, center, sigma, wavenumber)
}

/// The undetectable component.
pub fn dark(
    grid: &SpatialGrid,
    center: f64,
    sigma: f64,
    wavenumber: Option<f64>,
) -> ModelResult<ComplexField> {
    gaussian_envelope(grid, center, sigma, wavenumber)
}

/// Forms `alpha·ψ_B + (|β|·e^{iφ})·ψ_D`.
///
/// No normalization is applied: callers pass normalized amplitudes or
/// renormalize downstream. Weights with `α² + |β|² ≠ 1` are logged.
pub fn superpose(
    psi_bright: &ComplexField,
    psi_dark: &ComplexField,
    alpha: f64,
    beta_magnitude: f64,
    beta_phase: f64,
) -> ModelResult<ComplexField> {
    let beta = Complex::from_polar(beta_magnitude, beta_phase);
    let norm_sq = alpha * alpha + beta_magnitude * beta_magnitude;
    if (norm_sq - 1.0).abs() > NORM_TOLERANCE {
        warn!("superpose: weights are not normalized (alpha^2 + |beta|^2 = {:.6})", norm_sq);
    }
    debug!(
        "superpose: alpha={:.4}, beta={:.4}, phase={:.4}, samples={}",
        alpha,
        beta_magnitude,
        beta_phase,
        psi_bright.len()
    );
    psi_bright.zip_with(psi_dark, |b, d| b * alpha + d * beta)
}

/// [`superpose`] taking the weights as one value.
pub fn superpose_with(
    psi_bright: &ComplexField,
    psi_dark: &ComplexField,
    amplitudes: &AmplitudeParameters,
) -> ModelResult<ComplexField> {
    superpose(
        psi_bright,
        psi_dark,
        amplitudes.alpha,
        amplitudes.beta_magnitude,
        amplitudes.beta_phase,
    )
}
