// src/analysis/mod.rs

//! Observables derived from a sampled wavefunction: intensity, fringe
//! visibility, trapezoidal normalization, overlaps and summary statistics.

use crate::core::{ComplexField, IntensityProfile, ModelError, ModelResult, SpatialGrid};
use log::warn;
use num_complex::Complex;
use num_traits::Zero;
use serde::Serialize;

// --- Helper Functions ---

/// Trapezoidal rule over samples `y` taken at positions `x`.
/// Fewer than two samples integrate to zero.
pub fn trapezoid(y: &[f64], x: &[f64]) -> ModelResult<f64> {
    ModelError::ensure_same_len(x.len(), y.len())?;
    Ok(x.windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| 0.5 * (xs[1] - xs[0]) * (ys[0] + ys[1]))
        .sum())
}

/// Complex-valued counterpart of [`trapezoid`].
pub fn trapezoid_complex(y: &[Complex<f64>], x: &[f64]) -> ModelResult<Complex<f64>> {
    ModelError::ensure_same_len(x.len(), y.len())?;
    Ok(x.windows(2)
        .zip(y.windows(2))
        .fold(Complex::zero(), |acc, (xs, ys)| acc + (ys[0] + ys[1]) * (0.5 * (xs[1] - xs[0]))))
}

// --- Public Analysis Functions ---

/// Observable intensity `|ψ|²`, optionally scaled by a detection efficiency.
///
/// # Arguments
/// * `field` - The sampled wavefunction.
/// * `detection_efficiency` - Optional factor in `[0, 1]` applied to every sample.
///
/// # Returns
/// * `Ok(IntensityProfile)` with one value per sample.
/// * `Err(ModelError::InvalidParameter)` if the efficiency is outside `[0, 1]`.
pub fn intensity(
    field: &ComplexField,
    detection_efficiency: Option<f64>,
) -> ModelResult<IntensityProfile> {
    let efficiency = detection_efficiency.unwrap_or(1.0);
    if !(0.0..=1.0).contains(&efficiency) {
        return Err(ModelError::invalid(
            "detection_efficiency",
            format!("must lie in [0, 1], got {}", efficiency),
        ));
    }
    Ok(IntensityProfile::new(
        field.samples().iter().map(|c| c.norm_sqr() * efficiency).collect(),
    ))
}

/// Fringe visibility `(max − min)/(max + min)`.
///
/// Returns exactly `0.0` when `max + min == 0` (an all-zero or empty profile).
pub fn visibility(profile: &IntensityProfile) -> f64 {
    let (max, min) = (profile.max(), profile.min());
    let denominator = max + min;
    if denominator == 0.0 {
        0.0
    } else {
        (max - min) / denominator
    }
}

/// `√(∫|ψ|²dx)` by the trapezoidal rule over `grid`.
pub fn normalization_factor(field: &ComplexField, grid: &SpatialGrid) -> ModelResult<f64> {
    let density = field.norm_sqr();
    Ok(trapezoid(&density, grid.points())?.sqrt())
}

/// Scales `field` to unit norm on `grid`.
///
/// A zero (or non-finite) norm cannot be divided out; the field is then
/// returned unchanged and a warning is logged.
pub fn normalize(field: &ComplexField, grid: &SpatialGrid) -> ModelResult<ComplexField> {
    let norm = normalization_factor(field, grid)?;
    if norm > 0.0 && norm.is_finite() {
        Ok(field.scale_real(1.0 / norm))
    } else {
        warn!("normalize: degenerate field (norm = {}), returning it unnormalized", norm);
        Ok(field.clone())
    }
}

/// `∫conj(ψ₁)·ψ₂ dx`.
pub fn overlap(
    psi1: &ComplexField,
    psi2: &ComplexField,
    grid: &SpatialGrid,
) -> ModelResult<Complex<f64>> {
    let integrand = psi1.zip_with(psi2, |a, b| a.conj() * b)?;
    trapezoid_complex(integrand.samples(), grid.points())
}

/// `|∫conj(ψ₁)·ψ₂ dx|²`.
pub fn fidelity(psi1: &ComplexField, psi2: &ComplexField, grid: &SpatialGrid) -> ModelResult<f64> {
    Ok(overlap(psi1, psi2, grid)?.norm_sqr())
}

/// Cross term `2·Re(ψ_B·conj(ψ_D))`: the part of `|ψ_B + ψ_D|²` that the
/// incoherent sum misses.
pub fn interference_term(psi_bright: &ComplexField, psi_dark: &ComplexField) -> ModelResult<Vec<f64>> {
    let product = psi_bright.zip_with(psi_dark, |b, d| b * d.conj())?;
    Ok(product.samples().iter().map(|c| 2.0 * c.re).collect())
}

/// Classical comparison curve `|a|² + |b|²`.
pub fn incoherent_sum(a: &ComplexField, b: &ComplexField) -> ModelResult<IntensityProfile> {
    intensity(a, None)?.add(&intensity(b, None)?)
}

/// Summary statistics of one intensity profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntensityStats {
    pub max: f64,
    pub min: f64,
    pub mean: f64,
    pub peak_index: usize,
    pub peak_position: f64,
    pub visibility: f64,
}

impl IntensityStats {
    /// Computes the statistics of `profile` sampled on `grid`.
    ///
    /// # Returns
    /// * `Err(ModelError::DimensionMismatch)` if the profile and grid differ in length.
    pub fn from_profile(profile: &IntensityProfile, grid: &SpatialGrid) -> ModelResult<Self> {
        ModelError::ensure_same_len(grid.len(), profile.len())?;
        // A grid always has at least one point, so a peak exists.
        let peak_index = profile.peak_index().unwrap_or(0);
        Ok(Self {
            max: profile.max(),
            min: profile.min(),
            mean: profile.mean(),
            peak_index,
            peak_position: grid.points()[peak_index],
            visibility: visibility(profile),
        })
    }
}
