// src/core/field.rs

use super::error::{ModelError, ModelResult};
use num_complex::Complex;
use num_traits::Zero;
use serde::Serialize;
use std::fmt;

/// A wavefunction sampled on a [`SpatialGrid`](super::SpatialGrid): one
/// complex amplitude per grid point.
///
/// Fields are values. Every transformation below returns a new field and
/// leaves its inputs untouched.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct ComplexField {
    samples: Vec<Complex<f64>>,
}

impl ComplexField {
    /// Wraps an existing sample vector.
    pub fn new(samples: Vec<Complex<f64>>) -> Self {
        Self { samples }
    }

    /// A field of `len` zeros.
    pub fn zeros(len: usize) -> Self {
        Self { samples: vec![Complex::zero(); len] }
    }

    /// Lifts real samples onto the real axis.
    pub fn from_real(values: &[f64]) -> Self {
        Self { samples: values.iter().map(|&v| Complex::new(v, 0.0)).collect() }
    }

    /// Provides read-only access to the samples.
    pub fn samples(&self) -> &[Complex<f64>] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<Complex<f64>> {
        self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Multiplies every sample by a complex scalar.
    pub fn scale(&self, factor: Complex<f64>) -> Self {
        Self { samples: self.samples.iter().map(|&c| c * factor).collect() }
    }

    /// Multiplies every sample by a real scalar.
    pub fn scale_real(&self, factor: f64) -> Self {
        Self { samples: self.samples.iter().map(|&c| c * factor).collect() }
    }

    /// Elementwise sum.
    pub fn add(&self, other: &ComplexField) -> ModelResult<Self> {
        self.zip_with(other, |a, b| a + b)
    }

    /// Elementwise product.
    pub fn multiply(&self, other: &ComplexField) -> ModelResult<Self> {
        self.zip_with(other, |a, b| a * b)
    }

    /// Elementwise complex conjugate.
    pub fn conj(&self) -> Self {
        self.map(|c| c.conj())
    }

    /// Applies `f` to every sample.
    pub fn map(&self, f: impl Fn(Complex<f64>) -> Complex<f64>) -> Self {
        Self { samples: self.samples.iter().map(|&c| f(c)).collect() }
    }

    /// Combines two fields of equal length sample by sample.
    pub fn zip_with(
        &self,
        other: &ComplexField,
        f: impl Fn(Complex<f64>, Complex<f64>) -> Complex<f64>,
    ) -> ModelResult<Self> {
        ModelError::ensure_same_len(self.len(), other.len())?;
        Ok(Self {
            samples: self.samples.iter().zip(&other.samples).map(|(&a, &b)| f(a, b)).collect(),
        })
    }

    /// Squared magnitude of every sample.
    pub fn norm_sqr(&self) -> Vec<f64> {
        self.samples.iter().map(|c| c.norm_sqr()).collect()
    }

    /// Real parts of every sample.
    pub fn real(&self) -> Vec<f64> {
        self.samples.iter().map(|c| c.re).collect()
    }

    /// Imaginary parts of every sample.
    pub fn imag(&self) -> Vec<f64> {
        self.samples.iter().map(|c| c.im).collect()
    }
}

impl fmt::Display for ComplexField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SHOWN: usize = 4;
        write!(f, "Field(len={})[", self.samples.len())?;
        for (i, c) in self.samples.iter().take(SHOWN).enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        if self.samples.len() > SHOWN {
            write!(f, ", ...")?;
        }
        write!(f, "]")
    }
}

/// Observable intensity: one non-negative value per grid point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IntensityProfile {
    values: Vec<f64>,
}

impl IntensityProfile {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest value, or 0 for an empty profile.
    pub fn max(&self) -> f64 {
        self.values.iter().copied().reduce(f64::max).unwrap_or(0.0)
    }

    /// Smallest value, or 0 for an empty profile.
    pub fn min(&self) -> f64 {
        self.values.iter().copied().reduce(f64::min).unwrap_or(0.0)
    }

    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            0.0
        } else {
            self.values.iter().sum::<f64>() / self.values.len() as f64
        }
    }

    /// Index of the first maximum (argmax semantics).
    pub fn peak_index(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &v) in self.values.iter().enumerate() {
            match best {
                Some((_, b)) if v <= b => {}
                _ => best = Some((i, v)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// Elementwise sum of two profiles on the same grid.
    pub fn add(&self, other: &IntensityProfile) -> ModelResult<Self> {
        ModelError::ensure_same_len(self.len(), other.len())?;
        Ok(Self { values: self.values.iter().zip(&other.values).map(|(a, b)| a + b).collect() })
    }
}
