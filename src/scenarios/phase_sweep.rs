// src/scenarios/phase_sweep.rs

//! Dark-phase and amplitude-ratio sweeps over a fixed bright/dark pair.
//!
//! Every sample is independent, so with the `parallel` feature the samples
//! are evaluated on rayon's pool. Output order always follows input order.

use crate::analysis::{intensity, visibility, IntensityStats};
use crate::core::constants::model_constants::TAU;
use crate::core::{
    linspace, AmplitudeParameters, ComplexField, IntensityProfile, ModelContext, ModelError,
    ModelResult,
};
use crate::wavefunction::superpose_with;
use log::{debug, info};
use serde::Serialize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Parallel sequences recorded while sweeping the dark phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseSweep {
    pub phases: Vec<f64>,
    pub visibilities: Vec<f64>,
    pub peak_positions: Vec<f64>,
}

impl PhaseSweep {
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn mean_visibility(&self) -> f64 {
        if self.visibilities.is_empty() {
            0.0
        } else {
            self.visibilities.iter().sum::<f64>() / self.visibilities.len() as f64
        }
    }

    pub fn max_visibility(&self) -> f64 {
        self.visibilities.iter().copied().reduce(f64::max).unwrap_or(0.0)
    }

    pub fn min_visibility(&self) -> f64 {
        self.visibilities.iter().copied().reduce(f64::min).unwrap_or(0.0)
    }
}

/// One intensity curve at a fixed set of weights.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterferenceCurve {
    pub amplitudes: AmplitudeParameters,
    pub intensity: IntensityProfile,
    pub visibility: f64,
}

/// One frame of the phase animation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimationFrame {
    pub index: usize,
    pub phase: f64,
    pub title: String,
    pub intensity: IntensityProfile,
}

/// Total intensity `|αψ_B + βψ_D|²` for the context's two states.
pub fn interference_profile(
    ctx: &ModelContext,
    amplitudes: &AmplitudeParameters,
) -> ModelResult<IntensityProfile> {
    let (psi_b, psi_d) = ctx.components()?;
    intensity(&superpose_with(&psi_b, &psi_d, amplitudes)?, None)
}

fn curve(
    psi_b: &ComplexField,
    psi_d: &ComplexField,
    amplitudes: AmplitudeParameters,
) -> ModelResult<InterferenceCurve> {
    let profile = intensity(&superpose_with(psi_b, psi_d, &amplitudes)?, None)?;
    Ok(InterferenceCurve { visibility: visibility(&profile), intensity: profile, amplitudes })
}

/// Evaluates `f` over `inputs`, in parallel when the feature is enabled.
fn evaluate_all<I, T, F>(inputs: &[I], f: F) -> ModelResult<Vec<T>>
where
    I: Sync,
    T: Send,
    F: Fn(&I) -> ModelResult<T> + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        inputs.par_iter().map(f).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        inputs.iter().map(f).collect()
    }
}

/// Sweeps the dark phase over `linspace(start, end, samples)`, recording the
/// visibility and the peak-intensity position at each phase.
///
/// # Errors
/// * `ModelError::InvalidParameter` if `samples` is zero or a bound is not finite.
pub fn phase_sweep(
    ctx: &ModelContext,
    amplitudes: &AmplitudeParameters,
    start: f64,
    end: f64,
    samples: usize,
) -> ModelResult<PhaseSweep> {
    if samples == 0 {
        return Err(ModelError::invalid("samples", "a sweep needs at least one sample"));
    }
    if !start.is_finite() || !end.is_finite() {
        return Err(ModelError::invalid("phase range", format!("[{}, {}] is not finite", start, end)));
    }

    info!("Phase sweep over [{:.3}, {:.3}] with {} samples", start, end, samples);
    let (psi_b, psi_d) = ctx.components()?;
    let phases = linspace(start, end, samples);

    let points = evaluate_all(&phases, |&phase| {
        let curve = curve(&psi_b, &psi_d, amplitudes.with_phase(phase))?;
        let stats = IntensityStats::from_profile(&curve.intensity, &ctx.grid)?;
        debug!("phase={:.4} visibility={:.6} peak={:.4}", phase, stats.visibility, stats.peak_position);
        Ok((stats.visibility, stats.peak_position))
    })?;

    let (visibilities, peak_positions) = points.into_iter().unzip();
    Ok(PhaseSweep { phases, visibilities, peak_positions })
}

/// One curve per listed phase at fixed weights.
pub fn phase_curves(
    ctx: &ModelContext,
    amplitudes: &AmplitudeParameters,
    phases: &[f64],
) -> ModelResult<Vec<InterferenceCurve>> {
    let (psi_b, psi_d) = ctx.components()?;
    evaluate_all(phases, |&phase| curve(&psi_b, &psi_d, amplitudes.with_phase(phase)))
}

/// One curve per dark amplitude `β`, with `α = √(1 − β²)`.
pub fn amplitude_sweep(
    ctx: &ModelContext,
    dark_amplitudes: &[f64],
    beta_phase: f64,
) -> ModelResult<Vec<InterferenceCurve>> {
    info!("Amplitude sweep over {} dark amplitudes at phase {:.3}", dark_amplitudes.len(), beta_phase);
    let (psi_b, psi_d) = ctx.components()?;
    evaluate_all(dark_amplitudes, |&beta| {
        curve(&psi_b, &psi_d, AmplitudeParameters::from_dark_amplitude(beta, beta_phase)?)
    })
}

/// Frames of one full phase turn: frame `i` uses phase `2π·i/frames`.
pub fn animation_frames(
    ctx: &ModelContext,
    amplitudes: &AmplitudeParameters,
    frames: usize,
) -> ModelResult<Vec<AnimationFrame>> {
    if frames == 0 {
        return Err(ModelError::invalid("frames", "an animation needs at least one frame"));
    }
    let (psi_b, psi_d) = ctx.components()?;
    let indices: Vec<usize> = (0..frames).collect();
    evaluate_all(&indices, |&index| {
        let phase = TAU * index as f64 / frames as f64;
        let profile = intensity(&superpose_with(&psi_b, &psi_d, &amplitudes.with_phase(phase))?, None)?;
        Ok(AnimationFrame {
            index,
            phase,
            title: format!("Bright/Dark Interference | Dark Phase = {:.2} rad", phase),
            intensity: profile,
        })
    })
}
