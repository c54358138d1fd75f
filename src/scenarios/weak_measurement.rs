// src/scenarios/weak_measurement.rs

//! Weak measurements that couple to the bright component only.
//!
//! The measurement is modelled as a position-dependent phase kick
//! `exp(i·g·w(x)·x)`, where `w` is an optional Gaussian window around the
//! apparatus. Comparing a bright-only kick against a kick on both
//! components shows how much of the state a bright-coupled detector can
//! disturb.

use crate::analysis::{self, normalization_factor, trapezoid, trapezoid_complex};
use crate::core::constants::tolerances::OVERLAP_TOLERANCE;
use crate::core::constants::weak_defaults as defaults;
use crate::core::{
    AmplitudeParameters, ComplexField, ModelContext, ModelError, ModelResult, SpatialGrid,
};
use log::{debug, info, warn};
use num_complex::Complex;
use serde::{Deserialize, Serialize};

/// Which components the apparatus interacts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementTarget {
    /// Only the bright state couples to the detector.
    BrightOnly,
    /// Both states couple (the standard-QM comparison).
    Both,
}

/// A normalized bright/dark state together with its components.
///
/// `bright + dark == total` sample by sample; all three share one
/// normalization constant.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedState {
    pub total: ComplexField,
    pub bright: ComplexField,
    pub dark: ComplexField,
}

impl PreparedState {
    /// Divides all three fields by the norm of the recombined state.
    /// A zero norm leaves them untouched.
    fn renormalized(bright: ComplexField, dark: ComplexField, grid: &SpatialGrid) -> ModelResult<Self> {
        let total = bright.add(&dark)?;
        let norm = normalization_factor(&total, grid)?;
        if norm > 0.0 && norm.is_finite() {
            let inv = 1.0 / norm;
            Ok(Self { total: total.scale_real(inv), bright: bright.scale_real(inv), dark: dark.scale_real(inv) })
        } else {
            warn!("weak measurement: state has zero norm, skipping renormalization");
            Ok(Self { total, bright, dark })
        }
    }
}

/// The kick operator sampled on a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementOperator {
    pub operator: ComplexField,
    /// Window `w(x)`; all ones when the kick is not localized.
    pub profile: Vec<f64>,
    pub target: MeasurementTarget,
}

/// Parameters of a measurement, as they appear in job files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasurementSettings {
    pub coupling_strength: f64,
    pub position: f64,
    /// Gaussian window width; `None` kicks the whole grid uniformly.
    pub width: Option<f64>,
    /// `false` ignores `width` and kicks the whole grid, so job files can
    /// switch the window off.
    pub windowed: bool,
    pub target: MeasurementTarget,
}

impl Default for MeasurementSettings {
    fn default() -> Self {
        Self {
            coupling_strength: defaults::COUPLING,
            position: defaults::POSITION,
            width: Some(defaults::WIDTH),
            windowed: true,
            target: MeasurementTarget::BrightOnly,
        }
    }
}

impl MeasurementOperator {
    pub fn new(grid: &SpatialGrid, settings: &MeasurementSettings) -> ModelResult<Self> {
        if !settings.coupling_strength.is_finite() {
            return Err(ModelError::invalid("coupling_strength", "must be finite"));
        }
        let profile = match settings.width.filter(|_| settings.windowed) {
            Some(width) => crate::wavefunction::gaussian_envelope(grid, settings.position, width, None)?.real(),
            None => vec![1.0; grid.len()],
        };
        let operator = ComplexField::new(
            grid.points()
                .iter()
                .zip(&profile)
                .map(|(&x, &w)| Complex::from_polar(1.0, settings.coupling_strength * w * x))
                .collect(),
        );
        Ok(Self { operator, profile, target: settings.target })
    }
}

/// Result of post-selecting on a position window.
#[derive(Debug, Clone, PartialEq)]
pub struct PostSelection {
    pub selected: ComplexField,
    pub selection_probability: f64,
}

/// Builds `α·ψ_B + β·e^{iφ}·ψ_D` from the context and normalizes it.
pub fn prepare(ctx: &ModelContext, amplitudes: &AmplitudeParameters) -> ModelResult<PreparedState> {
    let (psi_b, psi_d) = ctx.components()?;
    PreparedState::renormalized(psi_b.scale_real(amplitudes.alpha), psi_d.scale(amplitudes.beta()), &ctx.grid)
}

/// Kicks the targeted components, recombines and renormalizes.
pub fn apply(
    state: &PreparedState,
    measurement: &MeasurementOperator,
    grid: &SpatialGrid,
) -> ModelResult<PreparedState> {
    let bright = state.bright.multiply(&measurement.operator)?;
    let dark = match measurement.target {
        MeasurementTarget::BrightOnly => state.dark.clone(),
        MeasurementTarget::Both => state.dark.multiply(&measurement.operator)?,
    };
    PreparedState::renormalized(bright, dark, grid)
}

/// `|∫conj(ψ_pre)·ψ_post dx|²`.
pub fn fidelity(pre: &ComplexField, post: &ComplexField, grid: &SpatialGrid) -> ModelResult<f64> {
    analysis::fidelity(pre, post, grid)
}

/// Keeps the amplitude inside `[x_min, x_max]`, zeroes the rest and
/// renormalizes by the selection probability (when it is positive).
pub fn post_select(
    state: &ComplexField,
    grid: &SpatialGrid,
    window: (f64, f64),
) -> ModelResult<PostSelection> {
    ModelError::ensure_same_len(grid.len(), state.len())?;
    let (x_min, x_max) = window;
    let inside: Vec<bool> = grid.map(|x| x >= x_min && x <= x_max);

    let (xs, density): (Vec<f64>, Vec<f64>) = grid
        .points()
        .iter()
        .zip(state.samples())
        .zip(&inside)
        .filter(|(_, keep)| **keep)
        .map(|((&x, c), _)| (x, c.norm_sqr()))
        .unzip();
    let selection_probability = trapezoid(&density, &xs)?;

    let scale = if selection_probability > 0.0 { 1.0 / selection_probability.sqrt() } else { 1.0 };
    let selected = ComplexField::new(
        state
            .samples()
            .iter()
            .zip(&inside)
            .map(|(&c, &keep)| if keep { c * scale } else { Complex::new(0.0, 0.0) })
            .collect(),
    );
    debug!("post-selection on [{:.3}, {:.3}]: p = {:.6}", x_min, x_max, selection_probability);
    Ok(PostSelection { selected, selection_probability })
}

/// Weak value `⟨ψ_f|A|ψ_i⟩ / ⟨ψ_f|ψ_i⟩` for an observable `A` given as a
/// multiplicative field.
///
/// Returns `None` when the overlap is too small for the ratio to mean anything.
pub fn weak_value(
    pre: &ComplexField,
    post: &ComplexField,
    observable: &ComplexField,
    grid: &SpatialGrid,
) -> ModelResult<Option<Complex<f64>>> {
    let overlap = analysis::overlap(post, pre, grid)?;
    let weighted = pre.multiply(observable)?;
    let expectation = analysis::overlap(post, &weighted, grid)?;
    if overlap.norm() > OVERLAP_TOLERANCE {
        Ok(Some(expectation / overlap))
    } else {
        Ok(None)
    }
}

/// `−i·dψ/dx`: second-order central differences inside the grid,
/// first-order one-sided differences at the two ends.
pub fn momentum(psi: &ComplexField, grid: &SpatialGrid) -> ModelResult<ComplexField> {
    ModelError::ensure_same_len(grid.len(), psi.len())?;
    let n = psi.len();
    if n < 2 {
        return Err(ModelError::invalid("grid", "a derivative needs at least two samples"));
    }
    let x = grid.points();
    let y = psi.samples();
    let minus_i = Complex::new(0.0, -1.0);

    let derivative = (0..n).map(|i| match i {
        0 => (y[1] - y[0]) / (x[1] - x[0]),
        i if i == n - 1 => (y[n - 1] - y[n - 2]) / (x[n - 1] - x[n - 2]),
        i => (y[i + 1] - y[i - 1]) / (x[i + 1] - x[i - 1]),
    });
    Ok(ComplexField::new(derivative.map(|d| minus_i * d).collect()))
}

/// `⟨x⟩ = ∫ x·|ψ|² dx` for a normalized state.
pub fn mean_position(psi: &ComplexField, grid: &SpatialGrid) -> ModelResult<f64> {
    ModelError::ensure_same_len(grid.len(), psi.len())?;
    let weighted: Vec<f64> = grid.points().iter().zip(psi.samples()).map(|(&x, c)| x * c.norm_sqr()).collect();
    trapezoid(&weighted, grid.points())
}

/// `⟨p⟩ = Re ∫ conj(ψ)·(−i dψ/dx) dx` for a normalized state.
pub fn mean_momentum(psi: &ComplexField, grid: &SpatialGrid) -> ModelResult<f64> {
    let p_psi = momentum(psi, grid)?;
    let integrand = psi.zip_with(&p_psi, |a, b| a.conj() * b)?;
    Ok(trapezoid_complex(integrand.samples(), grid.points())?.re)
}

/// Fidelity after a bright-only and a both-component kick at one coupling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CouplingPoint {
    pub coupling_strength: f64,
    pub bright_only_fidelity: f64,
    pub both_fidelity: f64,
}

/// Disturbance (as fidelity with the unmeasured state) against coupling
/// strength, for both targets.
pub fn coupling_scan(
    ctx: &ModelContext,
    amplitudes: &AmplitudeParameters,
    couplings: &[f64],
    position: f64,
    width: Option<f64>,
) -> ModelResult<Vec<CouplingPoint>> {
    info!("Weak-measurement coupling scan over {} strengths", couplings.len());
    let initial = prepare(ctx, amplitudes)?;
    couplings
        .iter()
        .map(|&g| {
            let mut settings = MeasurementSettings {
                coupling_strength: g,
                position,
                width,
                windowed: true,
                target: MeasurementTarget::BrightOnly,
            };
            let bright_only = apply(&initial, &MeasurementOperator::new(&ctx.grid, &settings)?, &ctx.grid)?;
            settings.target = MeasurementTarget::Both;
            let both = apply(&initial, &MeasurementOperator::new(&ctx.grid, &settings)?, &ctx.grid)?;
            Ok(CouplingPoint {
                coupling_strength: g,
                bright_only_fidelity: fidelity(&initial.total, &bright_only.total, &ctx.grid)?,
                both_fidelity: fidelity(&initial.total, &both.total, &ctx.grid)?,
            })
        })
        .collect()
}

/// Everything recorded for one measurement of a prepared state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementReport {
    pub settings: MeasurementSettings,
    pub initial_density: Vec<f64>,
    pub final_density: Vec<f64>,
    pub bright_density: Vec<f64>,
    pub dark_density: Vec<f64>,
    pub fidelity: f64,
    pub mean_position_before: f64,
    pub mean_position_after: f64,
    pub mean_momentum_before: f64,
    pub mean_momentum_after: f64,
    /// Present only when a post-selection window was requested.
    pub selection_probability: Option<f64>,
    /// Weak value of `x` between the prepared state and the post-selected
    /// final state; `None` without a window or when the overlap vanishes.
    pub position_weak_value: Option<Complex<f64>>,
}

/// Prepares the state, applies one measurement and optionally post-selects
/// the result on `window`.
pub fn measure(
    ctx: &ModelContext,
    amplitudes: &AmplitudeParameters,
    settings: &MeasurementSettings,
    window: Option<(f64, f64)>,
) -> ModelResult<MeasurementReport> {
    info!(
        "Weak measurement: g={} at x={} target={:?}",
        settings.coupling_strength, settings.position, settings.target
    );
    let grid = &ctx.grid;
    let initial = prepare(ctx, amplitudes)?;
    let operator = MeasurementOperator::new(grid, settings)?;
    let after = apply(&initial, &operator, grid)?;

    let (selection_probability, position_weak_value) = match window {
        Some(window) => {
            let selection = post_select(&after.total, grid, window)?;
            let position = ComplexField::from_real(grid.points());
            let value = weak_value(&initial.total, &selection.selected, &position, grid)?;
            (Some(selection.selection_probability), value)
        }
        None => (None, None),
    };

    Ok(MeasurementReport {
        settings: *settings,
        initial_density: initial.total.norm_sqr(),
        final_density: after.total.norm_sqr(),
        bright_density: after.bright.norm_sqr(),
        dark_density: after.dark.norm_sqr(),
        fidelity: fidelity(&initial.total, &after.total, grid)?,
        mean_position_before: mean_position(&initial.total, grid)?,
        mean_position_after: mean_position(&after.total, grid)?,
        mean_momentum_before: mean_momentum(&initial.total, grid)?,
        mean_momentum_after: mean_momentum(&after.total, grid)?,
        selection_probability,
        position_weak_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn setup() -> ModelResult<(ModelContext, PreparedState)> {
        let ctx = ModelContext::weak_measurement()?;
        let state = prepare(&ctx, &AmplitudeParameters::equal_weight(PI / 4.0))?;
        Ok((ctx, state))
    }

    #[test]
    fn test_zero_state_skips_renormalization() -> ModelResult<()> {
        let ctx = ModelContext::weak_measurement()?;
        let state = prepare(&ctx, &AmplitudeParameters::new(0.0, 0.0, 0.0))?;
        let all_zero = |field: &ComplexField| field.samples().iter().all(|c| c.re == 0.0 && c.im == 0.0);
        assert!(all_zero(&state.total) && all_zero(&state.bright) && all_zero(&state.dark));

        let op = MeasurementOperator::new(&ctx.grid, &MeasurementSettings::default())?;
        let after = apply(&state, &op, &ctx.grid)?;
        assert!(all_zero(&after.total) && all_zero(&after.bright) && all_zero(&after.dark));
        assert!(after.total.samples().iter().all(|c| !c.re.is_nan() && !c.im.is_nan()));
        Ok(())
    }

    #[test]
    fn test_prepared_state_is_normalized() -> ModelResult<()> {
        let (ctx, state) = setup()?;
        assert_relative_eq!(normalization_factor(&state.total, &ctx.grid)?, 1.0, epsilon = 1e-12);
        let recombined = state.bright.add(&state.dark)?;
        for (a, b) in recombined.samples().iter().zip(state.total.samples()) {
            assert_relative_eq!((a - b).norm(), 0.0, epsilon = 1e-12);
        }
        Ok(())
    }

    #[test]
    fn test_zero_coupling_is_identity() -> ModelResult<()> {
        let (ctx, state) = setup()?;
        let settings = MeasurementSettings { coupling_strength: 0.0, ..Default::default() };
        let after = apply(&state, &MeasurementOperator::new(&ctx.grid, &settings)?, &ctx.grid)?;
        assert_relative_eq!(fidelity(&state.total, &after.total, &ctx.grid)?, 1.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn test_kick_preserves_norm_and_lowers_fidelity() -> ModelResult<()> {
        let (ctx, state) = setup()?;
        let settings = MeasurementSettings { coupling_strength: 2.0, width: None, ..Default::default() };
        let after = apply(&state, &MeasurementOperator::new(&ctx.grid, &settings)?, &ctx.grid)?;
        assert_relative_eq!(normalization_factor(&after.total, &ctx.grid)?, 1.0, epsilon = 1e-9);
        assert!(fidelity(&state.total, &after.total, &ctx.grid)? < 1.0);
        Ok(())
    }

    #[test]
    fn test_window_can_be_switched_off() -> ModelResult<()> {
        let grid = SpatialGrid::linspace(-3.0, 3.0, 31)?;
        let settings: MeasurementSettings = toml::from_str("coupling_strength = 0.5\nwindowed = false")
            .map_err(ModelError::from)?;
        assert_eq!(settings.width, Some(defaults::WIDTH));
        let op = MeasurementOperator::new(&grid, &settings)?;
        assert!(op.profile.iter().all(|&w| w == 1.0));

        let windowed = MeasurementOperator::new(&grid, &MeasurementSettings::default())?;
        assert!(windowed.profile.iter().any(|&w| w < 1.0));
        Ok(())
    }

    #[test]
    fn test_unwindowed_operator_is_plain_phase_kick() -> ModelResult<()> {
        let grid = SpatialGrid::linspace(-1.0, 1.0, 5)?;
        let settings = MeasurementSettings { coupling_strength: 0.5, width: None, ..Default::default() };
        let op = MeasurementOperator::new(&grid, &settings)?;
        assert!(op.profile.iter().all(|&w| w == 1.0));
        for (c, &x) in op.operator.samples().iter().zip(grid.points()) {
            assert_relative_eq!(c.arg(), 0.5 * x, epsilon = 1e-12);
        }
        Ok(())
    }

    #[test]
    fn test_post_selection_renormalizes_window() -> ModelResult<()> {
        let (ctx, state) = setup()?;
        let half = post_select(&state.total, &ctx.grid, (0.0, 5.0))?;
        // Bright and dark packets are mirror images in magnitude, so half the weight is on x > 0.
        assert_relative_eq!(half.selection_probability, 0.5, epsilon = 1e-3);
        assert!(ctx.grid.points().iter().zip(half.selected.samples()).all(|(&x, c)| x >= 0.0 || c.norm() == 0.0));

        let empty = post_select(&state.total, &ctx.grid, (10.0, 20.0))?;
        assert_eq!(empty.selection_probability, 0.0);
        Ok(())
    }

    #[test]
    fn test_weak_value_of_identity_is_one() -> ModelResult<()> {
        let (ctx, state) = setup()?;
        let identity = ComplexField::from_real(&vec![1.0; ctx.grid.len()]);
        let value = weak_value(&state.total, &state.total, &identity, &ctx.grid)?;
        let value = value.ok_or(ModelError::Domain { message: "overlap vanished".to_string() })?;
        assert_relative_eq!(value.re, 1.0, epsilon = 1e-12);
        assert_relative_eq!(value.im, 0.0, epsilon = 1e-12);

        let zero = ComplexField::zeros(ctx.grid.len());
        assert_eq!(weak_value(&state.total, &zero, &identity, &ctx.grid)?, None);
        Ok(())
    }

    #[test]
    fn test_momentum_of_plane_wave_packet() -> ModelResult<()> {
        let grid = SpatialGrid::linspace(-8.0, 8.0, 4000)?;
        let psi = analysis::normalize(&crate::wavefunction::bright(&grid, 0.0, 1.0, Some(2.5))?, &grid)?;
        assert_relative_eq!(mean_momentum(&psi, &grid)?, 2.5, epsilon = 1e-3);
        assert_relative_eq!(mean_position(&psi, &grid)?, 0.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn test_bright_only_kick_disturbs_less() -> ModelResult<()> {
        let ctx = ModelContext::weak_measurement()?;
        let scan = coupling_scan(&ctx, &AmplitudeParameters::default(), &[0.5, 1.0], 0.0, None)?;
        for point in scan {
            assert!(point.bright_only_fidelity >= point.both_fidelity - 1e-12);
        }
        Ok(())
    }

    #[test]
    fn test_measure_reports_window_only_when_asked() -> ModelResult<()> {
        let ctx = ModelContext::weak_measurement()?;
        let amps = AmplitudeParameters::equal_weight(PI / 4.0);
        let plain = measure(&ctx, &amps, &MeasurementSettings::default(), None)?;
        assert_eq!(plain.selection_probability, None);
        assert_eq!(plain.final_density.len(), ctx.grid.len());
        assert!(plain.fidelity <= 1.0 + 1e-9);

        let windowed = measure(&ctx, &amps, &MeasurementSettings::default(), Some((-5.0, 5.0)))?;
        assert_relative_eq!(windowed.selection_probability.unwrap_or(0.0), 1.0, epsilon = 1e-9);
        Ok(())
    }
}
