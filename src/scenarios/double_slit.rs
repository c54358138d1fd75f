// src/scenarios/double_slit.rs

//! Double-slit interference with bright and dark components.
//!
//! Each slit contributes a Gaussian envelope on the screen. The far slit's
//! contribution carries the geometric phase `k·Δ(x)`, and both dark
//! contributions carry an extra phase shift `θ`:
//!
//! ```text
//! ψ_B = α (env₁ + env₂·e^{iφ}) / √2
//! ψ_D = β (env₁·e^{iθ} + env₂·e^{i(φ+θ)}) / √2
//! ```

use crate::analysis::{intensity, interference_term, visibility};
use crate::core::constants::double_slit_defaults as defaults;
use crate::core::constants::model_constants::{FRAC_1_SQRT_2, TAU};
use crate::core::{linspace, ComplexField, IntensityProfile, ModelError, ModelResult, SpatialGrid};
use crate::wavefunction::gaussian_envelope;
use log::{debug, info};
use num_complex::Complex;
use serde::{Deserialize, Serialize};

/// Geometry of the two-slit apparatus (all lengths in units of the wavelength scale).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoubleSlitSetup {
    pub slit_separation: f64,
    pub slit_width: f64,
    pub screen_distance: f64,
    pub wavelength: f64,
}

impl Default for DoubleSlitSetup {
    fn default() -> Self {
        Self {
            slit_separation: defaults::SLIT_SEPARATION,
            slit_width: defaults::SLIT_WIDTH,
            screen_distance: defaults::SCREEN_DISTANCE,
            wavelength: defaults::WAVELENGTH,
        }
    }
}

/// Everything reported for one double-slit configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoubleSlitPattern {
    pub total_intensity: IntensityProfile,
    pub bright_only: IntensityProfile,
    pub dark_only: IntensityProfile,
    pub interference_term: Vec<f64>,
    pub visibility: f64,
}

/// Patterns without and with bright-only which-path detection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhichPathOutcome {
    pub detection_efficiency: f64,
    pub no_detection: DoubleSlitPattern,
    pub with_detection: DoubleSlitPattern,
}

impl WhichPathOutcome {
    /// Relative loss of visibility caused by detection, `1 − V_det/V_none`
    /// (0 when there was no visibility to lose).
    pub fn visibility_reduction(&self) -> f64 {
        let base = self.no_detection.visibility;
        if base == 0.0 { 0.0 } else { 1.0 - self.with_detection.visibility / base }
    }
}

/// The three delayed-choice readouts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DelayedChoiceOutcome {
    pub initial: DoubleSlitPattern,
    pub bright_only: DoubleSlitPattern,
    pub dark_influence: DoubleSlitPattern,
}

/// Visibility of the detected pattern as the detector efficiency grows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EfficiencyScan {
    pub efficiencies: Vec<f64>,
    pub visibilities: Vec<f64>,
}

impl DoubleSlitSetup {
    /// The default observation screen, `[-4, 4]` × 1000.
    pub fn default_screen() -> ModelResult<SpatialGrid> {
        SpatialGrid::linspace(defaults::SCREEN_MIN, defaults::SCREEN_MAX, defaults::SCREEN_POINTS)
    }

    fn validate(&self) -> ModelResult<()> {
        if !(self.wavelength.is_finite() && self.wavelength > 0.0) {
            return Err(ModelError::invalid(
                "wavelength",
                format!("must be finite and positive, got {}", self.wavelength),
            ));
        }
        if !(self.screen_distance.is_finite() && self.screen_distance >= 0.0) {
            return Err(ModelError::invalid(
                "screen_distance",
                format!("must be finite and non-negative, got {}", self.screen_distance),
            ));
        }
        if !self.slit_separation.is_finite() {
            return Err(ModelError::invalid("slit_separation", "must be finite"));
        }
        Ok(())
    }

    /// Centres of the two slits, `∓d/2`.
    pub fn slit_positions(&self) -> (f64, f64) {
        (-self.slit_separation / 2.0, self.slit_separation / 2.0)
    }

    /// `k = 2π/λ`.
    pub fn wavenumber(&self) -> f64 {
        TAU / self.wavelength
    }

    /// Path-length difference between the two slits and screen position `x`.
    pub fn path_difference(&self, x: f64) -> f64 {
        let (s1, s2) = self.slit_positions();
        let l_sq = self.screen_distance * self.screen_distance;
        let path1 = ((x - s1).powi(2) + l_sq).sqrt();
        let path2 = ((x - s2).powi(2) + l_sq).sqrt();
        path2 - path1
    }

    /// Gaussian envelope of a single slit, with the slit width as σ.
    pub fn slit_envelope(&self, screen: &SpatialGrid, slit_center: f64) -> ModelResult<ComplexField> {
        gaussian_envelope(screen, slit_center, self.slit_width, None)
    }

    /// Full bright/dark pattern on `screen`.
    ///
    /// `beta` is a real dark weight here; the dark phase enters through
    /// `dark_phase_shift`.
    pub fn pattern(
        &self,
        screen: &SpatialGrid,
        alpha: f64,
        beta: f64,
        dark_phase_shift: f64,
    ) -> ModelResult<DoubleSlitPattern> {
        self.validate()?;
        let (s1, s2) = self.slit_positions();
        let k = self.wavenumber();

        let env1 = self.slit_envelope(screen, s1)?;
        let env2 = self.slit_envelope(screen, s2)?;
        let path_phase = ComplexField::new(
            screen.map(|x| Complex::from_polar(1.0, k * self.path_difference(x))),
        );
        let dark_shift = Complex::from_polar(1.0, dark_phase_shift);

        let bright_2 = env2.multiply(&path_phase)?;
        let dark_1 = env1.scale(dark_shift);
        let dark_2 = bright_2.scale(dark_shift);

        let psi_bright = env1.add(&bright_2)?.scale_real(alpha * FRAC_1_SQRT_2);
        let psi_dark = dark_1.add(&dark_2)?.scale_real(beta * FRAC_1_SQRT_2);
        let psi_total = psi_bright.add(&psi_dark)?;

        let total_intensity = intensity(&psi_total, None)?;
        let visibility = visibility(&total_intensity);
        debug!(
            "double slit: alpha={:.4} beta={:.4} theta={:.4} visibility={:.6}",
            alpha, beta, dark_phase_shift, visibility
        );

        Ok(DoubleSlitPattern {
            bright_only: intensity(&psi_bright, None)?,
            dark_only: intensity(&psi_dark, None)?,
            interference_term: interference_term(&psi_bright, &psi_dark)?,
            total_intensity,
            visibility,
        })
    }

    /// Equal bright/dark weights, no extra dark phase.
    pub fn default_pattern(&self, screen: &SpatialGrid) -> ModelResult<DoubleSlitPattern> {
        self.pattern(screen, FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0)
    }

    /// Which-path detectors that only couple to the bright component.
    ///
    /// Detection removes a fraction `η` of the bright population
    /// (`α = √(1−η)/√2`) and adds a small dark phase of π/8.
    pub fn which_path(
        &self,
        screen: &SpatialGrid,
        detection_efficiency: f64,
    ) -> ModelResult<WhichPathOutcome> {
        if !(0.0..=1.0).contains(&detection_efficiency) {
            return Err(ModelError::invalid(
                "detection_efficiency",
                format!("must lie in [0, 1], got {}", detection_efficiency),
            ));
        }
        let alpha_reduced = FRAC_1_SQRT_2 * (1.0 - detection_efficiency).sqrt();
        Ok(WhichPathOutcome {
            detection_efficiency,
            no_detection: self.default_pattern(screen)?,
            with_detection: self.pattern(
                screen,
                alpha_reduced,
                FRAC_1_SQRT_2,
                defaults::DETECTION_DARK_PHASE,
            )?,
        })
    }

    /// Detected-pattern visibility over `linspace(0, 1, samples)` efficiencies.
    pub fn visibility_vs_efficiency(
        &self,
        screen: &SpatialGrid,
        samples: usize,
    ) -> ModelResult<EfficiencyScan> {
        if samples == 0 {
            return Err(ModelError::invalid("samples", "a scan needs at least one sample"));
        }
        info!("Which-path efficiency scan with {} samples", samples);
        let efficiencies = linspace(0.0, 1.0, samples);
        let visibilities = efficiencies
            .iter()
            .map(|&eta| Ok(self.which_path(screen, eta)?.with_detection.visibility))
            .collect::<ModelResult<Vec<f64>>>()?;
        Ok(EfficiencyScan { efficiencies, visibilities })
    }

    /// The which-path decision taken after the slits: only detection changes.
    pub fn delayed_choice(&self, screen: &SpatialGrid) -> ModelResult<DelayedChoiceOutcome> {
        Ok(DelayedChoiceOutcome {
            initial: self.default_pattern(screen)?,
            bright_only: self.pattern(screen, 1.0, 0.0, 0.0)?,
            dark_influence: self.pattern(screen, 0.7, 0.714, 0.0)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_path_difference_is_antisymmetric() {
        let setup = DoubleSlitSetup::default();
        assert_eq!(setup.path_difference(0.0), 0.0);
        assert_relative_eq!(setup.path_difference(2.5), -setup.path_difference(-2.5), epsilon = 1e-12);
        // Closer to slit 2 (at +1) means a shorter second path.
        assert!(setup.path_difference(1.0) < 0.0);
    }

    #[test]
    fn test_visibility_matches_total_intensity() -> ModelResult<()> {
        let setup = DoubleSlitSetup::default();
        let screen = DoubleSlitSetup::default_screen()?;
        let pattern = setup.pattern(&screen, 0.6, 0.8, 0.3)?;
        let (max, min) = (pattern.total_intensity.max(), pattern.total_intensity.min());
        assert_eq!(pattern.visibility, (max - min) / (max + min));
        Ok(())
    }

    #[test]
    fn test_components_and_cross_term_add_up() -> ModelResult<()> {
        let setup = DoubleSlitSetup::default();
        let screen = DoubleSlitSetup::default_screen()?;
        let pattern = setup.pattern(&screen, FRAC_1_SQRT_2, FRAC_1_SQRT_2, 1.1)?;
        for i in (0..screen.len()).step_by(37) {
            assert_relative_eq!(
                pattern.total_intensity.values()[i],
                pattern.bright_only.values()[i]
                    + pattern.dark_only.values()[i]
                    + pattern.interference_term[i],
                epsilon = 1e-12
            );
        }
        Ok(())
    }

    #[test]
    fn test_which_path_bounds() -> ModelResult<()> {
        let setup = DoubleSlitSetup::default();
        let screen = DoubleSlitSetup::default_screen()?;
        assert!(setup.which_path(&screen, 1.5).is_err());

        let full = setup.which_path(&screen, 1.0)?;
        // Perfect detection silences the bright component entirely.
        assert!(full.with_detection.bright_only.values().iter().all(|&v| v == 0.0));
        Ok(())
    }

    #[test]
    fn test_zero_wavelength_rejected() -> ModelResult<()> {
        let setup = DoubleSlitSetup { wavelength: 0.0, ..Default::default() };
        let screen = DoubleSlitSetup::default_screen()?;
        assert!(setup.default_pattern(&screen).is_err());
        Ok(())
    }
}
