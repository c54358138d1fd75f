// src/experiments/scenario.rs

//! The runnable scenarios an [`Experiment`](super::Experiment) is made of.
//!
//! A `Scenario` is a plain parameter record. It does not hold the grid or the
//! bright/dark states; those come from the [`ModelContext`](crate::core::ModelContext)
//! handed to the simulator, so the same experiment can run against any context.

use crate::core::constants::double_slit_defaults;
use crate::core::constants::model_constants::{PI, TAU};
use crate::core::constants::simulator_defaults;
use crate::core::{AmplitudeParameters, ModelError, ModelResult, SpatialGrid};
use crate::scenarios::{DoubleSlitSetup, MeasurementSettings};
use serde::{Deserialize, Serialize};

/// One step of an experiment.
///
/// In job files each `[[scenario]]` table selects its variant with `kind`,
/// e.g. `kind = "phase_sweep"`. Every field other than `kind` has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scenario {
    /// A single intensity curve at fixed weights.
    Interference {
        #[serde(default)]
        amplitudes: AmplitudeParameters,
    },

    /// One curve per listed dark phase.
    PhaseCurves {
        #[serde(default)]
        amplitudes: AmplitudeParameters,
        #[serde(default = "default_curve_phases")]
        phases: Vec<f64>,
    },

    /// Visibility and peak position over `linspace(start, end, samples)`.
    PhaseSweep {
        #[serde(default)]
        amplitudes: AmplitudeParameters,
        #[serde(default)]
        start: f64,
        #[serde(default = "default_sweep_end")]
        end: f64,
        #[serde(default = "default_sweep_samples")]
        samples: usize,
    },

    /// One curve per dark amplitude, with the bright weight fixed by normalization.
    AmplitudeSweep {
        #[serde(default = "default_dark_amplitudes")]
        dark_amplitudes: Vec<f64>,
        #[serde(default = "default_sweep_phase")]
        beta_phase: f64,
    },

    /// Frames of one full phase turn.
    Animation {
        #[serde(default)]
        amplitudes: AmplitudeParameters,
        #[serde(default = "default_frames")]
        frames: usize,
        #[serde(default = "default_fps")]
        fps: u32,
    },

    /// Double-slit pattern at explicit weights and dark phase shift.
    DoubleSlit {
        #[serde(default)]
        setup: DoubleSlitSetup,
        #[serde(default)]
        screen: Option<SpatialGrid>,
        #[serde(default = "default_slit_weight")]
        alpha: f64,
        #[serde(default = "default_slit_weight")]
        beta: f64,
        #[serde(default)]
        dark_phase_shift: f64,
    },

    /// Pattern without and with bright-only which-path detection.
    WhichPath {
        #[serde(default)]
        setup: DoubleSlitSetup,
        #[serde(default)]
        screen: Option<SpatialGrid>,
        #[serde(default = "default_detection_efficiency")]
        detection_efficiency: f64,
    },

    /// Detected visibility against detector efficiency.
    EfficiencyScan {
        #[serde(default)]
        setup: DoubleSlitSetup,
        #[serde(default)]
        screen: Option<SpatialGrid>,
        #[serde(default = "default_efficiency_samples")]
        samples: usize,
    },

    /// The three delayed-choice readouts.
    DelayedChoice {
        #[serde(default)]
        setup: DoubleSlitSetup,
        #[serde(default)]
        screen: Option<SpatialGrid>,
    },

    /// One weak measurement, optionally post-selected on `[x_min, x_max]`.
    WeakMeasurement {
        #[serde(default = "default_weak_amplitudes")]
        amplitudes: AmplitudeParameters,
        #[serde(default)]
        settings: MeasurementSettings,
        #[serde(default)]
        post_selection: Option<(f64, f64)>,
    },

    /// Fidelity against coupling strength for both measurement targets.
    CouplingScan {
        #[serde(default = "default_weak_amplitudes")]
        amplitudes: AmplitudeParameters,
        #[serde(default = "default_couplings")]
        couplings: Vec<f64>,
        #[serde(default)]
        position: f64,
        #[serde(default)]
        width: Option<f64>,
    },

    /// Mean visibility under bright-state phase noise.
    Decoherence {
        #[serde(default)]
        amplitudes: AmplitudeParameters,
        #[serde(default = "default_noise_strengths")]
        strengths: Vec<f64>,
        #[serde(default = "default_trials")]
        trials: usize,
        #[serde(default)]
        seed: u64,
    },
}

// --- Defaults used by job files ---

fn default_curve_phases() -> Vec<f64> {
    vec![0.0, PI / 4.0, PI / 2.0, 3.0 * PI / 4.0, PI]
}

fn default_sweep_end() -> f64 {
    2.0 * TAU
}

fn default_sweep_samples() -> usize {
    200
}

fn default_dark_amplitudes() -> Vec<f64> {
    vec![0.1, 0.3, 0.5, 0.7, 0.9]
}

fn default_sweep_phase() -> f64 {
    PI / 4.0
}

fn default_frames() -> usize {
    simulator_defaults::ANIMATION_FRAMES
}

fn default_fps() -> u32 {
    simulator_defaults::ANIMATION_FPS
}

fn default_slit_weight() -> f64 {
    crate::core::FRAC_1_SQRT_2
}

fn default_detection_efficiency() -> f64 {
    double_slit_defaults::DETECTION_EFFICIENCY
}

fn default_efficiency_samples() -> usize {
    20
}

fn default_weak_amplitudes() -> AmplitudeParameters {
    AmplitudeParameters::equal_weight(PI / 4.0)
}

fn default_couplings() -> Vec<f64> {
    vec![0.0, 0.05, 0.1, 0.2, 0.5, 1.0]
}

fn default_noise_strengths() -> Vec<f64> {
    vec![0.0, 0.25, 0.5, 1.0, 2.0, PI]
}

fn default_trials() -> usize {
    10
}

impl Scenario {
    /// The snake_case name used as `kind` in job files and in output labels.
    pub fn name(&self) -> &'static str {
        match self {
            Scenario::Interference { .. } => "interference",
            Scenario::PhaseCurves { .. } => "phase_curves",
            Scenario::PhaseSweep { .. } => "phase_sweep",
            Scenario::AmplitudeSweep { .. } => "amplitude_sweep",
            Scenario::Animation { .. } => "animation",
            Scenario::DoubleSlit { .. } => "double_slit",
            Scenario::WhichPath { .. } => "which_path",
            Scenario::EfficiencyScan { .. } => "efficiency_scan",
            Scenario::DelayedChoice { .. } => "delayed_choice",
            Scenario::WeakMeasurement { .. } => "weak_measurement",
            Scenario::CouplingScan { .. } => "coupling_scan",
            Scenario::Decoherence { .. } => "decoherence",
        }
    }

    /// Interference at the default equal weights and the given dark phase.
    pub fn interference(phase: f64) -> Self {
        Scenario::Interference { amplitudes: AmplitudeParameters::equal_weight(phase) }
    }

    /// A phase sweep at equal weights over `[start, end]`.
    pub fn phase_sweep(start: f64, end: f64, samples: usize) -> Self {
        Scenario::PhaseSweep { amplitudes: AmplitudeParameters::default(), start, end, samples }
    }

    /// The default double-slit pattern on the default screen.
    pub fn double_slit() -> Self {
        Scenario::DoubleSlit {
            setup: DoubleSlitSetup::default(),
            screen: None,
            alpha: default_slit_weight(),
            beta: default_slit_weight(),
            dark_phase_shift: 0.0,
        }
    }

    /// The 100-frame, 10 fps phase animation at equal weights.
    pub fn animation() -> Self {
        Scenario::Animation {
            amplitudes: AmplitudeParameters::default(),
            frames: default_frames(),
            fps: default_fps(),
        }
    }

    /// Parameter checks that do not need a context. Everything else is
    /// checked when the scenario runs.
    pub fn validate(&self) -> ModelResult<()> {
        match self {
            Scenario::PhaseSweep { samples: 0, .. } => {
                Err(ModelError::invalid("samples", "a sweep needs at least one sample"))
            }
            Scenario::EfficiencyScan { samples: 0, .. } => {
                Err(ModelError::invalid("samples", "a scan needs at least one sample"))
            }
            Scenario::Animation { frames: 0, .. } => {
                Err(ModelError::invalid("frames", "an animation needs at least one frame"))
            }
            Scenario::Animation { fps: 0, .. } => {
                Err(ModelError::invalid("fps", "frame rate must be positive"))
            }
            Scenario::Decoherence { trials: 0, .. } => {
                Err(ModelError::invalid("trials", "at least one trial is required"))
            }
            Scenario::WeakMeasurement { post_selection: Some((lo, hi)), .. } if !(lo <= hi) => {
                Err(ModelError::invalid(
                    "post_selection",
                    format!("window [{}, {}] is empty or not a number", lo, hi),
                ))
            }
            _ => Ok(()),
        }
    }
}
