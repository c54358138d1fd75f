// src/simulation/engine.rs
use crate::analysis::IntensityStats;
use crate::core::{ModelContext, ModelResult, SpatialGrid};
use crate::experiments::Scenario;
use crate::scenarios::{
    self, amplitude_sweep, animation_frames, bright_decoherence_scan, coupling_scan,
    interference_profile, phase_curves, phase_sweep, DoubleSlitSetup, InterferenceCurve,
};
use crate::simulation::ScenarioOutcome;
use log::debug;

/// Dispatches scenarios against one context. The context's two component
/// states are evaluated per call, so the engine holds no mutable state.
/// (Internal visibility)
pub(crate) struct SimulationEngine<'a> {
    ctx: &'a ModelContext,
}

impl<'a> SimulationEngine<'a> {
    pub(crate) fn init(ctx: &'a ModelContext) -> Self {
        Self { ctx }
    }

    /// Runs a single scenario.
    pub(crate) fn apply_scenario(&self, scenario: &Scenario) -> ModelResult<ScenarioOutcome> {
        scenario.validate()?;
        debug!("engine: running {}", scenario.name());
        let ctx = self.ctx;
        let x = || ctx.grid.points().to_vec();

        let outcome = match scenario {
            Scenario::Interference { amplitudes } => {
                let intensity = interference_profile(ctx, amplitudes)?;
                let stats = IntensityStats::from_profile(&intensity, &ctx.grid)?;
                let curve = InterferenceCurve { amplitudes: *amplitudes, visibility: stats.visibility, intensity };
                ScenarioOutcome::Interference { x: x(), curve, stats }
            }
            Scenario::PhaseCurves { amplitudes, phases } => {
                ScenarioOutcome::PhaseCurves { x: x(), curves: phase_curves(ctx, amplitudes, phases)? }
            }
            Scenario::PhaseSweep { amplitudes, start, end, samples } => ScenarioOutcome::PhaseSweep {
                sweep: phase_sweep(ctx, amplitudes, *start, *end, *samples)?,
            },
            Scenario::AmplitudeSweep { dark_amplitudes, beta_phase } => ScenarioOutcome::AmplitudeSweep {
                x: x(),
                curves: amplitude_sweep(ctx, dark_amplitudes, *beta_phase)?,
            },
            Scenario::Animation { amplitudes, frames, fps } => ScenarioOutcome::Animation {
                x: x(),
                fps: *fps,
                frames: animation_frames(ctx, amplitudes, *frames)?,
            },
            Scenario::DoubleSlit { setup, screen, alpha, beta, dark_phase_shift } => {
                let screen = resolve_screen(screen)?;
                ScenarioOutcome::DoubleSlit {
                    pattern: setup.pattern(&screen, *alpha, *beta, *dark_phase_shift)?,
                    x: screen.points().to_vec(),
                }
            }
            Scenario::WhichPath { setup, screen, detection_efficiency } => {
                let screen = resolve_screen(screen)?;
                ScenarioOutcome::WhichPath {
                    outcome: setup.which_path(&screen, *detection_efficiency)?,
                    x: screen.points().to_vec(),
                }
            }
            Scenario::EfficiencyScan { setup, screen, samples } => {
                let screen = resolve_screen(screen)?;
                ScenarioOutcome::EfficiencyScan { scan: setup.visibility_vs_efficiency(&screen, *samples)? }
            }
            Scenario::DelayedChoice { setup, screen } => {
                let screen = resolve_screen(screen)?;
                ScenarioOutcome::DelayedChoice {
                    outcome: setup.delayed_choice(&screen)?,
                    x: screen.points().to_vec(),
                }
            }
            Scenario::WeakMeasurement { amplitudes, settings, post_selection } => {
                ScenarioOutcome::WeakMeasurement {
                    x: x(),
                    report: scenarios::measure(ctx, amplitudes, settings, *post_selection)?,
                }
            }
            Scenario::CouplingScan { amplitudes, couplings, position, width } => {
                ScenarioOutcome::CouplingScan {
                    points: coupling_scan(ctx, amplitudes, couplings, *position, *width)?,
                }
            }
            Scenario::Decoherence { amplitudes, strengths, trials, seed } => ScenarioOutcome::Decoherence {
                points: bright_decoherence_scan(ctx, amplitudes, strengths, *trials, *seed)?,
            },
        };
        Ok(outcome)
    }
}

// --- Helper Functions ---

/// Double-slit scenarios observe on their own screen, not on the context grid.
fn resolve_screen(screen: &Option<SpatialGrid>) -> ModelResult<SpatialGrid> {
    match screen {
        Some(grid) => Ok(grid.clone()),
        None => DoubleSlitSetup::default_screen(),
    }
}
