// src/lib.rs

//! `brightdark` - a numerical model of bright/dark photon interference
//!
//! A photon is treated as `|ψ⟩ = α|B⟩ + β·e^{iφ}|D⟩`, where the bright state
//! `|B⟩` couples to detectors and the dark state `|D⟩` does not. The crate
//! samples both components on a 1-D grid, measures the resulting
//! interference, and runs a family of scenarios (phase and amplitude sweeps,
//! a double slit with which-path detection, weak measurements and
//! bright-state dephasing) through a small experiment driver.

pub mod core;
pub mod wavefunction;
pub mod analysis;
pub mod scenarios;
pub mod experiments;
pub mod simulation;
pub mod config;
pub mod output;

// Re-export the most common types for easier top-level use
pub use core::{AmplitudeParameters, ComplexField, IntensityProfile, ModelContext, ModelError, ModelResult, SpatialGrid};
pub use wavefunction::{bright, dark, gaussian_envelope, superpose, GaussianState};
pub use analysis::{intensity, normalize, visibility, IntensityStats};
pub use experiments::{Experiment, ExperimentBuilder, Scenario};
pub use simulation::{ScenarioOutcome, SimulationResult, Simulator};

/// Plain-text summary of the model, as printed by `brightdark theory`.
pub fn theory_summary() -> &'static str {
    concat!(
        "======================================================================\n",
        "BRIGHT/DARK PHOTON INTERFERENCE MODEL\n",
        "======================================================================\n",
        "Theory: Photons exist as superpositions of:\n",
        "  * Bright states |B>: Detectable by measurement apparatus\n",
        "  * Dark states |D>: Undetectable but influence interference\n",
        "\n",
        "Mathematical Framework:\n",
        "  |psi> = alpha|B> + beta|D>\n",
        "  Detection probability: P = |alpha|^2\n",
        "  Interference: I(x) ~ |alpha<x|B> + beta<x|D>|^2\n",
        "\n",
        "Key Predictions:\n",
        "  1. Interference persists even with bright state decoherence\n",
        "  2. Dark state phase shifts affect observable patterns\n",
        "  3. Optimal visibility at specific alpha/beta ratios\n",
        "======================================================================\n",
    )
}

// Example 1: Equal-weight interference on the default grid
// Builds the two Gaussian components, superposes them and reads the
// intensity next to the bright packet.
/// ```
/// use brightdark::{analysis, superpose, ModelContext, ModelError};
/// use std::f64::consts::FRAC_1_SQRT_2;
///
/// fn main() -> Result<(), ModelError> {
///     // [-5, 5] x 1000, bright at +1, dark at -1, sigma = 0.5
///     let ctx = ModelContext::simulator_default()?;
///     let (psi_b, psi_d) = ctx.components()?;
///
///     let psi = superpose(&psi_b, &psi_d, FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0)?;
///     let profile = analysis::intensity(&psi, None)?;
///
///     // The dark packet is negligible at x = 1, so I ≈ |ψ_B(1)|²/2 = 0.5.
///     let i = ctx.grid.nearest_index(1.0);
///     assert!((profile.values()[i] - 0.5).abs() < 1e-2);
///     println!("V = {:.4}", analysis::visibility(&profile));
///     Ok(())
/// }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Running an experiment
// Chains two scenarios and inspects the labelled outcomes in order.
/// ```
/// use brightdark::{ExperimentBuilder, ModelContext, ModelError, Scenario, ScenarioOutcome, Simulator};
///
/// fn main() -> Result<(), ModelError> {
///     let ctx = ModelContext::simulator_default()?;
///     let experiment = ExperimentBuilder::new()
///         .add(Scenario::phase_sweep(0.0, 4.0 * std::f64::consts::PI, 100))
///         .add(Scenario::double_slit())
///         .build();
///
///     let result = Simulator::new().run(&ctx, &experiment)?;
///     println!("{}", result);
///
///     match result.get("02-double_slit") {
///         Some(ScenarioOutcome::DoubleSlit { pattern, .. }) => {
///             assert!(pattern.visibility > 0.0 && pattern.visibility <= 1.0);
///         }
///         other => panic!("unexpected outcome: {:?}", other),
///     }
///     Ok(())
/// }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
