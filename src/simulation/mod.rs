// src/simulation/mod.rs

//! Runs an [`Experiment`](crate::experiments::Experiment) against a
//! [`ModelContext`](crate::core::ModelContext).
//!
//! The `Simulator` is the entry point; the internal `SimulationEngine` maps
//! each scenario onto the formula families in [`crate::scenarios`].

mod results;
pub(crate) mod engine;

pub use results::{ScenarioOutcome, SimulationResult};

use crate::core::{ModelContext, ModelResult};
use crate::experiments::Experiment;
use engine::SimulationEngine;
use log::{error, info};

/// Executes experiments. Holds no state between runs.
#[derive(Debug, Default)]
pub struct Simulator {}

impl Simulator {
    /// Creates a new Simulator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every scenario of `experiment` in order.
    ///
    /// # Arguments
    /// * `ctx` - Grid and bright/dark states shared by all scenarios.
    /// * `experiment` - The scenarios to run.
    ///
    /// # Returns
    /// * `Ok(SimulationResult)` with one labelled outcome per scenario, in order.
    /// * `Err(ModelError)` from the first scenario that fails; later scenarios do not run.
    pub fn run(&self, ctx: &ModelContext, experiment: &Experiment) -> ModelResult<SimulationResult> {
        let mut result = SimulationResult::new();
        if experiment.is_empty() {
            return Ok(result);
        }

        info!(
            "Running {} scenarios on {}",
            experiment.len(),
            ctx
        );
        let engine = SimulationEngine::init(ctx);
        for (label, scenario) in experiment.labels().into_iter().zip(experiment.scenarios()) {
            let outcome = engine.apply_scenario(scenario).inspect_err(|e| {
                error!("{} failed: {}", label, e);
            })?;
            info!("{}: {}", label, outcome);
            result.record(label, outcome);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AmplitudeParameters, ModelError};
    use crate::experiments::{ExperimentBuilder, Scenario};
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_experiment() -> ModelResult<()> {
        let ctx = ModelContext::simulator_default()?;
        let result = Simulator::new().run(&ctx, &Experiment::new())?;
        assert!(result.is_empty());
        assert!(result.to_string().contains("No scenarios were run."));
        Ok(())
    }

    #[test]
    fn test_outcomes_follow_scenario_order() -> ModelResult<()> {
        let ctx = ModelContext::simulator_default()?;
        let experiment = ExperimentBuilder::new()
            .add(Scenario::interference(0.0))
            .add(Scenario::phase_sweep(0.0, std::f64::consts::PI, 5))
            .add(Scenario::double_slit())
            .build();
        let result = Simulator::new().run(&ctx, &experiment)?;
        let labels: Vec<&str> = result.outcomes().iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["01-interference", "02-phase_sweep", "03-double_slit"]);

        match result.get("01-interference") {
            Some(ScenarioOutcome::Interference { x, curve, stats }) => {
                assert_eq!(x.len(), ctx.grid.len());
                assert_eq!(curve.visibility, stats.visibility);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_first_failure_aborts_run() -> ModelResult<()> {
        let ctx = ModelContext::simulator_default()?;
        let experiment = ExperimentBuilder::new()
            .add(Scenario::interference(0.0))
            .add(Scenario::AmplitudeSweep { dark_amplitudes: vec![0.5, 1.5], beta_phase: 0.0 })
            .build();
        match Simulator::new().run(&ctx, &experiment) {
            Err(ModelError::InvalidParameter { .. }) => Ok(()),
            other => panic!("expected an invalid-parameter error, got {:?}", other),
        }
    }

    #[test]
    fn test_interference_matches_direct_profile() -> ModelResult<()> {
        let ctx = ModelContext::simulator_default()?;
        let amps = AmplitudeParameters::equal_weight(0.7);
        let experiment = ExperimentBuilder::new().add(Scenario::Interference { amplitudes: amps }).build();
        let result = Simulator::new().run(&ctx, &experiment)?;
        let direct = crate::scenarios::interference_profile(&ctx, &amps)?;
        match result.get("01-interference") {
            Some(ScenarioOutcome::Interference { curve, .. }) => {
                assert_relative_eq!(curve.visibility, crate::analysis::visibility(&direct), epsilon = 1e-12);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        Ok(())
    }
}
