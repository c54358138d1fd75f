// tests/simulation_tests.rs

use approx::assert_relative_eq;
use brightdark::core::FRAC_1_SQRT_2;
use brightdark::scenarios::MeasurementSettings;
use brightdark::{
    AmplitudeParameters, Experiment, ExperimentBuilder, ModelContext, ModelError, Scenario, ScenarioOutcome,
    Simulator,
};
use std::f64::consts::PI;

// Helper running a single scenario against the default simulator context
fn run_one(scenario: Scenario) -> Result<ScenarioOutcome, ModelError> {
    let ctx = ModelContext::simulator_default()?;
    let experiment = ExperimentBuilder::new().add(scenario).build();
    let result = Simulator::new().run(&ctx, &experiment)?;
    let (_, outcome) = result.outcomes()[0].clone();
    Ok(outcome)
}

#[test]
fn test_empty_experiment() -> Result<(), ModelError> {
    let ctx = ModelContext::simulator_default()?;
    let result = Simulator::new().run(&ctx, &Experiment::new())?;
    assert!(result.is_empty(), "Empty experiment should yield empty results");
    Ok(())
}

#[test]
fn test_which_path_reduces_visibility() -> Result<(), ModelError> {
    match run_one(Scenario::WhichPath { setup: Default::default(), screen: None, detection_efficiency: 0.8 })? {
        ScenarioOutcome::WhichPath { x, outcome } => {
            assert_eq!(x.len(), 1000);
            assert_relative_eq!(outcome.detection_efficiency, 0.8);
            assert!(outcome.visibility_reduction().is_finite());
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    Ok(())
}

#[test]
fn test_efficiency_scan_spans_unit_interval() -> Result<(), ModelError> {
    match run_one(Scenario::EfficiencyScan { setup: Default::default(), screen: None, samples: 20 })? {
        ScenarioOutcome::EfficiencyScan { scan } => {
            assert_eq!(scan.efficiencies.len(), 20);
            assert_eq!(scan.efficiencies[0], 0.0);
            assert_eq!(scan.efficiencies[19], 1.0);
            assert!(scan.visibilities.iter().all(|v| (0.0..=1.0).contains(v)));
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    Ok(())
}

#[test]
fn test_delayed_choice_bright_only_has_no_dark_part() -> Result<(), ModelError> {
    match run_one(Scenario::DelayedChoice { setup: Default::default(), screen: None })? {
        ScenarioOutcome::DelayedChoice { outcome, .. } => {
            assert!(outcome.bright_only.dark_only.values().iter().all(|&v| v == 0.0));
            assert!(outcome.bright_only.interference_term.iter().all(|&v| v == 0.0));
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    Ok(())
}

#[test]
fn test_weak_measurement_with_post_selection() -> Result<(), ModelError> {
    let ctx = ModelContext::weak_measurement()?;
    let experiment = ExperimentBuilder::new()
        .add(Scenario::WeakMeasurement {
            amplitudes: AmplitudeParameters::equal_weight(PI / 4.0),
            settings: MeasurementSettings::default(),
            post_selection: Some((0.0, 3.0)),
        })
        .build();
    let result = Simulator::new().run(&ctx, &experiment)?;
    match result.get("01-weak_measurement") {
        Some(ScenarioOutcome::WeakMeasurement { report, .. }) => {
            let p = report.selection_probability.unwrap_or(-1.0);
            assert!(p > 0.0 && p < 1.0);
            assert!(report.fidelity > 0.9 && report.fidelity <= 1.0 + 1e-9);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    Ok(())
}

#[test]
fn test_decoherence_scan_is_seeded() -> Result<(), ModelError> {
    let scenario = Scenario::Decoherence {
        amplitudes: AmplitudeParameters::default(),
        strengths: vec![0.0, 1.0],
        trials: 4,
        seed: 99,
    };
    assert_eq!(run_one(scenario.clone())?, run_one(scenario)?);
    Ok(())
}

#[test]
fn test_amplitude_sweep_outcome_weights() -> Result<(), ModelError> {
    match run_one(Scenario::AmplitudeSweep { dark_amplitudes: vec![FRAC_1_SQRT_2], beta_phase: 0.0 })? {
        ScenarioOutcome::AmplitudeSweep { curves, .. } => {
            assert_relative_eq!(curves[0].amplitudes.alpha, FRAC_1_SQRT_2, epsilon = 1e-12);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    Ok(())
}

#[test]
fn test_result_display_lists_every_label() -> Result<(), ModelError> {
    let ctx = ModelContext::simulator_default()?;
    let experiment = ExperimentBuilder::new()
        .add(Scenario::interference(0.0))
        .add(Scenario::phase_sweep(0.0, PI, 4))
        .build();
    let shown = Simulator::new().run(&ctx, &experiment)?.to_string();
    assert!(shown.starts_with("Simulation Results:"));
    assert!(shown.contains("01-interference: V = "));
    assert!(shown.contains("02-phase_sweep: 4 phases"));
    Ok(())
}
