// tests/config_tests.rs

use brightdark::config::{load_config, JobConfig};
use brightdark::output::write_result;
use brightdark::scenarios::weak_measurement::MeasurementOperator;
use brightdark::{ModelError, Scenario, ScenarioOutcome, Simulator};
use std::path::PathBuf;

const JOB: &str = r#"
name = "integration"
preset = "basic"

[[scenario]]
kind = "phase_curves"
phases = [0.0, 1.5707963267948966]

[[scenario]]
kind = "double_slit"
dark_phase_shift = 0.5
screen = { min = -3.0, max = 3.0, points = 301 }

[[scenario]]
kind = "decoherence"
strengths = [0.0, 0.5]
trials = 2
seed = 7

[output]
save_json = true
"#;

fn scratch_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("brightdark-it-{}-{}", name, std::process::id()))
}

#[test]
fn test_job_file_round_trip() -> Result<(), ModelError> {
    let dir = scratch_dir("job");
    std::fs::create_dir_all(&dir)?;
    let path = dir.join("job.toml");
    std::fs::write(&path, JOB)?;

    let job = load_config(&path)?;
    let ctx = job.context()?;
    assert_eq!(ctx.grid.len(), 800);

    let experiment = job.experiment()?;
    assert_eq!(experiment.name(), Some("integration"));
    assert_eq!(experiment.labels(), vec!["01-phase_curves", "02-double_slit", "03-decoherence"]);

    let result = Simulator::new().run(&ctx, &experiment)?;
    match result.get("02-double_slit") {
        Some(ScenarioOutcome::DoubleSlit { x, .. }) => assert_eq!(x.len(), 301),
        other => panic!("unexpected outcome {:?}", other),
    }

    let out = dir.join("out");
    let written = write_result(&result, &ctx, &job.output, &out)?;
    assert!(written.contains(&out.join("01-phase_curves.csv")));
    assert!(written.contains(&out.join("02-double_slit.csv")));
    assert!(written.contains(&out.join("03-decoherence.csv")));
    assert!(written.contains(&out.join("results.json")));

    let csv = std::fs::read_to_string(out.join("02-double_slit.csv"))?;
    assert!(csv.lines().any(|l| l == "screen position,total,bright_only,dark_only,interference_term"));
    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(out.join("results.json"))?)?;
    assert_eq!(json["outcomes"].as_array().map(Vec::len), Some(3));

    std::fs::remove_dir_all(&dir)?;
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() {
    let path = scratch_dir("missing").join("nope.toml");
    assert!(matches!(load_config(&path), Err(ModelError::Io(_))));
}

#[test]
fn test_invalid_toml_is_config_error() {
    assert!(matches!(JobConfig::from_toml_str("[grid"), Err(ModelError::Config(_))));
}

#[test]
fn test_weak_measurement_window_can_be_disabled() -> Result<(), ModelError> {
    let job = JobConfig::from_toml_str(
        r#"
preset = "weak_measurement"

[[scenario]]
kind = "weak_measurement"
settings = { coupling_strength = 0.3, windowed = false }
"#,
    )?;
    let experiment = job.experiment()?;
    match experiment.scenarios().first() {
        Some(Scenario::WeakMeasurement { settings, .. }) => {
            assert!(!settings.windowed);
            let ctx = job.context()?;
            let op = MeasurementOperator::new(&ctx.grid, settings)?;
            assert!(op.profile.iter().all(|&w| w == 1.0));
        }
        other => panic!("unexpected scenario {:?}", other),
    }
    Ok(())
}
