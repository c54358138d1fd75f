// src/config/mod.rs

//! TOML job files.
//!
//! ```toml
//! name = "phase study"
//! preset = "simulator"        # simulator | basic | weak_measurement
//!
//! [grid]
//! min = -5.0
//! max = 5.0
//! points = 1000
//!
//! [bright]
//! center = 1.0
//! sigma = 0.5
//!
//! [amplitudes]                # optional, applied to scenarios that omit their own
//! alpha = 0.7071067811865476
//! beta_magnitude = 0.7071067811865476
//! beta_phase = 0.0
//!
//! [[scenario]]
//! kind = "phase_sweep"
//! samples = 100
//!
//! [output]
//! directory = "./output"
//! save_json = true
//! ```
//!
//! Every section is optional. Missing `grid`, `bright` or `dark` sections
//! come from the chosen preset.

use crate::core::{AmplitudeParameters, ModelContext, ModelError, ModelResult, SpatialGrid};
use crate::experiments::{Experiment, ExperimentBuilder, Scenario};
use crate::wavefunction::GaussianState;
use log::{debug, info};
use serde::Deserialize;
use std::path::Path;

/// Scenario kinds whose tables accept an `amplitudes` key.
const KINDS_WITH_AMPLITUDES: [&str; 7] = [
    "interference",
    "phase_curves",
    "phase_sweep",
    "animation",
    "weak_measurement",
    "coupling_scan",
    "decoherence",
];

/// Named starting points for the grid and the two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    #[default]
    Simulator,
    Basic,
    WeakMeasurement,
}

impl Preset {
    pub fn context(self) -> ModelResult<ModelContext> {
        match self {
            Preset::Simulator => ModelContext::simulator_default(),
            Preset::Basic => ModelContext::basic_interference(),
            Preset::WeakMeasurement => ModelContext::weak_measurement(),
        }
    }
}

/// Top-level job configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JobConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub preset: Preset,
    #[serde(default)]
    pub grid: Option<SpatialGrid>,
    #[serde(default)]
    pub bright: Option<GaussianState>,
    #[serde(default)]
    pub dark: Option<GaussianState>,
    #[serde(default)]
    pub amplitudes: Option<AmplitudeParameters>,
    /// Raw `[[scenario]]` tables; parsed by [`JobConfig::experiment`].
    #[serde(default)]
    pub scenario: Vec<toml::Table>,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OutputConfig {
    /// Output directory (default: "./output").
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Whether to write each outcome as CSV (default: true).
    #[serde(default = "default_true")]
    pub save_csv: bool,
    /// Whether to also write the full result as JSON (default: false).
    #[serde(default)]
    pub save_json: bool,
    /// Whether to export the phase animation frames (default: false).
    #[serde(default)]
    pub save_animation: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            save_csv: true,
            save_json: false,
            save_animation: false,
        }
    }
}

fn default_output_dir() -> String {
    "./output".into()
}
fn default_true() -> bool {
    true
}

impl JobConfig {
    /// Parses a job from TOML text.
    pub fn from_toml_str(content: &str) -> ModelResult<Self> {
        let job: JobConfig = toml::from_str(content)?;
        debug!("parsed job with {} scenario tables", job.scenario.len());
        Ok(job)
    }

    /// The preset context with any explicit `grid`, `bright` or `dark` applied.
    pub fn context(&self) -> ModelResult<ModelContext> {
        let mut ctx = self.preset.context()?;
        if let Some(grid) = &self.grid {
            ctx.grid = grid.clone();
        }
        if let Some(bright) = self.bright {
            ctx.bright = bright;
        }
        if let Some(dark) = self.dark {
            ctx.dark = dark;
        }
        // Evaluating once surfaces bad widths before any scenario runs.
        ctx.components().map_err(|e| ModelError::Config(format!("invalid state: {}", e)))?;
        Ok(ctx)
    }

    /// Builds the experiment from the `[[scenario]]` tables.
    ///
    /// With `save_animation` set and no animation scenario listed, the
    /// default 100-frame animation is appended.
    pub fn experiment(&self) -> ModelResult<Experiment> {
        let mut builder = ExperimentBuilder::new();
        if let Some(name) = &self.name {
            builder = builder.name(name.clone());
        }
        let mut scenarios = self
            .scenario
            .iter()
            .enumerate()
            .map(|(i, table)| self.parse_scenario(i, table))
            .collect::<ModelResult<Vec<Scenario>>>()?;

        let has_animation = scenarios.iter().any(|s| matches!(s, Scenario::Animation { .. }));
        if self.output.save_animation && !has_animation {
            let mut animation = Scenario::animation();
            if let (Scenario::Animation { amplitudes, .. }, Some(job_amps)) = (&mut animation, self.amplitudes) {
                *amplitudes = job_amps;
            }
            scenarios.push(animation);
        }

        builder
            .add_all(scenarios)
            .try_build()
            .map_err(|e| ModelError::Config(e.to_string()))
    }

    fn parse_scenario(&self, index: usize, table: &toml::Table) -> ModelResult<Scenario> {
        let mut table = table.clone();
        let kind = table.get("kind").and_then(|k| k.as_str()).map(str::to_owned).ok_or_else(|| {
            ModelError::Config(format!("scenario #{} is missing a `kind`", index + 1))
        })?;

        if let Some(amplitudes) = self.amplitudes {
            if KINDS_WITH_AMPLITUDES.contains(&kind.as_str()) && !table.contains_key("amplitudes") {
                let value = toml::Value::try_from(amplitudes)
                    .map_err(|e| ModelError::Config(e.to_string()))?;
                table.insert("amplitudes".to_string(), value);
            }
        }

        toml::Value::Table(table)
            .try_into::<Scenario>()
            .map_err(|e| ModelError::Config(format!("scenario #{} ({}): {}", index + 1, kind, e)))
    }
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &Path) -> ModelResult<JobConfig> {
    info!("Loading job from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    JobConfig::from_toml_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_job_uses_defaults() -> ModelResult<()> {
        let job = JobConfig::from_toml_str("")?;
        assert_eq!(job.preset, Preset::Simulator);
        assert_eq!(job.output, OutputConfig::default());
        assert_eq!(job.context()?, ModelContext::simulator_default()?);
        assert!(job.experiment()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_sections_override_preset() -> ModelResult<()> {
        let job = JobConfig::from_toml_str(
            r#"
            preset = "basic"
            [grid]
            min = -2.0
            max = 2.0
            points = 41
            [dark]
            center = -1.2
            sigma = 0.4
            "#,
        )?;
        let ctx = job.context()?;
        assert_eq!(ctx.grid.len(), 41);
        assert_relative_eq!(ctx.bright.center, 0.8);
        assert_relative_eq!(ctx.dark.center, -1.2);
        Ok(())
    }

    #[test]
    fn test_job_amplitudes_fill_missing_ones() -> ModelResult<()> {
        let job = JobConfig::from_toml_str(
            r#"
            [amplitudes]
            alpha = 0.6
            beta_magnitude = 0.8
            beta_phase = 1.0

            [[scenario]]
            kind = "interference"

            [[scenario]]
            kind = "interference"
            amplitudes = { alpha = 1.0, beta_magnitude = 0.0 }

            [[scenario]]
            kind = "double_slit"
            "#,
        )?;
        let experiment = job.experiment()?;
        assert_eq!(experiment.len(), 3);
        match &experiment.scenarios()[0] {
            Scenario::Interference { amplitudes } => assert_relative_eq!(amplitudes.alpha, 0.6),
            other => panic!("unexpected scenario {:?}", other),
        }
        match &experiment.scenarios()[1] {
            Scenario::Interference { amplitudes } => assert_relative_eq!(amplitudes.beta_phase, 0.0),
            other => panic!("unexpected scenario {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_bad_scenarios_are_config_errors() -> ModelResult<()> {
        let missing_kind = JobConfig::from_toml_str("[[scenario]]\nsamples = 3\n")?;
        assert!(matches!(missing_kind.experiment(), Err(ModelError::Config(_))));

        let unknown = JobConfig::from_toml_str("[[scenario]]\nkind = \"teleport\"\n")?;
        assert!(matches!(unknown.experiment(), Err(ModelError::Config(_))));

        let empty_sweep = JobConfig::from_toml_str("[[scenario]]\nkind = \"phase_sweep\"\nsamples = 0\n")?;
        assert!(matches!(empty_sweep.experiment(), Err(ModelError::Config(_))));
        Ok(())
    }

    #[test]
    fn test_bad_grid_is_rejected_at_parse() {
        let parsed = JobConfig::from_toml_str("[grid]\nmin = 0.0\nmax = 1.0\npoints = 0\n");
        assert!(matches!(parsed, Err(ModelError::Config(_))));
    }

    #[test]
    fn test_save_animation_appends_animation() -> ModelResult<()> {
        let job = JobConfig::from_toml_str("[output]\nsave_animation = true\n")?;
        let experiment = job.experiment()?;
        assert_eq!(experiment.labels(), vec!["01-animation"]);
        Ok(())
    }
}
