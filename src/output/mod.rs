// src/output/mod.rs

//! Writing results to disk: CSV series with a `#` metadata header, JSON
//! documents, and the frame-by-frame animation export.

mod plot;

pub use plot::{PlotData, Series, PALETTE};

use crate::config::OutputConfig;
use crate::core::constants::simulator_defaults::ANIMATION_FILE;
use crate::core::{ModelContext, ModelError, ModelResult};
use crate::scenarios::AnimationFrame;
use crate::simulation::{ScenarioOutcome, SimulationResult};
use log::info;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Frame data for an external animation encoder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimationExport {
    pub fps: u32,
    pub frame_count: usize,
    pub x: Vec<f64>,
    pub phases: Vec<f64>,
    pub titles: Vec<String>,
    pub intensities: Vec<Vec<f64>>,
}

impl AnimationExport {
    pub fn new(x: &[f64], fps: u32, frames: &[AnimationFrame]) -> ModelResult<Self> {
        for frame in frames {
            ModelError::ensure_same_len(x.len(), frame.intensity.len())?;
        }
        Ok(Self {
            fps,
            frame_count: frames.len(),
            x: x.to_vec(),
            phases: frames.iter().map(|f| f.phase).collect(),
            titles: frames.iter().map(|f| f.title.clone()).collect(),
            intensities: frames.iter().map(|f| f.intensity.values().to_vec()).collect(),
        })
    }
}

fn create_parent(path: &Path) -> ModelResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Write one plot as CSV: a `#` header, then `x` and one column per series.
pub fn write_csv(plot: &PlotData, path: &Path, ctx: Option<&ModelContext>) -> ModelResult<()> {
    create_parent(path)?;
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);

    writeln!(file, "# brightdark: {}", plot.title)?;
    writeln!(file, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    if let Some(ctx) = ctx {
        writeln!(file, "# context: {}", ctx)?;
    }
    for series in &plot.series {
        writeln!(file, "# series '{}': color={}", series.label, series.color.as_deref().unwrap_or("auto"))?;
    }
    writeln!(file, "# y: {}", plot.y_label)?;
    writeln!(file, "#")?;

    let header: Vec<&str> = std::iter::once(plot.x_label.as_str())
        .chain(plot.series.iter().map(|s| s.label.as_str()))
        .collect();
    writeln!(file, "{}", header.join(","))?;

    for (i, x) in plot.x.iter().enumerate() {
        write!(file, "{:.6}", x)?;
        for series in &plot.series {
            write!(file, ",{:.6e}", series.values[i])?;
        }
        writeln!(file)?;
    }
    file.flush()?;

    info!("CSV written to: {}", path.display());
    Ok(())
}

/// Write any serializable value as pretty-printed JSON.
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> ModelResult<()> {
    create_parent(path)?;
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    info!("JSON written to: {}", path.display());
    Ok(())
}

/// Write an animation outcome to `path`. Other outcomes are skipped.
pub fn write_animation(outcome: &ScenarioOutcome, path: &Path) -> ModelResult<bool> {
    match outcome {
        ScenarioOutcome::Animation { x, fps, frames } => {
            write_json(&AnimationExport::new(x, *fps, frames)?, path)?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Writes everything `config` asks for into `dir` and returns the paths.
///
/// CSV files are named after the outcome label, with a numeric suffix when
/// one outcome yields several plots. The animation lands in
/// `bright_dark_interference.json`, prefixed with the outcome label when the
/// result holds more than one. The JSON document holds the whole result.
pub fn write_result(
    result: &SimulationResult,
    ctx: &ModelContext,
    config: &OutputConfig,
    dir: &Path,
) -> ModelResult<Vec<PathBuf>> {
    let mut written = Vec::new();
    let animations = result
        .outcomes()
        .iter()
        .filter(|(_, outcome)| matches!(outcome, ScenarioOutcome::Animation { .. }))
        .count();
    for (label, outcome) in result.outcomes() {
        if config.save_csv {
            let plots = outcome.plots()?;
            let single = plots.len() == 1;
            for (k, plot) in plots.iter().enumerate() {
                let name = if single { format!("{}.csv", label) } else { format!("{}-{}.csv", label, k + 1) };
                let path = dir.join(name);
                write_csv(plot, &path, Some(ctx))?;
                written.push(path);
            }
        }
        if config.save_animation {
            let path = if animations > 1 {
                dir.join(format!("{}-{}", label, ANIMATION_FILE))
            } else {
                dir.join(ANIMATION_FILE)
            };
            if write_animation(outcome, &path)? {
                written.push(path);
            }
        }
    }
    if config.save_json {
        let path = dir.join("results.json");
        write_json(result, &path)?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiments::{ExperimentBuilder, Scenario};
    use crate::simulation::Simulator;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("brightdark-output-{}-{}", name, std::process::id()))
    }

    #[test]
    fn test_csv_has_header_and_rows() -> ModelResult<()> {
        let dir = scratch_dir("csv");
        let path = dir.join("plot.csv");
        let plot = PlotData::new("demo", "x", "intensity", vec![0.0, 0.5, 1.0])
            .with_series("a", Some("cyan"), vec![1.0, 2.0, 3.0])?;
        write_csv(&plot, &path, None)?;

        let text = std::fs::read_to_string(&path)?;
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("# brightdark: demo"));
        let header = lines.iter().position(|l| *l == "x,a");
        assert!(header.is_some());
        assert_eq!(lines.len(), header.unwrap_or(0) + 1 + 3);
        std::fs::remove_dir_all(&dir)?;
        Ok(())
    }

    #[test]
    fn test_write_result_honours_flags() -> ModelResult<()> {
        let dir = scratch_dir("result");
        let ctx = ModelContext::simulator_default()?;
        let experiment = ExperimentBuilder::new()
            .add(Scenario::interference(0.0))
            .add(Scenario::Animation {
                amplitudes: Default::default(),
                frames: 4,
                fps: 10,
            })
            .build();
        let result = Simulator::new().run(&ctx, &experiment)?;

        let config = OutputConfig {
            directory: dir.display().to_string(),
            save_csv: true,
            save_json: true,
            save_animation: true,
        };
        let written = write_result(&result, &ctx, &config, &dir)?;
        assert!(written.contains(&dir.join("01-interference.csv")));
        assert!(written.contains(&dir.join("results.json")));
        assert!(written.contains(&dir.join(ANIMATION_FILE)));

        let animation: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.join(ANIMATION_FILE))?)?;
        assert_eq!(animation["fps"], 10);
        assert_eq!(animation["frame_count"], 4);
        assert_eq!(animation["intensities"].as_array().map(Vec::len), Some(4));
        std::fs::remove_dir_all(&dir)?;
        Ok(())
    }

    #[test]
    fn test_each_animation_gets_its_own_file() -> ModelResult<()> {
        let dir = scratch_dir("animations");
        let ctx = ModelContext::simulator_default()?;
        let experiment = ExperimentBuilder::new()
            .add(Scenario::Animation { amplitudes: Default::default(), frames: 2, fps: 10 })
            .add(Scenario::Animation { amplitudes: Default::default(), frames: 3, fps: 5 })
            .build();
        let result = Simulator::new().run(&ctx, &experiment)?;

        let config = OutputConfig {
            directory: dir.display().to_string(),
            save_csv: false,
            save_json: false,
            save_animation: true,
        };
        let written = write_result(&result, &ctx, &config, &dir)?;
        let first = dir.join(format!("01-animation-{}", ANIMATION_FILE));
        let second = dir.join(format!("02-animation-{}", ANIMATION_FILE));
        assert_eq!(written, vec![first.clone(), second.clone()]);
        assert!(!dir.join(ANIMATION_FILE).exists());

        let second_json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&second)?)?;
        assert_eq!(second_json["frame_count"], 3);
        assert!(first.exists());
        std::fs::remove_dir_all(&dir)?;
        Ok(())
    }
}
