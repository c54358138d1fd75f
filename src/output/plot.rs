// src/output/plot.rs

//! Plot-ready series: one shared `x` axis and named, equally long columns,
//! each with an optional colour hint for whatever renders them.

use crate::core::{ModelError, ModelResult};
use crate::scenarios::{DoubleSlitPattern, InterferenceCurve};
use crate::simulation::ScenarioOutcome;
use serde::Serialize;

/// Colours cycled through for families of curves.
pub const PALETTE: [&str; 5] = ["cyan", "yellow", "magenta", "lime", "orange"];

/// One named column of a plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub color: Option<String>,
    pub values: Vec<f64>,
}

/// A single panel worth of data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotData {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x: Vec<f64>,
    pub series: Vec<Series>,
}

impl PlotData {
    pub fn new(title: impl Into<String>, x_label: impl Into<String>, y_label: impl Into<String>, x: Vec<f64>) -> Self {
        Self { title: title.into(), x_label: x_label.into(), y_label: y_label.into(), x, series: Vec::new() }
    }

    /// Adds a column. Its length must match `x`.
    pub fn with_series(
        mut self,
        label: impl Into<String>,
        color: Option<&str>,
        values: Vec<f64>,
    ) -> ModelResult<Self> {
        ModelError::ensure_same_len(self.x.len(), values.len())?;
        self.series.push(Series { label: label.into(), color: color.map(str::to_owned), values });
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

fn curve_family(
    title: &str,
    x: &[f64],
    curves: &[InterferenceCurve],
    label: impl Fn(&InterferenceCurve) -> String,
) -> ModelResult<PlotData> {
    curves.iter().enumerate().try_fold(
        PlotData::new(title, "x", "intensity", x.to_vec()),
        |plot, (i, curve)| {
            plot.with_series(label(curve), Some(PALETTE[i % PALETTE.len()]), curve.intensity.values().to_vec())
        },
    )
}

fn pattern_plot(title: &str, x: &[f64], pattern: &DoubleSlitPattern) -> ModelResult<PlotData> {
    PlotData::new(title, "screen position", "intensity", x.to_vec())
        .with_series("total", Some("lime"), pattern.total_intensity.values().to_vec())?
        .with_series("bright_only", Some("cyan"), pattern.bright_only.values().to_vec())?
        .with_series("dark_only", Some("magenta"), pattern.dark_only.values().to_vec())?
        .with_series("interference_term", Some("red"), pattern.interference_term.clone())
}

impl ScenarioOutcome {
    /// The plots this outcome is usually shown as. Animations have none;
    /// they are exported frame by frame instead.
    pub fn plots(&self) -> ModelResult<Vec<PlotData>> {
        let plots = match self {
            ScenarioOutcome::Interference { x, curve, stats } => vec![
                PlotData::new(format!("Interference (V = {:.3})", stats.visibility), "x", "intensity", x.clone())
                    .with_series("total", Some("lime"), curve.intensity.values().to_vec())?,
            ],
            ScenarioOutcome::PhaseCurves { x, curves } => {
                vec![curve_family("Phase dependence", x, curves, |c| {
                    format!("phi={:.2} V={:.3}", c.amplitudes.beta_phase, c.visibility)
                })?]
            }
            ScenarioOutcome::AmplitudeSweep { x, curves } => {
                vec![curve_family("Amplitude dependence", x, curves, |c| {
                    format!("beta={:.2} V={:.3}", c.amplitudes.beta_magnitude, c.visibility)
                })?]
            }
            ScenarioOutcome::PhaseSweep { sweep } => vec![
                PlotData::new("Visibility vs phase", "phase", "visibility", sweep.phases.clone())
                    .with_series("visibility", Some("yellow"), sweep.visibilities.clone())?
                    .with_series("peak_position", Some("cyan"), sweep.peak_positions.clone())?,
            ],
            ScenarioOutcome::Animation { .. } => Vec::new(),
            ScenarioOutcome::DoubleSlit { x, pattern } => vec![pattern_plot("Double slit", x, pattern)?],
            ScenarioOutcome::WhichPath { x, outcome } => vec![
                PlotData::new("Which-path detection", "screen position", "intensity", x.clone())
                    .with_series("no_detection", Some("lime"), outcome.no_detection.total_intensity.values().to_vec())?
                    .with_series(
                        "with_detection",
                        Some("orange"),
                        outcome.with_detection.total_intensity.values().to_vec(),
                    )?,
            ],
            ScenarioOutcome::EfficiencyScan { scan } => vec![
                PlotData::new("Visibility vs detection efficiency", "efficiency", "visibility", scan.efficiencies.clone())
                    .with_series("visibility", Some("yellow"), scan.visibilities.clone())?,
            ],
            ScenarioOutcome::DelayedChoice { x, outcome } => vec![
                PlotData::new("Delayed choice", "screen position", "intensity", x.clone())
                    .with_series("initial", Some("lime"), outcome.initial.total_intensity.values().to_vec())?
                    .with_series("bright_only", Some("cyan"), outcome.bright_only.total_intensity.values().to_vec())?
                    .with_series(
                        "dark_influence",
                        Some("magenta"),
                        outcome.dark_influence.total_intensity.values().to_vec(),
                    )?,
            ],
            ScenarioOutcome::WeakMeasurement { x, report } => vec![
                PlotData::new("Weak measurement", "x", "probability density", x.clone())
                    .with_series("initial", Some("white"), report.initial_density.clone())?
                    .with_series("final", Some("lime"), report.final_density.clone())?
                    .with_series("bright", Some("cyan"), report.bright_density.clone())?
                    .with_series("dark", Some("magenta"), report.dark_density.clone())?,
            ],
            ScenarioOutcome::CouplingScan { points } => {
                let x = points.iter().map(|p| p.coupling_strength).collect();
                vec![
                    PlotData::new("Fidelity vs coupling", "coupling strength", "fidelity", x)
                        .with_series("bright_only", Some("cyan"), points.iter().map(|p| p.bright_only_fidelity).collect())?
                        .with_series("both", Some("orange"), points.iter().map(|p| p.both_fidelity).collect())?,
                ]
            }
            ScenarioOutcome::Decoherence { points } => {
                let x = points.iter().map(|p| p.strength).collect();
                vec![
                    PlotData::new("Visibility under bright dephasing", "noise strength", "mean visibility", x)
                        .with_series("mean_visibility", Some("yellow"), points.iter().map(|p| p.mean_visibility).collect())?,
                ]
            }
        };
        Ok(plots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_length_is_checked() {
        let plot = PlotData::new("t", "x", "y", vec![0.0, 1.0]);
        assert!(plot.clone().with_series("ok", None, vec![1.0, 2.0]).is_ok());
        assert!(matches!(
            plot.with_series("short", None, vec![1.0]),
            Err(ModelError::DimensionMismatch { expected: 2, found: 1 })
        ));
    }
}
