// src/simulation/results.rs
use crate::analysis::IntensityStats;
use crate::scenarios::{
    AnimationFrame, CouplingPoint, DecoherencePoint, DelayedChoiceOutcome, DoubleSlitPattern,
    EfficiencyScan, InterferenceCurve, MeasurementReport, PhaseSweep, WhichPathOutcome,
};
use serde::Serialize;
use std::fmt;

/// The data one scenario produced.
///
/// Spatial outcomes carry the sample positions `x` they were computed on, so
/// every outcome can be written out without the context that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScenarioOutcome {
    Interference { x: Vec<f64>, curve: InterferenceCurve, stats: IntensityStats },
    PhaseCurves { x: Vec<f64>, curves: Vec<InterferenceCurve> },
    PhaseSweep { sweep: PhaseSweep },
    AmplitudeSweep { x: Vec<f64>, curves: Vec<InterferenceCurve> },
    Animation { x: Vec<f64>, fps: u32, frames: Vec<AnimationFrame> },
    DoubleSlit { x: Vec<f64>, pattern: DoubleSlitPattern },
    WhichPath { x: Vec<f64>, outcome: WhichPathOutcome },
    EfficiencyScan { scan: EfficiencyScan },
    DelayedChoice { x: Vec<f64>, outcome: DelayedChoiceOutcome },
    WeakMeasurement { x: Vec<f64>, report: MeasurementReport },
    CouplingScan { points: Vec<CouplingPoint> },
    Decoherence { points: Vec<DecoherencePoint> },
}

impl ScenarioOutcome {
    /// One-line summary used by the `Display` impls.
    pub fn summary(&self) -> String {
        match self {
            ScenarioOutcome::Interference { stats, .. } => format!(
                "V = {:.4}, peak {:.4} at x = {:.3}",
                stats.visibility, stats.max, stats.peak_position
            ),
            ScenarioOutcome::PhaseCurves { curves, .. }
            | ScenarioOutcome::AmplitudeSweep { curves, .. } => {
                let shown: Vec<String> = curves.iter().map(|c| format!("{:.3}", c.visibility)).collect();
                format!("{} curves, V = [{}]", curves.len(), shown.join(", "))
            }
            ScenarioOutcome::PhaseSweep { sweep } => format!(
                "{} phases, V mean {:.4} (min {:.4}, max {:.4})",
                sweep.len(),
                sweep.mean_visibility(),
                sweep.min_visibility(),
                sweep.max_visibility()
            ),
            ScenarioOutcome::Animation { frames, fps, .. } => {
                format!("{} frames at {} fps", frames.len(), fps)
            }
            ScenarioOutcome::DoubleSlit { pattern, .. } => format!("V = {:.4}", pattern.visibility),
            ScenarioOutcome::WhichPath { outcome, .. } => format!(
                "η = {:.2}: V {:.4} -> {:.4} ({:.1}% reduction)",
                outcome.detection_efficiency,
                outcome.no_detection.visibility,
                outcome.with_detection.visibility,
                100.0 * outcome.visibility_reduction()
            ),
            ScenarioOutcome::EfficiencyScan { scan } => {
                let first = scan.visibilities.first().copied().unwrap_or(0.0);
                let last = scan.visibilities.last().copied().unwrap_or(0.0);
                format!("{} efficiencies, V {:.4} -> {:.4}", scan.efficiencies.len(), first, last)
            }
            ScenarioOutcome::DelayedChoice { outcome, .. } => format!(
                "V initial {:.4}, bright only {:.4}, dark influence {:.4}",
                outcome.initial.visibility,
                outcome.bright_only.visibility,
                outcome.dark_influence.visibility
            ),
            ScenarioOutcome::WeakMeasurement { report, .. } => {
                let mut line = format!(
                    "fidelity {:.6}, <x> {:.4} -> {:.4}, <p> {:.4} -> {:.4}",
                    report.fidelity,
                    report.mean_position_before,
                    report.mean_position_after,
                    report.mean_momentum_before,
                    report.mean_momentum_after
                );
                if let Some(p) = report.selection_probability {
                    line.push_str(&format!(", post-selection p = {:.4}", p));
                }
                line
            }
            ScenarioOutcome::CouplingScan { points } => format!("{} coupling strengths", points.len()),
            ScenarioOutcome::Decoherence { points } => {
                let shown: Vec<String> = points
                    .iter()
                    .map(|p| format!("{:.2}:{:.3}", p.strength, p.mean_visibility))
                    .collect();
                format!("mean V by strength [{}]", shown.join(", "))
            }
        }
    }
}

impl fmt::Display for ScenarioOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// Labelled outcomes of a simulator run, in scenario order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SimulationResult {
    outcomes: Vec<(String, ScenarioOutcome)>,
}

impl SimulationResult {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, label: String, outcome: ScenarioOutcome) {
        self.outcomes.push((label, outcome));
    }

    /// All outcomes with their labels, in the order they ran.
    pub fn outcomes(&self) -> &[(String, ScenarioOutcome)] {
        &self.outcomes
    }

    /// Looks up an outcome by label.
    pub fn get(&self, label: &str) -> Option<&ScenarioOutcome> {
        self.outcomes.iter().find(|(l, _)| l == label).map(|(_, o)| o)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation Results:")?;
        if self.outcomes.is_empty() {
            writeln!(f, "  No scenarios were run.")?;
        } else {
            for (label, outcome) in &self.outcomes {
                writeln!(f, "  {}: {}", label, outcome)?;
            }
        }
        Ok(())
    }
}
