// src/experiments/mod.rs

//! Ordered lists of scenarios to run against one model context.
//!
//! An [`Experiment`] is what a job file describes and what the
//! [`Simulator`](crate::simulation::Simulator) executes. Scenarios run in
//! insertion order and their outcomes keep that order.

mod scenario;

pub use scenario::Scenario;

use crate::core::ModelResult;
use std::fmt;

/// An ordered sequence of scenarios.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Experiment {
    /// Optional name, used as the heading of printed results.
    name: Option<String>,
    scenarios: Vec<Scenario>,
}

impl Experiment {
    /// Creates a new, empty experiment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a scenario.
    pub fn add_scenario(&mut self, scenario: Scenario) {
        self.scenarios.push(scenario);
    }

    /// Appends every scenario from `scenarios`, in order.
    pub fn add_scenarios<I>(&mut self, scenarios: I)
    where
        I: IntoIterator<Item = Scenario>,
    {
        self.scenarios.extend(scenarios);
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Labels of the form `NN-kind`, one per scenario. These name output files.
    pub fn labels(&self) -> Vec<String> {
        self.scenarios
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{:02}-{}", i + 1, s.name()))
            .collect()
    }

    /// Runs [`Scenario::validate`] on every step.
    pub fn validate(&self) -> ModelResult<()> {
        self.scenarios.iter().try_for_each(Scenario::validate)
    }
}

//-------------------------------------------------------------------------
// Experiment Builder
//-------------------------------------------------------------------------

/// Chained construction of an [`Experiment`].
#[derive(Debug, Default)]
pub struct ExperimentBuilder {
    experiment: Experiment,
}

impl ExperimentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.experiment.set_name(name);
        self
    }

    /// Adds a single scenario. Returns `self` for chaining.
    pub fn add(mut self, scenario: Scenario) -> Self {
        self.experiment.add_scenario(scenario);
        self
    }

    /// Adds several scenarios. Returns `self` for chaining.
    pub fn add_all<I>(mut self, scenarios: I) -> Self
    where
        I: IntoIterator<Item = Scenario>,
    {
        self.experiment.add_scenarios(scenarios);
        self
    }

    /// Finishes the experiment without checking it.
    pub fn build(self) -> Experiment {
        self.experiment
    }

    /// Finishes the experiment after [`Experiment::validate`].
    pub fn try_build(self) -> ModelResult<Experiment> {
        self.experiment.validate()?;
        Ok(self.experiment)
    }
}

impl fmt::Display for Experiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name.as_deref().unwrap_or("unnamed");
        writeln!(f, "brightdark::Experiment[{}: {} scenarios]", name, self.len())?;
        for label in self.labels() {
            writeln!(f, "  {}", label)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_order() {
        let experiment = ExperimentBuilder::new()
            .name("order")
            .add(Scenario::interference(0.0))
            .add_all([Scenario::double_slit(), Scenario::animation()])
            .build();
        assert_eq!(experiment.len(), 3);
        assert_eq!(experiment.name(), Some("order"));
        assert_eq!(
            experiment.labels(),
            vec!["01-interference", "02-double_slit", "03-animation"]
        );
    }

    #[test]
    fn test_try_build_validates() {
        let built = ExperimentBuilder::new().add(Scenario::phase_sweep(0.0, 1.0, 0)).try_build();
        assert!(built.is_err());
    }

    #[test]
    fn test_display_lists_labels() {
        let experiment = ExperimentBuilder::new().add(Scenario::double_slit()).build();
        let shown = experiment.to_string();
        assert!(shown.starts_with("brightdark::Experiment[unnamed: 1 scenarios]"));
        assert!(shown.contains("01-double_slit"));
    }
}
