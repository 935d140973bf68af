//! Scenario runner for single and batch plan evaluation
//!
//! Holds one configured engine and evaluates any number of plans against it.
//! Batches run in parallel; each plan is an independent computation.

use crate::{Assumptions, Plan, PlanInputs};
use crate::error::Result;
use crate::projection::{PlanResult, ProjectionConfig, ProjectionEngine};
use rayon::prelude::*;
use std::path::Path;

/// Outcome of one named plan in a batch
#[derive(Debug)]
pub struct PlanRun {
    pub name: String,
    pub result: Result<PlanResult>,
}

/// Pre-configured runner for plan batches
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let plans = load_plans("plans.csv", today)?;
/// for run in runner.run_batch(&plans) {
///     println!("{}: {:?}", run.name, run.result.map(|r| r.summary()));
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Create runner with default assumptions, anchored at today's date
    pub fn new() -> Self {
        Self::with_assumptions(Assumptions::default(), ProjectionConfig::default())
    }

    /// Create runner by loading assumptions from a JSON file
    pub fn from_json_path(path: &Path, config: ProjectionConfig) -> Result<Self> {
        Ok(Self::with_assumptions(Assumptions::from_json_path(path)?, config))
    }

    /// Create runner with pre-built assumptions
    pub fn with_assumptions(assumptions: Assumptions, config: ProjectionConfig) -> Self {
        Self {
            engine: ProjectionEngine::new(assumptions, config),
        }
    }

    /// Run a single plan
    pub fn run(&self, inputs: &PlanInputs) -> Result<PlanResult> {
        self.engine.run(inputs)
    }

    /// Run named plans in parallel, preserving input order
    pub fn run_batch(&self, plans: &[Plan]) -> Vec<PlanRun> {
        plans
            .par_iter()
            .map(|plan| PlanRun {
                name: plan.name.clone(),
                result: self.engine.run(&plan.inputs),
            })
            .collect()
    }

    /// Run several variants of the same goal (e.g. different growth rates)
    pub fn run_scenarios(&self, variants: &[PlanInputs]) -> Vec<Result<PlanResult>> {
        variants.iter().map(|inputs| self.engine.run(inputs)).collect()
    }

    pub fn engine(&self) -> &ProjectionEngine {
        &self.engine
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{DebtParams, ProjectionParams, ReverseParams};
    use chrono::NaiveDate;

    fn runner() -> ScenarioRunner {
        let as_of = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        ScenarioRunner::with_assumptions(Assumptions::default(), ProjectionConfig::as_of(as_of))
    }

    #[test]
    fn test_scenario_runner_batch() {
        let plans = vec![
            Plan::new("Vacation", PlanInputs::Forward(ProjectionParams::default())),
            Plan::new("House", PlanInputs::Reverse(ReverseParams::default())),
            Plan::new("Card", PlanInputs::Debt(DebtParams::default())),
            Plan::new(
                "Broken",
                PlanInputs::Reverse(ReverseParams {
                    horizon_months: 0,
                    ..Default::default()
                }),
            ),
        ];

        let runs = runner().run_batch(&plans);
        assert_eq!(runs.len(), 4);

        let names: Vec<&str> = runs.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Vacation", "House", "Card", "Broken"]);

        assert!(matches!(runs[0].result, Ok(PlanResult::Forward(_))));
        assert!(matches!(runs[1].result, Ok(PlanResult::Reverse(_))));
        assert!(matches!(runs[2].result, Ok(PlanResult::Debt(_))));
        assert!(runs[3].result.as_ref().unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_higher_growth_finishes_sooner() {
        let variants: Vec<_> = [0.0, 0.04, 0.08]
            .iter()
            .map(|&rate| {
                PlanInputs::Forward(ProjectionParams {
                    annual_growth_rate: rate,
                    ..Default::default()
                })
            })
            .collect();

        let months: Vec<u32> = runner()
            .run_scenarios(&variants)
            .into_iter()
            .map(|r| r.unwrap().summary().months.unwrap())
            .collect();

        assert!(months[0] > months[1]);
        assert!(months[1] > months[2]);
    }
}
