//! Recompute-on-change wrapper around the engine
//!
//! A `Planner` owns the current inputs for one plan. Every change to the
//! inputs triggers a synchronous recomputation, and every subscribed observer
//! is notified with the new result or the error that replaced it.

use crate::error::ProjectionError;
use crate::plan::PlanInputs;
use crate::projection::{PlanResult, ProjectionEngine};

/// Callback invoked after each recomputation
pub type Observer = Box<dyn FnMut(Result<&PlanResult, &ProjectionError>)>;

pub struct Planner {
    engine: ProjectionEngine,
    inputs: PlanInputs,
    last: Option<PlanResult>,
    observers: Vec<Observer>,
}

impl Planner {
    /// Create a planner and compute the initial result
    pub fn new(engine: ProjectionEngine, inputs: PlanInputs) -> Self {
        let mut planner = Self {
            engine,
            inputs,
            last: None,
            observers: Vec::new(),
        };
        planner.recompute();
        planner
    }

    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(Result<&PlanResult, &ProjectionError>) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    pub fn inputs(&self) -> &PlanInputs {
        &self.inputs
    }

    /// Latest successful result; None after a failed computation
    pub fn result(&self) -> Option<&PlanResult> {
        self.last.as_ref()
    }

    /// Replace the inputs (e.g. a mode switch) and recompute
    pub fn set_inputs(&mut self, inputs: PlanInputs) -> Option<&PlanResult> {
        self.inputs = inputs;
        self.recompute()
    }

    /// Edit the inputs in place and recompute
    pub fn update<F>(&mut self, edit: F) -> Option<&PlanResult>
    where
        F: FnOnce(&mut PlanInputs),
    {
        edit(&mut self.inputs);
        self.recompute()
    }

    /// Run the engine on the current inputs. A failure clears the stored
    /// result so no stale numbers remain visible.
    pub fn recompute(&mut self) -> Option<&PlanResult> {
        let outcome = self.engine.run(&self.inputs);
        if let Err(e) = &outcome {
            log::warn!("Calculation error ({} mode): {}", self.inputs.mode_name(), e);
        }

        for observer in self.observers.iter_mut() {
            observer(outcome.as_ref());
        }

        self.last = outcome.ok();
        self.last.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::Assumptions;
    use crate::plan::{DebtParams, ProjectionParams};
    use crate::projection::ProjectionConfig;
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn engine() -> ProjectionEngine {
        let as_of = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        ProjectionEngine::new(Assumptions::default(), ProjectionConfig::as_of(as_of))
    }

    #[test]
    fn test_initial_result_computed() {
        let planner = Planner::new(engine(), PlanInputs::default());
        assert!(matches!(planner.result(), Some(PlanResult::Forward(_))));
    }

    #[test]
    fn test_update_notifies_observers() {
        let mut planner = Planner::new(engine(), PlanInputs::default());
        let seen: Rc<RefCell<Vec<Option<u32>>>> = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        planner.subscribe(move |result| {
            sink.borrow_mut().push(result.ok().and_then(|r| r.summary().months));
        });

        planner.update(|inputs| {
            if let PlanInputs::Forward(params) = inputs {
                params.periodic_contribution = 400.0;
            }
        });
        planner.update(|inputs| {
            if let PlanInputs::Forward(params) = inputs {
                params.periodic_contribution = 800.0;
            }
        });

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert!(seen[0].unwrap() > seen[1].unwrap());
    }

    #[test]
    fn test_error_clears_stale_result() {
        let mut planner = Planner::new(engine(), PlanInputs::default());
        assert!(planner.result().is_some());

        let errors = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&errors);
        planner.subscribe(move |result| {
            if result.is_err() {
                *counter.borrow_mut() += 1;
            }
        });

        let result = planner.update(|inputs| {
            if let PlanInputs::Forward(params) = inputs {
                params.target_amount = -5.0;
            }
        });
        assert!(result.is_none());
        assert!(planner.result().is_none());
        assert_eq!(*errors.borrow(), 1);
    }

    #[test]
    fn test_mode_switch() {
        let mut planner = Planner::new(engine(), PlanInputs::Forward(ProjectionParams::default()));
        let result = planner.set_inputs(PlanInputs::Debt(DebtParams::default()));
        assert!(matches!(result, Some(PlanResult::Debt(_))));
        assert_eq!(planner.inputs().mode_name(), "debt");
    }

    #[test]
    fn test_redundant_recompute_is_identical() {
        let mut planner = Planner::new(engine(), PlanInputs::Debt(DebtParams::default()));
        let first = planner.result().cloned();
        let second = planner.recompute().cloned();
        assert_eq!(first, second);
    }
}
