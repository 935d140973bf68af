//! GoalTrackr - Projection engine for savings goals and debt payoff
//!
//! This library provides:
//! - Forward savings projections (when will a goal be reached)
//! - Reverse solves (monthly contribution needed by a horizon or date)
//! - Debt amortization with extra-payment comparison
//! - Batch evaluation and recompute-on-change planning

pub mod error;
pub mod calendar;
pub mod assumptions;
pub mod plan;
pub mod projection;
pub mod scenario;
pub mod planner;

// Re-export commonly used types
pub use error::{ProjectionError, Result};
pub use assumptions::{Assumptions, RateConvention};
pub use plan::{Plan, PlanInputs, ProjectionParams, ReverseParams, DebtParams};
pub use projection::{ProjectionEngine, ProjectionConfig, PlanResult, Projection, Requirement, PayoffResult};
pub use scenario::ScenarioRunner;
pub use planner::Planner;
