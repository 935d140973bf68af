//! Projection engine for savings goals, reverse solves and debt payoff

mod state;
mod engine;
mod series;
mod results;

pub use state::{SavingsState, SavingsTrajectory, DebtState, DebtTrajectory};
pub use engine::{ProjectionEngine, ProjectionConfig};
pub use series::{SeriesPoint, SeriesSampling, SeriesSampler};
pub use results::{
    GoalOutcome, Projection, Requirement, PayoffOutcome, PayoffComparison, PayoffResult,
    PlanResult, PlanSummary,
};
