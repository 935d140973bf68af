//! Plan inputs and CSV loading

mod data;
pub mod loader;

pub use data::{
    DebtParams, Plan, PlanInputs, ProjectionParams, ReverseParams, horizon_from_target_date,
};
pub use loader::{load_plans, load_plans_from_reader};
