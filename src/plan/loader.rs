//! Load named plans from a CSV file
//!
//! One row per plan. The `mode` column selects which of the optional
//! columns are required:
//!
//! ```text
//! name,mode,current_amount,target_amount,periodic_contribution,annual_rate,growth_enabled,horizon_months,target_date,principal,base_payment,extra_payment
//! Vacation,forward,1000,10000,200,0.05,true,,,,,
//! House,reverse,5000,60000,,0.04,true,,2030-06-01,,,
//! Card,debt,,,,0.18,,,,5000,150,100
//! ```

use super::{DebtParams, Plan, PlanInputs, ProjectionParams, ReverseParams};
use crate::error::{ProjectionError, Result};
use chrono::NaiveDate;
use csv::Reader;
use std::path::Path;

/// Raw CSV row; which fields are required depends on `mode`
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    name: String,
    mode: String,
    current_amount: Option<f64>,
    target_amount: Option<f64>,
    periodic_contribution: Option<f64>,
    annual_rate: Option<f64>,
    growth_enabled: Option<bool>,
    horizon_months: Option<u32>,
    target_date: Option<NaiveDate>,
    principal: Option<f64>,
    base_payment: Option<f64>,
    extra_payment: Option<f64>,
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T> {
    value.ok_or_else(|| ProjectionError::invalid(field, "missing value"))
}

impl CsvRow {
    fn to_plan(self, as_of: NaiveDate) -> Result<Plan> {
        let growth_enabled = self.growth_enabled.unwrap_or(true);
        let annual_rate = self.annual_rate.unwrap_or(0.0);

        let inputs = match self.mode.trim().to_ascii_lowercase().as_str() {
            "forward" => PlanInputs::Forward(ProjectionParams {
                current_amount: self.current_amount.unwrap_or(0.0),
                target_amount: required(self.target_amount, "target_amount")?,
                periodic_contribution: self.periodic_contribution.unwrap_or(0.0),
                annual_growth_rate: annual_rate,
                growth_enabled,
            }),
            "reverse" => {
                let current_amount = self.current_amount.unwrap_or(0.0);
                let target_amount = required(self.target_amount, "target_amount")?;
                match (self.horizon_months, self.target_date) {
                    (Some(horizon_months), _) => PlanInputs::Reverse(ReverseParams {
                        current_amount,
                        target_amount,
                        annual_growth_rate: annual_rate,
                        growth_enabled,
                        horizon_months,
                    }),
                    (None, Some(target_date)) => PlanInputs::Reverse(ReverseParams::with_target_date(
                        current_amount,
                        target_amount,
                        annual_rate,
                        growth_enabled,
                        as_of,
                        target_date,
                    )?),
                    (None, None) => {
                        return Err(ProjectionError::invalid(
                            "horizon_months",
                            "reverse plans need horizon_months or target_date",
                        ))
                    }
                }
            }
            "debt" => PlanInputs::Debt(DebtParams {
                principal: required(self.principal, "principal")?,
                annual_rate,
                base_payment: required(self.base_payment, "base_payment")?,
                extra_payment: self.extra_payment.unwrap_or(0.0),
            }),
            other => return Err(ProjectionError::invalid("mode", format!("unknown mode: {}", other))),
        };

        Ok(Plan::new(self.name, inputs))
    }
}

/// Load all plans from a CSV file
pub fn load_plans<P: AsRef<Path>>(path: P, as_of: NaiveDate) -> Result<Vec<Plan>> {
    let reader = Reader::from_path(path)?;
    collect_plans(reader, as_of)
}

/// Load plans from any reader (e.g., string buffer, request body)
pub fn load_plans_from_reader<R: std::io::Read>(reader: R, as_of: NaiveDate) -> Result<Vec<Plan>> {
    collect_plans(Reader::from_reader(reader), as_of)
}

fn collect_plans<R: std::io::Read>(mut reader: Reader<R>, as_of: NaiveDate) -> Result<Vec<Plan>> {
    let mut plans = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        plans.push(row.to_plan(as_of)?);
    }

    log::debug!("Loaded {} plans", plans.len());
    Ok(plans)
}
