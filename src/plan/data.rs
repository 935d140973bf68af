//! Plan input records for the three projection modes

use crate::calendar::months_between;
use crate::error::{ProjectionError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

fn default_growth_enabled() -> bool {
    true
}

/// Inputs for a forward savings projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParams {
    /// Starting balance
    pub current_amount: f64,

    /// Goal balance
    pub target_amount: f64,

    /// Amount added each month, before growth is applied
    pub periodic_contribution: f64,

    /// Nominal annual growth rate as a fraction (0.05 = 5%)
    pub annual_growth_rate: f64,

    /// When false the growth rate is treated as zero
    #[serde(default = "default_growth_enabled")]
    pub growth_enabled: bool,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            current_amount: 1000.0,
            target_amount: 10000.0,
            periodic_contribution: 200.0,
            annual_growth_rate: 0.05,
            growth_enabled: true,
        }
    }
}

impl ProjectionParams {
    pub fn validate(&self) -> Result<()> {
        non_negative("current_amount", self.current_amount)?;
        positive("target_amount", self.target_amount)?;
        non_negative("periodic_contribution", self.periodic_contribution)?;
        non_negative("annual_growth_rate", self.annual_growth_rate)?;
        Ok(())
    }

    /// Goal already reached by the opening balance
    pub fn goal_met(&self) -> bool {
        self.target_amount <= self.current_amount
    }
}

/// Inputs for solving the contribution that reaches a target by a horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReverseParams {
    pub current_amount: f64,
    pub target_amount: f64,
    pub annual_growth_rate: f64,
    #[serde(default = "default_growth_enabled")]
    pub growth_enabled: bool,

    /// Number of monthly contributions; must be at least 1
    #[serde(default)]
    pub horizon_months: u32,
}

impl Default for ReverseParams {
    fn default() -> Self {
        Self {
            current_amount: 1000.0,
            target_amount: 10000.0,
            annual_growth_rate: 0.05,
            growth_enabled: true,
            horizon_months: 12,
        }
    }
}

impl ReverseParams {
    /// Build with the horizon derived from a target date.
    ///
    /// The horizon is the calendar month difference between `as_of` and
    /// `target_date`; a target within the current month counts as one month.
    /// Targets in an earlier month are rejected.
    pub fn with_target_date(
        current_amount: f64,
        target_amount: f64,
        annual_growth_rate: f64,
        growth_enabled: bool,
        as_of: NaiveDate,
        target_date: NaiveDate,
    ) -> Result<Self> {
        let months = horizon_from_target_date(as_of, target_date)?;
        Ok(Self {
            current_amount,
            target_amount,
            annual_growth_rate,
            growth_enabled,
            horizon_months: months,
        })
    }

    pub fn validate(&self) -> Result<()> {
        non_negative("current_amount", self.current_amount)?;
        positive("target_amount", self.target_amount)?;
        non_negative("annual_growth_rate", self.annual_growth_rate)?;
        if self.horizon_months == 0 {
            return Err(ProjectionError::invalid("horizon_months", "must be at least 1"));
        }
        Ok(())
    }
}

/// Months from `as_of` to `target_date`, clamped to a minimum of one
pub fn horizon_from_target_date(as_of: NaiveDate, target_date: NaiveDate) -> Result<u32> {
    let months = months_between(as_of, target_date);
    if months < 0 {
        return Err(ProjectionError::invalid(
            "target_date",
            format!("{} is before {}", target_date, as_of),
        ));
    }
    u32::try_from(months.max(1))
        .map_err(|_| ProjectionError::invalid("target_date", format!("{} is too far out", target_date)))
}

/// Inputs for a debt payoff projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtParams {
    /// Outstanding balance
    pub principal: f64,

    /// APR as a fraction (0.18 = 18%)
    pub annual_rate: f64,

    /// Scheduled monthly payment
    pub base_payment: f64,

    /// Optional additional monthly payment
    #[serde(default)]
    pub extra_payment: f64,
}

impl Default for DebtParams {
    fn default() -> Self {
        Self {
            principal: 5000.0,
            annual_rate: 0.18,
            base_payment: 150.0,
            extra_payment: 0.0,
        }
    }
}

impl DebtParams {
    pub fn validate(&self) -> Result<()> {
        positive("principal", self.principal)?;
        non_negative("annual_rate", self.annual_rate)?;
        non_negative("base_payment", self.base_payment)?;
        non_negative("extra_payment", self.extra_payment)?;
        Ok(())
    }

    /// Total disbursed each month while the balance allows it
    pub fn monthly_payment(&self) -> f64 {
        self.base_payment + self.extra_payment
    }

    /// Same debt without the extra payment (comparison baseline)
    pub fn without_extra(&self) -> Self {
        Self {
            extra_payment: 0.0,
            ..self.clone()
        }
    }
}

/// Inputs for any of the three modes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PlanInputs {
    Forward(ProjectionParams),
    Reverse(ReverseParams),
    Debt(DebtParams),
}

impl PlanInputs {
    pub fn mode_name(&self) -> &'static str {
        match self {
            PlanInputs::Forward(_) => "forward",
            PlanInputs::Reverse(_) => "reverse",
            PlanInputs::Debt(_) => "debt",
        }
    }
}

impl Default for PlanInputs {
    fn default() -> Self {
        PlanInputs::Forward(ProjectionParams::default())
    }
}

/// A named plan, as kept by callers that save goals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,
    #[serde(flatten)]
    pub inputs: PlanInputs,
}

impl Plan {
    pub fn new(name: impl Into<String>, inputs: PlanInputs) -> Self {
        Self {
            name: name.into(),
            inputs,
        }
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(ProjectionError::invalid(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(ProjectionError::invalid(field, format!("must not be negative (got {})", value)));
    }
    Ok(())
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    non_negative(field, value)?;
    if value == 0.0 {
        return Err(ProjectionError::invalid(field, "must be greater than zero"));
    }
    Ok(())
}
