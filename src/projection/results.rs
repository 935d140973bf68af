//! Result records returned by the projection engine

use super::series::SeriesPoint;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How a forward savings projection terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalOutcome {
    /// Target was already covered by the opening balance
    AlreadyMet,
    /// Target reached after `periods_elapsed` months
    Reached,
    /// Target can never be reached with these inputs (or not within the cap)
    Unreachable,
}

/// Forward projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub outcome: GoalOutcome,

    /// Months until the target is met (months iterated when unreachable)
    pub periods_elapsed: u32,

    /// None when the goal is unreachable
    pub completion_date: Option<NaiveDate>,

    /// Contributions applied, excluding the opening balance
    pub total_contributions: f64,

    /// final balance - opening balance - contributions
    pub total_growth: f64,

    pub final_balance: f64,

    /// Progress of the opening balance toward the target, 0-100
    pub percent_complete: u8,

    pub series: Vec<SeriesPoint>,
}

impl Projection {
    pub fn is_reachable(&self) -> bool {
        self.outcome != GoalOutcome::Unreachable
    }

    /// Months to reach the goal, or None if it is never reached
    pub fn months_to_goal(&self) -> Option<u32> {
        self.is_reachable().then_some(self.periods_elapsed)
    }
}

/// Reverse solve result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    /// Smallest whole-unit monthly contribution reaching the target
    pub required_contribution: f64,

    pub horizon_months: u32,
    pub completion_date: NaiveDate,
    pub total_contributions: f64,
    pub total_growth: f64,

    /// Balance after `horizon_months` with the required contribution
    pub future_value: f64,

    /// Progress of the opening balance toward the target, 0-100
    pub percent_complete: u8,

    pub series: Vec<SeriesPoint>,
}

/// How a debt payoff projection terminated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PayoffOutcome {
    PaidOff,
    /// Monthly payment does not exceed the first month's interest
    PaymentTooLow { monthly_interest: f64, monthly_payment: f64 },
    /// Amortizing, but not paid off within the period cap
    CapReached,
}

/// Effect of the extra payment against a run without it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoffComparison {
    pub baseline_outcome: PayoffOutcome,
    pub baseline_periods: u32,
    pub baseline_interest: f64,

    /// None when the baseline never pays off
    pub months_saved: Option<u32>,
    pub interest_saved: Option<f64>,
}

/// Debt payoff result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffResult {
    pub outcome: PayoffOutcome,
    pub periods_elapsed: u32,

    /// None unless the debt is paid off
    pub payoff_date: Option<NaiveDate>,

    /// Payments actually disbursed
    pub total_paid: f64,
    pub total_interest: f64,
    pub final_balance: f64,

    /// Share of the principal retired, 0-100
    pub percent_complete: u8,

    pub series: Vec<SeriesPoint>,

    /// Present only when an extra payment was given
    pub comparison: Option<PayoffComparison>,
}

impl PayoffResult {
    pub fn is_paid_off(&self) -> bool {
        self.outcome == PayoffOutcome::PaidOff
    }

    pub fn months_saved(&self) -> Option<u32> {
        self.comparison.and_then(|c| c.months_saved)
    }

    pub fn interest_saved(&self) -> Option<f64> {
        self.comparison.and_then(|c| c.interest_saved)
    }
}

/// Result of any of the three modes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PlanResult {
    Forward(Projection),
    Reverse(Requirement),
    Debt(PayoffResult),
}

impl PlanResult {
    pub fn series(&self) -> &[SeriesPoint] {
        match self {
            PlanResult::Forward(p) => &p.series,
            PlanResult::Reverse(r) => &r.series,
            PlanResult::Debt(d) => &d.series,
        }
    }

    /// Get summary statistics
    pub fn summary(&self) -> PlanSummary {
        match self {
            PlanResult::Forward(p) => PlanSummary {
                mode: "forward",
                status: match p.outcome {
                    GoalOutcome::AlreadyMet => "already_met",
                    GoalOutcome::Reached => "reached",
                    GoalOutcome::Unreachable => "unreachable",
                },
                months: p.months_to_goal(),
                completion_date: p.completion_date,
                monthly_amount: None,
                total_contributions: p.total_contributions,
                total_growth_or_interest: p.total_growth,
                final_balance: p.final_balance,
                percent_complete: p.percent_complete,
            },
            PlanResult::Reverse(r) => PlanSummary {
                mode: "reverse",
                status: "solved",
                months: Some(r.horizon_months),
                completion_date: Some(r.completion_date),
                monthly_amount: Some(r.required_contribution),
                total_contributions: r.total_contributions,
                total_growth_or_interest: r.total_growth,
                final_balance: r.future_value,
                percent_complete: r.percent_complete,
            },
            PlanResult::Debt(d) => PlanSummary {
                mode: "debt",
                status: match d.outcome {
                    PayoffOutcome::PaidOff => "paid_off",
                    PayoffOutcome::PaymentTooLow { .. } => "payment_too_low",
                    PayoffOutcome::CapReached => "cap_reached",
                },
                months: d.is_paid_off().then_some(d.periods_elapsed),
                completion_date: d.payoff_date,
                monthly_amount: None,
                total_contributions: d.total_paid,
                total_growth_or_interest: d.total_interest,
                final_balance: d.final_balance,
                percent_complete: d.percent_complete,
            },
        }
    }
}

/// Flat summary shared by all modes (batch output, CLI)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSummary {
    pub mode: &'static str,
    pub status: &'static str,
    pub months: Option<u32>,
    pub completion_date: Option<NaiveDate>,
    /// Required monthly contribution (reverse mode only)
    pub monthly_amount: Option<f64>,
    pub total_contributions: f64,
    pub total_growth_or_interest: f64,
    pub final_balance: f64,
    pub percent_complete: u8,
}
