//! Core projection engine for savings goals, reverse solves and debt payoff

use super::results::{
    GoalOutcome, PayoffComparison, PayoffOutcome, PayoffResult, PlanResult, Projection, Requirement,
};
use super::series::{SeriesPoint, SeriesSampler, SeriesSampling};
use super::state::{DebtState, DebtTrajectory, SavingsState, SavingsTrajectory};
use crate::assumptions::{debt_monthly_rate, Assumptions};
use crate::calendar::add_months;
use crate::error::{ensure_finite, ProjectionError, Result};
use crate::plan::{DebtParams, PlanInputs, ProjectionParams, ReverseParams};
use chrono::NaiveDate;

/// Upper bound on the whole-unit adjustments applied after the closed form
const MAX_REFINE_STEPS: u32 = 16;

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    /// Date that month 0 corresponds to; completion dates count from here
    pub as_of: NaiveDate,

    /// Which periods are kept in the returned series
    pub sampling: SeriesSampling,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            as_of: chrono::Local::now().date_naive(),
            sampling: SeriesSampling::Full,
        }
    }
}

impl ProjectionConfig {
    /// Config anchored at a fixed date. Runs with the same date and inputs
    /// produce identical results.
    pub fn as_of(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            sampling: SeriesSampling::Full,
        }
    }
}

/// Main projection engine. Stateless between calls.
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    assumptions: Assumptions,
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with given assumptions and config
    pub fn new(assumptions: Assumptions, config: ProjectionConfig) -> Self {
        Self { assumptions, config }
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Run whichever mode the inputs describe
    pub fn run(&self, inputs: &PlanInputs) -> Result<PlanResult> {
        match inputs {
            PlanInputs::Forward(params) => self.project_forward(params).map(PlanResult::Forward),
            PlanInputs::Reverse(params) => self.solve_required_contribution(params).map(PlanResult::Reverse),
            PlanInputs::Debt(params) => self.project_debt_payoff(params).map(PlanResult::Debt),
        }
    }

    /// Project a savings balance forward until it reaches the target
    pub fn project_forward(&self, params: &ProjectionParams) -> Result<Projection> {
        params.validate()?;
        self.assumptions.validate()?;

        let monthly_rate = self
            .assumptions
            .savings_rate(params.annual_growth_rate, params.growth_enabled);
        let percent_complete = savings_percent_complete(params.current_amount, params.target_amount);
        let mut sampler = SeriesSampler::new(self.config.sampling, params.current_amount);

        log::debug!(
            "Forward projection: current={} target={} contribution={} monthly_rate={}",
            params.current_amount,
            params.target_amount,
            params.periodic_contribution,
            monthly_rate
        );

        if params.goal_met() {
            return Ok(Projection {
                outcome: GoalOutcome::AlreadyMet,
                periods_elapsed: 0,
                completion_date: Some(self.config.as_of),
                total_contributions: 0.0,
                total_growth: 0.0,
                final_balance: params.current_amount,
                percent_complete,
                series: sampler.finish(0, params.current_amount),
            });
        }

        // Nothing ever gets added to the balance
        let stalled = params.periodic_contribution <= 0.0
            && (monthly_rate <= 0.0 || params.current_amount <= 0.0);
        if stalled {
            log::debug!("Forward projection cannot grow: no contribution and no growth");
            return Ok(Projection {
                outcome: GoalOutcome::Unreachable,
                periods_elapsed: 0,
                completion_date: None,
                total_contributions: 0.0,
                total_growth: 0.0,
                final_balance: params.current_amount,
                percent_complete,
                series: sampler.finish(0, params.current_amount),
            });
        }

        let mut last = SavingsState::opening(params.current_amount);
        let mut reached = false;
        let trajectory = SavingsTrajectory::new(
            params.current_amount,
            params.periodic_contribution,
            monthly_rate,
        );
        for state in trajectory.take(self.assumptions.savings_period_cap as usize) {
            sampler.record(state.period, state.balance);
            last = state;
            if state.balance >= params.target_amount {
                reached = true;
                break;
            }
        }

        let final_balance = ensure_finite("final balance", last.balance)?;
        let total_growth = ensure_finite("total growth", final_balance - params.current_amount - last.contributed)?;

        let (outcome, completion_date) = if reached {
            (GoalOutcome::Reached, Some(add_months(self.config.as_of, last.period)?))
        } else {
            log::debug!(
                "Forward projection hit the {}-month cap at balance {:.2}",
                last.period,
                final_balance
            );
            (GoalOutcome::Unreachable, None)
        };

        Ok(Projection {
            outcome,
            periods_elapsed: last.period,
            completion_date,
            total_contributions: last.contributed,
            total_growth,
            final_balance,
            percent_complete,
            series: sampler.finish(last.period, final_balance),
        })
    }

    /// Solve for the smallest whole-unit monthly contribution that reaches
    /// the target after exactly `horizon_months` contributions
    pub fn solve_required_contribution(&self, params: &ReverseParams) -> Result<Requirement> {
        params.validate()?;
        self.assumptions.validate()?;
        if params.horizon_months > self.assumptions.savings_period_cap {
            return Err(ProjectionError::invalid(
                "horizon_months",
                format!("must not exceed {} months", self.assumptions.savings_period_cap),
            ));
        }

        let n = params.horizon_months;
        let monthly_rate = self
            .assumptions
            .savings_rate(params.annual_growth_rate, params.growth_enabled);

        let estimate = closed_form_contribution(params.current_amount, params.target_amount, monthly_rate, n);
        let estimate = ensure_finite("required contribution", estimate)?;
        let required = refine_contribution(estimate, params, monthly_rate)?;

        log::debug!(
            "Reverse solve: target={} horizon={} monthly_rate={} closed_form={} required={}",
            params.target_amount,
            n,
            monthly_rate,
            estimate,
            required
        );

        // Re-simulate with the solved contribution for the series and growth
        let mut sampler = SeriesSampler::new(self.config.sampling, params.current_amount);
        let mut last = SavingsState::opening(params.current_amount);
        for state in SavingsTrajectory::new(params.current_amount, required, monthly_rate).take(n as usize) {
            sampler.record(state.period, state.balance);
            last = state;
        }

        let future_value = ensure_finite("future value", last.balance)?;
        let total_growth = future_value - params.current_amount - last.contributed;

        Ok(Requirement {
            required_contribution: required,
            horizon_months: n,
            completion_date: add_months(self.config.as_of, n)?,
            total_contributions: last.contributed,
            total_growth,
            future_value,
            percent_complete: savings_percent_complete(params.current_amount, params.target_amount),
            series: sampler.finish(last.period, future_value),
        })
    }

    /// Amortize a debt month by month, with a comparison run when an extra
    /// payment is given
    pub fn project_debt_payoff(&self, params: &DebtParams) -> Result<PayoffResult> {
        params.validate()?;
        self.assumptions.validate()?;

        let monthly_rate = debt_monthly_rate(params.annual_rate);
        let primary = self.amortize(params.principal, params.monthly_payment(), monthly_rate)?;

        let amortizing = !matches!(primary.outcome, PayoffOutcome::PaymentTooLow { .. });
        let comparison = if params.extra_payment > 0.0 && amortizing {
            let baseline_params = params.without_extra();
            let baseline = self.amortize(
                baseline_params.principal,
                baseline_params.monthly_payment(),
                monthly_rate,
            )?;
            Some(compare_runs(&primary, &baseline))
        } else {
            None
        };

        let payoff_date = match primary.outcome {
            PayoffOutcome::PaidOff => Some(add_months(self.config.as_of, primary.last.period)?),
            _ => None,
        };
        let final_balance = primary.last.balance.max(0.0);
        let retired = (params.principal - final_balance) / params.principal * 100.0;

        log::debug!(
            "Debt payoff: principal={} payment={} outcome={:?} months={}",
            params.principal,
            params.monthly_payment(),
            primary.outcome,
            primary.last.period
        );

        Ok(PayoffResult {
            outcome: primary.outcome,
            periods_elapsed: primary.last.period,
            payoff_date,
            total_paid: primary.last.total_paid,
            total_interest: primary.last.total_interest,
            final_balance,
            percent_complete: retired.round().clamp(0.0, 100.0) as u8,
            series: primary.series,
            comparison,
        })
    }

    /// Single amortization run; independent of any other run
    fn amortize(&self, principal: f64, payment: f64, monthly_rate: f64) -> Result<AmortizationRun> {
        let first_interest = principal * monthly_rate;
        let mut sampler = SeriesSampler::new(self.config.sampling, principal);

        if payment <= first_interest {
            log::debug!(
                "Payment {} does not cover first month interest {:.2}",
                payment,
                first_interest
            );
            return Ok(AmortizationRun {
                outcome: PayoffOutcome::PaymentTooLow {
                    monthly_interest: first_interest,
                    monthly_payment: payment,
                },
                last: DebtState::opening(principal),
                series: sampler.finish(0, principal),
            });
        }

        let tolerance = self.assumptions.payoff_tolerance;
        let mut last = DebtState::opening(principal);
        let mut paid_off = principal <= tolerance;
        if !paid_off {
            let trajectory = DebtTrajectory::new(principal, payment, monthly_rate);
            for state in trajectory.take(self.assumptions.debt_period_cap as usize) {
                sampler.record(state.period, state.balance.max(0.0));
                last = state;
                if state.balance <= tolerance {
                    paid_off = true;
                    break;
                }
            }
        }

        ensure_finite("debt balance", last.balance)?;
        ensure_finite("total interest", last.total_interest)?;

        let outcome = if paid_off {
            PayoffOutcome::PaidOff
        } else {
            PayoffOutcome::CapReached
        };
        let final_balance = last.balance.max(0.0);

        Ok(AmortizationRun {
            outcome,
            last,
            series: sampler.finish(last.period, final_balance),
        })
    }
}

/// Outcome and final state of one amortization run
#[derive(Debug)]
struct AmortizationRun {
    outcome: PayoffOutcome,
    last: DebtState,
    series: Vec<SeriesPoint>,
}

fn compare_runs(primary: &AmortizationRun, baseline: &AmortizationRun) -> PayoffComparison {
    let both_paid_off = primary.outcome == PayoffOutcome::PaidOff && baseline.outcome == PayoffOutcome::PaidOff;
    PayoffComparison {
        baseline_outcome: baseline.outcome,
        baseline_periods: baseline.last.period,
        baseline_interest: baseline.last.total_interest,
        months_saved: both_paid_off.then(|| baseline.last.period.saturating_sub(primary.last.period)),
        interest_saved: both_paid_off.then(|| baseline.last.total_interest - primary.last.total_interest),
    }
}

/// Progress of the opening balance toward the target, before any plan applies
fn savings_percent_complete(current: f64, target: f64) -> u8 {
    (current / target * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Closed-form contribution from the future value of an annuity due
/// (contribution lands before growth each month):
///   FV = C*f + P*(1+r)*(f-1)/r,  f = (1+r)^n
/// Rounded up to a whole unit and floored at zero.
fn closed_form_contribution(current: f64, target: f64, monthly_rate: f64, n: u32) -> f64 {
    let n_f = n as f64;
    if monthly_rate == 0.0 {
        return ((target - current) / n_f).ceil().max(0.0);
    }
    let factor = (1.0 + monthly_rate).powf(n_f);
    let payment = (target - current * factor) * monthly_rate / ((factor - 1.0) * (1.0 + monthly_rate));
    payment.ceil().max(0.0)
}

/// Nudge the closed-form estimate by whole units until it is the
/// smallest contribution whose simulated balance meets the target
fn refine_contribution(estimate: f64, params: &ReverseParams, monthly_rate: f64) -> Result<f64> {
    let meets = |contribution: f64| {
        final_savings_balance(params.current_amount, contribution, monthly_rate, params.horizon_months)
            >= params.target_amount
    };

    let mut required = estimate;
    for _ in 0..MAX_REFINE_STEPS {
        if meets(required) {
            break;
        }
        required += 1.0;
    }
    for _ in 0..MAX_REFINE_STEPS {
        if required < 1.0 || !meets(required - 1.0) {
            break;
        }
        required -= 1.0;
    }

    if !meets(required) {
        return Err(ProjectionError::Computation(format!(
            "contribution {} does not reach target {} after refinement",
            required, params.target_amount
        )));
    }
    Ok(required)
}

/// Balance after exactly `months` contributions
fn final_savings_balance(current: f64, contribution: f64, monthly_rate: f64, months: u32) -> f64 {
    SavingsTrajectory::new(current, contribution, monthly_rate)
        .take(months as usize)
        .last()
        .map(|s| s.balance)
        .unwrap_or(current)
}
