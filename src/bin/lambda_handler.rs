//! AWS Lambda handler for single plan projections
//!
//! Accepts one plan as JSON (same shape as `PlanInputs`, tagged by `mode`)
//! and returns the projection result, or an error body for invalid input.

use goaltrackr::projection::{PlanSummary, SeriesSampling};
use goaltrackr::{Assumptions, PlanInputs, PlanResult, ProjectionConfig, ProjectionEngine, ReverseParams};
use chrono::NaiveDate;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};

/// Input for one projection
#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    /// Date month 0 corresponds to (default: today)
    #[serde(default)]
    pub as_of: Option<NaiveDate>,

    /// Reverse mode only: derive the horizon from this date
    #[serde(default)]
    pub target_date: Option<NaiveDate>,

    /// Thin long series (monthly for 5 years, then every 6 months)
    #[serde(default)]
    pub thin_series: bool,

    #[serde(default)]
    pub assumptions: Option<Assumptions>,

    #[serde(flatten)]
    pub inputs: PlanInputs,
}

/// Output from the projection
#[derive(Debug, Serialize)]
pub struct PlanResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<PlanSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<PlanResult>,
    pub execution_time_us: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn error_response(message: String, start: std::time::Instant) -> PlanResponse {
    PlanResponse {
        summary: None,
        result: None,
        execution_time_us: start.elapsed().as_micros() as u64,
        error: Some(message),
    }
}

/// Lambda handler function
async fn handler(event: LambdaEvent<PlanRequest>) -> Result<PlanResponse, Error> {
    let start = std::time::Instant::now();
    let request = event.payload;

    let mut config = match request.as_of {
        Some(date) => ProjectionConfig::as_of(date),
        None => ProjectionConfig::default(),
    };
    if request.thin_series {
        config.sampling = SeriesSampling::thinned();
    }

    let inputs = match (request.inputs, request.target_date) {
        (PlanInputs::Reverse(params), Some(target_date)) => {
            match ReverseParams::with_target_date(
                params.current_amount,
                params.target_amount,
                params.annual_growth_rate,
                params.growth_enabled,
                config.as_of,
                target_date,
            ) {
                Ok(params) => PlanInputs::Reverse(params),
                Err(e) => return Ok(error_response(e.to_string(), start)),
            }
        }
        (inputs, _) => inputs,
    };

    let assumptions = request.assumptions.unwrap_or_default();
    if let Err(e) = assumptions.validate() {
        log::warn!("Rejected request assumptions: {}", e);
        return Ok(error_response(e.to_string(), start));
    }

    let engine = ProjectionEngine::new(assumptions, config);
    let response = match engine.run(&inputs) {
        Ok(result) => PlanResponse {
            summary: Some(result.summary()),
            result: Some(result),
            execution_time_us: start.elapsed().as_micros() as u64,
            error: None,
        },
        Err(e) => {
            log::warn!("{} projection failed: {}", inputs.mode_name(), e);
            error_response(e.to_string(), start)
        }
    };

    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
