//! AWS Lambda handler for mortgage calculations
//!
//! Accepts loan inputs as JSON and returns the baseline schedule summary, the
//! extra-payment strategy ledger and their comparison. Each invocation is
//! computed from scratch; nothing is shared between requests.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};

use mortgage_planner::{
    amortization::{schedule_for, AmortizationRow, ScheduleSummary},
    config::{EngineSettings, ExtraPaymentTiming, LoanDefaults},
    strategy::StrategySummary,
    LoanTerms, RepaymentPlan, Result, StrategyComparison, StrategyRow, StrategySimulator, TermPolicy,
};

/// Input for one calculation
#[derive(Debug, Deserialize)]
pub struct CalculationRequest {
    #[serde(default = "default_principal")]
    pub principal: f64,

    /// Annual rate in percent
    #[serde(default = "default_annual_rate")]
    pub annual_rate: f64,

    #[serde(default = "default_term_years")]
    pub term_years: f64,

    #[serde(default)]
    pub extra_annual_payment: f64,

    /// Shorten the term to keep the monthly payment constant
    #[serde(default)]
    pub adjust_term: bool,

    /// Include the full monthly schedule in the response
    #[serde(default)]
    pub include_monthly: bool,

    #[serde(default)]
    pub extra_payment_timing: Option<ExtraPaymentTiming>,
}

fn default_principal() -> f64 { LoanDefaults::default().principal }
fn default_annual_rate() -> f64 { LoanDefaults::default().annual_rate }
fn default_term_years() -> f64 { LoanDefaults::default().term_years }

/// Output of one calculation
#[derive(Debug, Default, Serialize)]
pub struct CalculationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline: Option<ScheduleSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly: Option<Vec<AmortizationRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<StrategySummary>,
    pub yearly: Vec<StrategyRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<StrategyComparison>,
    pub execution_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn calculate(request: &CalculationRequest) -> Result<CalculationResponse> {
    let terms = LoanTerms::new(request.principal, request.annual_rate, request.term_years)?;
    let plan = RepaymentPlan::new(request.extra_annual_payment, TermPolicy::from_adjust_term(request.adjust_term))?;

    let mut settings = EngineSettings::default();
    if let Some(timing) = request.extra_payment_timing {
        settings.extra_payment_timing = timing;
    }

    let baseline = schedule_for(&terms)?;
    let strategy = StrategySimulator::new(settings).simulate(&terms, &plan)?;
    let comparison = StrategyComparison::between(&baseline, &strategy);

    Ok(CalculationResponse {
        baseline: Some(baseline.summary()),
        monthly: request.include_monthly.then(|| baseline.rows.iter().map(|r| r.rounded()).collect()),
        strategy: Some(strategy.summary()),
        yearly: strategy.rows.iter().map(|r| r.rounded()).collect(),
        comparison: Some(comparison),
        ..Default::default()
    })
}

/// Lambda handler function
async fn handler(event: LambdaEvent<CalculationRequest>) -> std::result::Result<CalculationResponse, Error> {
    let start = std::time::Instant::now();
    let request = event.payload;

    let mut response = match calculate(&request) {
        Ok(response) => response,
        Err(e) => {
            log::warn!("Rejected calculation request: {}", e);
            CalculationResponse {
                error: Some(e.to_string()),
                ..Default::default()
            }
        }
    };

    response.execution_time_ms = start.elapsed().as_millis() as u64;
    Ok(response)
}

#[tokio::main]
async fn main() -> std::result::Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
