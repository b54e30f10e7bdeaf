//! Scenario runner for batches of loans and extra-payment sweeps
//!
//! Each scenario is an independent pure computation, so batches and sweeps
//! are spread over the rayon thread pool; results come back in input order.

use rayon::prelude::*;
use serde::Serialize;

use crate::amortization::{schedule_for, AmortizationSchedule};
use crate::config::EngineSettings;
use crate::error::Result;
use crate::loan::{LoanScenario, LoanTerms, RepaymentPlan, TermPolicy};
use crate::strategy::{StrategyComparison, StrategyResult, StrategySimulator};

/// Baseline schedule, strategy simulation and their comparison for one scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub label: String,
    pub baseline: AmortizationSchedule,
    pub strategy: StrategyResult,
    pub comparison: StrategyComparison,
}

/// One point of an extra-payment sweep
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    pub extra_annual_payment: f64,
    pub payoff_years: u32,
    pub total_interest: f64,
    pub interest_saved: f64,
    pub final_monthly_payment: f64,
}

/// Runs scenarios against one set of engine settings
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let terms = LoanTerms::new(2_500_000.0, 3.5, 25.0)?;
/// for point in runner.sweep(&terms, &[0.0, 50_000.0, 100_000.0], TermPolicy::PreservePayment)? {
///     println!("{} -> {} years", point.extra_annual_payment, point.payoff_years);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    settings: EngineSettings,
}

impl ScenarioRunner {
    /// Create runner with default engine settings
    pub fn new() -> Self {
        Self::with_settings(EngineSettings::default())
    }

    pub fn with_settings(settings: EngineSettings) -> Self {
        Self { settings }
    }

    fn simulator(&self) -> StrategySimulator {
        StrategySimulator::new(self.settings)
    }

    /// Run a single scenario: baseline, strategy and comparison
    pub fn run(&self, label: &str, terms: &LoanTerms, plan: &RepaymentPlan) -> Result<ScenarioOutcome> {
        let baseline = schedule_for(terms)?;
        let strategy = self.simulator().simulate(terms, plan)?;
        let comparison = StrategyComparison::between(&baseline, &strategy);

        Ok(ScenarioOutcome {
            label: label.to_string(),
            baseline,
            strategy,
            comparison,
        })
    }

    /// Run many scenarios in parallel; one failure does not stop the others
    pub fn run_batch(&self, scenarios: &[LoanScenario]) -> Vec<Result<ScenarioOutcome>> {
        log::info!("Running {} loan scenarios", scenarios.len());
        scenarios
            .par_iter()
            .map(|s| self.run(&s.label, &s.terms, &s.plan))
            .collect()
    }

    /// Simulate the same loan under several extra-payment amounts
    pub fn sweep(&self, terms: &LoanTerms, extras: &[f64], term_policy: TermPolicy) -> Result<Vec<SweepPoint>> {
        let baseline_interest = schedule_for(terms)?.summary().total_interest;

        let results: Vec<Result<StrategyResult>> = extras
            .par_iter()
            .map(|&extra| {
                let plan = RepaymentPlan::new(extra, term_policy)?;
                self.simulator().simulate(terms, &plan)
            })
            .collect();

        results
            .into_iter()
            .map(|result| {
                let strategy = result?;
                let summary = strategy.summary();
                Ok(SweepPoint {
                    extra_annual_payment: strategy.plan.extra_annual_payment,
                    payoff_years: summary.payoff_years,
                    total_interest: summary.total_interest,
                    interest_saved: baseline_interest - summary.total_interest,
                    final_monthly_payment: strategy.rows.last().map(|r| r.monthly_payment).unwrap_or(0.0),
                })
            })
            .collect()
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
