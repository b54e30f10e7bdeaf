//! Yearly roll-ups of monthly schedules and baseline-vs-strategy comparison

use serde::{Deserialize, Serialize};

use crate::amortization::AmortizationSchedule;
use crate::loan::loan_year;
use super::rows::StrategyResult;

/// Monthly schedule rows summed over one loan year
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearlyTotals {
    pub year: u32,
    pub interest: f64,
    pub principal: f64,
    pub total_payment: f64,
    pub cumulative_interest: f64,
    pub remaining_balance: f64,
}

/// Aggregate a monthly schedule into loan years
///
/// A trailing partial year (fractional terms) gets its own entry.
pub fn aggregate_by_year(schedule: &AmortizationSchedule) -> Vec<YearlyTotals> {
    let mut years: Vec<YearlyTotals> = Vec::new();

    for row in &schedule.rows {
        let year = loan_year(row.month);
        if years.last().map(|y| y.year) != Some(year) {
            years.push(YearlyTotals { year, ..Default::default() });
        }
        if let Some(agg) = years.last_mut() {
            agg.interest += row.interest_portion;
            agg.principal += row.principal_portion;
            agg.total_payment += row.total_payment;
            agg.cumulative_interest = row.cumulative_interest;
            agg.remaining_balance = row.remaining_balance;
        }
    }

    years
}

/// What a repayment strategy changes relative to the plain annuity schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub baseline_months: u32,
    pub baseline_interest: f64,
    pub baseline_monthly_payment: f64,
    pub strategy_years: u32,
    pub strategy_interest: f64,
    pub total_extra_paid: f64,
    pub interest_saved: f64,
    /// Baseline term minus strategy payoff, in years
    pub years_saved: f64,
}

impl StrategyComparison {
    pub fn between(baseline: &AmortizationSchedule, strategy: &StrategyResult) -> Self {
        let base = baseline.summary();
        let strat = strategy.summary();

        Self {
            baseline_months: base.total_months,
            baseline_interest: base.total_interest,
            baseline_monthly_payment: base.monthly_payment,
            strategy_years: strat.payoff_years,
            strategy_interest: strat.total_interest,
            total_extra_paid: strat.total_extra,
            interest_saved: base.total_interest - strat.total_interest,
            years_saved: base.total_months as f64 / 12.0 - strat.payoff_years as f64,
        }
    }
}
