//! Output structures for year-by-year strategy simulations

use serde::{Deserialize, Serialize};

use crate::amortization::round_cents;
use crate::loan::{LoanTerms, RepaymentPlan};

/// A single simulated year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyRow {
    /// Simulated year (1-indexed)
    pub year: u32,

    /// Regular monthly payment in effect during the year
    pub monthly_payment: f64,

    pub yearly_interest: f64,

    /// Principal retired by the twelve regular payments
    pub yearly_principal: f64,

    /// Extra payment actually applied, capped at the outstanding debt
    pub extra_payment: f64,

    pub total_payment: f64,

    /// Debt after the year, floored at zero
    pub remaining_debt: f64,

    pub cumulative_interest: f64,

    /// Remaining term estimate after the year, in years
    pub remaining_term_years: f64,
}

impl StrategyRow {
    /// Copy of the row with every amount rounded to cents
    pub fn rounded(&self) -> Self {
        Self {
            year: self.year,
            monthly_payment: round_cents(self.monthly_payment),
            yearly_interest: round_cents(self.yearly_interest),
            yearly_principal: round_cents(self.yearly_principal),
            extra_payment: round_cents(self.extra_payment),
            total_payment: round_cents(self.total_payment),
            remaining_debt: round_cents(self.remaining_debt),
            cumulative_interest: round_cents(self.cumulative_interest),
            remaining_term_years: round_cents(self.remaining_term_years),
        }
    }
}

/// Complete strategy simulation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyResult {
    /// Terms the simulation started from
    pub terms: LoanTerms,

    pub plan: RepaymentPlan,

    /// Annuity payment of the original loan; held constant under `PreservePayment`
    pub target_monthly_payment: f64,

    /// Yearly rows in order
    pub rows: Vec<StrategyRow>,
}

impl StrategyResult {
    pub fn new(terms: LoanTerms, plan: RepaymentPlan, target_monthly_payment: f64) -> Self {
        Self {
            terms,
            plan,
            target_monthly_payment,
            rows: Vec::new(),
        }
    }

    /// Add a yearly row
    pub fn add_row(&mut self, row: StrategyRow) {
        self.rows.push(row);
    }

    /// Years until the debt is repaid
    pub fn payoff_years(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Get summary statistics
    pub fn summary(&self) -> StrategySummary {
        let total_extra: f64 = self.rows.iter().map(|r| r.extra_payment).sum();
        let total_paid: f64 = self.rows.iter().map(|r| r.total_payment).sum();
        let total_interest = self.rows.last().map(|r| r.cumulative_interest).unwrap_or(0.0);

        StrategySummary {
            payoff_years: self.payoff_years(),
            target_monthly_payment: self.target_monthly_payment,
            total_paid,
            total_interest,
            total_extra,
            final_debt: self.rows.last().map(|r| r.remaining_debt).unwrap_or(0.0),
        }
    }
}

/// Summary statistics for a strategy simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategySummary {
    pub payoff_years: u32,
    pub target_monthly_payment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
    pub total_extra: f64,
    pub final_debt: f64,
}
