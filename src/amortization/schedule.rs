//! Output structures for monthly amortization schedules

use serde::{Deserialize, Serialize};

/// Round an amount to whole cents for presentation
pub fn round_cents(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    // Avoid printing "-0.00" for tiny negative residuals
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// A single month of an annuity schedule
///
/// Values are kept unrounded; use [`AmortizationRow::rounded`] for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// Schedule month (1-indexed)
    pub month: u32,
    pub principal_portion: f64,
    pub interest_portion: f64,
    pub total_payment: f64,
    pub cumulative_interest: f64,
    /// Balance after this month's payment, floored at zero
    pub remaining_balance: f64,
}

impl AmortizationRow {
    /// Copy of the row with every amount rounded to cents
    pub fn rounded(&self) -> Self {
        Self {
            month: self.month,
            principal_portion: round_cents(self.principal_portion),
            interest_portion: round_cents(self.interest_portion),
            total_payment: round_cents(self.total_payment),
            cumulative_interest: round_cents(self.cumulative_interest),
            remaining_balance: round_cents(self.remaining_balance),
        }
    }
}

/// Complete month-by-month schedule for one set of loan terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    /// Fixed monthly payment for the whole term
    pub monthly_payment: f64,

    /// Monthly rows in payment order
    pub rows: Vec<AmortizationRow>,
}

impl AmortizationSchedule {
    pub fn new(monthly_payment: f64) -> Self {
        Self { monthly_payment, rows: Vec::new() }
    }

    /// Add a monthly row
    pub fn add_row(&mut self, row: AmortizationRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ScheduleSummary {
        let total_principal: f64 = self.rows.iter().map(|r| r.principal_portion).sum();
        let total_interest = self.rows.last().map(|r| r.cumulative_interest).unwrap_or(0.0);
        let final_balance = self.rows.last().map(|r| r.remaining_balance).unwrap_or(0.0);

        ScheduleSummary {
            total_months: self.rows.len() as u32,
            monthly_payment: self.monthly_payment,
            total_paid: total_principal + total_interest,
            total_principal,
            total_interest,
            final_balance,
        }
    }
}

/// Summary statistics for a schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub total_months: u32,
    pub monthly_payment: f64,
    pub total_paid: f64,
    pub total_principal: f64,
    pub total_interest: f64,
    pub final_balance: f64,
}
