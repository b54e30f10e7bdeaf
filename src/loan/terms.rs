//! Loan inputs: the base terms of a mortgage and the repayment plan layered on top

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// Shortest term the engine accepts, in years
pub const MIN_TERM_YEARS: f64 = 1.0;

/// Longest term the engine accepts, in years
pub const MAX_TERM_YEARS: f64 = 100.0;

/// How the remaining term evolves after each simulated year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TermPolicy {
    /// Term shrinks by exactly one year, extra payments lower the monthly payment
    FixedDecrement,
    /// Term is re-derived so the original monthly payment stays constant
    PreservePayment,
}

impl TermPolicy {
    /// Map the `adjust_term` flag used by callers onto a policy
    pub fn from_adjust_term(adjust_term: bool) -> Self {
        if adjust_term {
            TermPolicy::PreservePayment
        } else {
            TermPolicy::FixedDecrement
        }
    }
}

/// Base terms of a fixed-rate annuity mortgage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Outstanding loan amount in currency units
    pub principal: f64,

    /// Nominal annual rate in percent (3.5 means 3.5%)
    pub annual_rate: f64,

    /// Term in years, fractional terms allowed
    pub term_years: f64,
}

impl LoanTerms {
    /// Create validated loan terms
    pub fn new(principal: f64, annual_rate: f64, term_years: f64) -> Result<Self> {
        let terms = Self { principal, annual_rate, term_years };
        terms.validate()?;
        Ok(terms)
    }

    /// Re-check the terms, e.g. after deserializing them
    pub fn validate(&self) -> Result<()> {
        non_negative("principal", self.principal)?;
        non_negative("annual_rate", self.annual_rate)?;
        if !self.term_years.is_finite() {
            return Err(ScheduleError::invalid("term_years", "must be a finite number"));
        }
        if self.term_years < MIN_TERM_YEARS {
            return Err(ScheduleError::invalid(
                "term_years",
                format!("must be at least {}, got {}", MIN_TERM_YEARS, self.term_years),
            ));
        }
        if self.term_years > MAX_TERM_YEARS {
            return Err(ScheduleError::invalid(
                "term_years",
                format!("must be at most {}, got {}", MAX_TERM_YEARS, self.term_years),
            ));
        }
        Ok(())
    }

    /// Monthly compounding rate as a decimal
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate / 100.0 / 12.0
    }

    /// Number of monthly payments, rounding fractional terms half away from zero
    pub fn total_months(&self) -> u32 {
        ((self.term_years * 12.0).round() as u32).max(1)
    }

    /// Same rate on a different balance and term
    pub fn with_balance(&self, principal: f64, term_years: f64) -> Self {
        Self { principal, annual_rate: self.annual_rate, term_years }
    }
}

/// Loan year (1-indexed) that a schedule month falls in
pub fn loan_year(month: u32) -> u32 {
    month.saturating_sub(1) / 12 + 1
}

/// Extra-payment policy layered over the base terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepaymentPlan {
    /// Lump sum paid once per year on top of the regular payments
    pub extra_annual_payment: f64,

    /// How the remaining term reacts to the extra payments
    pub term_policy: TermPolicy,
}

impl RepaymentPlan {
    pub fn new(extra_annual_payment: f64, term_policy: TermPolicy) -> Result<Self> {
        non_negative("extra_annual_payment", extra_annual_payment)?;
        Ok(Self { extra_annual_payment, term_policy })
    }

    /// Plan with no extra payments: degenerates to the plain annuity schedule
    pub fn baseline() -> Self {
        Self { extra_annual_payment: 0.0, term_policy: TermPolicy::FixedDecrement }
    }

    pub fn validate(&self) -> Result<()> {
        non_negative("extra_annual_payment", self.extra_annual_payment)
    }
}

fn non_negative(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(ScheduleError::invalid(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(ScheduleError::invalid(field, format!("must not be negative, got {}", value)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_terms() {
        let terms = LoanTerms::new(2_500_000.0, 3.5, 25.0).unwrap();
        assert_eq!(terms.total_months(), 300);
        assert!((terms.monthly_rate() - 0.035 / 12.0).abs() < 1e-15);
    }

    #[test]
    fn test_rejects_bad_terms() {
        assert!(matches!(
            LoanTerms::new(-1.0, 3.5, 25.0),
            Err(ScheduleError::InvalidInput { ref field, .. }) if field == "principal"
        ));
        assert!(LoanTerms::new(100_000.0, -0.1, 25.0).is_err());
        assert!(LoanTerms::new(100_000.0, 3.5, 0.5).is_err());
        assert!(LoanTerms::new(f64::NAN, 3.5, 10.0).is_err());
        assert!(LoanTerms::new(100_000.0, 3.5, f64::INFINITY).is_err());
    }

    #[test]
    fn test_term_upper_bound() {
        let terms = LoanTerms::new(1000.0, 3.0, MAX_TERM_YEARS).unwrap();
        assert_eq!(terms.total_months(), 1200);

        assert!(matches!(
            LoanTerms::new(1000.0, 3.0, 100.5),
            Err(ScheduleError::InvalidInput { ref field, .. }) if field == "term_years"
        ));
        assert!(LoanTerms::new(1000.0, 3.0, 1e12).is_err());
    }

    #[test]
    fn test_fractional_term_rounding() {
        // 1.54 years = 18.48 months -> 18, 1.55 years = 18.6 months -> 19
        assert_eq!(LoanTerms::new(1000.0, 1.0, 1.54).unwrap().total_months(), 18);
        assert_eq!(LoanTerms::new(1000.0, 1.0, 1.55).unwrap().total_months(), 19);
        // 1.5 years is exactly 18 months
        assert_eq!(LoanTerms::new(1000.0, 1.0, 1.5).unwrap().total_months(), 18);
    }

    #[test]
    fn test_loan_year_timing() {
        assert_eq!(loan_year(1), 1);
        assert_eq!(loan_year(12), 1);
        assert_eq!(loan_year(13), 2);
        assert_eq!(loan_year(300), 25);
    }

    #[test]
    fn test_repayment_plan() {
        assert!(RepaymentPlan::new(-5.0, TermPolicy::FixedDecrement).is_err());
        let plan = RepaymentPlan::new(50_000.0, TermPolicy::from_adjust_term(true)).unwrap();
        assert_eq!(plan.term_policy, TermPolicy::PreservePayment);
        assert_eq!(RepaymentPlan::baseline().extra_annual_payment, 0.0);
    }
}
