//! Fixed-payment annuity amortization

use crate::error::{Result, ScheduleError};
use crate::loan::LoanTerms;
use super::schedule::{AmortizationRow, AmortizationSchedule};
use super::state::AmortizationState;

/// Level monthly payment that retires `principal` over `months` payments
///
/// A zero rate falls back to straight-line repayment, where the annuity
/// formula would be 0/0.
pub fn annuity_payment(principal: f64, monthly_rate: f64, months: u32) -> f64 {
    if months == 0 {
        return principal;
    }
    if monthly_rate == 0.0 {
        return principal / months as f64;
    }
    principal * monthly_rate / (1.0 - (1.0 + monthly_rate).powf(-f64::from(months)))
}

/// Number of monthly payments of `payment` needed to retire `balance`
///
/// Inverse of [`annuity_payment`]: `n = -ln(1 - r*B/P) / ln(1 + r)`.
/// The result is fractional; callers decide how to round it.
pub fn periods_for_payment(balance: f64, monthly_rate: f64, payment: f64) -> Result<f64> {
    if balance <= 0.0 {
        return Ok(0.0);
    }
    if payment <= 0.0 {
        return Err(ScheduleError::NonTerminatingSchedule { years: 0, remaining_debt: balance });
    }
    if monthly_rate == 0.0 {
        return Ok(balance / payment);
    }

    let coverage = monthly_rate * balance / payment;
    if coverage >= 1.0 {
        // Payment never exceeds the interest accruing on the balance
        return Err(ScheduleError::NonTerminatingSchedule { years: 0, remaining_debt: balance });
    }

    Ok(-(1.0 - coverage).ln() / (1.0 + monthly_rate).ln())
}

/// Compute the month-by-month schedule for validated loan terms
pub fn schedule_for(terms: &LoanTerms) -> Result<AmortizationSchedule> {
    terms.validate()?;

    let schedule = amortize(terms.principal, terms.monthly_rate(), terms.total_months());

    log::debug!(
        "Amortized {:.2} at {}% over {} months: payment {:.2}",
        terms.principal,
        terms.annual_rate,
        schedule.len(),
        schedule.monthly_payment
    );

    Ok(schedule)
}

/// Annuity schedule over an exact number of months, without input checks
///
/// The strategy simulator re-amortizes remainders shorter than the minimum
/// loan term through this path.
pub(crate) fn amortize(principal: f64, monthly_rate: f64, total_months: u32) -> AmortizationSchedule {
    let payment = annuity_payment(principal, monthly_rate, total_months);

    let mut schedule = AmortizationSchedule::new(payment);
    let mut state = AmortizationState::new(principal);

    for _month in 1..=total_months {
        let (interest, principal_portion) = state.pay(payment, monthly_rate);

        schedule.add_row(AmortizationRow {
            month: state.month,
            principal_portion,
            interest_portion: interest,
            total_payment: payment,
            cumulative_interest: state.cumulative_interest,
            remaining_balance: state.displayed_balance(),
        });
    }

    schedule
}

/// Compute the month-by-month annuity schedule
///
/// `annual_rate_percent` is a percentage (3.5 means 3.5%). Fractional terms
/// are rounded to the nearest whole month.
pub fn compute_schedule(
    principal: f64,
    annual_rate_percent: f64,
    term_years: f64,
) -> Result<AmortizationSchedule> {
    let terms = LoanTerms::new(principal, annual_rate_percent, term_years)?;
    schedule_for(&terms)
}
