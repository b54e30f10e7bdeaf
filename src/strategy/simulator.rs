//! Year-by-year simulation of annual extra payments
//!
//! Each simulated year re-amortizes the outstanding debt over the remaining
//! term, keeps the first twelve months of that schedule, then applies the
//! extra payment and evolves the remaining term according to the plan's
//! [`TermPolicy`].

use crate::amortization::{amortize, annuity_payment, periods_for_payment};
use crate::config::{EngineSettings, ExtraPaymentTiming};
use crate::error::{Result, ScheduleError};
use crate::loan::{LoanTerms, RepaymentPlan, TermPolicy};
use super::rows::{StrategyResult, StrategyRow};

/// Debt below half a cent counts as repaid
pub const SETTLEMENT_TOLERANCE: f64 = 0.005;

const MONTHS_PER_YEAR: usize = 12;

/// Mutable accumulators carried between simulated years
#[derive(Debug, Clone)]
struct StrategyState {
    year: u32,
    remaining_debt: f64,
    remaining_term: f64,
    cumulative_interest: f64,
}

impl StrategyState {
    fn from_terms(terms: &LoanTerms) -> Self {
        Self {
            year: 0,
            remaining_debt: terms.principal,
            remaining_term: terms.term_years,
            cumulative_interest: 0.0,
        }
    }

    fn is_settled(&self) -> bool {
        self.remaining_debt <= SETTLEMENT_TOLERANCE
    }

    fn displayed_debt(&self) -> f64 {
        if self.is_settled() { 0.0 } else { self.remaining_debt }
    }
}

/// Regular payments of one simulated year
struct YearPayments {
    monthly_payment: f64,
    interest: f64,
    principal: f64,
}

/// Strategy simulator
pub struct StrategySimulator {
    settings: EngineSettings,
}

impl StrategySimulator {
    /// Create a new simulator with the given settings
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    /// Run the simulation until the debt is repaid
    pub fn simulate(&self, terms: &LoanTerms, plan: &RepaymentPlan) -> Result<StrategyResult> {
        terms.validate()?;
        plan.validate()?;
        self.settings.validate()?;

        let monthly_rate = terms.monthly_rate();
        let target_payment = annuity_payment(terms.principal, monthly_rate, terms.total_months());
        let max_years = self.settings.max_years(terms.term_years);

        let mut result = StrategyResult::new(*terms, *plan, target_payment);
        let mut state = StrategyState::from_terms(terms);

        while !state.is_settled() {
            if state.year >= max_years {
                log::warn!(
                    "Strategy for {:.2} at {}% not repaid after {} years ({:.2} outstanding)",
                    terms.principal,
                    terms.annual_rate,
                    state.year,
                    state.remaining_debt
                );
                return Err(ScheduleError::NonTerminatingSchedule {
                    years: state.year,
                    remaining_debt: state.remaining_debt,
                });
            }

            let row = self.simulate_year(terms, plan, target_payment, &mut state)?;
            result.add_row(row);
        }

        log::debug!(
            "Strategy {:?} with extra {:.2}: repaid in {} years, interest {:.2}",
            plan.term_policy,
            plan.extra_annual_payment,
            state.year,
            state.cumulative_interest
        );

        Ok(result)
    }

    fn simulate_year(
        &self,
        terms: &LoanTerms,
        plan: &RepaymentPlan,
        target_payment: f64,
        state: &mut StrategyState,
    ) -> Result<StrategyRow> {
        state.year += 1;

        let mut extra_applied = 0.0;
        if self.settings.extra_payment_timing == ExtraPaymentTiming::YearStart {
            extra_applied = plan.extra_annual_payment.min(state.remaining_debt);
            state.remaining_debt -= extra_applied;
        }

        let regular = self.regular_payments(terms, state);
        state.remaining_debt -= regular.principal;

        if self.settings.extra_payment_timing == ExtraPaymentTiming::YearEnd && !state.is_settled() {
            extra_applied = plan.extra_annual_payment.min(state.remaining_debt);
            state.remaining_debt -= extra_applied;
        }

        state.cumulative_interest += regular.interest;
        state.remaining_term = self.next_term(terms, plan, target_payment, state)?;

        Ok(StrategyRow {
            year: state.year,
            monthly_payment: regular.monthly_payment,
            yearly_interest: regular.interest,
            yearly_principal: regular.principal,
            extra_payment: extra_applied,
            total_payment: regular.interest + regular.principal + extra_applied,
            remaining_debt: state.displayed_debt(),
            cumulative_interest: state.cumulative_interest,
            remaining_term_years: state.remaining_term,
        })
    }

    /// Amortize the current debt over the current term and keep the first year
    fn regular_payments(&self, terms: &LoanTerms, state: &StrategyState) -> YearPayments {
        if state.is_settled() {
            return YearPayments { monthly_payment: 0.0, interest: 0.0, principal: 0.0 };
        }

        // Remainders under a year keep their real month count
        let months = terms.with_balance(state.remaining_debt, state.remaining_term).total_months();
        let schedule = amortize(state.remaining_debt, terms.monthly_rate(), months);
        let year = &schedule.rows[..schedule.rows.len().min(MONTHS_PER_YEAR)];

        let interest: f64 = year.iter().map(|r| r.interest_portion).sum();
        let principal: f64 = year.iter().map(|r| r.principal_portion).sum();

        YearPayments {
            monthly_payment: schedule.monthly_payment,
            interest,
            principal: principal.min(state.remaining_debt),
        }
    }

    fn next_term(
        &self,
        terms: &LoanTerms,
        plan: &RepaymentPlan,
        target_payment: f64,
        state: &StrategyState,
    ) -> Result<f64> {
        match plan.term_policy {
            TermPolicy::FixedDecrement => Ok((state.remaining_term - 1.0).max(0.0)),
            TermPolicy::PreservePayment => {
                let debt = state.displayed_debt();
                let months = periods_for_payment(debt, terms.monthly_rate(), target_payment)
                    .map_err(|_| ScheduleError::NonTerminatingSchedule {
                        years: state.year,
                        remaining_debt: debt,
                    })?;
                Ok((months / MONTHS_PER_YEAR as f64).max(self.settings.min_term_years))
            }
        }
    }
}

impl Default for StrategySimulator {
    fn default() -> Self {
        Self::new(EngineSettings::default())
    }
}

/// Simulate annual extra payments with default engine settings
///
/// `adjust_term` selects [`TermPolicy::PreservePayment`]; otherwise the term
/// shrinks by one year per simulated year.
pub fn simulate_strategy(
    principal: f64,
    annual_rate_percent: f64,
    term_years: f64,
    extra_annual_payment: f64,
    adjust_term: bool,
) -> Result<StrategyResult> {
    let terms = LoanTerms::new(principal, annual_rate_percent, term_years)?;
    let plan = RepaymentPlan::new(extra_annual_payment, TermPolicy::from_adjust_term(adjust_term))?;
    StrategySimulator::default().simulate(&terms, &plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::compute_schedule;
    use crate::strategy::aggregate_by_year;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_no_extra_degenerates_to_baseline() {
        let baseline = compute_schedule(2_500_000.0, 3.5, 25.0).unwrap();
        let strategy = simulate_strategy(2_500_000.0, 3.5, 25.0, 0.0, false).unwrap();

        let yearly = aggregate_by_year(&baseline);
        assert_eq!(strategy.payoff_years(), 25);
        assert_eq!(strategy.rows.len(), yearly.len());

        for (row, year) in strategy.rows.iter().zip(&yearly) {
            assert_eq!(row.year, year.year);
            assert_abs_diff_eq!(row.yearly_interest, year.interest, epsilon = 0.01);
            assert_abs_diff_eq!(row.yearly_principal, year.principal, epsilon = 0.01);
            assert_abs_diff_eq!(row.monthly_payment, baseline.monthly_payment, epsilon = 1e-6);
            assert_eq!(row.extra_payment, 0.0);
        }

        let last = strategy.rows.last().unwrap();
        assert_abs_diff_eq!(last.cumulative_interest, 1_254_676.78, epsilon = 0.01);
        assert_eq!(last.remaining_debt, 0.0);
    }

    #[test]
    fn test_fractional_term_matches_baseline() {
        for term in [1.5, 2.5, 10.25] {
            let baseline = compute_schedule(100_000.0, 6.0, term).unwrap();
            let strategy = simulate_strategy(100_000.0, 6.0, term, 0.0, false).unwrap();

            assert_eq!(strategy.rows.len(), aggregate_by_year(&baseline).len());
            let last = strategy.rows.last().unwrap();
            assert_abs_diff_eq!(last.cumulative_interest, baseline.summary().total_interest, epsilon = 0.01);
            assert_eq!(last.remaining_debt, 0.0);
            assert_eq!(last.remaining_term_years, 0.0);
        }

        let strategy = simulate_strategy(100_000.0, 6.0, 2.5, 0.0, false).unwrap();
        assert_abs_diff_eq!(strategy.summary().total_interest, 7_936.76, epsilon = 0.01);
        assert_eq!(strategy.rows[1].remaining_term_years, 0.5);
    }

    #[test]
    fn test_fixed_decrement_with_extra() {
        let result = simulate_strategy(2_500_000.0, 3.5, 25.0, 100_000.0, false).unwrap();

        assert_eq!(result.payoff_years(), 17);
        let first = result.rows[0];
        assert_abs_diff_eq!(first.monthly_payment, 12_515.59, epsilon = 0.01);
        assert_abs_diff_eq!(first.yearly_interest, 86_484.55, epsilon = 0.01);
        assert_abs_diff_eq!(first.yearly_principal, 63_702.52, epsilon = 0.01);
        assert_abs_diff_eq!(first.total_payment, 250_187.07, epsilon = 0.01);
        assert_abs_diff_eq!(first.remaining_debt, 2_336_297.48, epsilon = 0.01);
        assert_eq!(first.remaining_term_years, 24.0);

        // Extra payments lower the re-derived monthly payment
        assert!(result.rows[1].monthly_payment < first.monthly_payment);
        assert_abs_diff_eq!(result.summary().total_interest, 728_863.02, epsilon = 0.01);
    }

    #[test]
    fn test_preserve_payment_shortens_term() {
        let result = simulate_strategy(2_500_000.0, 3.5, 25.0, 100_000.0, true).unwrap();

        assert_eq!(result.payoff_years(), 13);
        assert_abs_diff_eq!(result.rows[0].remaining_term_years, 22.497468, epsilon = 1e-5);
        assert_abs_diff_eq!(result.rows[1].remaining_term_years, 20.117936, epsilon = 1e-5);
        assert_abs_diff_eq!(result.summary().total_interest, 606_104.96, epsilon = 0.01);

        // Whole-month rounding of the term keeps the payment near, not at, the target
        for row in &result.rows[..result.rows.len() - 1] {
            assert!((row.monthly_payment - result.target_monthly_payment).abs() < 0.02 * result.target_monthly_payment);
        }

        let terms: Vec<f64> = result.rows.iter().map(|r| r.remaining_term_years).collect();
        assert!(terms.windows(2).all(|w| w[1] <= w[0]));
        assert_eq!(*terms.last().unwrap(), 1.0);
    }

    #[test]
    fn test_extra_exceeding_debt_emits_single_row() {
        let result = simulate_strategy(100_000.0, 5.0, 10.0, 200_000.0, false).unwrap();

        assert_eq!(result.rows.len(), 1);
        let row = result.rows[0];
        assert_eq!(row.remaining_debt, 0.0);
        assert_abs_diff_eq!(row.yearly_interest, 4_820.42, epsilon = 0.01);
        assert_abs_diff_eq!(row.extra_payment, 92_092.56, epsilon = 0.01);
        assert_abs_diff_eq!(row.yearly_principal + row.extra_payment, 100_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_rate_preserve_payment_uses_linear_math() {
        let result = simulate_strategy(120_000.0, 0.0, 10.0, 12_000.0, true).unwrap();

        let terms: Vec<f64> = result.rows.iter().map(|r| r.remaining_term_years).collect();
        assert_eq!(result.rows.len(), 5);
        for (actual, expected) in terms.iter().zip([8.0, 6.0, 4.0, 2.0, 1.0]) {
            assert_abs_diff_eq!(*actual, expected, epsilon = 1e-9);
        }
        assert!(result.rows.iter().all(|r| r.yearly_interest == 0.0));
        assert_abs_diff_eq!(result.rows[0].monthly_payment, 1_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_year_start_timing_saves_more_interest() {
        let terms = LoanTerms::new(2_500_000.0, 3.5, 25.0).unwrap();
        let plan = RepaymentPlan::new(100_000.0, TermPolicy::FixedDecrement).unwrap();

        let year_end = StrategySimulator::default().simulate(&terms, &plan).unwrap();
        let year_start = StrategySimulator::new(EngineSettings {
            extra_payment_timing: ExtraPaymentTiming::YearStart,
            ..Default::default()
        })
        .simulate(&terms, &plan)
        .unwrap();

        assert_abs_diff_eq!(year_start.rows[0].yearly_interest, 83_025.17, epsilon = 0.01);
        assert_abs_diff_eq!(year_start.summary().total_interest, 684_870.83, epsilon = 0.01);
        assert!(year_start.summary().total_interest < year_end.summary().total_interest);
    }

    #[test]
    fn test_year_start_extra_clearing_debt() {
        let terms = LoanTerms::new(100_000.0, 5.0, 10.0).unwrap();
        let plan = RepaymentPlan::new(200_000.0, TermPolicy::PreservePayment).unwrap();
        let simulator = StrategySimulator::new(EngineSettings {
            extra_payment_timing: ExtraPaymentTiming::YearStart,
            ..Default::default()
        });

        let result = simulator.simulate(&terms, &plan).unwrap();
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0].extra_payment, 100_000.0);
        assert_eq!(result.rows[0].yearly_interest, 0.0);
        assert_eq!(result.rows[0].monthly_payment, 0.0);
        assert_eq!(result.rows[0].remaining_term_years, 1.0);
    }

    #[test]
    fn test_zero_principal_has_no_rows() {
        let result = simulate_strategy(0.0, 3.0, 20.0, 1_000.0, true).unwrap();
        assert!(result.rows.is_empty());
        assert_eq!(result.summary().total_interest, 0.0);
    }

    #[test]
    fn test_iteration_cap_raises_non_terminating() {
        // Term never shrinks below 10 years, so the debt only decays geometrically
        let simulator = StrategySimulator::new(EngineSettings {
            min_term_years: 10.0,
            ..Default::default()
        });
        let terms = LoanTerms::new(100_000.0, 4.0, 10.0).unwrap();
        let plan = RepaymentPlan::new(0.0, TermPolicy::PreservePayment).unwrap();

        let err = simulator.simulate(&terms, &plan).unwrap_err();
        match err {
            ScheduleError::NonTerminatingSchedule { years, remaining_debt } => {
                assert_eq!(years, 20);
                assert!(remaining_debt > 0.0);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(matches!(
            simulate_strategy(100_000.0, 3.0, 10.0, -1.0, false),
            Err(ScheduleError::InvalidInput { ref field, .. }) if field == "extra_annual_payment"
        ));
        assert!(simulate_strategy(100_000.0, 3.0, 0.0, 0.0, false).is_err());
    }

    #[test]
    fn test_idempotent() {
        let a = simulate_strategy(850_000.0, 4.1, 30.0, 25_000.0, true).unwrap();
        let b = simulate_strategy(850_000.0, 4.1, 30.0, 25_000.0, true).unwrap();
        assert_eq!(a, b);
    }
}
