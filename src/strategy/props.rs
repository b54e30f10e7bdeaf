//! Property-based tests for the amortization engine and strategy simulator.

use proptest::prelude::*;

use super::{aggregate_by_year, simulate_strategy};
use crate::amortization::compute_schedule;
use crate::loan::MIN_TERM_YEARS;

/// Loan amounts from 1,000.00 to 5,000,000.00 in whole cents.
fn principal() -> impl Strategy<Value = f64> {
    (100_000u64..500_000_000u64).prop_map(|cents| cents as f64 / 100.0)
}

/// Annual rates from 0.01% to 15.00%.
fn positive_rate() -> impl Strategy<Value = f64> {
    (1u32..1_500u32).prop_map(|bp| bp as f64 / 100.0)
}

/// Terms from 1 to 50 years in whole months, so most are fractional years.
fn term_years() -> impl Strategy<Value = f64> {
    (12u32..=600u32).prop_map(|months| f64::from(months) / 12.0)
}

fn extra_payment() -> impl Strategy<Value = f64> {
    (0u32..500_000u32).prop_map(f64::from)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The schedule retires the whole principal and nothing more.
    #[test]
    fn prop_schedule_retires_principal(
        principal in principal(),
        rate in prop_oneof![Just(0.0), positive_rate()],
        term in term_years(),
    ) {
        let schedule = compute_schedule(principal, rate, term).unwrap();
        let summary = schedule.summary();

        prop_assert_eq!(schedule.len() as f64, (term * 12.0).round());
        prop_assert!(summary.final_balance.abs() <= 0.01, "final balance {}", summary.final_balance);
        prop_assert!((summary.total_principal - principal).abs() <= 0.01);
    }

    /// Cumulative interest never decreases and tracks the running sum.
    #[test]
    fn prop_cumulative_interest_is_running_sum(
        principal in principal(),
        rate in positive_rate(),
        term in term_years(),
    ) {
        let schedule = compute_schedule(principal, rate, term).unwrap();

        let mut running = 0.0;
        let mut previous = 0.0;
        for row in &schedule.rows {
            running += row.interest_portion;
            prop_assert!(row.cumulative_interest >= previous);
            prop_assert!((row.cumulative_interest - running).abs() <= 1e-6);
            previous = row.cumulative_interest;
        }
    }

    /// With no extra payment and a fixed decrement the strategy is the baseline.
    #[test]
    fn prop_no_extra_matches_baseline(
        principal in principal(),
        rate in positive_rate(),
        term in term_years(),
    ) {
        let baseline = compute_schedule(principal, rate, term).unwrap();
        let strategy = simulate_strategy(principal, rate, term, 0.0, false).unwrap();
        let yearly = aggregate_by_year(&baseline);

        prop_assert_eq!(strategy.rows.len(), yearly.len());
        let last = strategy.rows.last().unwrap();
        let baseline_interest = baseline.summary().total_interest;
        prop_assert!((last.cumulative_interest - baseline_interest).abs() <= 0.01);
        prop_assert_eq!(last.remaining_debt, 0.0);
        prop_assert_eq!(last.remaining_term_years, 0.0);
    }

    /// Payment-preserving strategies terminate with a shrinking, bounded term.
    #[test]
    fn prop_preserve_payment_terminates(
        principal in principal(),
        rate in positive_rate(),
        term in term_years(),
        extra in extra_payment(),
    ) {
        let result = simulate_strategy(principal, rate, term, extra, true).unwrap();

        prop_assert!(!result.rows.is_empty());
        prop_assert!(result.rows.len() as f64 <= (term * 2.0).ceil());
        prop_assert_eq!(result.rows.last().unwrap().remaining_debt, 0.0);

        for pair in result.rows.windows(2) {
            prop_assert!(pair[1].remaining_term_years <= pair[0].remaining_term_years);
            prop_assert!(pair[1].remaining_debt <= pair[0].remaining_debt);
        }
        for row in &result.rows {
            prop_assert!(row.remaining_term_years >= MIN_TERM_YEARS);
        }
    }

    /// Identical inputs give identical outputs.
    #[test]
    fn prop_simulation_is_deterministic(
        principal in principal(),
        rate in positive_rate(),
        term in term_years(),
        extra in extra_payment(),
        adjust in any::<bool>(),
    ) {
        let a = simulate_strategy(principal, rate, term, extra, adjust).unwrap();
        let b = simulate_strategy(principal, rate, term, extra, adjust).unwrap();
        prop_assert_eq!(a, b);
    }
}
