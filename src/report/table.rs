//! Fixed-width console tables

use std::io::{self, Write};

use crate::amortization::AmortizationSchedule;
use crate::scenario::SweepPoint;
use crate::strategy::{StrategyComparison, StrategyResult};
use super::PaymentCalendar;

/// Write the monthly schedule; `limit` caps the number of rows printed
pub fn write_schedule_table<W: Write>(
    out: &mut W,
    schedule: &AmortizationSchedule,
    calendar: Option<&PaymentCalendar>,
    limit: Option<usize>,
) -> io::Result<()> {
    writeln!(out, "{:>5} {:>8} {:>14} {:>14} {:>14} {:>16} {:>16}",
        "Month", "Due", "Principal", "Interest", "Payment", "Cum. Interest", "Balance")?;
    writeln!(out, "{}", "-".repeat(93))?;

    let shown = limit.unwrap_or(schedule.rows.len()).min(schedule.rows.len());
    for row in schedule.rows.iter().take(shown) {
        let row = row.rounded();
        let due = calendar.map(|c| c.label(row.month)).unwrap_or_else(|| "-".to_string());
        writeln!(out, "{:>5} {:>8} {:>14.2} {:>14.2} {:>14.2} {:>16.2} {:>16.2}",
            row.month,
            due,
            row.principal_portion,
            row.interest_portion,
            row.total_payment,
            row.cumulative_interest,
            row.remaining_balance,
        )?;
    }

    if schedule.rows.len() > shown {
        writeln!(out, "... ({} more months)", schedule.rows.len() - shown)?;
    }

    let summary = schedule.summary();
    writeln!(out)?;
    writeln!(out, "Monthly payment: {:.2}", summary.monthly_payment)?;
    writeln!(out, "Total interest:  {:.2}", summary.total_interest)?;
    writeln!(out, "Total paid:      {:.2}", summary.total_paid)?;
    Ok(())
}

/// Write the yearly strategy ledger
pub fn write_strategy_table<W: Write>(
    out: &mut W,
    result: &StrategyResult,
    calendar: Option<&PaymentCalendar>,
) -> io::Result<()> {
    writeln!(out, "{:>4} {:>8} {:>12} {:>14} {:>14} {:>12} {:>14} {:>16} {:>16} {:>7}",
        "Year", "Ends", "Monthly", "Interest", "Principal", "Extra", "Total", "Debt", "Cum. Interest", "Term")?;
    writeln!(out, "{}", "-".repeat(128))?;

    for row in &result.rows {
        let row = row.rounded();
        let ends = calendar
            .and_then(|c| c.year_end(row.year))
            .map(|d| d.format("%Y-%m").to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(out, "{:>4} {:>8} {:>12.2} {:>14.2} {:>14.2} {:>12.2} {:>14.2} {:>16.2} {:>16.2} {:>7.2}",
            row.year,
            ends,
            row.monthly_payment,
            row.yearly_interest,
            row.yearly_principal,
            row.extra_payment,
            row.total_payment,
            row.remaining_debt,
            row.cumulative_interest,
            row.remaining_term_years,
        )?;
    }

    let summary = result.summary();
    writeln!(out)?;
    writeln!(out, "Target monthly payment: {:.2}", summary.target_monthly_payment)?;
    writeln!(out, "Repaid after:           {} years", summary.payoff_years)?;
    writeln!(out, "Total interest:         {:.2}", summary.total_interest)?;
    writeln!(out, "Total extra payments:   {:.2}", summary.total_extra)?;
    Ok(())
}

/// Write the baseline vs. strategy comparison as aligned label/value lines
pub fn write_comparison<W: Write>(out: &mut W, cmp: &StrategyComparison) -> io::Result<()> {
    writeln!(out, "{:<24} {:>16} {:>16}", "", "Baseline", "Strategy")?;
    writeln!(out, "{:<24} {:>16} {:>16}", "Term (years)",
        format!("{:.2}", cmp.baseline_months as f64 / 12.0), cmp.strategy_years)?;
    writeln!(out, "{:<24} {:>16.2} {:>16.2}", "Total interest", cmp.baseline_interest, cmp.strategy_interest)?;
    writeln!(out, "{:<24} {:>16.2} {:>16.2}", "Extra payments", 0.0, cmp.total_extra_paid)?;
    writeln!(out)?;
    writeln!(out, "Interest saved: {:.2}", cmp.interest_saved)?;
    writeln!(out, "Years saved:    {:.2}", cmp.years_saved)?;
    Ok(())
}

/// Write one line per swept extra-payment amount
pub fn write_sweep_table<W: Write>(out: &mut W, points: &[SweepPoint]) -> io::Result<()> {
    writeln!(out, "{:>14} {:>6} {:>16} {:>16} {:>14}",
        "Extra/year", "Years", "Total interest", "Interest saved", "Last monthly")?;
    writeln!(out, "{}", "-".repeat(70))?;
    for p in points {
        writeln!(out, "{:>14.2} {:>6} {:>16.2} {:>16.2} {:>14.2}",
            p.extra_annual_payment, p.payoff_years, p.total_interest, p.interest_saved, p.final_monthly_payment)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::compute_schedule;
    use crate::strategy::simulate_strategy;
    use chrono::NaiveDate;

    #[test]
    fn test_schedule_table_truncates() {
        let schedule = compute_schedule(2_500_000.0, 3.5, 25.0).unwrap();
        let calendar = PaymentCalendar::new(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());

        let mut out = Vec::new();
        write_schedule_table(&mut out, &schedule, Some(&calendar), Some(24)).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("2025-03"));
        assert!(text.contains("12515.59"));
        assert!(text.contains("... (276 more months)"));
    }

    #[test]
    fn test_strategy_table_and_comparison() {
        let baseline = compute_schedule(2_500_000.0, 3.5, 25.0).unwrap();
        let result = simulate_strategy(2_500_000.0, 3.5, 25.0, 100_000.0, true).unwrap();

        let mut out = Vec::new();
        write_strategy_table(&mut out, &result, None).unwrap();
        write_comparison(&mut out, &StrategyComparison::between(&baseline, &result)).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Repaid after:           13 years"));
        assert!(text.contains("Years saved:    12.00"));
    }

    #[test]
    fn test_sweep_table() {
        let points = [SweepPoint {
            extra_annual_payment: 100_000.0,
            payoff_years: 13,
            total_interest: 606_104.96,
            interest_saved: 648_571.82,
            final_monthly_payment: 12_515.59,
        }];

        let mut out = Vec::new();
        write_sweep_table(&mut out, &points).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("100000.00"));
        assert!(text.contains("648571.82"));
    }
}
