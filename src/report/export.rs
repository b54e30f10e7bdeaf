//! CSV export of schedule and strategy rows
//!
//! Columns follow the row field order, amounts use 2-decimal fixed formatting.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::amortization::AmortizationRow;
use crate::error::Result;
use crate::scenario::SweepPoint;
use crate::strategy::StrategyRow;

pub const SCHEDULE_HEADER: [&str; 6] = [
    "month",
    "principal_portion",
    "interest_portion",
    "total_payment",
    "cumulative_interest",
    "remaining_balance",
];

pub const STRATEGY_HEADER: [&str; 9] = [
    "year",
    "monthly_payment",
    "yearly_interest",
    "yearly_principal",
    "extra_payment",
    "total_payment",
    "remaining_debt",
    "cumulative_interest",
    "remaining_term_years",
];

pub const SWEEP_HEADER: [&str; 5] = [
    "extra_annual_payment",
    "payoff_years",
    "total_interest",
    "interest_saved",
    "final_monthly_payment",
];

fn amount(value: f64) -> String {
    // Format the rounded value so residuals like -1e-9 print as 0.00
    format!("{:.2}", crate::amortization::round_cents(value))
}

/// Write monthly schedule rows as CSV
pub fn write_schedule_csv<W: Write>(writer: W, rows: &[AmortizationRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(SCHEDULE_HEADER)?;

    for row in rows {
        wtr.write_record([
            row.month.to_string(),
            amount(row.principal_portion),
            amount(row.interest_portion),
            amount(row.total_payment),
            amount(row.cumulative_interest),
            amount(row.remaining_balance),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write yearly strategy rows as CSV
pub fn write_strategy_csv<W: Write>(writer: W, rows: &[StrategyRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(STRATEGY_HEADER)?;

    for row in rows {
        wtr.write_record([
            row.year.to_string(),
            amount(row.monthly_payment),
            amount(row.yearly_interest),
            amount(row.yearly_principal),
            amount(row.extra_payment),
            amount(row.total_payment),
            amount(row.remaining_debt),
            amount(row.cumulative_interest),
            amount(row.remaining_term_years),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write extra-payment sweep results as CSV
pub fn write_sweep_csv<W: Write>(writer: W, points: &[SweepPoint]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(SWEEP_HEADER)?;

    for point in points {
        wtr.write_record([
            amount(point.extra_annual_payment),
            point.payoff_years.to_string(),
            amount(point.total_interest),
            amount(point.interest_saved),
            amount(point.final_monthly_payment),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write monthly schedule rows to a CSV file
pub fn export_schedule<P: AsRef<Path>>(path: P, rows: &[AmortizationRow]) -> Result<()> {
    write_schedule_csv(File::create(path)?, rows)
}

/// Write yearly strategy rows to a CSV file
pub fn export_strategy<P: AsRef<Path>>(path: P, rows: &[StrategyRow]) -> Result<()> {
    write_strategy_csv(File::create(path)?, rows)
}

pub fn export_sweep<P: AsRef<Path>>(path: P, points: &[SweepPoint]) -> Result<()> {
    write_sweep_csv(File::create(path)?, points)
}
