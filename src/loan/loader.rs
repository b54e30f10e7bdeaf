//! Load batches of loan scenarios from CSV
//!
//! Expected columns: `label,principal,annual_rate,term_years,extra_annual_payment,adjust_term`.
//! `label`, `extra_annual_payment` and `adjust_term` may be left empty.

use super::{LoanTerms, RepaymentPlan, TermPolicy};
use crate::error::{Result, ScheduleError};
use csv::Reader;
use serde::Serialize;
use std::path::Path;

/// Default file name for scenario batches
pub const DEFAULT_SCENARIO_FILE: &str = "loan_scenarios.csv";

/// Raw CSV row matching the scenario file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(default)]
    label: Option<String>,
    principal: f64,
    annual_rate: f64,
    term_years: f64,
    #[serde(default)]
    extra_annual_payment: Option<f64>,
    #[serde(default)]
    adjust_term: Option<String>,
}

impl CsvRow {
    fn into_scenario(self, line: usize) -> Result<LoanScenario> {
        let term_policy = match self.adjust_term.as_deref().map(str::trim) {
            None | Some("") => TermPolicy::FixedDecrement,
            Some(flag) => match flag.to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => TermPolicy::PreservePayment,
                "false" | "no" | "0" => TermPolicy::FixedDecrement,
                other => {
                    return Err(ScheduleError::invalid(
                        "adjust_term",
                        format!("unknown flag '{}' on line {}", other, line),
                    ))
                }
            },
        };

        let label = self
            .label
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| format!("scenario-{}", line));

        Ok(LoanScenario {
            label,
            terms: LoanTerms::new(self.principal, self.annual_rate, self.term_years)?,
            plan: RepaymentPlan::new(self.extra_annual_payment.unwrap_or(0.0), term_policy)?,
        })
    }
}

/// One named combination of loan terms and repayment plan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanScenario {
    pub label: String,
    pub terms: LoanTerms,
    pub plan: RepaymentPlan,
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<LoanScenario>> {
    let reader = Reader::from_path(path)?;
    collect_scenarios(reader)
}

/// Load scenarios from any reader (e.g., string buffer, stdin)
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<LoanScenario>> {
    collect_scenarios(Reader::from_reader(reader))
}

fn collect_scenarios<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<LoanScenario>> {
    let mut scenarios = Vec::new();

    for (idx, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        // Line 1 is the header
        scenarios.push(row.into_scenario(idx + 2)?);
    }

    log::debug!("Loaded {} loan scenarios", scenarios.len());
    Ok(scenarios)
}
