//! Planner settings: engine behaviour knobs and default loan inputs
//!
//! Settings are plain values with in-memory defaults; a JSON file may override
//! any subset of them.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, ScheduleError};
use crate::loan::MIN_TERM_YEARS;

/// Default settings file looked up by the CLI
pub const DEFAULT_SETTINGS_PATH: &str = "mortgage_planner.json";

/// When the annual extra payment is credited against the debt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtraPaymentTiming {
    /// After the year's twelve regular payments
    YearEnd,
    /// Before the year's interest starts accruing
    YearStart,
}

/// Settings that shape how strategies are simulated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Lower bound for the remaining term between simulated years
    pub min_term_years: f64,

    /// Simulation gives up after `ceil(term_years * factor)` years
    pub iteration_cap_factor: f64,

    pub extra_payment_timing: ExtraPaymentTiming,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            min_term_years: MIN_TERM_YEARS,
            iteration_cap_factor: 2.0,
            extra_payment_timing: ExtraPaymentTiming::YearEnd,
        }
    }
}

impl EngineSettings {
    pub fn validate(&self) -> Result<()> {
        if !self.min_term_years.is_finite() || self.min_term_years < MIN_TERM_YEARS {
            return Err(ScheduleError::invalid(
                "min_term_years",
                format!("must be at least {}", MIN_TERM_YEARS),
            ));
        }
        if !self.iteration_cap_factor.is_finite() || self.iteration_cap_factor < 1.0 {
            return Err(ScheduleError::invalid("iteration_cap_factor", "must be at least 1"));
        }
        Ok(())
    }

    /// Maximum number of simulated years for a loan of `term_years`
    pub fn max_years(&self, term_years: f64) -> u32 {
        (term_years * self.iteration_cap_factor).ceil().max(1.0) as u32
    }
}

/// Loan inputs used when the caller does not supply them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanDefaults {
    pub principal: f64,
    pub annual_rate: f64,
    pub term_years: f64,
    pub extra_annual_payment: f64,
}

impl Default for LoanDefaults {
    fn default() -> Self {
        Self {
            principal: 2_500_000.0,
            annual_rate: 3.5,
            term_years: 25.0,
            extra_annual_payment: 0.0,
        }
    }
}

/// Container for all planner settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSettings {
    pub engine: EngineSettings,
    pub defaults: LoanDefaults,
}

impl PlannerSettings {
    /// Load settings from a JSON file; missing keys keep their defaults
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let settings: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        settings.engine.validate()?;
        log::info!("Loaded planner settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` if given, else from the default file if present, else defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_json_path(p),
            None => {
                let default_path = Path::new(DEFAULT_SETTINGS_PATH);
                if default_path.exists() {
                    Self::from_json_path(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
