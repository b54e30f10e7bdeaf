//! Mortgage Planner - amortization schedules and extra-payment strategies
//!
//! This library provides:
//! - Month-by-month annuity schedules for fixed-rate mortgages
//! - Year-by-year simulation of annual extra payments, with or without
//!   shortening the term to keep the monthly payment constant
//! - Baseline vs. strategy comparison and extra-payment sweeps
//! - Memoization of repeated calculations
//! - CSV import of loan scenarios and CSV export of schedules

pub mod error;
pub mod config;
pub mod loan;
pub mod amortization;
pub mod strategy;
pub mod cache;
pub mod scenario;
pub mod report;

// Re-export commonly used types
pub use error::{Result, ScheduleError};
pub use loan::{LoanTerms, RepaymentPlan, TermPolicy};
pub use amortization::{compute_schedule, AmortizationRow, AmortizationSchedule};
pub use strategy::{simulate_strategy, StrategyComparison, StrategyResult, StrategyRow, StrategySimulator};
pub use cache::ScheduleCache;
pub use scenario::ScenarioRunner;
