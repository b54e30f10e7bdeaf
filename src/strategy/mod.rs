//! Annual extra-payment strategy simulation

mod rows;
mod simulator;
mod comparison;
#[cfg(test)]
mod props;

pub use rows::{StrategyResult, StrategyRow, StrategySummary};
pub use simulator::{simulate_strategy, StrategySimulator, SETTLEMENT_TOLERANCE};
pub use comparison::{aggregate_by_year, StrategyComparison, YearlyTotals};
