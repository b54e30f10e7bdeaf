//! Month-by-month annuity amortization engine

mod state;
mod engine;
mod schedule;

pub use state::AmortizationState;
pub use engine::{annuity_payment, compute_schedule, periods_for_payment, schedule_for};
pub(crate) use engine::amortize;
pub use schedule::{AmortizationRow, AmortizationSchedule, ScheduleSummary, round_cents};
