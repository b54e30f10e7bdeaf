//! Presentation of schedules: CSV export, console tables and calendar labels

mod calendar;
pub mod export;
pub mod table;

pub use calendar::PaymentCalendar;
pub use export::{
    export_schedule, export_strategy, export_sweep, write_schedule_csv, write_strategy_csv,
    write_sweep_csv,
};
