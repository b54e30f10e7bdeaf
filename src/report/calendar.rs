//! Calendar labels for schedule months

use chrono::{Months, NaiveDate};

/// Maps schedule months onto due dates, one payment per calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentCalendar {
    first_payment: NaiveDate,
}

impl PaymentCalendar {
    pub fn new(first_payment: NaiveDate) -> Self {
        Self { first_payment }
    }

    /// Due date of schedule month `month` (1-indexed)
    ///
    /// Day-of-month is clamped for short months (Jan 31 -> Feb 28/29).
    pub fn due_date(&self, month: u32) -> Option<NaiveDate> {
        self.first_payment
            .checked_add_months(Months::new(month.saturating_sub(1)))
    }

    /// Date of the last payment in simulated year `year`
    pub fn year_end(&self, year: u32) -> Option<NaiveDate> {
        self.due_date(year.saturating_mul(12))
    }

    /// `YYYY-MM` label used in tables
    pub fn label(&self, month: u32) -> String {
        self.due_date(month)
            .map(|d| d.format("%Y-%m").to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}
