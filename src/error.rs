//! Error type shared by the engine, loaders and exporters

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Invalid input: {field} - {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Schedule does not terminate: debt of {remaining_debt:.2} still outstanding after {years} simulated years")]
    NonTerminatingSchedule { years: u32, remaining_debt: f64 },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScheduleError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        ScheduleError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ScheduleError::invalid("term_years", "must be at least 1");
        assert_eq!(err.to_string(), "Invalid input: term_years - must be at least 1");

        let err = ScheduleError::NonTerminatingSchedule { years: 50, remaining_debt: 1234.567 };
        assert!(err.to_string().contains("1234.57"));
        assert!(err.to_string().contains("50 simulated years"));
    }
}
