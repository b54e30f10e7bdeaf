//! Loan inputs and scenario loading

mod terms;
pub mod loader;

pub use terms::{
    LoanTerms, RepaymentPlan, TermPolicy, MAX_TERM_YEARS, MIN_TERM_YEARS, loan_year,
};
pub use loader::{LoanScenario, load_scenarios, load_scenarios_from_reader};
