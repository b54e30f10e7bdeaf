//! Running state while walking a schedule month by month

/// Unrounded accumulators carried from one month to the next
#[derive(Debug, Clone)]
pub struct AmortizationState {
    /// Current schedule month (1-indexed, 0 before the first payment)
    pub month: u32,

    /// Outstanding balance; deliberately allowed to drift slightly below zero
    pub balance: f64,

    /// Interest paid so far
    pub cumulative_interest: f64,
}

impl AmortizationState {
    /// Initialize state at loan start
    pub fn new(principal: f64) -> Self {
        Self {
            month: 0,
            balance: principal,
            cumulative_interest: 0.0,
        }
    }

    /// Apply one monthly payment, returning `(interest, principal_portion)`
    pub fn pay(&mut self, payment: f64, monthly_rate: f64) -> (f64, f64) {
        self.month += 1;

        let interest = self.balance * monthly_rate;
        let principal_portion = payment - interest;

        self.balance -= principal_portion;
        self.cumulative_interest += interest;

        (interest, principal_portion)
    }

    /// Balance as shown to users
    pub fn displayed_balance(&self) -> f64 {
        self.balance.max(0.0)
    }
}
