//! Exact-match memoization of schedules and strategy simulations
//!
//! Every calculation is a pure function of its inputs, so repeated requests
//! with the same input tuple (e.g. a UI re-rendering after an unrelated input
//! change) can be answered from memory. Keys are the exact bit patterns of the
//! inputs; failed calculations are never stored.

use std::collections::HashMap;
use std::sync::Arc;

use crate::amortization::{schedule_for, AmortizationSchedule};
use crate::config::EngineSettings;
use crate::error::Result;
use crate::loan::{LoanTerms, RepaymentPlan, TermPolicy};
use crate::strategy::{StrategyResult, StrategySimulator};

/// Default number of entries kept per table before the cache is flushed
pub const DEFAULT_MAX_ENTRIES: usize = 1024;

fn key_bits(value: f64) -> u64 {
    // 0.0 and -0.0 describe the same input
    if value == 0.0 { 0 } else { value.to_bits() }
}

/// Cache key for a monthly schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleKey {
    principal: u64,
    annual_rate: u64,
    term_years: u64,
}

impl From<&LoanTerms> for ScheduleKey {
    fn from(terms: &LoanTerms) -> Self {
        Self {
            principal: key_bits(terms.principal),
            annual_rate: key_bits(terms.annual_rate),
            term_years: key_bits(terms.term_years),
        }
    }
}

/// Cache key for a strategy simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StrategyKey {
    terms: ScheduleKey,
    extra_annual_payment: u64,
    term_policy: TermPolicy,
}

impl StrategyKey {
    pub fn new(terms: &LoanTerms, plan: &RepaymentPlan) -> Self {
        Self {
            terms: ScheduleKey::from(terms),
            extra_annual_payment: key_bits(plan.extra_annual_payment),
            term_policy: plan.term_policy,
        }
    }
}

/// Memoizing front for the amortization engine and strategy simulator
///
/// Scoped to one caller (a session, a request batch); it is not shared
/// between threads.
#[derive(Default)]
pub struct ScheduleCache {
    simulator: StrategySimulator,
    schedules: HashMap<ScheduleKey, Arc<AmortizationSchedule>>,
    strategies: HashMap<StrategyKey, Arc<StrategyResult>>,
    max_entries: Option<usize>,

    /// Statistics
    pub cache_hits: u64,
    pub cache_misses: u64,
}

impl ScheduleCache {
    /// Create a new cache with default engine settings
    pub fn new() -> Self {
        Self::with_settings(EngineSettings::default())
    }

    /// Create a cache whose simulations use the given settings
    pub fn with_settings(settings: EngineSettings) -> Self {
        Self {
            simulator: StrategySimulator::new(settings),
            max_entries: Some(DEFAULT_MAX_ENTRIES),
            ..Default::default()
        }
    }

    /// Limit each table to `max_entries`; a full table is flushed on the next insert
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries.max(1));
        self
    }

    /// Monthly schedule for `terms`, computed at most once
    pub fn schedule(&mut self, terms: &LoanTerms) -> Result<Arc<AmortizationSchedule>> {
        let key = ScheduleKey::from(terms);
        if let Some(hit) = self.schedules.get(&key) {
            self.cache_hits += 1;
            return Ok(Arc::clone(hit));
        }

        self.cache_misses += 1;
        let schedule = Arc::new(schedule_for(terms)?);
        if self.is_full(self.schedules.len()) {
            log::debug!("Schedule cache full ({} entries), flushing", self.schedules.len());
            self.schedules.clear();
        }
        self.schedules.insert(key, Arc::clone(&schedule));
        Ok(schedule)
    }

    /// Strategy simulation for `terms` and `plan`, computed at most once
    pub fn strategy(&mut self, terms: &LoanTerms, plan: &RepaymentPlan) -> Result<Arc<StrategyResult>> {
        let key = StrategyKey::new(terms, plan);
        if let Some(hit) = self.strategies.get(&key) {
            self.cache_hits += 1;
            return Ok(Arc::clone(hit));
        }

        self.cache_misses += 1;
        let result = Arc::new(self.simulator.simulate(terms, plan)?);
        if self.is_full(self.strategies.len()) {
            log::debug!("Strategy cache full ({} entries), flushing", self.strategies.len());
            self.strategies.clear();
        }
        self.strategies.insert(key, Arc::clone(&result));
        Ok(result)
    }

    fn is_full(&self, len: usize) -> bool {
        self.max_entries.map_or(false, |max| len >= max)
    }

    /// Clear all cached data
    pub fn clear(&mut self) {
        self.schedules.clear();
        self.strategies.clear();
        self.cache_hits = 0;
        self.cache_misses = 0;
    }

    /// Get number of cached entries across both tables
    pub fn len(&self) -> usize {
        self.schedules.len() + self.strategies.len()
    }

    /// Check if cache is empty
    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty() && self.strategies.is_empty()
    }

    /// Get cache hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }
}
