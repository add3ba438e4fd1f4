//! Pluggable fault injection for the mock mutation actions.
//!
//! Handlers never roll dice themselves: they ask the [`FaultPolicy`] held in
//! application state whether a given site should fail. Production wiring
//! uses [`RandomFaults`]; tests use [`NoFaults`] or [`ScriptedFaults`].

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use rand::Rng;

/// A point in a mock action where a simulated failure can occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultSite {
    /// A bulk delete loses its first id.
    Delete,
    /// One accepted import row is rejected.
    ImportRow,
    /// The external reporting system is unavailable.
    Report,
}

pub trait FaultPolicy: Send + Sync {
    fn should_fail(&self, site: FaultSite) -> bool;
}

/// Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFaults;

impl FaultPolicy for NoFaults {
    fn should_fail(&self, _site: FaultSite) -> bool {
        false
    }
}

/// Failure probability per site, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaultRates {
    pub delete: f64,
    pub import_row: f64,
    pub report: f64,
}

impl Default for FaultRates {
    fn default() -> Self {
        Self {
            delete: 0.05,
            import_row: 0.05,
            report: 0.02,
        }
    }
}

impl FaultRates {
    pub fn rate(&self, site: FaultSite) -> f64 {
        match site {
            FaultSite::Delete => self.delete,
            FaultSite::ImportRow => self.import_row,
            FaultSite::Report => self.report,
        }
    }
}

/// Rolls the thread RNG against a fixed rate per site.
#[derive(Debug, Clone, Copy)]
pub struct RandomFaults {
    rates: FaultRates,
}

impl RandomFaults {
    /// Rates outside `[0, 1]` are clamped; NaN counts as 0.
    pub fn new(rates: FaultRates) -> Self {
        let clamp = |p: f64| if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        Self {
            rates: FaultRates {
                delete: clamp(rates.delete),
                import_row: clamp(rates.import_row),
                report: clamp(rates.report),
            },
        }
    }

    pub fn rates(&self) -> FaultRates {
        self.rates
    }
}

impl Default for RandomFaults {
    fn default() -> Self {
        Self::new(FaultRates::default())
    }
}

impl FaultPolicy for RandomFaults {
    fn should_fail(&self, site: FaultSite) -> bool {
        rand::rng().random_bool(self.rates.rate(site))
    }
}

/// Replays queued outcomes per site, then reports no fault once a queue is
/// exhausted.
#[derive(Debug, Default)]
pub struct ScriptedFaults {
    queues: Mutex<HashMap<FaultSite, VecDeque<bool>>>,
}

impl ScriptedFaults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `outcomes` for `site` (builder style).
    pub fn with(self, site: FaultSite, outcomes: impl IntoIterator<Item = bool>) -> Self {
        self.push(site, outcomes);
        self
    }

    pub fn push(&self, site: FaultSite, outcomes: impl IntoIterator<Item = bool>) {
        let mut queues = self.queues.lock().unwrap_or_else(PoisonError::into_inner);
        queues.entry(site).or_default().extend(outcomes);
    }

    /// Outcomes still queued for `site`.
    pub fn remaining(&self, site: FaultSite) -> usize {
        let queues = self.queues.lock().unwrap_or_else(PoisonError::into_inner);
        queues.get(&site).map_or(0, VecDeque::len)
    }
}

impl FaultPolicy for ScriptedFaults {
    fn should_fail(&self, site: FaultSite) -> bool {
        let mut queues = self.queues.lock().unwrap_or_else(PoisonError::into_inner);
        queues
            .get_mut(&site)
            .and_then(VecDeque::pop_front)
            .unwrap_or(false)
    }
}
