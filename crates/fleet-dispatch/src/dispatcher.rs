//! `Dispatcher` — the per-tick dispatch phase.

use fleet_agent::FleetStore;
use fleet_core::{SimRng, Tick};
use tracing::debug;

use crate::{DriverSelector, Transition, advance_driver};

/// Result of one dispatch phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The tick is not a multiple of the dispatch interval.
    NotEligible,
    /// The selector returned no driver (empty fleet).
    NoDriver,
    /// A driver was selected but could not advance (idle, nothing pending).
    Unchanged,
    /// One driver advanced.
    Advanced(Transition),
}

impl DispatchOutcome {
    /// `true` if the dispatch phase actually ran on this tick.
    #[inline]
    pub fn evaluated(&self) -> bool {
        !matches!(self, DispatchOutcome::NotEligible)
    }

    #[inline]
    pub fn transition(&self) -> Option<Transition> {
        match self {
            DispatchOutcome::Advanced(t) => Some(*t),
            _ => None,
        }
    }
}

/// Eligibility gate + selection policy + state machine.
pub struct Dispatcher<S: DriverSelector> {
    selector: S,
    interval: u64,
}

impl<S: DriverSelector> Dispatcher<S> {
    /// `interval` is the N in "every Nth tick"; zero disables dispatch.
    pub fn new(selector: S, interval: u64) -> Self {
        Self { selector, interval }
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    pub fn selector(&self) -> &S {
        &self.selector
    }

    /// Run the dispatch phase for `tick`.
    ///
    /// At most one driver changes status per call.
    pub fn dispatch(&self, tick: Tick, fleet: &mut FleetStore, rng: &mut SimRng) -> DispatchOutcome {
        if !tick.is_every(self.interval) {
            return DispatchOutcome::NotEligible;
        }
        let Some(driver) = self.selector.select(fleet, rng) else {
            return DispatchOutcome::NoDriver;
        };
        match advance_driver(fleet, driver) {
            Some(t) => {
                debug!(
                    %tick,
                    driver = %t.driver,
                    from = %t.from,
                    to = %t.to,
                    delivery = ?t.delivery,
                    "driver status advanced"
                );
                DispatchOutcome::Advanced(t)
            }
            None => {
                debug!(%tick, %driver, "selected driver has nothing to do");
                DispatchOutcome::Unchanged
            }
        }
    }
}
