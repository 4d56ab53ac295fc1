//! `FleetHandle` — real-time, thread-safe front end to a [`FleetSim`].

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam::channel::{self, Receiver, Sender, TrySendError};
use fleet_core::{DriverId, Tick};
use fleet_dispatch::{DriverSelector, UniformSelector};
use fleet_spatial::{InterpolatedPath, PathBuilder};
use parking_lot::Mutex;
use tracing::{debug, error, info};

use crate::{FleetSim, FleetSnapshot, NoopObserver, SimObserver, SimResult};

/// Snapshots buffered per subscriber before newer ones are dropped.
pub const SUBSCRIBER_CAPACITY: usize = 16;

type Subscribers = Arc<Mutex<Vec<Sender<Arc<FleetSnapshot>>>>>;

/// The running background thread and the channel that stops it.
struct Ticker {
    stop:   Sender<()>,
    thread: JoinHandle<()>,
}

/// Drives a [`FleetSim`] from a background thread at a fixed real-time
/// interval.
///
/// Every tick runs under one lock, so ticks never overlap and
/// [`snapshot`][Self::snapshot], [`select_driver`][Self::select_driver] and
/// [`optimize_route`][Self::optimize_route] always see whole ticks.
///
/// Dropping the handle stops the ticker.
pub struct FleetHandle<S: DriverSelector = UniformSelector, P: PathBuilder + 'static = InterpolatedPath> {
    sim:         Arc<Mutex<FleetSim<S, P>>>,
    subscribers: Subscribers,
    interval:    Duration,
    ticker:      Mutex<Option<Ticker>>,
}

impl<S: DriverSelector, P: PathBuilder + 'static> FleetHandle<S, P> {
    /// Wrap `sim`, ticking every `config.tick_duration_secs` once started.
    pub fn new(sim: FleetSim<S, P>) -> Self {
        let interval = sim.config().tick_interval();
        Self {
            sim: Arc::new(Mutex::new(sim)),
            subscribers: Arc::new(Mutex::new(Vec::new())),
            interval,
            ticker: Mutex::new(None),
        }
    }

    /// Override the real-time tick interval.  Simulated time per tick is
    /// unchanged.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Start ticking.  No-op if already running.
    pub fn start(&self) -> SimResult<()> {
        self.start_with_observer(NoopObserver)
    }

    /// Start ticking, notifying `observer` from the ticker thread.
    ///
    /// No-op if already running; `observer` is dropped in that case.
    pub fn start_with_observer<O>(&self, mut observer: O) -> SimResult<()>
    where
        O: SimObserver + Send + 'static,
    {
        let mut ticker = self.ticker.lock();
        if ticker.is_some() {
            return Ok(());
        }

        let (stop_tx, stop_rx) = channel::bounded::<()>(1);
        let ticks = channel::tick(self.interval);
        let sim = Arc::clone(&self.sim);
        let subscribers = Arc::clone(&self.subscribers);

        let thread = thread::Builder::new()
            .name("fleet-ticker".into())
            .spawn(move || {
                loop {
                    channel::select! {
                        recv(stop_rx) -> _ => break,
                        recv(ticks) -> _ => {
                            let snapshot = {
                                let mut sim = sim.lock();
                                sim.step(&mut observer);
                                Arc::new(sim.snapshot())
                            };
                            publish(&subscribers, snapshot);
                        }
                    }
                }
                let final_tick = sim.lock().current_tick();
                observer.on_sim_end(final_tick);
            })?;

        info!(interval_ms = self.interval.as_millis() as u64, "fleet ticker started");
        *ticker = Some(Ticker { stop: stop_tx, thread });
        Ok(())
    }

    /// Stop ticking and wait for the ticker thread to exit.
    ///
    /// Idempotent.  Once this returns no further ticks run.
    pub fn stop(&self) {
        let Some(ticker) = self.ticker.lock().take() else {
            return;
        };
        // The receiver only disappears if the thread already exited.
        let _ = ticker.stop.send(());
        if ticker.thread.join().is_err() {
            error!("fleet ticker thread panicked");
        }
        info!(tick = %self.current_tick(), "fleet ticker stopped");
    }

    pub fn is_running(&self) -> bool {
        self.ticker.lock().is_some()
    }

    // ── Queries and commands ──────────────────────────────────────────────

    /// Receive a snapshot after every tick.
    ///
    /// The channel is bounded; a subscriber that falls behind misses
    /// snapshots rather than slowing the ticker.  Dropping the receiver
    /// unsubscribes.
    pub fn subscribe(&self) -> Receiver<Arc<FleetSnapshot>> {
        let (tx, rx) = channel::bounded(SUBSCRIBER_CAPACITY);
        self.subscribers.lock().push(tx);
        rx
    }

    /// Number of live subscriptions.  Dropped receivers are pruned on the
    /// next published tick.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    pub fn snapshot(&self) -> FleetSnapshot {
        self.sim.lock().snapshot()
    }

    pub fn current_tick(&self) -> Tick {
        self.sim.lock().current_tick()
    }

    /// See [`FleetSim::select_driver`].
    pub fn select_driver(&self, driver: Option<DriverId>) {
        self.sim.lock().select_driver(driver);
    }

    /// See [`FleetSim::optimize_route`].
    pub fn optimize_route(&self, driver: DriverId) -> bool {
        self.sim.lock().optimize_route(driver)
    }

    /// Run `f` with exclusive access to the simulation, between ticks.
    ///
    /// `f` holds the simulation lock, so it must not call back into this
    /// handle: [`stop`][Self::stop] would deadlock joining a ticker that is
    /// waiting for the same lock, and the query methods would block forever.
    pub fn with_sim<R>(&self, f: impl FnOnce(&mut FleetSim<S, P>) -> R) -> R {
        f(&mut self.sim.lock())
    }
}

impl<S: DriverSelector, P: PathBuilder + 'static> Drop for FleetHandle<S, P> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Fan `snapshot` out to every live subscriber, pruning closed channels.
fn publish(subscribers: &Subscribers, snapshot: Arc<FleetSnapshot>) {
    subscribers.lock().retain(|tx| match tx.try_send(Arc::clone(&snapshot)) {
        Ok(()) => true,
        Err(TrySendError::Full(_)) => {
            debug!(tick = %snapshot.tick, "subscriber lagging; snapshot skipped");
            true
        }
        Err(TrySendError::Disconnected(_)) => false,
    });
}
