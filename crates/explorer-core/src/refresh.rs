//! Periodic refresh of the sensor set.
//!
//! A [`Refresher`] task owns exactly one repeating timer. On every tick it
//! advances the latest snapshot and publishes the result by replacing the
//! value in a [`tokio::sync::watch`] channel, so readers only ever see whole
//! snapshots. Changing the interval rebuilds the timer inside the same task;
//! the previous timer is dropped before the new one can fire.
//!
//! # Example
//!
//! ```no_run
//! use explorer_core::{RefreshInterval, Refresher, Simulator};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> explorer_core::Result<()> {
//!     let handle = Refresher::spawn(
//!         Simulator::seeded(1),
//!         RefreshInterval::default(),
//!         CancellationToken::new(),
//!     );
//!
//!     let mut updates = handle.subscribe();
//!     updates.changed().await.ok();
//!     println!("generation {}", updates.borrow().generation);
//!
//!     handle.set_interval(RefreshInterval::new(1)?)?;
//!     handle.shutdown().await;
//!     Ok(())
//! }
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::simulator::{Simulator, Snapshot};

/// Seconds between ticks, constrained to 1-60.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct RefreshInterval(u64);

impl RefreshInterval {
    /// Shortest supported interval in seconds.
    pub const MIN_SECS: u64 = 1;
    /// Longest supported interval in seconds.
    pub const MAX_SECS: u64 = 60;
    /// Interval used when none is configured.
    pub const DEFAULT_SECS: u64 = 5;
    /// Intervals offered as quick choices.
    pub const PRESETS: [u64; 5] = [1, 5, 10, 30, 60];

    /// Validate `secs` against the supported range.
    pub fn new(secs: u64) -> Result<Self> {
        if (Self::MIN_SECS..=Self::MAX_SECS).contains(&secs) {
            Ok(Self(secs))
        } else {
            Err(Error::InvalidInterval {
                secs,
                min: Self::MIN_SECS,
                max: Self::MAX_SECS,
            })
        }
    }

    pub fn secs(&self) -> u64 {
        self.0
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(self.0)
    }
}

impl Default for RefreshInterval {
    fn default() -> Self {
        Self(Self::DEFAULT_SECS)
    }
}

impl TryFrom<u64> for RefreshInterval {
    type Error = Error;

    fn try_from(secs: u64) -> Result<Self> {
        Self::new(secs)
    }
}

impl From<RefreshInterval> for u64 {
    fn from(interval: RefreshInterval) -> Self {
        interval.0
    }
}

impl fmt::Display for RefreshInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// Spawns the background refresh task.
pub struct Refresher;

impl Refresher {
    /// Seed the initial snapshot and start ticking every `interval`.
    ///
    /// The initial snapshot (generation 0) is available immediately; the
    /// first tick happens one full interval later. The task stops when
    /// `cancel` fires or the returned handle is dropped.
    pub fn spawn<R>(
        mut simulator: Simulator<R>,
        interval: RefreshInterval,
        cancel: CancellationToken,
    ) -> RefresherHandle
    where
        R: Rng + Send + 'static,
    {
        let initial = Arc::new(simulator.initial_snapshot());
        let (snapshot_tx, snapshot_rx) = watch::channel(initial.clone());
        let (interval_tx, mut interval_rx) = watch::channel(interval);
        let task_cancel = cancel.clone();

        let task = tokio::spawn(async move {
            let mut current = initial;
            let mut active = *interval_rx.borrow_and_update();
            let mut timer = ticker(active);
            info!("Refresher started with {} interval", active);

            loop {
                tokio::select! {
                    _ = task_cancel.cancelled() => {
                        debug!("Refresher cancelled");
                        break;
                    }
                    changed = interval_rx.changed() => {
                        if changed.is_err() {
                            debug!("Refresher handle dropped, stopping");
                            break;
                        }
                        let next = *interval_rx.borrow_and_update();
                        if next != active {
                            info!("Refresh interval changed from {} to {}", active, next);
                            active = next;
                            timer = ticker(active);
                        }
                    }
                    _ = timer.tick() => {
                        current = Arc::new(simulator.next_snapshot(&current));
                        debug!(generation = current.generation, "Published snapshot");
                        snapshot_tx.send_replace(current.clone());
                    }
                }
            }
            info!("Refresher stopped after {} ticks", current.generation);
        });

        RefresherHandle {
            snapshot_rx,
            interval_tx,
            cancel,
            task,
        }
    }
}

/// First tick one period from now; late ticks push the schedule back rather
/// than bursting.
fn ticker(interval: RefreshInterval) -> Interval {
    let period = interval.as_duration();
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

/// Control and observation handle for a running [`Refresher`].
#[derive(Debug)]
pub struct RefresherHandle {
    snapshot_rx: watch::Receiver<Arc<Snapshot>>,
    interval_tx: watch::Sender<RefreshInterval>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl RefresherHandle {
    /// A receiver notified on every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.snapshot_rx.clone()
    }

    /// The most recently published snapshot.
    pub fn latest(&self) -> Arc<Snapshot> {
        self.snapshot_rx.borrow().clone()
    }

    /// The active refresh interval.
    pub fn interval(&self) -> RefreshInterval {
        *self.interval_tx.borrow()
    }

    /// Replace the active timer with one ticking every `interval`.
    ///
    /// Setting the interval that is already active leaves the timer alone.
    pub fn set_interval(&self, interval: RefreshInterval) -> Result<()> {
        if self.interval_tx.is_closed() {
            return Err(Error::RefresherStopped);
        }
        self.interval_tx.send_if_modified(|current| {
            if *current == interval {
                false
            } else {
                *current = interval;
                true
            }
        });
        Ok(())
    }

    /// Token that stops the refresher when cancelled.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Whether the background task is still running.
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop the refresher and wait for its task to finish.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            warn!("Refresher task ended abnormally: {}", e);
        }
    }
}
