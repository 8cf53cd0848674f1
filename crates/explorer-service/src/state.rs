//! Application state shared across handlers.
//!
//! # Snapshot Distribution
//!
//! The refresher publishes each snapshot through a `watch` channel, which
//! only ever holds the latest value. REST handlers read from it directly.
//! WebSocket clients instead subscribe to `events_tx`, a broadcast channel
//! fed by the [`Publisher`](crate::publisher::Publisher), so that every
//! client sees every tick in order:
//!
//! - **Buffer size**: `server.broadcast_buffer` (default: 16)
//! - **Message loss**: a subscriber that falls more than a buffer behind
//!   skips the oldest snapshots
//! - **No blocking**: the publisher never waits on slow clients

use std::sync::Arc;

use serde::Serialize;
use time::OffsetDateTime;
use tokio::sync::{RwLock, broadcast};
use tokio_util::sync::CancellationToken;

use explorer_core::{Refresher, RefresherHandle, Simulator, Snapshot};

use crate::config::Config;

/// Shared application state.
pub struct AppState {
    /// Configuration (RwLock for runtime updates).
    pub config: RwLock<Config>,
    /// Handle to the background refresher.
    pub refresher: RefresherHandle,
    /// Broadcast channel for WebSocket snapshot delivery.
    pub events_tx: broadcast::Sender<SnapshotEvent>,
    /// When this state was created.
    pub started_at: OffsetDateTime,
}

impl AppState {
    /// Wrap an already running refresher.
    pub fn new(config: Config, refresher: RefresherHandle) -> Arc<Self> {
        let (events_tx, _) = broadcast::channel(config.server.broadcast_buffer.max(1));
        Arc::new(Self {
            config: RwLock::new(config),
            refresher,
            events_tx,
            started_at: OffsetDateTime::now_utc(),
        })
    }

    /// Start a refresher from `config` and wrap it.
    ///
    /// The refresher stops when `cancel` fires.
    pub fn start(config: Config, cancel: CancellationToken) -> Arc<Self> {
        let simulator = Simulator::new(config.simulation.seed);
        let refresher = Refresher::spawn(simulator, config.simulation.interval(), cancel);
        Self::new(config, refresher)
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.refresher.latest()
    }

    /// Seconds since this state was created.
    pub fn uptime_seconds(&self) -> u64 {
        (OffsetDateTime::now_utc() - self.started_at)
            .whole_seconds()
            .max(0) as u64
    }
}

/// Why a snapshot was sent to a WebSocket client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Sent once on connect.
    Initial,
    /// Sent after every refresher tick.
    Tick,
}

/// A snapshot message for WebSocket clients.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotEvent {
    pub kind: EventKind,
    #[serde(flatten)]
    pub snapshot: Snapshot,
}

impl SnapshotEvent {
    pub fn initial(snapshot: &Snapshot) -> Self {
        Self {
            kind: EventKind::Initial,
            snapshot: snapshot.clone(),
        }
    }

    pub fn tick(snapshot: &Snapshot) -> Self {
        Self {
            kind: EventKind::Tick,
            snapshot: snapshot.clone(),
        }
    }
}
