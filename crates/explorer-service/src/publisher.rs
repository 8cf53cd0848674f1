//! Forwards refresher snapshots to WebSocket subscribers.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::state::{AppState, SnapshotEvent};

/// Background task bridging the refresher's watch channel to the
/// broadcast channel that WebSocket handlers subscribe to.
pub struct Publisher {
    state: Arc<AppState>,
}

impl Publisher {
    /// Create a new publisher.
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Start forwarding. Returns immediately; forwarding happens in the
    /// background until `cancel` fires or the refresher stops.
    pub fn start(self, cancel: CancellationToken) -> JoinHandle<()> {
        let mut updates = self.state.refresher.subscribe();
        let state = self.state;

        tokio::spawn(async move {
            info!("Publishing snapshots to WebSocket subscribers");
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        debug!("Publisher cancelled");
                        break;
                    }
                    changed = updates.changed() => {
                        if changed.is_err() {
                            info!("Refresher stopped, publisher exiting");
                            break;
                        }
                        let snapshot = updates.borrow_and_update().clone();
                        // No subscribers is not an error
                        let delivered = state.events_tx.send(SnapshotEvent::tick(&snapshot)).unwrap_or(0);
                        debug!(
                            generation = snapshot.generation,
                            subscribers = delivered,
                            "Forwarded snapshot"
                        );
                    }
                }
            }
        })
    }
}

/// Wait for a publisher task to finish, logging a panic or cancellation.
///
/// Returns `true` when the task exited normally.
pub async fn join(task: JoinHandle<()>) -> bool {
    match task.await {
        Ok(()) => true,
        Err(e) => {
            warn!("Publisher task ended abnormally: {}", e);
            false
        }
    }
}
