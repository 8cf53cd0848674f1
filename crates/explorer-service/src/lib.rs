//! HTTP and WebSocket API for the explorer vehicle dashboard.
//!
//! This crate provides a service that:
//! - Runs the sensor simulation on a configurable refresh interval
//! - Exposes the latest snapshot, per-sensor details and summaries over REST
//! - Streams every tick to WebSocket clients
//! - Accepts vehicle control commands (logged only)
//!
//! # REST API Endpoints
//!
//! - `GET /api/health` - Service health check
//! - `GET /api/status` - Refresher state and uptime
//! - `GET /api/sensors?type=` - Latest sensor set, optionally filtered by type
//! - `GET /api/sensors/{id}` - One sensor with colour and percent of range
//! - `GET /api/sensors/{id}/history` - History window
//! - `GET /api/sensors/{id}/stats` - Current, average, maximum and minimum
//! - `GET /api/summary?type=` - Sensor counts per status
//! - `GET /api/compare?ids=` - Comparison series for selected sensors
//! - `GET /api/classify?value=&min=&max=` - Classify an arbitrary value
//! - `GET|PUT /api/refresh` - Read or change the refresh interval
//! - `POST /api/control` - Vehicle control command
//! - `WS /api/ws` - Live snapshot stream
//!
//! # Configuration
//!
//! The service reads configuration from `~/.config/explorer/server.toml`:
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:8080"
//! broadcast_buffer = 16
//!
//! [simulation]
//! refresh_interval = 5
//! seed = 42
//! ```

pub mod api;
pub mod config;
pub mod control;
pub mod publisher;
pub mod state;
pub mod ws;

pub use config::{Config, ConfigError, ServerConfig, SimulationConfig, ValidationError};
pub use control::{ControlAck, ControlCommand, ControlError, Direction};
pub use publisher::Publisher;
pub use state::{AppState, EventKind, SnapshotEvent};

use std::sync::Arc;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Full application router with tracing and permissive CORS.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(api::router())
        .merge(ws::router())
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(state)
}
