//! Simulation and status engine for the explorer vehicle's sensors.
//!
//! This crate produces the sensor set that the dashboard service and CLI
//! display. It never talks to hardware: readings are synthetic, drawn from
//! an injected random source so runs can be reproduced.
//!
//! # Features
//!
//! - **Catalog**: five fixed sensors, one per type, each seeded with 24 hours
//!   of hourly history
//! - **Classification**: range-relative normal / warning / critical thresholds
//! - **Ticks**: pure functional advancement with a fixed 24-entry window
//! - **Refresh**: a single-timer background task publishing whole snapshots
//! - **Views**: type filters, status counts, comparison series and history
//!   statistics
//!
//! # Quick Start
//!
//! ```
//! use explorer_core::{Simulator, Status, classify_status, status_to_color};
//!
//! let mut sim = Simulator::seeded(42);
//! let sensors = sim.initial_sensors();
//! assert_eq!(sensors.len(), 5);
//!
//! let next = sim.advance(&sensors);
//! for sensor in &next {
//!     let d = &sensor.definition;
//!     assert_eq!(sensor.status, classify_status(sensor.value, d.min, d.max));
//! }
//!
//! assert_eq!(status_to_color(Some(Status::Critical)), "#e74c3c");
//! ```

pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod history;
pub mod refresh;
pub mod simulator;
pub mod stats;
pub mod thresholds;

pub use catalog::{CatalogEntry, catalog, definitions, initial_sensors};
pub use dashboard::{ComparisonSeries, StatusSummary, TypeFilter, compare, filter_sensors};
pub use error::{Error, Result};
pub use history::{draw_value, generate_history, generate_window, push_window, round_to_tenth};
pub use refresh::{RefreshInterval, Refresher, RefresherHandle};
pub use simulator::{
    Clock, ManualClock, Simulator, Snapshot, SystemClock, advance_sensors, apply_reading,
};
pub use stats::{HistoryStats, chart_bounds, percent_of_range};
pub use thresholds::{
    DEFAULT_COLOR, ThresholdConfig, Thresholds, classify_status, status_color_str, status_to_color,
};

// Re-export the shared data model
pub use explorer_types::{
    DefinitionError, HISTORY_CAPACITY, ParseError, Reading, SensorDefinition,
    SensorDefinitionBuilder, SensorState, SensorType, Status,
};
