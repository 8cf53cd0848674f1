//! Platform-agnostic types for the explorer vehicle sensors.
//!
//! This crate provides the shared data model used by the simulation engine
//! (explorer-core), the HTTP service and the CLI.
//!
//! # Features
//!
//! - Sensor type and status enumerations
//! - Sensor definitions with range validation
//! - Readings and per-sensor state with a fixed-size history window
//! - Error types for parsing and validation
//!
//! # Example
//!
//! ```
//! use explorer_types::{SensorDefinition, SensorType};
//!
//! let rain = SensorDefinition::builder("s001", SensorType::Rain)
//!     .unit("mm/h")
//!     .range(0.0, 50.0)
//!     .try_build()
//!     .unwrap();
//! assert_eq!(rain.span(), 50.0);
//! ```

pub mod error;
pub mod types;

pub use error::{DefinitionError, ParseError, ParseResult};
pub use types::{
    HISTORY_CAPACITY, Reading, SensorDefinition, SensorDefinitionBuilder, SensorState, SensorType,
    Status,
};
