//! Error types for explorer-core.
//!
//! Generation, classification and tick advancement are total functions and
//! never fail. Errors only surface at the edges of the engine:
//!
//! | Error | Raised by |
//! |-------|-----------|
//! | [`Error::Definition`] | Validating a [`SensorDefinition`](explorer_types::SensorDefinition) |
//! | [`Error::Parse`] | Parsing a sensor type or status from text |
//! | [`Error::InvalidInterval`] | Building a [`RefreshInterval`](crate::RefreshInterval) outside 1-60 s |
//! | [`Error::RefresherStopped`] | Talking to a refresher whose task has ended |

use thiserror::Error;

use explorer_types::{DefinitionError, ParseError};

/// Errors that can occur in the simulation engine.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A sensor definition failed validation.
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    /// Text could not be parsed into a sensor type or status.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Refresh interval outside the supported range.
    #[error("Refresh interval {secs}s is out of range ({min}-{max}s)")]
    InvalidInterval { secs: u64, min: u64, max: u64 },

    /// The refresher task is no longer running.
    #[error("Refresher has stopped")]
    RefresherStopped,
}

/// Result type alias using explorer-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;
