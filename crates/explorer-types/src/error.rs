//! Error types for explorer-types.

use thiserror::Error;

/// Errors that can occur when parsing sensor identifiers from text.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The string does not name one of the known sensor types.
    #[error("Unknown sensor type '{0}' (expected rain, gas, microphone, camera or ultrasonic)")]
    UnknownSensorType(String),

    /// The string does not name one of the known status levels.
    #[error("Unknown status '{0}' (expected normal, warning or critical)")]
    UnknownStatus(String),
}

/// Errors raised when a sensor definition is malformed.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum DefinitionError {
    /// The sensor id is empty.
    #[error("Sensor id cannot be empty")]
    EmptyId,

    /// A range bound is NaN or infinite.
    #[error("Sensor '{id}' has a non-finite range bound")]
    NonFinite { id: String },

    /// The range is empty or inverted.
    #[error("Sensor '{id}' has invalid range: min {min} must be less than max {max}")]
    InvalidRange { id: String, min: f64, max: f64 },
}

/// Result type alias using explorer-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
