//! Core types for explorer sensor data.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::{DefinitionError, ParseError};

/// Number of readings kept in every sensor's history window.
pub const HISTORY_CAPACITY: usize = 24;

/// Kind of measurement a sensor performs.
///
/// The set is closed: the explorer vehicle carries exactly these five
/// sensor kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SensorType {
    /// Rain intensity sensor.
    Rain,
    /// Gas concentration sensor.
    Gas,
    /// Ambient sound level microphone.
    Microphone,
    /// Camera image quality / visibility.
    Camera,
    /// Ultrasonic distance sensor.
    Ultrasonic,
}

impl SensorType {
    /// All sensor types in catalog order.
    pub const ALL: [SensorType; 5] = [
        SensorType::Rain,
        SensorType::Gas,
        SensorType::Microphone,
        SensorType::Camera,
        SensorType::Ultrasonic,
    ];

    /// Lowercase identifier used in query strings and serialized data.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorType::Rain => "rain",
            SensorType::Gas => "gas",
            SensorType::Microphone => "microphone",
            SensorType::Camera => "camera",
            SensorType::Ultrasonic => "ultrasonic",
        }
    }

    /// Material icon token shown next to the sensor on the dashboard.
    ///
    /// ```
    /// use explorer_types::SensorType;
    ///
    /// assert_eq!(SensorType::Ultrasonic.icon(), "radar");
    /// ```
    #[must_use]
    pub fn icon(&self) -> &'static str {
        match self {
            SensorType::Rain => "water_drop",
            SensorType::Gas => "cloud",
            SensorType::Microphone => "mic",
            SensorType::Camera => "videocam",
            SensorType::Ultrasonic => "radar",
        }
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorType::Rain => write!(f, "Rain Sensor"),
            SensorType::Gas => write!(f, "Gas Sensor"),
            SensorType::Microphone => write!(f, "Microphone"),
            SensorType::Camera => write!(f, "Camera"),
            SensorType::Ultrasonic => write!(f, "Ultrasonic Sensor"),
        }
    }
}

impl FromStr for SensorType {
    type Err = ParseError;

    /// Parse a sensor type from its lowercase identifier (case-insensitive).
    ///
    /// ```
    /// use explorer_types::SensorType;
    ///
    /// assert_eq!("Gas".parse::<SensorType>(), Ok(SensorType::Gas));
    /// assert!("temperature".parse::<SensorType>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        SensorType::ALL
            .into_iter()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| ParseError::UnknownSensorType(s.to_string()))
    }
}

/// Discrete alert level derived from a value's position within its range.
///
/// # Ordering
///
/// Status values are ordered by severity: `Normal < Warning < Critical`.
/// This allows comparisons like `if status >= Status::Warning { ... }`.
///
/// ```
/// use explorer_types::Status;
///
/// assert!(Status::Critical > Status::Warning);
/// assert!(Status::Warning > Status::Normal);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Status {
    /// Value is in the lower 70% of the range.
    #[default]
    Normal,
    /// Value is between 70% and 90% of the range.
    Warning,
    /// Value is at or above 90% of the range.
    Critical,
}

impl Status {
    /// All status levels ordered by severity.
    pub const ALL: [Status; 3] = [Status::Normal, Status::Warning, Status::Critical];

    /// Lowercase identifier used in serialized data.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Normal => "normal",
            Status::Warning => "warning",
            Status::Critical => "critical",
        }
    }

    /// Hex colour token for this status.
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            Status::Normal => "#2ecc71",
            Status::Warning => "#f39c12",
            Status::Critical => "#e74c3c",
        }
    }

    /// Human-readable explanation shown in the sensor detail view.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Status::Normal => "The sensor is operating within normal parameters.",
            Status::Warning => "The sensor is recording values that need attention.",
            Status::Critical => "Alert! The sensor is recording critical values.",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Normal => write!(f, "Normal"),
            Status::Warning => write!(f, "Warning"),
            Status::Critical => write!(f, "Critical"),
        }
    }
}

impl FromStr for Status {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Status::ALL
            .into_iter()
            .find(|st| st.as_str() == lower)
            .ok_or_else(|| ParseError::UnknownStatus(s.to_string()))
    }
}

/// A single timestamped value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reading {
    /// When the value was taken.
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    pub timestamp: OffsetDateTime,
    /// Measured value in the sensor's unit.
    pub value: f64,
}

impl Reading {
    /// Create a new reading.
    #[must_use]
    pub fn new(timestamp: OffsetDateTime, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Immutable identity and range of a sensor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorDefinition {
    /// Unique sensor id (e.g. `s001`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Measurement unit.
    pub unit: String,
    /// Where the sensor is mounted on the vehicle.
    pub location: String,
    /// Kind of measurement.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub sensor_type: SensorType,
    /// Lower bound of the valid measurement range.
    pub min: f64,
    /// Upper bound of the valid measurement range.
    pub max: f64,
}

impl SensorDefinition {
    /// Create a validated definition.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError`] under the same rules as [`validate`](Self::validate).
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit: impl Into<String>,
        location: impl Into<String>,
        sensor_type: SensorType,
        min: f64,
        max: f64,
    ) -> Result<Self, DefinitionError> {
        let definition = Self {
            id: id.into(),
            name: name.into(),
            unit: unit.into(),
            location: location.into(),
            sensor_type,
            min,
            max,
        };
        definition.validate()?;
        Ok(definition)
    }

    /// Create a builder for a definition with the given id and type.
    pub fn builder(id: impl Into<String>, sensor_type: SensorType) -> SensorDefinitionBuilder {
        SensorDefinitionBuilder::new(id, sensor_type)
    }

    /// Width of the measurement range (`max - min`).
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Check that the definition is well formed.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError`] if the id is empty, a bound is not finite,
    /// or `min` is not strictly less than `max`.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        if self.id.is_empty() {
            return Err(DefinitionError::EmptyId);
        }
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(DefinitionError::NonFinite {
                id: self.id.clone(),
            });
        }
        if self.min >= self.max {
            return Err(DefinitionError::InvalidRange {
                id: self.id.clone(),
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Builder for [`SensorDefinition`].
///
/// Use [`build`](Self::build) for unchecked construction, or
/// [`try_build`](Self::try_build) to validate the range.
#[derive(Debug, Clone)]
#[must_use]
pub struct SensorDefinitionBuilder {
    definition: SensorDefinition,
}

impl SensorDefinitionBuilder {
    fn new(id: impl Into<String>, sensor_type: SensorType) -> Self {
        Self {
            definition: SensorDefinition {
                id: id.into(),
                name: sensor_type.to_string(),
                unit: String::new(),
                location: String::new(),
                sensor_type,
                min: 0.0,
                max: 100.0,
            },
        }
    }

    /// Set the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.definition.name = name.into();
        self
    }

    /// Set the measurement unit.
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.definition.unit = unit.into();
        self
    }

    /// Set the mounting location.
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.definition.location = location.into();
        self
    }

    /// Set the measurement range.
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.definition.min = min;
        self.definition.max = max;
        self
    }

    /// Build the definition without validation.
    #[must_use]
    pub fn build(self) -> SensorDefinition {
        self.definition
    }

    /// Build the definition, rejecting malformed ranges.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError`] if [`SensorDefinition::validate`] fails.
    pub fn try_build(self) -> Result<SensorDefinition, DefinitionError> {
        self.definition.validate()?;
        Ok(self.definition)
    }
}

/// Live state of one sensor: its definition plus the latest reading,
/// derived status and history window.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorState {
    /// Identity and range.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub definition: SensorDefinition,
    /// Latest value.
    pub value: f64,
    /// Status derived from `value` and the range.
    pub status: Status,
    /// When the latest value was taken.
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    pub timestamp: OffsetDateTime,
    /// Past readings, oldest first.
    pub history: Vec<Reading>,
}

impl SensorState {
    /// The sensor id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.definition.id
    }

    /// The sensor type.
    #[must_use]
    pub fn sensor_type(&self) -> SensorType {
        self.definition.sensor_type
    }

    /// Most recent reading in the history window, if any.
    #[must_use]
    pub fn latest_reading(&self) -> Option<&Reading> {
        self.history.last()
    }
}
