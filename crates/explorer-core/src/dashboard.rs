//! Read-only views over a sensor set: type filtering, status counts and
//! comparison series.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use explorer_types::{ParseError, SensorState, SensorType, Status};

/// Restrict a view to one sensor type, or show everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(SensorType),
}

impl TypeFilter {
    /// Whether `sensor` passes the filter.
    pub fn matches(&self, sensor: &SensorState) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(t) => sensor.sensor_type() == *t,
        }
    }
}

impl From<Option<SensorType>> for TypeFilter {
    fn from(value: Option<SensorType>) -> Self {
        value.map_or(TypeFilter::All, TypeFilter::Only)
    }
}

impl FromStr for TypeFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(TypeFilter::All)
        } else {
            s.parse().map(TypeFilter::Only)
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::All => write!(f, "all"),
            TypeFilter::Only(t) => write!(f, "{}", t.as_str()),
        }
    }
}

/// Sensors passing `filter`, in their original order.
pub fn filter_sensors(sensors: &[SensorState], filter: TypeFilter) -> Vec<SensorState> {
    sensors
        .iter()
        .filter(|s| filter.matches(s))
        .cloned()
        .collect()
}

/// Count of sensors per status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusSummary {
    pub total: usize,
    pub normal: usize,
    pub warning: usize,
    pub critical: usize,
}

impl StatusSummary {
    pub fn from_sensors(sensors: &[SensorState]) -> Self {
        sensors.iter().fold(Self::default(), |mut acc, sensor| {
            acc.total += 1;
            match sensor.status {
                Status::Normal => acc.normal += 1,
                Status::Warning => acc.warning += 1,
                Status::Critical => acc.critical += 1,
            }
            acc
        })
    }

    /// Number of sensors in `status`.
    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::Normal => self.normal,
            Status::Warning => self.warning,
            Status::Critical => self.critical,
        }
    }

    /// Share of sensors in `status`, from 0.0 to 1.0. Zero when empty.
    pub fn fraction(&self, status: Status) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(status) as f64 / self.total as f64
    }

    /// The most severe status present, if any sensors were counted.
    pub fn worst(&self) -> Option<Status> {
        Status::ALL
            .into_iter()
            .rev()
            .find(|&status| self.count(status) > 0)
    }
}

/// History values of one sensor, ready to plot next to others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSeries {
    pub id: String,
    pub name: String,
    pub unit: String,
    /// Colour of the sensor's current status.
    pub color: String,
    /// History values, oldest first.
    pub values: Vec<f64>,
}

impl ComparisonSeries {
    fn from_sensor(sensor: &SensorState) -> Self {
        Self {
            id: sensor.definition.id.clone(),
            name: sensor.definition.name.clone(),
            unit: sensor.definition.unit.clone(),
            color: sensor.status.color().to_string(),
            values: sensor.history.iter().map(|r| r.value).collect(),
        }
    }
}

/// One series per requested id, in request order. Unknown ids are skipped.
pub fn compare<S: AsRef<str>>(sensors: &[SensorState], ids: &[S]) -> Vec<ComparisonSeries> {
    ids.iter()
        .filter_map(|id| sensors.iter().find(|s| s.id() == id.as_ref()))
        .map(ComparisonSeries::from_sensor)
        .collect()
}
