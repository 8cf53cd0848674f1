//! The explorer vehicle's fixed sensor catalog.
//!
//! Five sensors, one per [`SensorType`]. Each entry also carries a
//! *baseline* range used only to seed its initial history with plausible
//! quiet-period values, and the value shown before the first tick.

use rand::Rng;
use time::OffsetDateTime;

use explorer_types::{SensorDefinition, SensorState, SensorType};

use crate::history::generate_window;
use crate::thresholds::classify_status;

/// A catalog entry: definition plus initial seeding parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    /// Identity and measurement range.
    pub definition: SensorDefinition,
    /// Range the initial history is drawn from.
    pub baseline: (f64, f64),
    /// Value reported before the first tick.
    pub initial_value: f64,
}

impl CatalogEntry {
    #[allow(clippy::too_many_arguments)]
    fn new(
        id: &str,
        sensor_type: SensorType,
        name: &str,
        unit: &str,
        location: &str,
        range: (f64, f64),
        baseline: (f64, f64),
        initial_value: f64,
    ) -> Self {
        Self {
            definition: SensorDefinition::builder(id, sensor_type)
                .name(name)
                .unit(unit)
                .location(location)
                .range(range.0, range.1)
                .build(),
            baseline,
            initial_value,
        }
    }

    /// Build the initial state for this entry.
    ///
    /// The history window is drawn from the baseline range and ends at `now`;
    /// the status is classified from the initial value.
    pub fn seed<R: Rng + ?Sized>(&self, now: OffsetDateTime, rng: &mut R) -> SensorState {
        let (low, high) = self.baseline;
        SensorState {
            definition: self.definition.clone(),
            value: self.initial_value,
            status: classify_status(
                self.initial_value,
                self.definition.min,
                self.definition.max,
            ),
            timestamp: now,
            history: generate_window(low, high, now, rng),
        }
    }
}

/// The fixed catalog, in id order.
pub fn catalog() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new(
            "s001",
            SensorType::Rain,
            "Rain Sensor",
            "mm/h",
            "Exterior",
            (0.0, 50.0),
            (0.0, 5.0),
            0.0,
        ),
        CatalogEntry::new(
            "s002",
            SensorType::Gas,
            "Gas Sensor",
            "PPM",
            "Front",
            (0.0, 1000.0),
            (10.0, 30.0),
            15.0,
        ),
        CatalogEntry::new(
            "s003",
            SensorType::Microphone,
            "Ambient Microphone",
            "dB",
            "Exterior",
            (0.0, 120.0),
            (35.0, 60.0),
            45.0,
        ),
        CatalogEntry::new(
            "s004",
            SensorType::Camera,
            "Main Camera",
            "%",
            "Front",
            (0.0, 100.0),
            (80.0, 100.0),
            100.0,
        ),
        CatalogEntry::new(
            "s005",
            SensorType::Ultrasonic,
            "Ultrasonic Sensor",
            "cm",
            "Front",
            (0.0, 400.0),
            (50.0, 300.0),
            150.0,
        ),
    ]
}

/// Definitions only, in catalog order.
pub fn definitions() -> Vec<SensorDefinition> {
    catalog().into_iter().map(|e| e.definition).collect()
}

/// Build the initial sensor set with histories ending at `now`.
pub fn initial_sensors<R: Rng + ?Sized>(now: OffsetDateTime, rng: &mut R) -> Vec<SensorState> {
    catalog().iter().map(|entry| entry.seed(now, rng)).collect()
}
