//! Summary statistics over a sensor's history window.

use serde::{Deserialize, Serialize};

use explorer_types::SensorState;

use crate::history::round_to_tenth;

/// Current, average and extreme values for one sensor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryStats {
    /// Latest value.
    pub current: f64,
    /// Mean of the history window, rounded to one decimal.
    pub average: f64,
    /// Largest value in the window.
    pub maximum: f64,
    /// Smallest value in the window.
    pub minimum: f64,
}

impl HistoryStats {
    /// Compute statistics over `sensor.history`.
    ///
    /// Returns `None` when the history is empty.
    pub fn from_sensor(sensor: &SensorState) -> Option<Self> {
        let values: Vec<f64> = sensor.history.iter().map(|r| r.value).collect();
        if values.is_empty() {
            return None;
        }

        let sum: f64 = values.iter().sum();
        let maximum = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let minimum = values.iter().copied().fold(f64::INFINITY, f64::min);

        Some(Self {
            current: sensor.value,
            average: round_to_tenth(sum / values.len() as f64),
            maximum,
            minimum,
        })
    }
}

/// Position of `value` within `[min, max]` as a percentage.
///
/// Not clamped: values outside the range yield results below 0 or above 100.
/// A zero-width range yields 0.
pub fn percent_of_range(value: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if span == 0.0 {
        return 0.0;
    }
    (value - min) / span * 100.0
}

/// Y-axis bounds for plotting a sensor with range `[min, max]`.
///
/// Adds a 10% margin below `min` (floored at zero) and above `max`.
pub fn chart_bounds(min: f64, max: f64) -> (f64, f64) {
    let span = max - min;
    ((min - span * 0.1).max(0.0), max * 1.1)
}
