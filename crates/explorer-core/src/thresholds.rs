//! Range-relative status thresholds and colour mapping.
//!
//! Thresholds are expressed as fractions of a sensor's range rather than
//! absolute values, so the same evaluator works for a 0-50 mm/h rain gauge
//! and a 0-1000 ppm gas sensor.
//!
//! # Example
//!
//! ```
//! use explorer_core::{Status, Thresholds, classify_status};
//!
//! // Free function with the default 70% / 90% cut points
//! assert_eq!(classify_status(370.0, 0.0, 400.0), Status::Critical);
//!
//! // Same evaluation through an evaluator
//! let thresholds = Thresholds::default();
//! assert_eq!(thresholds.evaluate(30.0, 0.0, 50.0), Status::Normal);
//! ```

use serde::{Deserialize, Serialize};

use explorer_types::{SensorState, Status};

/// Colour returned for an absent or unrecognized status.
pub const DEFAULT_COLOR: &str = "#3498db";

/// Fractions of the range at which each status begins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Fraction of the range at which `Warning` starts.
    pub warning_fraction: f64,
    /// Fraction of the range at which `Critical` starts.
    pub critical_fraction: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            warning_fraction: 0.7,
            critical_fraction: 0.9,
        }
    }
}

/// Threshold evaluator for sensor values.
#[derive(Debug, Clone, Copy, Default)]
pub struct Thresholds {
    config: ThresholdConfig,
}

impl Thresholds {
    /// Create a new threshold evaluator with the given configuration.
    pub fn new(config: ThresholdConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ThresholdConfig {
        &self.config
    }

    /// Absolute value at which `Warning` starts for the given range.
    pub fn warning_threshold(&self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.config.warning_fraction
    }

    /// Absolute value at which `Critical` starts for the given range.
    pub fn critical_threshold(&self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.config.critical_fraction
    }

    /// Classify `value` within `[min, max]`.
    ///
    /// Boundary values fall into the higher-severity bucket. Values outside
    /// the range are still classified; an inverted range (`min > max`) flips
    /// the thresholds below `min` and is not rejected here.
    pub fn evaluate(&self, value: f64, min: f64, max: f64) -> Status {
        if value >= self.critical_threshold(min, max) {
            Status::Critical
        } else if value >= self.warning_threshold(min, max) {
            Status::Warning
        } else {
            Status::Normal
        }
    }

    /// Classify a sensor's current value against its own range.
    pub fn evaluate_sensor(&self, sensor: &SensorState) -> Status {
        self.evaluate(sensor.value, sensor.definition.min, sensor.definition.max)
    }

    /// Check whether a value has reached at least the given status.
    pub fn reaches(&self, value: f64, min: f64, max: f64, level: Status) -> bool {
        self.evaluate(value, min, max) >= level
    }
}

/// Classify a value with the default 70% / 90% thresholds.
pub fn classify_status(value: f64, min: f64, max: f64) -> Status {
    Thresholds::default().evaluate(value, min, max)
}

/// Map a status to its colour token, falling back to [`DEFAULT_COLOR`].
pub fn status_to_color(status: Option<Status>) -> &'static str {
    status.map_or(DEFAULT_COLOR, |s| s.color())
}

/// Map a status name to its colour token.
///
/// Any string that is not a known status name yields [`DEFAULT_COLOR`].
pub fn status_color_str(status: &str) -> &'static str {
    status_to_color(status.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds_monotonic() {
        assert_eq!(classify_status(69.0, 0.0, 100.0), Status::Normal);
        assert_eq!(classify_status(70.0, 0.0, 100.0), Status::Warning);
        assert_eq!(classify_status(89.0, 0.0, 100.0), Status::Warning);
        assert_eq!(classify_status(90.0, 0.0, 100.0), Status::Critical);
    }

    #[test]
    fn test_boundary_values() {
        let t = Thresholds::default();
        // Exact boundaries belong to the higher bucket
        assert_eq!(t.evaluate(350.0, 0.0, 500.0), Status::Warning);
        assert_eq!(t.evaluate(349.9, 0.0, 500.0), Status::Normal);
        assert_eq!(t.evaluate(450.0, 0.0, 500.0), Status::Critical);
        assert_eq!(t.evaluate(449.9, 0.0, 500.0), Status::Warning);
    }

    #[test]
    fn test_offset_range() {
        // min=10, max=30 → warning at 24, critical at 28
        assert_eq!(classify_status(23.9, 10.0, 30.0), Status::Normal);
        assert_eq!(classify_status(24.1, 10.0, 30.0), Status::Warning);
        assert_eq!(classify_status(27.9, 10.0, 30.0), Status::Warning);
        assert_eq!(classify_status(28.1, 10.0, 30.0), Status::Critical);
    }

    #[test]
    fn test_threshold_values() {
        let t = Thresholds::default();
        assert_eq!(t.warning_threshold(0.0, 400.0), 280.0);
        assert_eq!(t.critical_threshold(0.0, 400.0), 360.0);
    }

    #[test]
    fn test_out_of_range_values() {
        assert_eq!(classify_status(-5.0, 0.0, 50.0), Status::Normal);
        assert_eq!(classify_status(75.0, 0.0, 50.0), Status::Critical);
    }

    #[test]
    fn test_inverted_range_degrades_silently() {
        // range = -100 → warning at 30, critical at 10: everything >= 10 is critical
        assert_eq!(classify_status(50.0, 100.0, 0.0), Status::Critical);
        assert_eq!(classify_status(5.0, 100.0, 0.0), Status::Normal);
    }

    #[test]
    fn test_custom_config() {
        let t = Thresholds::new(ThresholdConfig {
            warning_fraction: 0.5,
            critical_fraction: 0.8,
        });
        assert_eq!(t.evaluate(50.0, 0.0, 100.0), Status::Warning);
        assert_eq!(t.evaluate(79.0, 0.0, 100.0), Status::Warning);
        assert_eq!(t.evaluate(80.0, 0.0, 100.0), Status::Critical);
    }

    #[test]
    fn test_reaches() {
        let t = Thresholds::default();
        assert!(t.reaches(95.0, 0.0, 100.0, Status::Warning));
        assert!(!t.reaches(50.0, 0.0, 100.0, Status::Warning));
        assert!(t.reaches(0.0, 0.0, 100.0, Status::Normal));
    }

    #[test]
    fn test_status_colors_total() {
        for status in Status::ALL {
            assert!(!status_to_color(Some(status)).is_empty());
            assert_ne!(status_to_color(Some(status)), DEFAULT_COLOR);
        }
        assert_eq!(status_to_color(None), DEFAULT_COLOR);
    }

    #[test]
    fn test_status_color_str_fallback() {
        assert_eq!(status_color_str("normal"), "#2ecc71");
        assert_eq!(status_color_str("warning"), "#f39c12");
        assert_eq!(status_color_str("critical"), "#e74c3c");
        assert_eq!(status_color_str("offline"), DEFAULT_COLOR);
        assert_eq!(status_color_str(""), DEFAULT_COLOR);
    }
}
