//! Output formatting utilities for text, JSON, and CSV output.

use anyhow::Result;
use explorer_core::{HistoryStats, Snapshot, StatusSummary, TypeFilter, percent_of_range};
use explorer_types::{SensorState, Status};
use owo_colors::OwoColorize;
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Formatting options for output.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    /// Disable colored output.
    pub no_color: bool,
    /// Omit header row in CSV output.
    pub no_header: bool,
    /// Use compact JSON output (no pretty-printing).
    pub compact: bool,
}

impl FormatOptions {
    pub fn new(no_color: bool) -> Self {
        Self {
            no_color,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_no_header(mut self, no_header: bool) -> Self {
        self.no_header = no_header;
        self
    }

    #[must_use]
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Serialize to JSON, honouring `compact`. Always ends with a newline.
    pub fn as_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let mut json = if self.compact {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        json.push('\n');
        Ok(json)
    }
}

/// Escape a string for CSV output.
/// Wraps the value in quotes if it contains commas, quotes, or newlines.
/// Double quotes are escaped by doubling them.
#[must_use]
pub fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Format a status label with color
#[must_use]
pub fn format_status(status: Status, no_color: bool) -> String {
    let label = status.as_str().to_uppercase();

    if no_color {
        format!("[{}]", label)
    } else {
        match status {
            Status::Normal => format!("[{}]", label.green()),
            Status::Warning => format!("[{}]", label.yellow()),
            Status::Critical => format!("[{}]", label.red()),
        }
    }
}

#[must_use]
pub fn format_timestamp(ts: OffsetDateTime) -> String {
    ts.format(&Rfc3339).unwrap_or_default()
}

// ============================================================================
// Sensor set formatting
// ============================================================================

fn sensor_line(sensor: &SensorState, opts: &FormatOptions) -> String {
    let d = &sensor.definition;
    let value = format!("{:.1} {}", sensor.value, d.unit);
    let id = if opts.no_color {
        d.id.clone()
    } else {
        d.id.cyan().to_string()
    };
    format!(
        "  {}  {:<20} {:>12}  {:<12} {}\n",
        id,
        d.name,
        value,
        format_status(sensor.status, opts.no_color),
        d.location
    )
}

/// Human-readable sensor table with a heading naming the snapshot.
#[must_use]
pub fn format_sensors_text(
    snapshot: &Snapshot,
    sensors: &[SensorState],
    opts: &FormatOptions,
) -> String {
    let heading = format!(
        "Snapshot {} at {}",
        snapshot.generation,
        format_timestamp(snapshot.taken_at)
    );
    let mut output = if opts.no_color {
        heading
    } else {
        heading.bold().to_string()
    };
    output.push('\n');

    if sensors.is_empty() {
        output.push_str("  No sensors match the filter.\n");
    }
    for sensor in sensors {
        output.push_str(&sensor_line(sensor, opts));
    }
    output
}

#[must_use]
pub fn format_sensors_csv_header() -> String {
    "generation,id,name,type,value,unit,status,location,timestamp\n".to_string()
}

/// One CSV row per sensor. The header is included unless `no_header` is set.
#[must_use]
pub fn format_sensors_csv(
    snapshot: &Snapshot,
    sensors: &[SensorState],
    opts: &FormatOptions,
) -> String {
    let mut output = if opts.no_header {
        String::new()
    } else {
        format_sensors_csv_header()
    };
    for sensor in sensors {
        let d = &sensor.definition;
        output.push_str(&format!(
            "{},{},{},{},{:.1},{},{},{},{}\n",
            snapshot.generation,
            csv_escape(&d.id),
            csv_escape(&d.name),
            d.sensor_type.as_str(),
            sensor.value,
            csv_escape(&d.unit),
            sensor.status.as_str(),
            csv_escape(&d.location),
            format_timestamp(sensor.timestamp)
        ));
    }
    output
}

/// The snapshot with only `sensors` included.
pub fn format_sensors_json(
    snapshot: &Snapshot,
    sensors: &[SensorState],
    opts: &FormatOptions,
) -> Result<String> {
    #[derive(Serialize)]
    struct SnapshotJson<'a> {
        generation: u64,
        taken_at: String,
        sensors: &'a [SensorState],
    }

    opts.as_json(&SnapshotJson {
        generation: snapshot.generation,
        taken_at: format_timestamp(snapshot.taken_at),
        sensors,
    })
}

// ============================================================================
// Classification formatting
// ============================================================================

/// Result of classifying an arbitrary value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub status: Status,
    pub color: &'static str,
    pub percent: f64,
}

impl Classification {
    pub fn new(value: f64, min: f64, max: f64) -> Self {
        let status = explorer_core::classify_status(value, min, max);
        Self {
            value,
            min,
            max,
            status,
            color: explorer_core::status_to_color(Some(status)),
            percent: percent_of_range(value, min, max),
        }
    }
}

#[must_use]
pub fn format_classification_text(c: &Classification, opts: &FormatOptions) -> String {
    format!(
        "{} in [{}, {}]: {} {} ({:.1}% of range)\n",
        c.value,
        c.min,
        c.max,
        format_status(c.status, opts.no_color),
        c.color,
        c.percent
    )
}

#[must_use]
pub fn format_classification_csv(c: &Classification, opts: &FormatOptions) -> String {
    let mut output = if opts.no_header {
        String::new()
    } else {
        "value,min,max,status,color,percent\n".to_string()
    };
    output.push_str(&format!(
        "{},{},{},{},{},{:.1}\n",
        c.value,
        c.min,
        c.max,
        c.status.as_str(),
        c.color,
        c.percent
    ));
    output
}

// ============================================================================
// Summary formatting
// ============================================================================

#[must_use]
pub fn format_summary_text(
    summary: &StatusSummary,
    filter: TypeFilter,
    opts: &FormatOptions,
) -> String {
    let mut output = format!("Sensors ({}): {}\n", filter, summary.total);
    for status in Status::ALL {
        let count = summary.count(status);
        output.push_str(&format!(
            "  {:<12} {:>3}  ({:.0}%)\n",
            format_status(status, opts.no_color),
            count,
            summary.fraction(status) * 100.0
        ));
    }
    if let Some(worst) = summary.worst() {
        output.push_str(&format!(
            "Overall: {} {}\n",
            format_status(worst, opts.no_color),
            worst.description()
        ));
    }
    output
}

#[must_use]
pub fn format_summary_csv(summary: &StatusSummary, opts: &FormatOptions) -> String {
    let mut output = if opts.no_header {
        String::new()
    } else {
        "total,normal,warning,critical\n".to_string()
    };
    output.push_str(&format!(
        "{},{},{},{}\n",
        summary.total, summary.normal, summary.warning, summary.critical
    ));
    output
}

pub fn format_summary_json(
    summary: &StatusSummary,
    filter: TypeFilter,
    opts: &FormatOptions,
) -> Result<String> {
    #[derive(Serialize)]
    struct SummaryJson<'a> {
        filter: String,
        #[serde(flatten)]
        summary: &'a StatusSummary,
        worst: Option<Status>,
    }

    opts.as_json(&SummaryJson {
        filter: filter.to_string(),
        summary,
        worst: summary.worst(),
    })
}

// ============================================================================
// History formatting
// ============================================================================

#[must_use]
pub fn format_history_text(sensor: &SensorState, opts: &FormatOptions) -> String {
    let d = &sensor.definition;
    let mut output = format!(
        "{} ({}) - {} readings\n",
        d.name,
        d.id,
        sensor.history.len()
    );
    for reading in &sensor.history {
        output.push_str(&format!(
            "  {}  {:>8.1} {}\n",
            format_timestamp(reading.timestamp),
            reading.value,
            d.unit
        ));
    }
    if let Some(stats) = HistoryStats::from_sensor(sensor) {
        output.push_str(&format!(
            "Current: {:.1}  Average: {:.1}  Max: {:.1}  Min: {:.1} {}\n",
            stats.current, stats.average, stats.maximum, stats.minimum, d.unit
        ));
    }
    output.push_str(&format!(
        "Status: {}\n",
        format_status(sensor.status, opts.no_color)
    ));
    output
}

#[must_use]
pub fn format_history_csv(sensor: &SensorState, opts: &FormatOptions) -> String {
    let mut output = if opts.no_header {
        String::new()
    } else {
        "timestamp,value\n".to_string()
    };
    for reading in &sensor.history {
        output.push_str(&format!(
            "{},{:.1}\n",
            format_timestamp(reading.timestamp),
            reading.value
        ));
    }
    output
}

pub fn format_history_json(sensor: &SensorState, opts: &FormatOptions) -> Result<String> {
    #[derive(Serialize)]
    struct HistoryJson<'a> {
        id: &'a str,
        name: &'a str,
        unit: &'a str,
        status: Status,
        stats: Option<HistoryStats>,
        history: &'a [explorer_types::Reading],
    }

    let d = &sensor.definition;
    opts.as_json(&HistoryJson {
        id: &d.id,
        name: &d.name,
        unit: &d.unit,
        status: sensor.status,
        stats: HistoryStats::from_sensor(sensor),
        history: &sensor.history,
    })
}
