//! Read command implementation.

use std::path::PathBuf;

use anyhow::Result;
use explorer_core::{Simulator, Snapshot, TypeFilter, filter_sensors};
use tracing::debug;

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, format_sensors_csv, format_sensors_json, format_sensors_text};
use crate::util::write_output;

pub fn cmd_read(
    seed: Option<u64>,
    filter: TypeFilter,
    format: OutputFormat,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
) -> Result<()> {
    let snapshot = Simulator::new(seed).initial_snapshot();
    debug!(filter = %filter, "Read initial snapshot");

    let content = render_snapshot(&snapshot, filter, format, opts)?;
    write_output(output, &content)
}

/// Render the sensors of `snapshot` that pass `filter`.
pub fn render_snapshot(
    snapshot: &Snapshot,
    filter: TypeFilter,
    format: OutputFormat,
    opts: &FormatOptions,
) -> Result<String> {
    let sensors = filter_sensors(&snapshot.sensors, filter);
    Ok(match format {
        OutputFormat::Json => format_sensors_json(snapshot, &sensors, opts)?,
        OutputFormat::Csv => format_sensors_csv(snapshot, &sensors, opts),
        OutputFormat::Text => format_sensors_text(snapshot, &sensors, opts),
    })
}
