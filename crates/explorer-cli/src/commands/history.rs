//! History command implementation.

use std::path::PathBuf;

use anyhow::{Result, bail};
use explorer_core::Simulator;

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, format_history_csv, format_history_json, format_history_text};
use crate::util::write_output;

pub fn cmd_history(
    id: &str,
    seed: Option<u64>,
    format: OutputFormat,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
) -> Result<()> {
    let snapshot = Simulator::new(seed).initial_snapshot();
    let Some(sensor) = snapshot.sensor(id) else {
        let known: Vec<&str> = snapshot.sensors.iter().map(|s| s.id()).collect();
        bail!("Unknown sensor: {} (known: {})", id, known.join(", "));
    };

    let content = match format {
        OutputFormat::Json => format_history_json(sensor, opts)?,
        OutputFormat::Csv => format_history_csv(sensor, opts),
        OutputFormat::Text => format_history_text(sensor, opts),
    };
    write_output(output, &content)
}
