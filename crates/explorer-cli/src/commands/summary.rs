//! Summary command implementation.

use std::path::PathBuf;

use anyhow::Result;
use explorer_core::{Simulator, StatusSummary, TypeFilter, filter_sensors};

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, format_summary_csv, format_summary_json, format_summary_text};
use crate::util::write_output;

pub fn cmd_summary(
    seed: Option<u64>,
    filter: TypeFilter,
    format: OutputFormat,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
) -> Result<()> {
    let snapshot = Simulator::new(seed).initial_snapshot();
    let sensors = filter_sensors(&snapshot.sensors, filter);
    let summary = StatusSummary::from_sensors(&sensors);

    let content = match format {
        OutputFormat::Json => format_summary_json(&summary, filter, opts)?,
        OutputFormat::Csv => format_summary_csv(&summary, opts),
        OutputFormat::Text => format_summary_text(&summary, filter, opts),
    };
    write_output(output, &content)
}
