//! Classify command implementation.

use std::path::PathBuf;

use anyhow::{Result, bail};

use crate::cli::OutputFormat;
use crate::format::{
    Classification, FormatOptions, format_classification_csv, format_classification_text,
};
use crate::util::write_output;

pub fn cmd_classify(
    value: f64,
    min: f64,
    max: f64,
    format: OutputFormat,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
) -> Result<()> {
    if !value.is_finite() || !min.is_finite() || !max.is_finite() {
        bail!("Value and range bounds must be finite numbers");
    }
    if min >= max {
        bail!("Invalid range: --min ({}) must be less than --max ({})", min, max);
    }

    let classification = Classification::new(value, min, max);
    let content = match format {
        OutputFormat::Json => opts.as_json(&classification)?,
        OutputFormat::Csv => format_classification_csv(&classification, opts),
        OutputFormat::Text => format_classification_text(&classification, opts),
    };
    write_output(output, &content)
}
