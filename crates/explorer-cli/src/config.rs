//! Configuration file management.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use explorer_core::RefreshInterval;
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Default watch interval in seconds
    #[serde(default)]
    pub interval: Option<u64>,

    /// Default output format
    #[serde(default)]
    pub format: Option<String>,

    /// Disable colored output
    #[serde(default)]
    pub no_color: bool,

    /// Default random seed
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Config {
    /// Get the config file path
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("explorer")
            .join("config.toml")
    }

    /// Load config from the default path, or return default if not found
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    /// Load config from `path`, or return default if missing or unreadable
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config: {}", e);
                    }
                },
                Err(e) => {
                    eprintln!("Warning: Failed to read config: {}", e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path())
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Set a key from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "interval" => {
                let secs: u64 = value
                    .parse()
                    .with_context(|| format!("Invalid interval: {}", value))?;
                RefreshInterval::new(secs)?;
                self.interval = Some(secs);
            }
            "format" => {
                let format = OutputFormat::from_str(value, true)
                    .map_err(|_| anyhow::anyhow!("Invalid format: {} (text, json, csv)", value))?;
                self.format = Some(format_name(format).to_string());
            }
            "no_color" => {
                self.no_color = value
                    .parse()
                    .with_context(|| format!("Invalid boolean: {}", value))?;
            }
            "seed" => {
                let seed: u64 = value
                    .parse()
                    .with_context(|| format!("Invalid seed: {}", value))?;
                self.seed = Some(seed);
            }
            _ => bail!("Unknown config key: {} (interval, format, no_color, seed)", key),
        }
        Ok(())
    }

    /// Reset a key to its default.
    pub fn unset(&mut self, key: &str) -> Result<()> {
        match key {
            "interval" => self.interval = None,
            "format" => self.format = None,
            "no_color" => self.no_color = false,
            "seed" => self.seed = None,
            _ => bail!("Unknown config key: {} (interval, format, no_color, seed)", key),
        }
        Ok(())
    }
}

fn format_name(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Text => "text",
        OutputFormat::Json => "json",
        OutputFormat::Csv => "csv",
    }
}

/// Resolve output format: explicit flag, then config, then text.
pub fn resolve_format(flag: Option<OutputFormat>, config: &Config) -> OutputFormat {
    flag.or_else(|| {
        config
            .format
            .as_deref()
            .and_then(|f| OutputFormat::from_str(f, true).ok())
    })
    .unwrap_or_default()
}

/// Resolve seed: explicit flag (or env var), then config.
pub fn resolve_seed(flag: Option<u64>, config: &Config) -> Option<u64> {
    flag.or(config.seed)
}

/// Resolve the watch interval: explicit flag, then config, then the default.
pub fn resolve_interval(flag: Option<u64>, config: &Config) -> Result<RefreshInterval> {
    match flag.or(config.interval) {
        Some(secs) => Ok(RefreshInterval::new(secs)?),
        None => Ok(RefreshInterval::default()),
    }
}
