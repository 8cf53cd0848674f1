//! Config command implementation.

use anyhow::{Context, Result};

use crate::cli::ConfigAction;
use crate::config::Config;

pub fn cmd_config(action: ConfigAction, quiet: bool) -> Result<()> {
    let path = Config::path();
    match action {
        ConfigAction::Path => {
            println!("{}", path.display());
        }
        ConfigAction::Show => {
            let config = Config::load();
            let content = toml::to_string_pretty(&config).context("Failed to serialize config")?;
            if !quiet {
                eprintln!("# {}", path.display());
            }
            print!("{}", content);
        }
        ConfigAction::Init => {
            if path.exists() {
                if !quiet {
                    eprintln!("Config already exists: {}", path.display());
                }
            } else {
                Config::default().save()?;
                if !quiet {
                    eprintln!("Created config: {}", path.display());
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load();
            config.set(&key, &value)?;
            config.save()?;
            if !quiet {
                eprintln!("Set {} = {}", key, value);
            }
        }
        ConfigAction::Unset { key } => {
            let mut config = Config::load();
            config.unset(&key)?;
            config.save()?;
            if !quiet {
                eprintln!("Unset {}", key);
            }
        }
    }
    Ok(())
}
