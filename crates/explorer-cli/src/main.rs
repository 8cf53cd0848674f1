use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use explorer_cli::cli::{Cli, Commands};
use explorer_cli::commands::{
    WatchArgs, cmd_classify, cmd_config, cmd_history, cmd_read, cmd_summary, cmd_watch,
};
use explorer_cli::config::{Config, resolve_format, resolve_interval, resolve_seed};
use explorer_cli::format::FormatOptions;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // When quiet mode is enabled, suppress info-level logging
    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load();
    let no_color = cli.no_color || config.no_color;
    let base_opts = FormatOptions::new(no_color).with_compact(cli.compact);
    let output = cli.output.as_ref();

    if let Some(path) = output {
        tracing::debug!("Output will be written to: {}", path.display());
    }

    match cli.command {
        Commands::Read { sim, output: out } => {
            let opts = base_opts.with_no_header(out.no_header);
            cmd_read(
                resolve_seed(sim.seed, &config),
                sim.sensor_type,
                resolve_format(out.format, &config),
                output,
                &opts,
            )?;
        }
        Commands::Watch {
            interval,
            count,
            sim,
            output: out,
        } => {
            let opts = base_opts.with_no_header(out.no_header);
            cmd_watch(WatchArgs {
                seed: resolve_seed(sim.seed, &config),
                filter: sim.sensor_type,
                interval: resolve_interval(interval, &config)?,
                count,
                format: resolve_format(out.format, &config),
                output,
                quiet: cli.quiet,
                opts: &opts,
            })
            .await?;
        }
        Commands::Classify {
            value,
            min,
            max,
            output: out,
        } => {
            let opts = base_opts.with_no_header(out.no_header);
            cmd_classify(
                value,
                min,
                max,
                resolve_format(out.format, &config),
                output,
                &opts,
            )?;
        }
        Commands::Summary { sim, output: out } => {
            let opts = base_opts.with_no_header(out.no_header);
            cmd_summary(
                resolve_seed(sim.seed, &config),
                sim.sensor_type,
                resolve_format(out.format, &config),
                output,
                &opts,
            )?;
        }
        Commands::History {
            id,
            seed,
            output: out,
        } => {
            let opts = base_opts.with_no_header(out.no_header);
            cmd_history(
                &id,
                resolve_seed(seed, &config),
                resolve_format(out.format, &config),
                output,
                &opts,
            )?;
        }
        Commands::Config { action } => {
            cmd_config(action, cli.quiet)?;
        }
    }

    Ok(())
}
