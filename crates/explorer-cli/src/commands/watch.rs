//! Watch command implementation.
//!
//! Drives a background refresher and prints the initial snapshot followed by
//! every tick it publishes.

use std::future::Future;
use std::path::PathBuf;

use anyhow::Result;
use explorer_core::{RefreshInterval, Refresher, RefresherHandle, Simulator, TypeFilter};
use owo_colors::OwoColorize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::cli::OutputFormat;
use crate::commands::render_snapshot;
use crate::format::FormatOptions;
use crate::util::{append_output, write_output};

/// Arguments for the watch command.
pub struct WatchArgs<'a> {
    pub seed: Option<u64>,
    pub filter: TypeFilter,
    pub interval: RefreshInterval,
    pub count: u32,
    pub format: OutputFormat,
    pub output: Option<&'a PathBuf>,
    pub quiet: bool,
    pub opts: &'a FormatOptions,
}

pub async fn cmd_watch(args: WatchArgs<'_>) -> Result<()> {
    let WatchArgs {
        seed,
        filter,
        interval,
        count,
        format,
        output,
        quiet,
        opts,
    } = args;

    if !quiet {
        let header = if opts.no_color {
            format!("Watching: {} sensors", filter)
        } else {
            format!("Watching: {} sensors", filter.to_string().green())
        };
        eprintln!("{}", header);
        if count > 0 {
            eprintln!(
                "Interval: {} | Count: {} | Press Ctrl+C to stop",
                interval, count
            );
        } else {
            eprintln!("Interval: {} | Press Ctrl+C to stop", interval);
        }
        eprintln!("{}", "-".repeat(50));
    }

    let handle = Refresher::spawn(Simulator::new(seed), interval, CancellationToken::new());

    let mut first = true;
    let shutdown = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                if !quiet {
                    eprintln!("\nShutting down...");
                }
            }
            Err(e) => {
                warn!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };
    let ticks = stream_snapshots(&handle, filter, format, count, opts, shutdown, |chunk| {
        // The first chunk replaces the file, later ones append to it
        if first {
            first = false;
            write_output(output, chunk)
        } else {
            append_output(output, chunk)
        }
    })
    .await;

    handle.shutdown().await;
    let ticks = ticks?;

    if !quiet && count > 0 && ticks >= count {
        eprintln!("Completed {} ticks.", ticks);
    }
    Ok(())
}

/// Render the current snapshot and then each published tick into `sink`.
///
/// Stops after `count` ticks (0 for unlimited), when `shutdown` resolves, or
/// when the refresher stops. Returns the number of ticks rendered. CSV
/// output carries a single header before the first snapshot.
pub async fn stream_snapshots<F, S>(
    handle: &RefresherHandle,
    filter: TypeFilter,
    format: OutputFormat,
    count: u32,
    opts: &FormatOptions,
    shutdown: F,
    mut sink: S,
) -> Result<u32>
where
    F: Future<Output = ()>,
    S: FnMut(&str) -> Result<()>,
{
    let mut rx = handle.subscribe();
    let mut opts = *opts;
    if format == OutputFormat::Json {
        // One snapshot per line
        opts.compact = true;
    }

    let initial = rx.borrow_and_update().clone();
    sink(&render_snapshot(&initial, filter, format, &opts)?)?;
    if format == OutputFormat::Csv {
        opts.no_header = true;
    }

    tokio::pin!(shutdown);
    let mut ticks: u32 = 0;
    while count == 0 || ticks < count {
        tokio::select! {
            _ = &mut shutdown => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    debug!("Refresher stopped, ending watch");
                    break;
                }
                let snapshot = rx.borrow_and_update().clone();
                ticks += 1;
                sink(&render_snapshot(&snapshot, filter, format, &opts)?)?;
            }
        }
    }
    Ok(ticks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use explorer_core::ManualClock;
    use time::macros::datetime;

    fn spawn(secs: u64) -> RefresherHandle {
        let clock = Arc::new(ManualClock::with_step(
            datetime!(2025-06-19 12:00 UTC),
            time::Duration::seconds(1),
        ));
        let simulator = Simulator::seeded(8).with_clock(clock);
        Refresher::spawn(
            simulator,
            RefreshInterval::new(secs).unwrap(),
            CancellationToken::new(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_stream_stops_after_count() {
        let handle = spawn(1);
        let opts = FormatOptions::new(true);
        let mut chunks = Vec::new();

        let ticks = stream_snapshots(
            &handle,
            TypeFilter::All,
            OutputFormat::Json,
            3,
            &opts,
            std::future::pending(),
            |chunk| {
                chunks.push(chunk.to_string());
                Ok(())
            },
        )
        .await
        .unwrap();

        assert_eq!(ticks, 3);
        assert_eq!(chunks.len(), 4);
        for (generation, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.lines().count(), 1);
            let value: serde_json::Value = serde_json::from_str(chunk).unwrap();
            assert_eq!(value["generation"], generation as u64);
        }
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_csv_header_written_once() {
        let handle = spawn(5);
        let opts = FormatOptions::new(true);
        let mut output = String::new();

        stream_snapshots(
            &handle,
            TypeFilter::All,
            OutputFormat::Csv,
            2,
            &opts,
            std::future::pending(),
            |chunk| {
                output.push_str(chunk);
                Ok(())
            },
        )
        .await
        .unwrap();

        let headers = output.lines().filter(|l| l.starts_with("generation,")).count();
        assert_eq!(headers, 1);
        // Header plus five sensors for each of three snapshots
        assert_eq!(output.lines().count(), 1 + 5 * 3);
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_ends_stream() {
        let handle = spawn(60);
        let opts = FormatOptions::new(true);
        let mut chunks = 0;

        let ticks = stream_snapshots(
            &handle,
            TypeFilter::All,
            OutputFormat::Text,
            0,
            &opts,
            tokio::time::sleep(Duration::from_secs(30)),
            |_| {
                chunks += 1;
                Ok(())
            },
        )
        .await
        .unwrap();

        assert_eq!(ticks, 0);
        assert_eq!(chunks, 1);
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_refresher_ends_stream() {
        let handle = spawn(1);
        handle.cancel_token().cancel();
        let opts = FormatOptions::new(true);

        let ticks = stream_snapshots(
            &handle,
            TypeFilter::All,
            OutputFormat::Text,
            0,
            &opts,
            std::future::pending(),
            |_| Ok(()),
        )
        .await
        .unwrap();

        assert_eq!(ticks, 0);
    }
}
