//! Command implementations for the CLI.

mod classify;
mod config;
mod history;
mod read;
mod summary;
mod watch;

pub use classify::cmd_classify;
pub use config::cmd_config;
pub use history::cmd_history;
pub use read::{cmd_read, render_snapshot};
pub use summary::cmd_summary;
pub use watch::{WatchArgs, cmd_watch, stream_snapshots};
