//! Command-line interface for the explorer vehicle sensor simulation.
//!
//! The CLI runs the same simulation engine as the dashboard service, locally
//! and without a server, so sensor sets can be inspected from a terminal or
//! piped into other tools.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `read` | Print the initial sensor set |
//! | `watch` | Run the refresher and print every tick |
//! | `classify` | Classify a value against a range |
//! | `summary` | Count sensors per status |
//! | `history` | History window and statistics for one sensor |
//! | `config` | Manage CLI configuration |
//!
//! # Output Formats
//!
//! - **Text** (default): Human-readable colored output
//! - **JSON**: Machine-readable JSON (one compact object per tick in `watch`)
//! - **CSV**: Comma-separated values for spreadsheets and data analysis
//!
//! # Configuration
//!
//! The CLI stores configuration in `~/.config/explorer/config.toml` (or
//! platform equivalent):
//!
//! - `interval`: Default watch interval in seconds
//! - `format`: Default output format
//! - `no_color`: Disable colored output
//! - `seed`: Default random seed
//!
//! # Environment Variables
//!
//! - `EXPLORER_SEED`: Default seed (overridden by `--seed`)
//! - `NO_COLOR`: Disable colored output when set
//!
//! # Examples
//!
//! ```bash
//! explorer read --type gas --seed 42
//! explorer watch --interval 1 --count 10 --format csv --output ticks.csv
//! explorer classify 95 --min 0 --max 100
//! explorer history s002 --format json
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod format;
pub mod util;

// Re-export core dependencies for convenience
pub use explorer_core;
pub use explorer_types;
