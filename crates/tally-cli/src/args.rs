use crate::types::{LogLevel, OutputFormat};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Browse TV show schedules in a frozen-pane terminal grid", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory (default: $TALLY_DATA_DIR, then the platform data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "info", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Window selection shared by every command that fetches a guide window.
/// Unset values fall back to config.toml, then to built-in defaults.
#[derive(Args, Debug, Clone)]
pub struct WindowArgs {
    /// Anchor date (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub anchor: Option<NaiveDate>,

    /// Days before the anchor
    #[arg(long)]
    pub back: Option<u32>,

    /// Days after the anchor
    #[arg(long)]
    pub forward: Option<u32>,

    /// Country code passed to the feed
    #[arg(long)]
    pub country: Option<String>,

    /// Serve a stored snapshot by name instead of the newest one
    #[arg(long)]
    pub snapshot: Option<String>,

    /// Serve the bundled sample dataset, ignoring stored snapshots
    #[arg(long)]
    pub sample: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up the data directory, config, and a starter snapshot
    Init {
        /// Regenerate the starter snapshot even if one exists
        #[arg(long)]
        refresh: bool,
    },

    /// Summarize the guide window: axis, provider spans, data quality
    Window {
        #[command(flatten)]
        window: WindowArgs,
    },

    /// List placed episodes day by day
    Schedule {
        #[command(flatten)]
        window: WindowArgs,
    },

    /// Export placed episodes (CSV with --format plain, JSON with --format json)
    Export {
        #[command(flatten)]
        window: WindowArgs,

        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Open the interactive frozen-pane guide
    Guide {
        #[command(flatten)]
        window: WindowArgs,

        /// Reload when the serving snapshot file changes on disk
        #[arg(long)]
        watch: bool,
    },
}
