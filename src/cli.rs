//! Command-line interface parsing for the Lunch Money widget

use clap::Parser;

/// Lunch Glance - a terminal widget for your Lunch Money monthly summary
#[derive(Parser, Debug)]
#[command(name = "lunchglance")]
#[command(about = "Lunch Money month-to-date summary widget")]
#[command(version)]
pub struct Cli {
    /// Skip the cached snapshot and fetch fresh data for this run
    ///
    /// The snapshot is normally reused for two hours. With --refresh the
    /// cache read is skipped; the fresh result is still written back.
    #[arg(long)]
    pub refresh: bool,
}
