use crate::types::{OutputFormat, SortOrder};
use clap::Parser;

#[derive(Parser)]
#[command(name = "crashtop")]
#[command(about = "Summarize top crashers from a Backtrace telemetry instance", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Backtrace project name (or set BACKTRACE_PROJECT)
    #[arg(long)]
    pub project: Option<String>,

    /// Lookback window in days
    #[arg(long, default_value = "7")]
    pub days: i64,

    /// ISO date for the start of the window (alternative to --days)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub since: Option<String>,

    /// Max number of crash groups to return (1-500)
    #[arg(long, default_value = "25")]
    pub limit: i64,

    /// Minimum crash count to include
    #[arg(long, default_value = "10")]
    pub min_count: i64,

    /// Output format
    #[arg(long, default_value = "markdown")]
    pub format: OutputFormat,

    /// Filter by platform (e.g. Windows, Darwin, Linux, Android)
    #[arg(long)]
    pub platform: Option<String>,

    /// Filter by version prefix (e.g. 1.62.)
    #[arg(long, value_name = "PREFIX")]
    pub version_prefix: Option<String>,

    /// Filter by channel (e.g. stable, beta, nightly)
    #[arg(long)]
    pub channel: Option<String>,

    /// Sort order for single-window results
    #[arg(long, default_value = "count")]
    pub order: SortOrder,

    /// Number of stack frames to show
    #[arg(long, default_value = "8")]
    pub frames: i64,

    /// Only show fingerprints first seen within the lookback window
    #[arg(long)]
    pub new_only: bool,

    /// Regression detection: compare the last N days vs the prior N days
    #[arg(long, value_name = "DAYS")]
    pub compare: Option<i64>,

    /// Print the query JSON and URL (minus token) without executing
    #[arg(long)]
    pub dry_run: bool,

    /// Print request timing and debug info to stderr
    #[arg(long)]
    pub verbose: bool,
}
