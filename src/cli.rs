//! CLI argument parsing via `clap`.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "labstat",
    version,
    about = "Snapshot of local host health (systemd units + Docker containers)",
    long_about = "labstat — a one-shot health summary for the local host.\n\nQueries systemd and Docker, classifies anomalies by severity, and prints a compact colorized report. Designed to run at shell login: it never blocks for long and never aborts the caller.\n\nConfiguration precedence: CLI > config.yaml > defaults.",
    after_help = "Examples:\n  labstat\n  labstat --output json\n  labstat --config /etc/labstat/config.yaml --max-items 5"
)]
/// Top-level CLI options. The binary takes no required arguments.
pub struct Cli {
    #[arg(long, help = "Explicit config file (skips the default search paths)")]
    pub config: Option<String>,
    #[arg(long, help = "Output mode: human|json (default: human)")]
    pub output: Option<String>,
    #[arg(long, help = "Max issues to display before truncating (default: 10)")]
    pub max_items: Option<usize>,
    #[arg(long, help = "Per-query deadline in seconds (default: 5)")]
    pub timeout_secs: Option<u64>,
}
