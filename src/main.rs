//! Labstat CLI binary entry point.
//!
//! Runs once and exits: load config, run the checkers, print the
//! report. Exit code 0 regardless of how many issues were found; any
//! unexpected internal error becomes one stderr warning line and a
//! non-zero exit so a caller's shell startup never sees a panic.

mod checks;
mod cli;
mod config;
mod models;
mod output;
mod report;
mod utils;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("{} health check error: {}", utils::warn_prefix(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let file_cfg = config::load_config(cli.config.as_deref())?;
    let eff = config::resolve_effective(cli, &file_cfg);

    let (issues, stats) = checks::run_all(&eff);
    let report = report::build_report(issues, stats, eff.max_items);
    output::print_report(&report, &eff.output);
    Ok(())
}
