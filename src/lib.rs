//! Labstat core library.
//!
//! A one-shot health summarizer for the local host: queries systemd
//! units and Docker containers, classifies anomalies by severity, and
//! renders a compact colorized report for shell login.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: File discovery and effective configuration resolution.
//! - `models`: Severity, issue, and stats value types.
//! - `checks`: Checker trait plus the systemd and docker adapters.
//! - `report`: Severity-stable sort, truncation, summary composition.
//! - `output`: Human/JSON printers.
//! - `utils`: Deadline-bounded subprocess runner and stderr prefixes.
pub mod checks;
pub mod cli;
pub mod config;
pub mod models;
pub mod output;
pub mod report;
pub mod utils;
