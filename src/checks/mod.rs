//! Health checkers: a shared contract and two data-source adapters.
//!
//! Each checker queries one external source (systemd, Docker) and emits
//! issues plus partial stats. Checkers are best-effort: a missing
//! binary, a dead daemon, or a slow query contributes nothing for that
//! sub-check and never surfaces as an error.

pub mod docker;
pub mod systemd;

use crate::config::Effective;
use crate::models::{Issue, Stats};

/// Contract shared by all data-source adapters.
pub trait Checker {
    fn check(&self, cfg: &Effective) -> (Vec<Issue>, Stats);
}

/// Run every checker in sequence, concatenating issues in discovery
/// order and merging stats by addition.
pub fn run_all(cfg: &Effective) -> (Vec<Issue>, Stats) {
    let checkers: Vec<Box<dyn Checker>> = vec![
        Box::new(systemd::SystemdChecker),
        Box::new(docker::DockerChecker),
    ];

    let mut issues = Vec::new();
    let mut stats = Stats::default();
    for checker in &checkers {
        let (found, partial) = checker.check(cfg);
        issues.extend(found);
        stats.merge(&partial);
    }
    (issues, stats)
}
