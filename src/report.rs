//! Report assembly: severity-stable ordering, display truncation, and
//! summary composition. Pure over collected issues and merged stats so
//! the printers stay trivial.

use crate::models::{Issue, Stats};

/// Everything the printers need for one run.
#[derive(Debug)]
pub struct Report {
    /// Non-zero running counts, e.g. ["3 services", "5 containers"].
    pub summary_parts: Vec<String>,
    /// Total issues found, before truncation.
    pub issues_total: usize,
    /// Issues retained for display, sorted critical-first.
    pub shown: Vec<Issue>,
    /// How many issues were cut by the display limit.
    pub omitted: usize,
    pub stats: Stats,
}

impl Report {
    pub fn all_clear(&self) -> bool {
        self.issues_total == 0
    }
}

/// Sort issues by severity rank (stable, so discovery order survives
/// within a tier), truncate to `max_items`, and derive the summary
/// parts from the running counts.
pub fn build_report(mut issues: Vec<Issue>, stats: Stats, max_items: usize) -> Report {
    issues.sort_by_key(|issue| issue.severity.rank());

    let issues_total = issues.len();
    let omitted = issues_total.saturating_sub(max_items);
    issues.truncate(max_items);

    let mut summary_parts = Vec::new();
    if stats.services_running > 0 {
        summary_parts.push(format!("{} services", stats.services_running));
    }
    if stats.containers_running > 0 {
        summary_parts.push(format!("{} containers", stats.containers_running));
    }

    Report {
        summary_parts,
        issues_total,
        shown: issues,
        omitted,
        stats,
    }
}
