//! systemd service health via `systemctl`.
//!
//! Three sub-checks, each behind its own subprocess call: the count of
//! running service units, the list of failed units, and the active
//! state of specifically watched units. Each sub-check degrades to "no
//! data" on failure or timeout.

use crate::checks::Checker;
use crate::config::Effective;
use crate::models::{Issue, Severity, Stats};
use crate::utils::run_with_timeout;

pub struct SystemdChecker;

impl Checker for SystemdChecker {
    fn check(&self, cfg: &Effective) -> (Vec<Issue>, Stats) {
        let mut issues = Vec::new();
        let mut stats = Stats::default();

        if let Some(out) = run_with_timeout(
            "systemctl",
            &[
                "list-units",
                "--type=service",
                "--state=running",
                "--no-legend",
                "--plain",
            ],
            cfg.query_timeout,
        ) {
            stats.services_running = out.lines().filter(|l| !l.trim().is_empty()).count();
        }

        if cfg.show_all_failed {
            if let Some(out) =
                run_with_timeout("systemctl", &["--failed", "--no-legend", "--plain"], cfg.query_timeout)
            {
                let failed = parse_failed_units(&out);
                stats.services_failed = failed.len();
                issues.extend(failed);
            }
        }

        for unit in &cfg.monitor_specific {
            if let Some(out) =
                run_with_timeout("systemctl", &["is-active", unit.as_str()], cfg.query_timeout)
            {
                if let Some(issue) = classify_unit_state(unit, out.trim()) {
                    issues.push(issue);
                }
            }
        }

        (issues, stats)
    }
}

/// Parse `systemctl --failed --no-legend --plain` output. Each line is
/// `UNIT LOAD ACTIVE SUB ...`; the SUB state goes into the message.
/// Lines with fewer than four fields are skipped.
fn parse_failed_units(out: &str) -> Vec<Issue> {
    let mut issues = Vec::new();
    for line in out.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() >= 4 {
            issues.push(Issue {
                severity: Severity::Critical,
                category: "systemd",
                name: parts[0].to_string(),
                message: format!("service {}", parts[3]),
            });
        }
    }
    issues
}

/// Classify a watched unit's `is-active` state. "active" is healthy;
/// "inactive" is a warning; anything else (failed, activating, unknown)
/// is critical. The message is the raw state string.
fn classify_unit_state(unit: &str, state: &str) -> Option<Issue> {
    if state == "active" {
        return None;
    }
    let severity = if state == "inactive" {
        Severity::Warning
    } else {
        Severity::Critical
    };
    Some(Issue {
        severity,
        category: "systemd",
        name: unit.to_string(),
        message: state.to_string(),
    })
}
