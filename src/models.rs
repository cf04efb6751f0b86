//! Shared data models for collected issues and aggregate stats.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
/// Ordinal severity of a detected issue. Rank drives sort precedence
/// (critical first) and the human printer's color/icon choice.
pub enum Severity {
    Critical,
    Warning,
    Info,
    Ok,
}

impl Severity {
    /// Sort rank: critical=0, warning=1, info=2, ok=3.
    pub fn rank(self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::Warning => 1,
            Severity::Info => 2,
            Severity::Ok => 3,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Severity::Critical => "✗",
            Severity::Warning => "⚠",
            Severity::Info => "ℹ",
            Severity::Ok => "✓",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// One detected anomaly. Created by a checker, consumed once by the
/// reporter; no identity beyond field equality.
pub struct Issue {
    pub severity: Severity,
    /// Source name, e.g. "systemd" or "docker".
    pub category: &'static str,
    /// Resource identifier (unit or container name).
    pub name: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
/// Resource counters, additively merged across checkers.
pub struct Stats {
    pub services_running: usize,
    pub services_failed: usize,
    pub containers_running: usize,
    pub containers_stopped: usize,
    pub containers_unhealthy: usize,
}

impl Stats {
    /// Field-wise addition.
    pub fn merge(&mut self, other: &Stats) {
        self.services_running += other.services_running;
        self.services_failed += other.services_failed;
        self.containers_running += other.containers_running;
        self.containers_stopped += other.containers_stopped;
        self.containers_unhealthy += other.containers_unhealthy;
    }
}
