//! Report rendering.
//!
//! Supports `human` (default, ANSI-colored) and `json` outputs. The
//! JSON form carries the stats summary, the retained issues, and the
//! omitted count.

use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

use crate::models::{Issue, Severity};
use crate::report::Report;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

/// Print the report in the requested format.
pub fn print_report(report: &Report, output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_report_json(report)).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            if let Some(line) = summary_line(report, color) {
                println!("{}", line);
            }
            for issue in &report.shown {
                println!("{}", format_issue(issue, color));
            }
            if report.omitted > 0 {
                let notice = format!("... and {} more issue(s)", report.omitted);
                if color {
                    println!("{}", notice.blue());
                } else {
                    println!("{}", notice);
                }
            }
        }
    }
}

/// One-line summary, or `None` when there is nothing to report: no
/// issues and no running resources.
pub fn summary_line(report: &Report, color: bool) -> Option<String> {
    if report.summary_parts.is_empty() && report.all_clear() {
        return None;
    }
    let joined = report.summary_parts.join(" • ");
    if report.all_clear() {
        let line = format!("✓ {} running", joined);
        return Some(if color {
            line.bright_black().to_string()
        } else {
            line
        });
    }
    let word = if report.issues_total == 1 {
        "issue"
    } else {
        "issues"
    };
    let count = format!("{} {}", report.issues_total, word);
    let count = if color {
        count.yellow().bold().to_string()
    } else {
        count
    };
    if joined.is_empty() {
        Some(count)
    } else {
        let lead = if color {
            joined.bright_black().to_string()
        } else {
            joined
        };
        Some(format!("{} • {}", lead, count))
    }
}

/// `<icon> <category>: <name> - <message>`, tinted by severity.
pub fn format_issue(issue: &Issue, color: bool) -> String {
    let line = format!(
        "{} {}: {} - {}",
        issue.severity.icon(),
        issue.category,
        issue.name,
        issue.message
    );
    if !color {
        return line;
    }
    match issue.severity {
        Severity::Critical => line.red().to_string(),
        Severity::Warning => line.yellow().to_string(),
        Severity::Info => line.blue().to_string(),
        Severity::Ok => line.green().to_string(),
    }
}

/// Compose the report JSON object (pure) for testing purposes.
pub fn compose_report_json(report: &Report) -> JsonVal {
    json!({
        "summary": {
            "services_running": report.stats.services_running,
            "services_failed": report.stats.services_failed,
            "containers_running": report.stats.containers_running,
            "containers_stopped": report.stats.containers_stopped,
            "containers_unhealthy": report.stats.containers_unhealthy,
            "issues_total": report.issues_total,
        },
        "issues": report.shown,
        "omitted": report.omitted,
    })
}
