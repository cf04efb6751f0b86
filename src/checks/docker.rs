//! Docker container health.
//!
//! Two probe paths produce the same normalized `ContainerRecord`s: the
//! Docker Engine API via bollard (preferred), and `docker ps` parsing
//! as a fallback when the daemon socket is unreachable. Classification
//! into issues and stats is shared between the paths. A host without
//! Docker yields no records at all.

use std::collections::HashSet;
use std::time::Duration;

use bollard::container::ListContainersOptions;
use bollard::models::HealthStatusEnum;
use bollard::Docker;

use crate::checks::Checker;
use crate::config::Effective;
use crate::models::{Issue, Severity, Stats};
use crate::utils::run_with_timeout;

/// Normalized view of one container, independent of probe path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRecord {
    pub name: String,
    /// Lifecycle state: running/exited/dead/restarting/...
    pub state: String,
    pub unhealthy: bool,
}

pub struct DockerChecker;

impl Checker for DockerChecker {
    fn check(&self, cfg: &Effective) -> (Vec<Issue>, Stats) {
        if !cfg.docker_enabled {
            return (Vec::new(), Stats::default());
        }
        let records = probe_native(cfg.query_timeout)
            .or_else(|| probe_cli(cfg.query_timeout));
        match records {
            Some(records) => classify(&records, cfg),
            None => (Vec::new(), Stats::default()),
        }
    }
}

/// Preferred path: the Engine API over the local socket. Lists all
/// containers and inspects each for its health-check status. `None`
/// when the socket is unreachable or a call exceeds the deadline.
fn probe_native(timeout: Duration) -> Option<Vec<ContainerRecord>> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .ok()?;
    rt.block_on(async {
        let docker = Docker::connect_with_local_defaults().ok()?;
        let opts = ListContainersOptions::<String> {
            all: true,
            ..Default::default()
        };
        let list = tokio::time::timeout(timeout, docker.list_containers(Some(opts)))
            .await
            .ok()?
            .ok()?;

        let mut records = Vec::new();
        for summary in list {
            let name = summary
                .names
                .and_then(|names| names.into_iter().next())
                .map(|n| n.trim_start_matches('/').to_string())
                .unwrap_or_default();
            let state = summary.state.unwrap_or_default();
            // Health lives in the inspect payload, not the list summary.
            // An inspect failure for one container just means no health
            // signal for it.
            let unhealthy = match summary.id {
                Some(id) => {
                    match tokio::time::timeout(timeout, docker.inspect_container(&id, None)).await
                    {
                        Ok(Ok(inspect)) => matches!(
                            inspect.state.and_then(|s| s.health).and_then(|h| h.status),
                            Some(HealthStatusEnum::UNHEALTHY)
                        ),
                        _ => false,
                    }
                }
                None => false,
            };
            records.push(ContainerRecord {
                name,
                state,
                unhealthy,
            });
        }
        Some(records)
    })
}

/// Fallback path: `docker ps -a` with a tab-separated format string.
/// `None` when the binary is missing or the call exceeds the deadline.
fn probe_cli(timeout: Duration) -> Option<Vec<ContainerRecord>> {
    let out = run_with_timeout(
        "docker",
        &["ps", "-a", "--format", "{{.Names}}\t{{.Status}}\t{{.State}}"],
        timeout,
    )?;
    Some(out.lines().filter_map(parse_cli_line).collect())
}

/// Parse one `NAME<TAB>STATUS<TAB>STATE` line. Health is inferred from
/// a case-insensitive "unhealthy" substring in the status text, e.g.
/// "Up 2 hours (unhealthy)". Malformed lines are skipped.
fn parse_cli_line(line: &str) -> Option<ContainerRecord> {
    let mut parts = line.split('\t');
    let name = parts.next()?;
    let status = parts.next()?;
    let state = parts.next()?;
    if name.is_empty() {
        return None;
    }
    Some(ContainerRecord {
        name: name.to_string(),
        state: state.to_string(),
        unhealthy: status.to_lowercase().contains("unhealthy"),
    })
}

/// Turn records into issues and stats, honoring the ignore list. At
/// most one issue per container; emission precedence is stopped, dead,
/// unhealthy, restarting.
fn classify(records: &[ContainerRecord], cfg: &Effective) -> (Vec<Issue>, Stats) {
    let ignore: HashSet<&str> = cfg.docker_ignore.iter().map(String::as_str).collect();
    let mut issues = Vec::new();
    let mut stats = Stats::default();

    for record in records {
        if ignore.contains(record.name.as_str()) {
            continue;
        }

        match record.state.as_str() {
            "running" => stats.containers_running += 1,
            "exited" => stats.containers_stopped += 1,
            _ => {}
        }
        if record.unhealthy {
            stats.containers_unhealthy += 1;
        }

        let issue = if record.state == "exited" && cfg.show_stopped {
            Some((Severity::Warning, "container stopped (exited)"))
        } else if record.state == "dead" {
            Some((Severity::Critical, "container dead"))
        } else if record.unhealthy && cfg.show_unhealthy {
            Some((Severity::Critical, "health check failed"))
        } else if record.state == "restarting" {
            Some((Severity::Warning, "container restarting"))
        } else {
            None
        };
        if let Some((severity, message)) = issue {
            issues.push(Issue {
                severity,
                category: "docker",
                name: record.name.clone(),
                message: message.to_string(),
            });
        }
    }

    (issues, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::config::{resolve_effective, FileConfig};

    fn effective() -> Effective {
        let cli = Cli {
            config: None,
            output: None,
            max_items: None,
            timeout_secs: None,
        };
        resolve_effective(&cli, &FileConfig::default())
    }

    fn record(name: &str, state: &str, unhealthy: bool) -> ContainerRecord {
        ContainerRecord {
            name: name.to_string(),
            state: state.to_string(),
            unhealthy,
        }
    }

    #[test]
    fn test_counts_running_stopped_unhealthy() {
        let records = vec![
            record("web", "running", false),
            record("db", "running", true),
            record("old", "exited", false),
        ];
        let (_, stats) = classify(&records, &effective());
        assert_eq!(stats.containers_running, 2);
        assert_eq!(stats.containers_stopped, 1);
        assert_eq!(stats.containers_unhealthy, 1);
    }

    #[test]
    fn test_ignored_container_contributes_nothing() {
        let records = vec![record("scratch", "dead", true)];
        let mut cfg = effective();
        cfg.docker_ignore = vec!["scratch".to_string()];
        let (issues, stats) = classify(&records, &cfg);
        assert!(issues.is_empty());
        assert_eq!(stats, Stats::default());
    }

    #[test]
    fn test_dead_beats_unhealthy() {
        let records = vec![record("web", "dead", true)];
        let (issues, stats) = classify(&records, &effective());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Critical);
        assert_eq!(issues[0].message, "container dead");
        // The unhealthy counter still ticks even though no unhealthy
        // issue is emitted.
        assert_eq!(stats.containers_unhealthy, 1);
    }

    #[test]
    fn test_stopped_container_is_warning() {
        let records = vec![record("old", "exited", false)];
        let (issues, _) = classify(&records, &effective());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[0].message, "container stopped (exited)");
    }

    #[test]
    fn test_show_stopped_false_suppresses_exited_issue() {
        let records = vec![record("old", "exited", false)];
        let mut cfg = effective();
        cfg.show_stopped = false;
        let (issues, stats) = classify(&records, &cfg);
        assert!(issues.is_empty());
        assert_eq!(stats.containers_stopped, 1);
    }

    #[test]
    fn test_unhealthy_running_container_is_critical() {
        let records = vec![record("db", "running", true)];
        let (issues, _) = classify(&records, &effective());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Critical);
        assert_eq!(issues[0].message, "health check failed");
    }

    #[test]
    fn test_restarting_container_is_warning() {
        let records = vec![record("flaky", "restarting", false)];
        let (issues, _) = classify(&records, &effective());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[0].message, "container restarting");
    }

    #[test]
    fn test_healthy_running_container_emits_nothing() {
        let records = vec![record("web", "running", false)];
        let (issues, _) = classify(&records, &effective());
        assert!(issues.is_empty());
    }

    #[test]
    fn test_parse_cli_line() {
        let rec = parse_cli_line("web\tUp 2 hours (unhealthy)\trunning").unwrap();
        assert_eq!(rec.name, "web");
        assert_eq!(rec.state, "running");
        assert!(rec.unhealthy);

        let rec = parse_cli_line("old\tExited (0) 3 days ago\texited").unwrap();
        assert!(!rec.unhealthy);
        assert_eq!(rec.state, "exited");
    }

    #[test]
    fn test_parse_cli_line_rejects_malformed() {
        assert!(parse_cli_line("").is_none());
        assert!(parse_cli_line("only-name").is_none());
        assert!(parse_cli_line("name\tstatus-without-state").is_none());
    }
}
