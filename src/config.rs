//! Configuration discovery and effective settings resolution.
//!
//! Labstat reads an optional `config.yaml` from the first of three
//! locations: beside the executable, `/etc/labstat/config.yaml`, or
//! `$HOME/.config/labstat/config.yaml`. Missing files mean built-in
//! defaults. An explicit `--config` path bypasses the search and must
//! exist.
//!
//! Defaults:
//! - `systemd.show_all_failed`: true
//! - `systemd.monitor_specific`: []
//! - `docker.enabled|show_stopped|show_unhealthy`: true
//! - `docker.ignore`: []
//! - `display.show_ok_status`: false (reserved, currently unused)
//! - `display.max_items`: 10
//! - query timeout: 5 seconds
//!
//! Overrides precedence: CLI > config file > defaults.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::Cli;

#[derive(Debug, Default, Deserialize, Clone)]
/// `systemd:` section of the config file.
pub struct SystemdCfg {
    pub show_all_failed: Option<bool>,
    pub monitor_specific: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// `docker:` section of the config file.
pub struct DockerCfg {
    pub enabled: Option<bool>,
    pub ignore: Option<Vec<String>>,
    pub show_stopped: Option<bool>,
    pub show_unhealthy: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// `display:` section of the config file.
pub struct DisplayCfg {
    pub show_ok_status: Option<bool>,
    pub max_items: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration as loaded from `config.yaml`.
pub struct FileConfig {
    pub systemd: Option<SystemdCfg>,
    pub docker: Option<DockerCfg>,
    pub display: Option<DisplayCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration passed by reference into each checker.
pub struct Effective {
    pub show_all_failed: bool,
    pub monitor_specific: Vec<String>,
    pub docker_enabled: bool,
    pub docker_ignore: Vec<String>,
    pub show_stopped: bool,
    pub show_unhealthy: bool,
    /// Reserved: read from the file but consulted by no emission path.
    pub show_ok_status: bool,
    pub max_items: usize,
    pub output: String,
    pub query_timeout: Duration,
}

/// Candidate config locations, highest priority first.
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|d| d.to_path_buf()))
    {
        paths.push(dir.join("config.yaml"));
    }
    paths.push(PathBuf::from("/etc/labstat/config.yaml"));
    if let Some(home) = std::env::var_os("HOME") {
        paths.push(
            PathBuf::from(home)
                .join(".config")
                .join("labstat")
                .join("config.yaml"),
        );
    }
    paths
}

/// Load the file config. An explicit path must exist and parse; search
/// paths are optional and the first existing one wins.
pub fn load_config(explicit: Option<&str>) -> Result<FileConfig> {
    if let Some(p) = explicit {
        let path = PathBuf::from(p);
        if !path.exists() {
            bail!("config file not found: {}", path.to_string_lossy());
        }
        return parse_file(&path);
    }
    for path in search_paths() {
        if path.exists() {
            return parse_file(&path);
        }
    }
    Ok(FileConfig::default())
}

fn parse_file(path: &Path) -> Result<FileConfig> {
    let s = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.to_string_lossy()))?;
    let cfg: FileConfig = serde_yaml::from_str(&s)
        .with_context(|| format!("invalid config {}", path.to_string_lossy()))?;
    Ok(cfg)
}

/// Resolve `Effective` by merging CLI flags, the file config, and defaults.
pub fn resolve_effective(cli: &Cli, cfg: &FileConfig) -> Effective {
    let systemd = cfg.systemd.clone().unwrap_or_default();
    let docker = cfg.docker.clone().unwrap_or_default();
    let display = cfg.display.clone().unwrap_or_default();

    Effective {
        show_all_failed: systemd.show_all_failed.unwrap_or(true),
        monitor_specific: systemd.monitor_specific.unwrap_or_default(),
        docker_enabled: docker.enabled.unwrap_or(true),
        docker_ignore: docker.ignore.unwrap_or_default(),
        show_stopped: docker.show_stopped.unwrap_or(true),
        show_unhealthy: docker.show_unhealthy.unwrap_or(true),
        show_ok_status: display.show_ok_status.unwrap_or(false),
        max_items: cli.max_items.or(display.max_items).unwrap_or(10),
        output: cli.output.clone().unwrap_or_else(|| "human".to_string()),
        query_timeout: Duration::from_secs(cli.timeout_secs.unwrap_or(5)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn cli_with(max_items: Option<usize>) -> Cli {
        Cli {
            config: None,
            output: None,
            max_items,
            timeout_secs: None,
        }
    }

    #[test]
    fn test_defaults_without_file() {
        let eff = resolve_effective(&cli_with(None), &FileConfig::default());
        assert!(eff.show_all_failed);
        assert!(eff.monitor_specific.is_empty());
        assert!(eff.docker_enabled);
        assert!(eff.show_stopped);
        assert!(eff.show_unhealthy);
        assert!(!eff.show_ok_status);
        assert_eq!(eff.max_items, 10);
        assert_eq!(eff.output, "human");
        assert_eq!(eff.query_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_load_yaml_sections() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let mut f = fs::File::create(&path).unwrap();
        writeln!(
            f,
            "{}",
            r#"
systemd:
  show_all_failed: false
  monitor_specific: ["nginx", "sshd"]
docker:
  enabled: true
  ignore: ["buildcache"]
  show_stopped: false
display:
  max_items: 3
            "#
        )
        .unwrap();

        let cfg = load_config(path.to_str()).unwrap();
        let eff = resolve_effective(&cli_with(None), &cfg);
        assert!(!eff.show_all_failed);
        assert_eq!(eff.monitor_specific, vec!["nginx", "sshd"]);
        assert_eq!(eff.docker_ignore, vec!["buildcache"]);
        assert!(!eff.show_stopped);
        // Unspecified keys keep defaults
        assert!(eff.show_unhealthy);
        assert_eq!(eff.max_items, 3);
    }

    #[test]
    fn test_cli_precedence_over_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "display:\n  max_items: 3\n").unwrap();

        let cfg = load_config(path.to_str()).unwrap();
        let eff = resolve_effective(&cli_with(Some(20)), &cfg);
        assert_eq!(eff.max_items, 20);
    }

    #[test]
    fn test_explicit_missing_config_is_error() {
        let err = load_config(Some("/nonexistent/labstat/config.yaml"));
        assert!(err.is_err());
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "systemd: [not: a, mapping\n").unwrap();
        assert!(load_config(path.to_str()).is_err());
    }
}
