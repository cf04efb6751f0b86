//! Supporting helpers: deadline-bounded subprocess execution and
//! colored stderr prefixes.

use owo_colors::OwoColorize;
use std::io::Read;
use std::process::{Command, Stdio};
use std::time::Duration;
use wait_timeout::ChildExt;

/// Run `cmd args..` and return captured stdout once the child exits
/// within `timeout`. Returns `None` when the binary is missing, the
/// child cannot be spawned, or the deadline passes (the child is then
/// killed and reaped). Stdout is returned regardless of exit status:
/// `systemctl is-active` reports the state on stdout while exiting
/// non-zero for anything but "active".
///
/// Stdout is drained on a separate thread while waiting. A child whose
/// output exceeds the OS pipe buffer would otherwise block on the full
/// pipe until the deadline killed it, turning a successful query on a
/// busy host into "no data".
pub fn run_with_timeout(cmd: &str, args: &[&str], timeout: Duration) -> Option<String> {
    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .ok()?;

    let mut stdout = child.stdout.take()?;
    let reader = std::thread::spawn(move || {
        let mut out = String::new();
        stdout.read_to_string(&mut out).ok().map(|_| out)
    });

    match child.wait_timeout(timeout).ok()? {
        Some(_status) => reader.join().ok().flatten(),
        None => {
            let _ = child.kill();
            let _ = child.wait();
            // Reader sees EOF once the child is reaped.
            let _ = reader.join();
            None
        }
    }
}

fn stderr_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Prefix for warnings on stderr (e.g. the top-level failure line).
pub fn warn_prefix() -> String {
    if stderr_colors() {
        "⚠".yellow().bold().to_string()
    } else {
        "⚠".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_captures_stdout() {
        let out = run_with_timeout("echo", &["hello"], Duration::from_secs(5));
        assert_eq!(out.as_deref().map(str::trim), Some("hello"));
    }

    #[test]
    fn test_missing_binary_is_none() {
        let out = run_with_timeout(
            "definitely-not-a-real-binary-4a1b",
            &[],
            Duration::from_secs(5),
        );
        assert!(out.is_none());
    }

    #[test]
    fn test_deadline_kills_child() {
        let out = run_with_timeout("sleep", &["30"], Duration::from_millis(50));
        assert!(out.is_none());
    }

    #[test]
    fn test_output_larger_than_pipe_buffer_survives() {
        // A fast child emitting well past the ~64KB pipe buffer must
        // not be mistaken for a timeout.
        let out = run_with_timeout(
            "sh",
            &["-c", "yes x | head -c 200000"],
            Duration::from_secs(2),
        );
        assert_eq!(out.map(|s| s.len()), Some(200000));
    }

    #[test]
    fn test_stdout_kept_on_nonzero_exit() {
        let out = run_with_timeout("sh", &["-c", "echo inactive; exit 3"], Duration::from_secs(5));
        assert_eq!(out.as_deref().map(str::trim), Some("inactive"));
    }
}
