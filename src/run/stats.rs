// src/run/stats.rs

use std::fmt;
use std::time::{Duration, SystemTime};

/// How a supervised child run ended (or where it currently stands, for
/// interval snapshots).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The child exited on its own with this code.
    Exited(i32),
    /// The child was forcibly terminated by the kill-timeout policy or by
    /// cancellation of an interval stream.
    Killed,
    /// Snapshot of a child that is still running (notify-interval policy).
    Running,
}

impl RunStatus {
    pub fn success(&self) -> bool {
        matches!(self, RunStatus::Exited(0))
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Exited(0) => write!(f, "done"),
            RunStatus::Exited(_) => write!(f, "failed"),
            RunStatus::Killed => write!(f, "killed"),
            RunStatus::Running => write!(f, "running"),
        }
    }
}

/// The outcome of one supervised child-process run.
///
/// Produced once per completed run by [`super::supervisor`], or repeatedly
/// (with [`RunStatus::Running`]) by the notify-interval policy. Immutable
/// once produced; the consumer owns it outright.
#[derive(Debug, Clone)]
pub struct Stats {
    /// Full child argv, program first. Never empty (enforced before spawn).
    pub argv: Vec<String>,
    pub started_at: SystemTime,
    /// For `Running` snapshots this is the snapshot time.
    pub finished_at: SystemTime,
    pub duration: Duration,
    pub status: RunStatus,
}

impl Stats {
    /// The child program name (first argv element).
    pub fn cmd(&self) -> &str {
        self.argv.first().map(String::as_str).unwrap_or("")
    }

    /// Exit code as rendered into `{{.ExitCode}}`: the code itself for a
    /// natural exit, `-1` for a kill, `-` while still running.
    pub fn exit_code_display(&self) -> String {
        match self.status {
            RunStatus::Exited(code) => code.to_string(),
            RunStatus::Killed => "-1".to_string(),
            RunStatus::Running => "-".to_string(),
        }
    }

    /// Duration as rendered into `{{.Duration}}`, e.g. `"1.203s"`.
    pub fn duration_display(&self) -> String {
        format!("{:.3}s", self.duration.as_secs_f64())
    }
}
