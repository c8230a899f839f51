// src/run/mod.rs

//! Child-process execution supervision.
//!
//! This module owns everything between "the user gave us an argv" and "we
//! have a [`Stats`] record to notify about":
//!
//! - [`stats`] defines the per-run outcome record.
//! - [`supervisor`] runs the child under one of the three execution
//!   policies (to completion, with a kill timeout, or with a repeating
//!   notify interval).

pub mod stats;
pub mod supervisor;

pub use stats::{RunStatus, Stats};
pub use supervisor::{exec, exec_notify_interval, exec_with_kill_timeout};

use std::time::Duration;

use crate::errors::{NotirunError, Result};

/// Parse a duration string like `"250ms"`, `"10s"`, `"2m"`, `"1h"`.
///
/// Used for the `--ktimeout` and `--timeout` flags; a parse failure is
/// fatal before any child process is started.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let err = |reason: &str| NotirunError::InvalidDuration {
        input: s.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(err("empty duration string"));
    }

    // Boundary between the number and the unit suffix.
    let idx = trimmed
        .chars()
        .position(|c| !c.is_ascii_digit())
        .ok_or_else(|| err("missing unit suffix (expected ms, s, m, or h)"))?;

    let (num_part, unit_part) = trimmed.split_at(idx);
    let value: u64 = num_part
        .parse()
        .map_err(|_| err("invalid number"))?;

    match unit_part.trim() {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        "m" => Ok(Duration::from_secs(value * 60)),
        "h" => Ok(Duration::from_secs(value * 60 * 60)),
        unit => Err(err(&format!(
            "unsupported unit {unit:?} (expected ms, s, m, or h)"
        ))),
    }
}
