// src/run/supervisor.rs

//! The three execution policies for a supervised child process.
//!
//! Exactly one policy is active per command invocation:
//!
//! - [`exec`] blocks until the child exits on its own.
//! - [`exec_with_kill_timeout`] races the child against a timer and kills
//!   it when the timer wins.
//! - [`exec_notify_interval`] streams a [`RunStatus::Running`] snapshot on
//!   every timer tick until the child exits or the caller cancels.
//!
//! The child inherits the parent's stdio so the supervised command behaves
//! as if it had been run directly. `kill_on_drop` is set on every child so
//! no process outlives its supervising task.

use std::time::{Duration, Instant, SystemTime};

use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::errors::{NotirunError, Result};
use crate::run::stats::{RunStatus, Stats};

/// Buffered snapshots between the interval producer and the notify loop.
const STREAM_CAPACITY: usize = 8;

fn spawn_child(argv: &[String]) -> Result<Child> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| NotirunError::InvalidInput("no command given to run".to_string()))?;

    let mut cmd = Command::new(program);
    cmd.args(args).kill_on_drop(true);

    cmd.spawn().map_err(|source| NotirunError::Execution {
        cmd: program.clone(),
        source,
    })
}

fn finished_stats(
    argv: &[String],
    started_at: SystemTime,
    started: Instant,
    status: RunStatus,
) -> Stats {
    let duration = started.elapsed();
    Stats {
        argv: argv.to_vec(),
        started_at,
        finished_at: started_at + duration,
        duration,
        status,
    }
}

/// Run the child to completion, no timeout.
///
/// A non-zero exit is *not* an error here; it is captured in the returned
/// [`Stats`] so the notification can report it. Only spawn failure (and an
/// empty argv) produce an `Err`.
pub async fn exec(argv: &[String]) -> Result<Stats> {
    let started_at = SystemTime::now();
    let started = Instant::now();
    let mut child = spawn_child(argv)?;

    let status = child.wait().await?;
    let code = status.code().unwrap_or(-1);
    info!(cmd = %argv[0], exit_code = code, "child exited");

    Ok(finished_stats(argv, started_at, started, RunStatus::Exited(code)))
}

/// Run the child, killing it if it has not exited within `timeout`.
///
/// Returns exactly one [`Stats`]: either the natural exit, or
/// [`RunStatus::Killed`] recorded at roughly the timeout mark.
pub async fn exec_with_kill_timeout(argv: &[String], timeout: Duration) -> Result<Stats> {
    let started_at = SystemTime::now();
    let started = Instant::now();
    let mut child = spawn_child(argv)?;

    tokio::select! {
        status = child.wait() => {
            let code = status?.code().unwrap_or(-1);
            info!(cmd = %argv[0], exit_code = code, "child exited before timeout");
            Ok(finished_stats(argv, started_at, started, RunStatus::Exited(code)))
        }
        _ = tokio::time::sleep(timeout) => {
            info!(cmd = %argv[0], ?timeout, "kill timeout elapsed, terminating child");
            child.kill().await?;
            Ok(finished_stats(argv, started_at, started, RunStatus::Killed))
        }
    }
}

/// Run the child once, streaming a progress snapshot every `interval`.
///
/// The returned receiver yields [`RunStatus::Running`] snapshots in strict
/// chronological order, then one final record when the child exits, then
/// closes. Spawn failure is returned immediately, before any stream
/// exists.
///
/// Cancelling `cancel` kills the child, emits a final
/// [`RunStatus::Killed`] record, and closes the stream. The producer task
/// also stops as soon as the receiver is dropped, so it can never outlive
/// its consumer.
pub fn exec_notify_interval(
    argv: &[String],
    interval: Duration,
    cancel: CancellationToken,
) -> Result<mpsc::Receiver<Stats>> {
    let mut child = spawn_child(argv)?;
    let argv = argv.to_vec();
    let started_at = SystemTime::now();
    let started = Instant::now();

    let (tx, rx) = mpsc::channel::<Stats>(STREAM_CAPACITY);

    tokio::spawn(async move {
        let mut timer = tokio::time::interval(interval);
        // The first tick completes immediately; skip it so snapshots start
        // one full interval after spawn.
        timer.tick().await;

        loop {
            tokio::select! {
                status = child.wait() => {
                    let code = status.map(|s| s.code().unwrap_or(-1)).unwrap_or(-1);
                    info!(cmd = %argv[0], exit_code = code, "child exited, closing stats stream");
                    let _ = tx
                        .send(finished_stats(&argv, started_at, started, RunStatus::Exited(code)))
                        .await;
                    break;
                }
                _ = timer.tick() => {
                    debug!(cmd = %argv[0], "notify interval elapsed, snapshotting");
                    let snapshot = finished_stats(&argv, started_at, started, RunStatus::Running);
                    if tx.send(snapshot).await.is_err() {
                        // Consumer is gone; kill_on_drop reaps the child.
                        debug!(cmd = %argv[0], "stats receiver dropped, stopping producer");
                        break;
                    }
                }
                _ = cancel.cancelled() => {
                    info!(cmd = %argv[0], "stream cancelled, terminating child");
                    if let Err(err) = child.kill().await {
                        warn!(cmd = %argv[0], error = %err, "failed to kill child on cancel");
                    }
                    let _ = tx
                        .send(finished_stats(&argv, started_at, started, RunStatus::Killed))
                        .await;
                    break;
                }
            }
        }
    });

    Ok(rx)
}
