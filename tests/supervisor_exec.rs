use std::time::{Duration, Instant};

use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use notirun::errors::NotirunError;
use notirun::run::{exec, exec_notify_interval, exec_with_kill_timeout, RunStatus};

fn sh(script: &str) -> Vec<String> {
    vec!["sh".to_string(), "-c".to_string(), script.to_string()]
}

#[tokio::test]
async fn exec_reports_success() {
    let stats = exec(&sh("exit 0")).await.unwrap();
    assert_eq!(stats.status, RunStatus::Exited(0));
    assert!(stats.status.success());
    assert_eq!(stats.cmd(), "sh");
}

#[tokio::test]
async fn exec_reports_failure_without_erroring() {
    let stats = exec(&sh("exit 3")).await.unwrap();
    assert_eq!(stats.status, RunStatus::Exited(3));
    assert!(!stats.status.success());
}

#[tokio::test]
async fn exec_rejects_empty_argv() {
    let err = exec(&[]).await.unwrap_err();
    assert!(matches!(err, NotirunError::InvalidInput(_)));
}

#[tokio::test]
async fn exec_surfaces_spawn_failure() {
    let argv = vec!["definitely-not-a-real-program-7f3a".to_string()];
    let err = exec(&argv).await.unwrap_err();
    assert!(matches!(err, NotirunError::Execution { .. }));
}

#[tokio::test]
async fn kill_timeout_terminates_a_slow_child_promptly() {
    let started = Instant::now();
    let stats = exec_with_kill_timeout(&sh("sleep 5"), Duration::from_millis(50))
        .await
        .unwrap();

    assert_eq!(stats.status, RunStatus::Killed);
    // Delivered near the 50ms mark, nowhere near the child's 5s.
    assert!(
        started.elapsed() < Duration::from_secs(2),
        "kill timeout took {:?}",
        started.elapsed()
    );
}

#[tokio::test]
async fn kill_timeout_passes_through_a_fast_exit() {
    let stats = exec_with_kill_timeout(&sh("exit 0"), Duration::from_secs(5))
        .await
        .unwrap();
    assert_eq!(stats.status, RunStatus::Exited(0));
}

#[tokio::test]
async fn notify_interval_streams_snapshots_then_final_record() {
    let cancel = CancellationToken::new();
    let mut stream =
        exec_notify_interval(&sh("sleep 0.35"), Duration::from_millis(100), cancel).unwrap();

    let mut records = Vec::new();
    while let Some(stats) = timeout(Duration::from_secs(5), stream.recv())
        .await
        .expect("stream stalled")
    {
        records.push(stats);
    }

    let (finals, snapshots): (Vec<_>, Vec<_>) = records
        .into_iter()
        .partition(|s| s.status != RunStatus::Running);

    assert!(!snapshots.is_empty(), "expected at least one Running snapshot");
    assert_eq!(finals.len(), 1);
    assert_eq!(finals[0].status, RunStatus::Exited(0));
}

#[tokio::test]
async fn notify_interval_cancellation_kills_child_and_closes_stream() {
    let cancel = CancellationToken::new();
    let mut stream =
        exec_notify_interval(&sh("sleep 5"), Duration::from_millis(100), cancel.clone()).unwrap();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(350)).await;
        cancel.cancel();
    });

    let started = Instant::now();
    let mut records = Vec::new();
    while let Some(stats) = timeout(Duration::from_secs(3), stream.recv())
        .await
        .expect("stream did not close after cancellation")
    {
        records.push(stats);
    }

    let snapshots = records
        .iter()
        .filter(|s| s.status == RunStatus::Running)
        .count();
    assert!(snapshots >= 2, "expected >= 2 snapshots, got {snapshots}");

    assert_eq!(records.last().unwrap().status, RunStatus::Killed);
    // We must not have waited out the child's 5s sleep.
    assert!(
        started.elapsed() < Duration::from_secs(3),
        "cancellation blocked for {:?}",
        started.elapsed()
    );
}

#[tokio::test]
async fn notify_interval_surfaces_spawn_failure_immediately() {
    let cancel = CancellationToken::new();
    let argv = vec!["definitely-not-a-real-program-7f3a".to_string()];
    let err = exec_notify_interval(&argv, Duration::from_millis(100), cancel).unwrap_err();
    assert!(matches!(err, NotirunError::Execution { .. }));
}
