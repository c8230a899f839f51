use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use notirun::command::{ExecutionPolicy, NotifyCommand};
use notirun::config::ConfigFile;
use notirun::errors::{NotirunError, Result};
use notirun::notify::{BannerFields, NotifyBackend, SpeechFields};

/// Back end that records every send instead of touching the OS, and can be
/// made to fail to exercise delivery-error handling.
#[derive(Clone)]
struct RecordingBackend<F> {
    sent: Arc<Mutex<Vec<F>>>,
    fail: bool,
}

impl<F> RecordingBackend<F> {
    fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    fn sent(&self) -> Vec<F>
    where
        F: Clone,
    {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl<F> NotifyBackend<F> for RecordingBackend<F>
where
    F: notirun::fields::FieldSet + Clone + Send + Sync,
{
    async fn send(&self, fields: &F) -> Result<()> {
        if self.fail {
            return Err(NotirunError::Delivery("recording backend told to fail".into()));
        }
        self.sent.lock().unwrap().push(fields.clone());
        Ok(())
    }
}

fn sh(script: &str) -> Vec<String> {
    vec!["sh".to_string(), "-c".to_string(), script.to_string()]
}

/// A config path that is guaranteed not to exist, so tests never pick up a
/// stray `Notirun.toml` from the working directory.
fn no_config() -> Option<PathBuf> {
    Some(PathBuf::from("/definitely/not/here.toml"))
}

fn banner_command(
    backend: RecordingBackend<BannerFields>,
    from_flags: BannerFields,
    config_path: Option<PathBuf>,
    policy: ExecutionPolicy,
    argv: Vec<String>,
) -> NotifyCommand<BannerFields, RecordingBackend<BannerFields>> {
    NotifyCommand {
        kind: "banner",
        defaults: BannerFields::command_defaults(),
        from_flags,
        select_config: |conf: &ConfigFile| conf.banner.to_fields(),
        config_path,
        backend,
        policy,
        argv,
    }
}

#[tokio::test]
async fn defaults_are_evaluated_and_sent() {
    let backend = RecordingBackend::new();
    banner_command(
        backend.clone(),
        BannerFields::default(),
        no_config(),
        ExecutionPolicy::ToCompletion,
        sh("exit 0"),
    )
    .run_with_cancel(CancellationToken::new())
    .await
    .unwrap();

    let sent = backend.sent();
    assert_eq!(sent.len(), 1);
    // Default title "{{.Cmd}}" resolved against the run.
    assert_eq!(sent[0].title, "sh");
    assert_eq!(sent[0].message, "Done!");
    assert_eq!(sent[0].sound, "Ping");
}

#[tokio::test]
async fn passed_flags_override_config_and_defaults() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        config,
        "[banner]\ntitle = \"from config\"\nsound = \"Glass\""
    )
    .unwrap();

    let backend = RecordingBackend::new();
    banner_command(
        backend.clone(),
        BannerFields {
            title: "Built!".into(),
            ..Default::default()
        },
        Some(config.path().to_path_buf()),
        ExecutionPolicy::ToCompletion,
        sh("exit 0"),
    )
    .run_with_cancel(CancellationToken::new())
    .await
    .unwrap();

    let sent = backend.sent();
    assert_eq!(sent.len(), 1);
    // Flags beat config, config beats defaults, defaults fill the rest.
    assert_eq!(sent[0].title, "Built!");
    assert_eq!(sent[0].sound, "Glass");
    assert_eq!(sent[0].message, "Done!");
}

#[tokio::test]
async fn config_placeholders_are_resolved_per_run() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "[banner]\nmessage = \"{{{{.Cmd}}}} {{{{.Status}}}}\"").unwrap();

    let backend = RecordingBackend::new();
    banner_command(
        backend.clone(),
        BannerFields::default(),
        Some(config.path().to_path_buf()),
        ExecutionPolicy::ToCompletion,
        sh("exit 3"),
    )
    .run_with_cancel(CancellationToken::new())
    .await
    .unwrap();

    assert_eq!(backend.sent()[0].message, "sh failed");
}

#[tokio::test]
async fn speech_flags_map_to_their_own_slots() {
    let backend = RecordingBackend::new();
    NotifyCommand {
        kind: "speech",
        defaults: SpeechFields::command_defaults(),
        from_flags: SpeechFields {
            rate: Some(120),
            ..Default::default()
        },
        select_config: |conf: &ConfigFile| conf.speech.to_fields(),
        config_path: no_config(),
        backend: backend.clone(),
        policy: ExecutionPolicy::ToCompletion,
        argv: sh("exit 0"),
    }
    .run_with_cancel(CancellationToken::new())
    .await
    .unwrap();

    let sent = backend.sent();
    assert_eq!(sent.len(), 1);
    // Passing --rate must not disturb the default text.
    assert_eq!(sent[0].rate, Some(120));
    assert_eq!(sent[0].text, "sh done!");
}

#[tokio::test]
async fn empty_argv_fails_before_any_send() {
    let backend = RecordingBackend::new();
    let err = banner_command(
        backend.clone(),
        BannerFields::default(),
        no_config(),
        ExecutionPolicy::ToCompletion,
        Vec::new(),
    )
    .run_with_cancel(CancellationToken::new())
    .await
    .unwrap_err();

    assert!(matches!(err, NotirunError::InvalidInput(_)));
    assert!(backend.sent().is_empty());
}

#[tokio::test]
async fn delivery_error_aborts_the_command() {
    let err = banner_command(
        RecordingBackend::failing(),
        BannerFields::default(),
        no_config(),
        ExecutionPolicy::ToCompletion,
        sh("exit 0"),
    )
    .run_with_cancel(CancellationToken::new())
    .await
    .unwrap_err();

    assert!(matches!(err, NotirunError::Delivery(_)));
}

#[tokio::test]
async fn delivery_error_stops_an_interval_stream_early() {
    let started = Instant::now();
    let err = banner_command(
        RecordingBackend::failing(),
        BannerFields::default(),
        no_config(),
        ExecutionPolicy::NotifyInterval(Duration::from_millis(100)),
        sh("sleep 5"),
    )
    .run_with_cancel(CancellationToken::new())
    .await
    .unwrap_err();

    assert!(matches!(err, NotirunError::Delivery(_)));
    // Aborted on the first failed send, not after the child's 5s sleep.
    assert!(
        started.elapsed() < Duration::from_secs(2),
        "interval loop kept going for {:?}",
        started.elapsed()
    );
}

#[tokio::test]
async fn interval_policy_notifies_per_snapshot_and_final_record() {
    let backend = RecordingBackend::new();
    banner_command(
        backend.clone(),
        BannerFields {
            title: "{{.Status}}".into(),
            ..Default::default()
        },
        no_config(),
        ExecutionPolicy::NotifyInterval(Duration::from_millis(100)),
        sh("sleep 0.35"),
    )
    .run_with_cancel(CancellationToken::new())
    .await
    .unwrap();

    let sent = backend.sent();
    assert!(sent.len() >= 2, "expected snapshots plus final, got {}", sent.len());
    assert!(sent[..sent.len() - 1].iter().all(|f| f.title == "running"));
    assert_eq!(sent.last().unwrap().title, "done");
}
