// src/command.rs

//! The per-kind notification command orchestrator.
//!
//! One [`NotifyCommand`] is built per invocation, generic over the
//! notification kind's field type and back end, so banner and speech share
//! the whole execute → evaluate → merge → send pipeline instead of
//! duplicating it per kind.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::{self, ConfigFile};
use crate::errors::{NotirunError, Result};
use crate::fields::{eval_fields, merge_fields, FieldSet};
use crate::notify::NotifyBackend;
use crate::run::{self, Stats};

/// How the child process is supervised. Chosen once per invocation from
/// the timeout flags; the policies are never combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionPolicy {
    /// Block until the child exits on its own.
    ToCompletion,
    /// Kill the child if it outlives this duration.
    KillTimeout(Duration),
    /// Notify repeatedly at this interval while the child runs.
    NotifyInterval(Duration),
}

impl ExecutionPolicy {
    /// Derive the policy from the raw `--ktimeout` / `--timeout` flags.
    ///
    /// Both values are parsed up front so a bad duration is fatal before
    /// any process starts. When both are given, `--ktimeout` wins; that
    /// ordering is long-standing behavior and must not change.
    pub fn from_flags(ktimeout: Option<&str>, timeout: Option<&str>) -> Result<Self> {
        let kill = ktimeout.map(run::parse_duration).transpose()?;
        let interval = timeout.map(run::parse_duration).transpose()?;

        Ok(match (kill, interval) {
            (Some(d), _) => ExecutionPolicy::KillTimeout(d),
            (None, Some(d)) => ExecutionPolicy::NotifyInterval(d),
            (None, None) => ExecutionPolicy::ToCompletion,
        })
    }
}

/// Orchestrator for one notification kind.
///
/// Ties together the supervisor, the three field sources (defaults,
/// config file, flags), placeholder evaluation, presence merging, and the
/// delivery back end. `lib.rs` builds one of these per subcommand.
pub struct NotifyCommand<F, B>
where
    F: FieldSet + Default + Clone + fmt::Debug + Send + Sync,
    B: NotifyBackend<F>,
{
    /// Kind name for log output ("banner", "speech").
    pub kind: &'static str,
    /// Built-in defaults, constructed per instance (no global state).
    pub defaults: F,
    /// Slots explicitly passed on the command line; everything else stays
    /// at its zero value so the merge sees a clean "did not specify".
    pub from_flags: F,
    /// Extracts this kind's section from a loaded config file.
    pub select_config: fn(&ConfigFile) -> F,
    /// Explicit config path from `--config`; `None` means the default
    /// discovery in [`config::load_or_default`].
    pub config_path: Option<PathBuf>,
    pub backend: B,
    pub policy: ExecutionPolicy,
    /// Child command argv. Must be non-empty; checked before any spawn.
    pub argv: Vec<String>,
}

impl<F, B> NotifyCommand<F, B>
where
    F: FieldSet + Default + Clone + fmt::Debug + Send + Sync,
    B: NotifyBackend<F>,
{
    /// Evaluate, merge, and send one notification for `stats`.
    ///
    /// Config load failure is recovered here by substituting an empty
    /// config; every other failure propagates.
    pub async fn notify(&self, stats: &Stats) -> Result<()> {
        let conf = config::load_or_default(self.config_path.as_deref());

        let mut defaults = self.defaults.clone();
        let mut from_config = (self.select_config)(&conf);
        let mut from_flags = self.from_flags.clone();

        debug!(kind = self.kind, "evaluating");
        debug!(?defaults, ?from_config, ?from_flags, "sources");
        eval_fields(&mut defaults, stats);
        eval_fields(&mut from_config, stats);
        eval_fields(&mut from_flags, stats);

        debug!(kind = self.kind, "merging");
        let mut merged = F::default();
        merge_fields(&mut merged, &[&defaults, &from_config, &from_flags])?;
        debug!(?merged, "merge result");

        debug!(kind = self.kind, "sending notification");
        self.backend.send(&merged).await?;
        debug!(kind = self.kind, "sent notification");
        Ok(())
    }

    /// Run the child under the configured policy, notifying once per
    /// produced stats record. Ctrl-C cancels a notify-interval stream.
    pub async fn run(self) -> Result<()> {
        let cancel = CancellationToken::new();
        {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    cancel.cancel();
                }
            });
        }
        self.run_with_cancel(cancel).await
    }

    /// Like [`run`](Self::run), with caller-controlled cancellation of the
    /// notify-interval stream.
    pub async fn run_with_cancel(self, cancel: CancellationToken) -> Result<()> {
        if self.argv.is_empty() {
            return Err(NotirunError::InvalidInput(
                "no command given: expected a command to run after the flags".to_string(),
            ));
        }

        match self.policy {
            ExecutionPolicy::ToCompletion => {
                debug!(kind = self.kind, "executing command");
                let stats = run::exec(&self.argv).await?;
                self.notify(&stats).await
            }
            ExecutionPolicy::KillTimeout(d) => {
                debug!(kind = self.kind, timeout = ?d, "executing command with kill timeout");
                let stats = run::exec_with_kill_timeout(&self.argv, d).await?;
                self.notify(&stats).await
            }
            ExecutionPolicy::NotifyInterval(d) => {
                debug!(kind = self.kind, interval = ?d, "executing command with notify interval");
                let mut stream = run::exec_notify_interval(&self.argv, d, cancel)?;

                // Strictly sequential: the next record is not taken until
                // this one's notification has been sent, and a send error
                // aborts the remaining loop.
                while let Some(stats) = stream.recv().await {
                    self.notify(&stats).await?;
                }
                Ok(())
            }
        }
    }
}
