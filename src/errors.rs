// src/errors.rs

//! Crate-wide error taxonomy.
//!
//! Config-file load failures are deliberately *not* a fatal variant here:
//! the command loop recovers from them locally by falling back to an empty
//! config (see [`crate::config::load_or_default`]).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotirunError {
    /// Bad user input detected before any process is started, e.g. an empty
    /// child command.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A `--ktimeout` / `--timeout` value that does not parse as a duration.
    #[error("invalid duration {input:?}: {reason}")]
    InvalidDuration { input: String, reason: String },

    /// Field sets handed to merge with different slot counts or slot kinds.
    /// This is a wiring bug, not a user error.
    #[error("field shape mismatch: {0}")]
    ShapeMismatch(String),

    /// The child process could not be started.
    #[error("failed to run {cmd:?}: {source}")]
    Execution {
        cmd: String,
        #[source]
        source: std::io::Error,
    },

    /// The notification back end failed to deliver.
    #[error("notification delivery failed: {0}")]
    Delivery(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, NotirunError>;
