// src/cli.rs

//! CLI argument parsing using `clap` (derive).
//!
//! Per-kind notification flags are `Option`s so "explicitly passed" is
//! distinguishable from "left at default": only passed flags end up in the
//! flags-derived field set, which is what gives the merge step its clean
//! presence signal.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::notify::{BannerFields, SpeechFields};

/// Command-line arguments for `notirun`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "notirun",
    version,
    about = "Run a command, then send a desktop or spoken notification about it.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `$NOTIRUN_CONFIG`, else `Notirun.toml` in the current
    /// working directory.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Trace each stage (config found, evaluating, merging, sending).
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `--verbose`, `NOTIRUN_LOG`, or a default level applies.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub kind: KindCommand,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Clone, Subcommand)]
pub enum KindCommand {
    /// Desktop banner notification.
    Banner(BannerArgs),
    /// Spoken notification.
    Speech(SpeechArgs),
}

/// Execution flags and the child command, shared by every kind.
#[derive(Debug, Clone, Args)]
pub struct ExecArgs {
    /// Kill the command if it is still running after this duration
    /// (e.g. "30s", "5m").
    #[arg(long, value_name = "DURATION")]
    pub ktimeout: Option<String>,

    /// Notify repeatedly at this interval while the command runs
    /// (e.g. "1m"). Ctrl-C stops the command and the notifications.
    #[arg(long, value_name = "DURATION")]
    pub timeout: Option<String>,

    /// The command to run, with its arguments.
    #[arg(value_name = "CMD", trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct BannerArgs {
    /// Banner title.
    #[arg(short = 't', long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Banner subtitle.
    #[arg(long, value_name = "TEXT")]
    pub subtitle: Option<String>,

    /// Banner message body.
    #[arg(short = 'm', long, value_name = "TEXT")]
    pub message: Option<String>,

    /// Banner icon (name or path, platform dependent).
    #[arg(long, value_name = "ICON")]
    pub icon: Option<String>,

    /// Sound to play with the banner.
    #[arg(long, value_name = "NAME")]
    pub sound: Option<String>,

    #[command(flatten)]
    pub exec: ExecArgs,
}

impl BannerArgs {
    /// Field set containing only the explicitly passed flags.
    pub fn to_flag_fields(&self) -> BannerFields {
        BannerFields {
            title: self.title.clone().unwrap_or_default(),
            subtitle: self.subtitle.clone().unwrap_or_default(),
            message: self.message.clone().unwrap_or_default(),
            icon: self.icon.clone().unwrap_or_default(),
            sound: self.sound.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct SpeechArgs {
    /// Text to speak.
    #[arg(short = 'm', long, value_name = "TEXT")]
    pub message: Option<String>,

    /// Synthesizer voice.
    #[arg(long, value_name = "NAME")]
    pub voice: Option<String>,

    /// Speech rate in words per minute.
    #[arg(long, value_name = "WPM")]
    pub rate: Option<u32>,

    #[command(flatten)]
    pub exec: ExecArgs,
}

impl SpeechArgs {
    /// Field set containing only the explicitly passed flags.
    pub fn to_flag_fields(&self) -> SpeechFields {
        SpeechFields {
            text: self.message.clone().unwrap_or_default(),
            voice: self.voice.clone().unwrap_or_default(),
            rate: self.rate,
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
