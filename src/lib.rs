// src/lib.rs

pub mod cli;
pub mod command;
pub mod config;
pub mod errors;
pub mod fields;
pub mod logging;
pub mod notify;
pub mod run;

use crate::cli::{CliArgs, KindCommand};
use crate::command::{ExecutionPolicy, NotifyCommand};
use crate::errors::Result;
use crate::notify::{BannerFields, DesktopBanner, SpeechFields, SpeechSynth};

/// High-level entry point used by `main.rs`.
///
/// Builds the per-kind [`NotifyCommand`] from the parsed CLI arguments and
/// runs it: execute the child under the selected policy, then evaluate,
/// merge, and deliver the notification once per produced stats record.
pub async fn run(args: CliArgs) -> Result<()> {
    match args.kind {
        KindCommand::Banner(banner) => {
            let policy = ExecutionPolicy::from_flags(
                banner.exec.ktimeout.as_deref(),
                banner.exec.timeout.as_deref(),
            )?;

            NotifyCommand {
                kind: "banner",
                defaults: BannerFields::command_defaults(),
                from_flags: banner.to_flag_fields(),
                select_config: |conf| conf.banner.to_fields(),
                config_path: args.config,
                backend: DesktopBanner,
                policy,
                argv: banner.exec.command,
            }
            .run()
            .await
        }
        KindCommand::Speech(speech) => {
            let policy = ExecutionPolicy::from_flags(
                speech.exec.ktimeout.as_deref(),
                speech.exec.timeout.as_deref(),
            )?;

            NotifyCommand {
                kind: "speech",
                defaults: SpeechFields::command_defaults(),
                from_flags: speech.to_flag_fields(),
                select_config: |conf| conf.speech.to_fields(),
                config_path: args.config,
                backend: SpeechSynth,
                policy,
                argv: speech.exec.command,
            }
            .run()
            .await
        }
    }
}
