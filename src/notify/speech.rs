// src/notify/speech.rs

//! Spoken notifications via the platform speech synthesizer.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::errors::{NotirunError, Result};
use crate::fields::{FieldSet, Slot, SlotMut};
use crate::notify::NotifyBackend;

/// Content slots for a spoken notification.
///
/// `rate` is words per minute; `None` means "no opinion" so a lower
/// priority source (or the synthesizer default) applies. An empty `voice`
/// leaves voice selection to the synthesizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeechFields {
    pub text: String,
    pub voice: String,
    pub rate: Option<u32>,
}

impl SpeechFields {
    /// Built-in defaults, constructed fresh per command instance.
    pub fn command_defaults() -> Self {
        Self {
            text: "{{.Cmd}} done!".to_string(),
            voice: String::new(),
            rate: Some(200),
        }
    }
}

impl FieldSet for SpeechFields {
    fn slots(&self) -> Vec<Slot<'_>> {
        vec![
            Slot::Text(&self.text),
            Slot::Text(&self.voice),
            Slot::Number(self.rate),
        ]
    }

    fn slots_mut(&mut self) -> Vec<SlotMut<'_>> {
        vec![
            SlotMut::Text(&mut self.text),
            SlotMut::Text(&mut self.voice),
            SlotMut::Number(&mut self.rate),
        ]
    }
}

/// Speech back end that shells out to `say` (macOS) or `espeak`.
///
/// Both tools take a words-per-minute rate, so the `rate` slot maps
/// directly to `-r` / `-s`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpeechSynth;

fn synth_command(fields: &SpeechFields) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("say");
        if !fields.voice.is_empty() {
            cmd.arg("-v").arg(&fields.voice);
        }
        if let Some(rate) = fields.rate {
            cmd.arg("-r").arg(rate.to_string());
        }
        cmd.arg(&fields.text);
        cmd
    } else {
        let mut cmd = Command::new("espeak");
        if !fields.voice.is_empty() {
            cmd.arg("-v").arg(&fields.voice);
        }
        if let Some(rate) = fields.rate {
            cmd.arg("-s").arg(rate.to_string());
        }
        cmd.arg(&fields.text);
        cmd
    }
}

#[async_trait]
impl NotifyBackend<SpeechFields> for SpeechSynth {
    async fn send(&self, fields: &SpeechFields) -> Result<()> {
        debug!(text = %fields.text, voice = %fields.voice, rate = ?fields.rate, "speaking notification");

        let status = synth_command(fields)
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|err| NotirunError::Delivery(format!("starting speech synthesizer: {err}")))?;

        if status.success() {
            Ok(())
        } else {
            Err(NotirunError::Delivery(format!(
                "speech synthesizer exited with {status}"
            )))
        }
    }
}
