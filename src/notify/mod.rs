// src/notify/mod.rs

//! Notification kinds and their delivery back ends.
//!
//! Each kind is a field struct implementing [`crate::fields::FieldSet`]
//! plus a back end implementing [`NotifyBackend`] for it:
//!
//! - [`banner`]: desktop banner via `notify-rust`.
//! - [`speech`]: spoken text via the platform speech synthesizer
//!   (`say` on macOS, `espeak` elsewhere).
//!
//! The trait seam exists so the orchestrator and its tests can swap in a
//! recording fake instead of touching the OS.

pub mod banner;
pub mod speech;

pub use banner::{BannerFields, DesktopBanner};
pub use speech::{SpeechFields, SpeechSynth};

use async_trait::async_trait;

use crate::errors::Result;
use crate::fields::FieldSet;

/// Delivery capability for one notification kind.
///
/// Takes a fully resolved (evaluated + merged) field set and performs the
/// actual OS-level notification. Delivery failure aborts the remaining
/// notification loop, so implementations should only return `Err` for real
/// failures.
#[async_trait]
pub trait NotifyBackend<F: FieldSet + Send + Sync>: Send + Sync {
    async fn send(&self, fields: &F) -> Result<()>;
}
