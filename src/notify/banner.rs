// src/notify/banner.rs

//! Desktop banner notifications.

use async_trait::async_trait;
use tracing::debug;

use crate::errors::{NotirunError, Result};
use crate::fields::{FieldSet, Slot, SlotMut};
use crate::notify::NotifyBackend;

/// Content slots for a desktop banner notification.
///
/// An empty string means "this source has no opinion on the slot" (see the
/// presence rules in [`crate::fields`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BannerFields {
    pub title: String,
    pub subtitle: String,
    pub message: String,
    pub icon: String,
    pub sound: String,
}

impl BannerFields {
    /// Built-in defaults, constructed fresh per command instance.
    pub fn command_defaults() -> Self {
        Self {
            title: "{{.Cmd}}".to_string(),
            message: "Done!".to_string(),
            sound: "Ping".to_string(),
            ..Default::default()
        }
    }
}

impl FieldSet for BannerFields {
    fn slots(&self) -> Vec<Slot<'_>> {
        vec![
            Slot::Text(&self.title),
            Slot::Text(&self.subtitle),
            Slot::Text(&self.message),
            Slot::Text(&self.icon),
            Slot::Text(&self.sound),
        ]
    }

    fn slots_mut(&mut self) -> Vec<SlotMut<'_>> {
        vec![
            SlotMut::Text(&mut self.title),
            SlotMut::Text(&mut self.subtitle),
            SlotMut::Text(&mut self.message),
            SlotMut::Text(&mut self.icon),
            SlotMut::Text(&mut self.sound),
        ]
    }
}

/// Banner back end using `notify-rust`.
///
/// `Notification::show()` is synchronous on every platform, so delivery
/// happens on tokio's blocking pool and the result is awaited so failures
/// surface as [`NotirunError::Delivery`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopBanner;

#[async_trait]
impl NotifyBackend<BannerFields> for DesktopBanner {
    async fn send(&self, fields: &BannerFields) -> Result<()> {
        debug!(title = %fields.title, "sending desktop banner");
        let fields = fields.clone();

        let shown = tokio::task::spawn_blocking(move || show_banner(&fields))
            .await
            .map_err(|err| NotirunError::Delivery(err.to_string()))?;

        shown.map_err(|err| NotirunError::Delivery(err.to_string()))
    }
}

fn show_banner(fields: &BannerFields) -> std::result::Result<(), notify_rust::error::Error> {
    let mut n = notify_rust::Notification::new();
    n.summary(&fields.title);

    // notify-rust only exposes subtitles on macOS/Windows; elsewhere fold
    // the subtitle into the body so it is not silently dropped.
    #[cfg(any(target_os = "macos", target_os = "windows"))]
    {
        n.body(&fields.message);
        if !fields.subtitle.is_empty() {
            n.subtitle(&fields.subtitle);
        }
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        if fields.subtitle.is_empty() {
            n.body(&fields.message);
        } else {
            n.body(&format!("{}\n{}", fields.subtitle, fields.message));
        }
    }

    if !fields.icon.is_empty() {
        n.icon(&fields.icon);
    }
    if !fields.sound.is_empty() {
        n.sound_name(&fields.sound);
    }

    n.show().map(|_| ())
}
