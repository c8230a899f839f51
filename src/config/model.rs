// src/config/model.rs

use serde::Deserialize;

use crate::notify::{BannerFields, SpeechFields};

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [banner]
/// title = "{{.Cmd}}"
/// message = "finished in {{.Duration}}"
/// sound = "Glass"
///
/// [speech]
/// message = "{{.Cmd}} {{.Status}}"
/// voice = "Alex"
/// rate = 180
/// ```
///
/// Every section and every field is optional; an omitted field means the
/// config file has no opinion on that slot and lower-priority defaults
/// apply.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub banner: BannerSection,

    #[serde(default)]
    pub speech: SpeechSection,
}

/// `[banner]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BannerSection {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub message: Option<String>,
    pub icon: Option<String>,
    pub sound: Option<String>,
}

impl BannerSection {
    /// Convert to a field set; omitted fields become absent slots.
    pub fn to_fields(&self) -> BannerFields {
        BannerFields {
            title: self.title.clone().unwrap_or_default(),
            subtitle: self.subtitle.clone().unwrap_or_default(),
            message: self.message.clone().unwrap_or_default(),
            icon: self.icon.clone().unwrap_or_default(),
            sound: self.sound.clone().unwrap_or_default(),
        }
    }
}

/// `[speech]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpeechSection {
    pub message: Option<String>,
    pub voice: Option<String>,
    pub rate: Option<u32>,
}

impl SpeechSection {
    /// Convert to a field set; omitted fields become absent slots.
    pub fn to_fields(&self) -> SpeechFields {
        SpeechFields {
            text: self.message.clone().unwrap_or_default(),
            voice: self.voice.clone().unwrap_or_default(),
            rate: self.rate,
        }
    }
}
