// src/config/mod.rs

//! Configuration loading for notirun.
//!
//! - `model.rs` defines the TOML-backed data model (one optional section
//!   per notification kind, mirroring the flag shapes).
//! - `loader.rs` loads it from disk; load failure is non-fatal and falls
//!   back to an empty config.

pub mod loader;
pub mod model;

pub use loader::{default_config_path, load_from_path, load_or_default};
pub use model::{BannerSection, ConfigFile, SpeechSection};
