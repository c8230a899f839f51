// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, warn};

use crate::config::model::ConfigFile;
use crate::errors::Result;

/// Load a configuration file from a given path.
///
/// Strict variant: missing file or malformed TOML is an error. The command
/// loop uses [`load_or_default`] instead, which degrades gracefully.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading config file at {path:?}"))?;

    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("parsing TOML config from {path:?}"))?;

    Ok(config)
}

/// Resolve the default config path.
///
/// `NOTIRUN_CONFIG` wins if set; otherwise `Notirun.toml` in the current
/// working directory.
pub fn default_config_path() -> PathBuf {
    std::env::var("NOTIRUN_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("Notirun.toml"))
}

/// Load the config for a notification attempt, falling back to an empty
/// config on any failure.
///
/// Config problems are never fatal: the command still notifies using
/// defaults + flags. A missing file is logged at debug (it is the common
/// case); a present-but-broken file is logged at warn.
pub fn load_or_default(path: Option<&Path>) -> ConfigFile {
    let resolved = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);

    if !resolved.exists() {
        debug!(path = ?resolved, "no config file found, using defaults");
        return ConfigFile::default();
    }

    match load_from_path(&resolved) {
        Ok(config) => {
            debug!(path = ?resolved, "found config file");
            config
        }
        Err(err) => {
            warn!(path = ?resolved, error = %err, "ignoring unreadable config file");
            ConfigFile::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn loads_partial_sections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[banner]\ntitle = \"{{{{.Cmd}}}}\"\nsound = \"Glass\"\n\n[speech]\nrate = 180"
        )
        .unwrap();

        let config = load_from_path(file.path()).unwrap();
        assert_eq!(config.banner.title.as_deref(), Some("{{.Cmd}}"));
        assert_eq!(config.banner.sound.as_deref(), Some("Glass"));
        assert_eq!(config.banner.message, None);
        assert_eq!(config.speech.rate, Some(180));
        assert_eq!(config.speech.voice, None);
    }

    #[test]
    fn missing_file_is_an_error_in_strict_mode() {
        assert!(load_from_path("/definitely/not/here.toml").is_err());
    }

    #[test]
    fn load_or_default_recovers_from_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "this is not toml [[[").unwrap();

        let config = load_or_default(Some(file.path()));
        assert_eq!(config.banner.title, None);
        assert_eq!(config.speech.rate, None);
    }

    #[test]
    fn load_or_default_recovers_from_missing_file() {
        let config = load_or_default(Some(Path::new("/definitely/not/here.toml")));
        assert_eq!(config.banner.title, None);
    }
}
