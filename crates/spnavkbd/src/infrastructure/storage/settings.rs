//! TOML runtime settings.
//!
//! spnavkbd needs almost no configuration outside the Lua script: where the
//! script lives, where spacenavd listens, and how chatty the log should be.
//! Those three values can be overridden in `spnavkbd.toml` next to the
//! script (or at the path named by `$SPNAVKBD_SETTINGS`):
//!
//! ```toml
//! script_path = "/home/me/.config/spnavkbd/blender.lua"
//! socket_path = "/run/spnav.sock"
//! log_level = "debug"
//! ```
//!
//! Key mappings never go here; they belong in the script.
//!
//! # Serde default values
//!
//! Every field carries `#[serde(default = "...")]`, so an empty file, a
//! partial file, and no file at all are all valid.  Unknown keys are
//! rejected so a typo does not silently fall back to a default.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::infrastructure::device::DEFAULT_SOCKET_PATH;
use crate::infrastructure::scripting::DEFAULT_SCRIPT_PATH;

/// Settings file looked up in the working directory.
pub const SETTINGS_FILE: &str = "spnavkbd.toml";

/// Environment variable that overrides [`SETTINGS_FILE`].
pub const SETTINGS_ENV: &str = "SPNAVKBD_SETTINGS";

/// Error type for settings file operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The file exists but could not be read.
    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse settings TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Runtime settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Lua configuration script, relative to the working directory.
    #[serde(default = "default_script_path")]
    pub script_path: PathBuf,
    /// spacenavd UNIX socket.
    #[serde(default = "default_socket_path")]
    pub socket_path: PathBuf,
    /// `tracing` level used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_script_path() -> PathBuf {
    PathBuf::from(DEFAULT_SCRIPT_PATH)
}
fn default_socket_path() -> PathBuf {
    PathBuf::from(DEFAULT_SOCKET_PATH)
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            script_path: default_script_path(),
            socket_path: default_socket_path(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Loads settings from `$SPNAVKBD_SETTINGS` or [`SETTINGS_FILE`].
    ///
    /// # Errors
    ///
    /// See [`Settings::load_from`].
    pub fn load() -> Result<Self, SettingsError> {
        let path = std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE));
        Self::load_from(&path)
    }

    /// Loads settings from `path`.  A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] if the file exists but cannot be read,
    /// or [`SettingsError::Parse`] if it is not valid settings TOML.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Parses settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Parse`] on malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(text)?)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_conventional_locations() {
        let settings = Settings::default();

        assert_eq!(settings.script_path, PathBuf::from("spnavkbd.lua"));
        assert_eq!(settings.socket_path, PathBuf::from("/var/run/spnav.sock"));
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_empty_file_yields_defaults() {
        assert_eq!(Settings::from_toml_str("").unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let settings = Settings::from_toml_str(r#"socket_path = "/run/spnav.sock""#).unwrap();

        assert_eq!(settings.socket_path, PathBuf::from("/run/spnav.sock"));
        assert_eq!(settings.script_path, PathBuf::from("spnavkbd.lua"));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result = Settings::from_toml_str(r#"scirpt_path = "typo.lua""#);

        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("spnavkbd-test-no-such-settings.toml");

        let settings = Settings::load_from(&path).unwrap();

        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_from_reads_file() {
        let path = std::env::temp_dir().join(format!("spnavkbd-settings-{}.toml", std::process::id()));
        std::fs::write(&path, "log_level = \"debug\"\nscript_path = \"maya.lua\"\n").unwrap();

        let result = Settings::load_from(&path);
        let _ = std::fs::remove_file(&path);

        let settings = result.unwrap();
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.script_path, PathBuf::from("maya.lua"));
    }
}
