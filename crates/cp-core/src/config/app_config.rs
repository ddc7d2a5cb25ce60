//! Application configuration domain model

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Startup configuration read from `copypasta.toml`.
///
/// This is a plain data container: missing values stay empty and no
/// validation happens here. Consumers decide what an empty value means.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Overrides the location of the settings backing file.
    pub settings_path: Option<PathBuf>,

    /// Overrides the directory used for rolling log files.
    pub log_dir: Option<PathBuf>,

    /// Whether logs are also written to files.
    pub file_logging: bool,
}

impl AppConfig {
    /// Maps a parsed TOML document onto `AppConfig`.
    ///
    /// ```toml
    /// [storage]
    /// settings_path = "/path/to/settings.json"
    ///
    /// [logging]
    /// dir = "/path/to/logs"
    /// file = true
    /// ```
    pub fn from_toml(value: &toml::Value) -> anyhow::Result<Self> {
        let path_at = |section: &str, key: &str| {
            value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(toml::Value::as_str)
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
        };

        let file_logging = value
            .get("logging")
            .and_then(|s| s.get("file"))
            .and_then(toml::Value::as_bool)
            .unwrap_or(false);

        Ok(Self {
            settings_path: path_at("storage", "settings_path"),
            log_dir: path_at("logging", "dir"),
            file_logging,
        })
    }
}
