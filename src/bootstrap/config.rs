//! # Configuration Loader / 配置加载器
//!
//! Pure data loading: read the TOML file and map it onto [`AppConfig`].
//! No validation and no business rules; consumers decide what an empty value
//! means.

use std::path::{Path, PathBuf};

use anyhow::Context;
use cp_core::config::AppConfig;

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Picks the config source for this run.
///
/// An explicit `--config` path must load. The default location is optional:
/// when the file does not exist the empty config is used.
pub fn resolve_config(
    explicit: Option<PathBuf>,
    default_path: Option<&Path>,
) -> anyhow::Result<AppConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match default_path {
        Some(path) if path.exists() => load_config(path.to_path_buf()),
        _ => Ok(AppConfig::default()),
    }
}
