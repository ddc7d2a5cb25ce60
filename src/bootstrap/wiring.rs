//! # Dependency Injection / 依赖注入模块
//!
//! Assembles adapters from cp-infra and cp-platform behind the ports and hands
//! them to cp-app. Assembly only: no decisions beyond picking a location.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use cp_app::{AppContext, AppPaths};
use cp_core::config::AppConfig;
use cp_core::ports::{AppDirsPort, SettingsStorePort};
use cp_infra::{FileSettingsRepository, InMemorySettingsRepository};
use cp_platform::{DirsAppDirsAdapter, LocalClipboard};
use tracing::{info, warn};

/// Per-user locations, or `None` on systems without a data directory.
pub fn resolve_app_paths() -> Option<AppPaths> {
    DirsAppDirsAdapter::new()
        .get_app_dirs()
        .ok()
        .map(|dirs| AppPaths::from_app_dirs(&dirs))
}

/// Settings file location: the config override wins over the per-user default.
pub fn settings_path(config: &AppConfig, paths: Option<&AppPaths>) -> Option<PathBuf> {
    config
        .settings_path
        .clone()
        .or_else(|| paths.map(|p| p.settings_path.clone()))
}

/// Directory for the file log layer, `None` when file logging is off.
pub fn log_dir(config: &AppConfig, paths: Option<&AppPaths>) -> Option<PathBuf> {
    if !config.file_logging {
        return None;
    }
    config
        .log_dir
        .clone()
        .or_else(|| paths.map(|p| p.logs_dir.clone()))
}

/// Backing store for the preferences. Falls back to process memory when no
/// location can be resolved; settings then last for this run only.
pub fn settings_backing(
    config: &AppConfig,
    paths: Option<&AppPaths>,
) -> Arc<dyn SettingsStorePort> {
    match settings_path(config, paths) {
        Some(path) => {
            info!(path = %path.display(), "Using settings file");
            Arc::new(FileSettingsRepository::new(path))
        }
        None => {
            warn!("No data directory available, settings will not persist");
            Arc::new(InMemorySettingsRepository::new())
        }
    }
}

/// Builds the application context with the system clipboard.
pub async fn build_app_context(
    config: &AppConfig,
    paths: Option<&AppPaths>,
) -> anyhow::Result<AppContext> {
    let clipboard = LocalClipboard::new().context("Failed to open system clipboard")?;
    let backing = settings_backing(config, paths);
    Ok(AppContext::bootstrap(backing, Arc::new(clipboard)).await)
}
