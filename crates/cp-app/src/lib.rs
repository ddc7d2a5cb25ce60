//! Copypasta application orchestration layer
//!
//! Settings persistence and the clipboard poller, and the context that keeps
//! them consistent.

pub mod app_paths;
pub mod context;
pub mod error;
pub mod poller;
pub mod settings_store;
pub mod usecases;

pub use app_paths::AppPaths;
pub use context::AppContext;
pub use error::AppError;
pub use poller::{ClipboardPoller, HistoryEvent, PollerError, PollerState};
pub use settings_store::SettingsStore;
pub use usecases::{SettingChange, SettingsForm};
