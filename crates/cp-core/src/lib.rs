//! # cp-core
//!
//! Core domain models and business logic for Copypasta.
//!
//! This crate contains pure business logic without any infrastructure dependencies:
//! the bounded clipboard history, the two user preferences and the ports the
//! outer layers implement.

pub mod app_dirs;
pub mod config;
pub mod history;
pub mod ports;
pub mod settings;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use history::{AddOutcome, ClipEntry, HistoryError, HistoryStore};
pub use settings::{SettingKey, Settings, SettingsError};
