//! Ports implemented by the infrastructure and platform crates.

pub mod app_dirs;
pub mod clipboard;
pub mod errors;
pub mod settings;

pub use app_dirs::AppDirsPort;
pub use clipboard::SystemClipboardPort;
pub use errors::AppDirsError;
pub use settings::SettingsStorePort;
