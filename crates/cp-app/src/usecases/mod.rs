pub mod apply_settings;

pub use apply_settings::{SettingChange, SettingsDiff, SettingsForm};
