pub mod defaults;
pub mod error;
pub mod model;

pub use error::SettingsError;
pub use model::{SettingKey, Settings};
