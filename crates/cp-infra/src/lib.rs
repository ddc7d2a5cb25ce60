pub mod settings;

pub use settings::{FileSettingsRepository, InMemorySettingsRepository};
