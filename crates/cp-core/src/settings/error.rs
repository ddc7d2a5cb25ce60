use thiserror::Error;

use super::model::SettingKey;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// The value is outside the preference's domain. Nothing was written.
    #[error("invalid value {value} for `{key}`: {reason}")]
    InvalidValue {
        key: SettingKey,
        value: i64,
        reason: &'static str,
    },

    #[error("unknown setting `{0}`")]
    UnknownKey(String),

    /// The persistent store could not be read or written.
    #[error("settings backing store unavailable: {0}")]
    BackingStoreUnavailable(String),
}

impl SettingsError {
    pub fn is_invalid_value(&self) -> bool {
        matches!(self, SettingsError::InvalidValue { .. })
    }
}
