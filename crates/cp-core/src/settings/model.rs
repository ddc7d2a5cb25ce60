use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::SettingsError;

/// The two persisted preferences.
///
/// `as_str()` is the key used in the backing store. The names predate this
/// crate and must not change, otherwise existing installs lose their values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettingKey {
    #[serde(rename = "timer_interval")]
    PollInterval,
    #[serde(rename = "max_clips")]
    MaxClips,
}

impl SettingKey {
    pub const ALL: [SettingKey; 2] = [SettingKey::PollInterval, SettingKey::MaxClips];

    pub fn as_str(self) -> &'static str {
        match self {
            SettingKey::PollInterval => "timer_interval",
            SettingKey::MaxClips => "max_clips",
        }
    }

    /// Compiled-in value used when the backing store has never seen this key.
    pub fn default_value(self) -> i64 {
        Settings::default().get(self)
    }

    /// Checks `value` against the key's domain.
    ///
    /// - poll interval: strictly positive
    /// - max clips: non-negative
    pub fn validate(self, value: i64) -> Result<(), SettingsError> {
        let reason = match self {
            SettingKey::PollInterval if value <= 0 => "poll interval must be greater than zero",
            SettingKey::MaxClips if value < 0 => "max clips must not be negative",
            _ => return Ok(()),
        };
        Err(SettingsError::InvalidValue {
            key: self,
            value,
            reason,
        })
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "timer_interval" | "poll_interval_ms" | "poll_interval" => Ok(SettingKey::PollInterval),
            "max_clips" => Ok(SettingKey::MaxClips),
            other => Err(SettingsError::UnknownKey(other.to_string())),
        }
    }
}

/// Effective values of both preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub poll_interval_ms: u64,
    pub max_clips: usize,
}

impl Settings {
    pub fn get(&self, key: SettingKey) -> i64 {
        match key {
            SettingKey::PollInterval => i64::try_from(self.poll_interval_ms).unwrap_or(i64::MAX),
            SettingKey::MaxClips => i64::try_from(self.max_clips).unwrap_or(i64::MAX),
        }
    }

    /// Validates `value` and stores it. On error `self` is untouched.
    pub fn apply(&mut self, key: SettingKey, value: i64) -> Result<(), SettingsError> {
        key.validate(value)?;
        let out_of_range = || SettingsError::InvalidValue {
            key,
            value,
            reason: "value does not fit on this platform",
        };
        match key {
            SettingKey::PollInterval => {
                self.poll_interval_ms = u64::try_from(value).map_err(|_| out_of_range())?
            }
            SettingKey::MaxClips => {
                self.max_clips = usize::try_from(value).map_err(|_| out_of_range())?
            }
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
