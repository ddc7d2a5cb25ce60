use async_trait::async_trait;

use crate::settings::SettingKey;

/// Persistent, namespaced key-value store holding the integer preferences.
///
/// Implementations report any read or write problem as an error; callers
/// translate it into [`SettingsError::BackingStoreUnavailable`].
///
/// [`SettingsError::BackingStoreUnavailable`]: crate::settings::SettingsError::BackingStoreUnavailable
#[async_trait]
pub trait SettingsStorePort: Send + Sync {
    /// `Ok(None)` when the key has never been written.
    async fn get(&self, key: SettingKey) -> anyhow::Result<Option<i64>>;

    /// Durable write. Must not return before the value survives a restart.
    async fn put(&self, key: SettingKey, value: i64) -> anyhow::Result<()>;
}
