use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use cp_core::{ports::SettingsStorePort, SettingKey};

/// Process-local settings store.
///
/// Used when no persistent location can be resolved, and by tests. Reads and
/// writes can be made to fail to exercise degraded-mode handling.
#[derive(Default)]
pub struct InMemorySettingsRepository {
    values: Mutex<HashMap<SettingKey, i64>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl InMemorySettingsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(values: impl IntoIterator<Item = (SettingKey, i64)>) -> Self {
        let repo = Self::default();
        if let Ok(mut map) = repo.values.lock() {
            map.extend(values);
        }
        repo
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful `put` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Raw stored value, bypassing failure injection.
    pub fn stored(&self, key: SettingKey) -> Option<i64> {
        self.values
            .lock()
            .ok()
            .and_then(|map| map.get(&key).copied())
    }
}

#[async_trait]
impl SettingsStorePort for InMemorySettingsRepository {
    async fn get(&self, key: SettingKey) -> Result<Option<i64>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(anyhow!("in-memory settings store: read failure injected"));
        }
        let map = self
            .values
            .lock()
            .map_err(|_| anyhow!("in-memory settings store poisoned"))?;
        Ok(map.get(&key).copied())
    }

    async fn put(&self, key: SettingKey, value: i64) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(anyhow!("in-memory settings store: write failure injected"));
        }
        let mut map = self
            .values
            .lock()
            .map_err(|_| anyhow!("in-memory settings store poisoned"))?;
        map.insert(key, value);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn round_trip() {
        let repo = InMemorySettingsRepository::new();
        assert_eq!(repo.get(SettingKey::MaxClips).await.unwrap(), None);

        repo.put(SettingKey::MaxClips, 3).await.unwrap();
        assert_eq!(repo.get(SettingKey::MaxClips).await.unwrap(), Some(3));
        assert_eq!(repo.write_count(), 1);
    }

    #[tokio::test]
    async fn injected_failures_leave_values_alone() {
        let repo = InMemorySettingsRepository::with_values([(SettingKey::PollInterval, 100)]);
        repo.set_fail_writes(true);
        repo.set_fail_reads(true);

        assert!(repo.put(SettingKey::PollInterval, 5).await.is_err());
        assert!(repo.get(SettingKey::PollInterval).await.is_err());
        assert_eq!(repo.stored(SettingKey::PollInterval), Some(100));
        assert_eq!(repo.write_count(), 0);
    }
}
