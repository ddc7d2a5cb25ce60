//! Typed, validated access to the persisted preferences.
//! 持久化偏好设置的类型化访问

use std::sync::Arc;

use cp_core::ports::SettingsStorePort;
use cp_core::{SettingKey, Settings, SettingsError};
use tracing::{debug, info, info_span, warn, Instrument};

/// Owns the effective [`Settings`] and mirrors every change to the backing store.
///
/// ## Behavior / 行为
/// - `initialize` fills absent keys with defaults and adopts stored ones
/// - `set` validates first, writes durably second, updates memory last
/// - when the backing store cannot be read at startup the store runs on
///   defaults and reports [`is_degraded`](Self::is_degraded)
pub struct SettingsStore {
    backing: Arc<dyn SettingsStorePort>,
    effective: Settings,
    degraded: bool,
}

impl SettingsStore {
    pub fn new(backing: Arc<dyn SettingsStorePort>) -> Self {
        Self {
            backing,
            effective: Settings::default(),
            degraded: false,
        }
    }

    /// Reads the stored value for `key`. `Ok(None)` when it was never written.
    pub async fn get(&self, key: SettingKey) -> Result<Option<i64>, SettingsError> {
        self.backing.get(key).await.map_err(unavailable)
    }

    /// Makes sure every key has a stored value and loads the effective settings.
    ///
    /// Never fails. Problems with the backing store are logged and leave the
    /// affected key on its default. Calling it again does not alter values that
    /// are already stored.
    pub async fn initialize(&mut self) -> Settings {
        let span = info_span!("settings.initialize");

        async {
            let mut next = Settings::default();
            // Recomputed on every pass; a store that recovered is no longer degraded.
            self.degraded = false;

            for key in SettingKey::ALL {
                match self.backing.get(key).await {
                    Ok(Some(stored)) => {
                        if let Err(e) = next.apply(key, stored) {
                            // Keep the stored value on disk; a later `set` replaces it.
                            warn!(%key, stored, error = %e, "Stored setting out of range, using default");
                        }
                    }
                    Ok(None) => {
                        let default = key.default_value();
                        match self.backing.put(key, default).await {
                            Ok(()) => debug!(%key, default, "Wrote default setting"),
                            Err(e) => {
                                self.degraded = true;
                                warn!(%key, error = %e, "Failed to persist default setting");
                            }
                        }
                    }
                    Err(e) => {
                        self.degraded = true;
                        warn!(%key, error = %e, "Settings backing store unreadable, using default");
                    }
                }
            }

            self.effective = next;
            info!(
                poll_interval_ms = next.poll_interval_ms,
                max_clips = next.max_clips,
                degraded = self.degraded,
                "Settings initialized"
            );
            next
        }
        .instrument(span)
        .await
    }

    /// Validates and durably stores `value`, then updates the effective settings.
    ///
    /// On any error the effective settings are unchanged. An invalid value
    /// never reaches the backing store.
    pub async fn set(&mut self, key: SettingKey, value: i64) -> Result<(), SettingsError> {
        let mut next = self.effective;
        next.apply(key, value)?;

        self.backing
            .put(key, value)
            .instrument(info_span!("settings.set", %key))
            .await
            .map_err(unavailable)?;

        let old = self.effective.get(key);
        self.effective = next;
        info!(%key, old, new = value, "Setting updated");
        Ok(())
    }

    pub fn effective(&self) -> Settings {
        self.effective
    }

    /// `true` once the backing store failed during [`initialize`](Self::initialize).
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }
}

fn unavailable(e: anyhow::Error) -> SettingsError {
    SettingsError::BackingStoreUnavailable(format!("{e:#}"))
}
