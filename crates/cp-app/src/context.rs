use std::sync::Arc;

use cp_core::ports::{SettingsStorePort, SystemClipboardPort};
use cp_core::{ClipEntry, HistoryStore, SettingKey, Settings};
use tokio::sync::broadcast;
use tracing::{info, info_span, warn, Instrument};

use crate::error::AppError;
use crate::poller::{ClipboardPoller, HistoryEvent, PollerState};
use crate::settings_store::SettingsStore;
use crate::usecases::{SettingChange, SettingsDiff, SettingsForm};

/// Wires the settings store to the poller and keeps them consistent.
///
/// Every accepted setting change is pushed to the poller before the call
/// returns: a new interval re-arms the timer, a new capacity applies from the
/// next recorded clip.
pub struct AppContext {
    settings: SettingsStore,
    poller: ClipboardPoller,
}

impl AppContext {
    /// Loads the settings and builds an idle poller sized from them.
    pub async fn bootstrap(
        backing: Arc<dyn SettingsStorePort>,
        clipboard: Arc<dyn SystemClipboardPort>,
    ) -> Self {
        let mut settings = SettingsStore::new(backing);
        let effective = settings.initialize().await;
        let poller = ClipboardPoller::new(clipboard, HistoryStore::new(effective.max_clips));
        Self { settings, poller }
    }

    /// Starts polling with the effective interval.
    pub fn start(&mut self) -> Result<(), AppError> {
        let interval = self.settings.effective().get(SettingKey::PollInterval);
        self.poller.start(interval)?;
        Ok(())
    }

    pub fn settings(&self) -> Settings {
        self.settings.effective()
    }

    pub fn is_settings_degraded(&self) -> bool {
        self.settings.is_degraded()
    }

    pub fn poller_state(&self) -> PollerState {
        self.poller.state()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<HistoryEvent> {
        self.poller.subscribe()
    }

    /// Stored value of `key`, straight from the backing store.
    pub async fn stored_setting(&self, key: SettingKey) -> Result<Option<i64>, AppError> {
        Ok(self.settings.get(key).await?)
    }

    /// Changes one preference and pushes it to the poller.
    ///
    /// An `AppError::Poller` means the value *was* saved and is the effective
    /// setting, but the running poller did not pick it up. An
    /// `AppError::Settings` means nothing changed.
    pub async fn set_setting(&mut self, key: SettingKey, value: i64) -> Result<(), AppError> {
        self.settings.set(key, value).await?;
        self.push_to_poller(key).await.inspect_err(|e| {
            warn!(%key, value, error = %e, "Setting saved but not applied to the poller");
        })
    }

    /// Applies a settings form submission.
    ///
    /// ## Behavior / 行为
    /// - every field is validated before anything is written
    /// - only changed fields are written, in key order
    /// - if a write fails, fields written before it stay applied
    ///
    /// Returns the changes that were applied.
    pub async fn apply_settings(&mut self, form: SettingsForm) -> Result<Vec<SettingChange>, AppError> {
        let span = info_span!("usecase.apply_settings.execute");

        async {
            let diff = SettingsDiff::between(&self.settings.effective(), &form)?;
            if diff.is_empty() {
                info!("Applying settings (no changes detected)");
                return Ok(Vec::new());
            }

            info!(changed_fields = %diff.to_log_string(), "Applying settings");
            for change in diff.changes() {
                self.set_setting(change.key, change.new).await?;
            }
            info!(changed_fields = %diff.to_log_string(), "Settings applied");
            Ok(diff.changes().to_vec())
        }
        .instrument(span)
        .await
    }

    /// History, oldest first.
    pub async fn history(&self) -> Result<Vec<ClipEntry>, AppError> {
        Ok(self.poller.entries().await?)
    }

    pub async fn restore(&self, text: &str) -> Result<ClipEntry, AppError> {
        Ok(self.poller.restore(text).await?)
    }

    /// Stops polling. Safe to call more than once.
    pub async fn shutdown(&mut self) {
        self.poller.stop().await;
    }

    async fn push_to_poller(&mut self, key: SettingKey) -> Result<(), AppError> {
        let effective = self.settings.effective();
        match key {
            SettingKey::PollInterval => {
                if self.poller.state() == PollerState::Running {
                    self.poller
                        .reconfigure(effective.get(SettingKey::PollInterval))
                        .await?;
                }
            }
            SettingKey::MaxClips => self.poller.set_capacity(effective.max_clips).await?,
        }
        Ok(())
    }
}
