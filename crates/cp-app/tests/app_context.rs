mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{CountingClipboard, CrashingClipboard};
use cp_app::{AppContext, AppError, HistoryEvent, PollerError, SettingsForm, SettingsStore};
use cp_core::{SettingKey, SettingsError};
use cp_infra::{FileSettingsRepository, InMemorySettingsRepository};
use tempfile::TempDir;
use tokio::time::{self, Instant};

#[tokio::test]
async fn stored_value_survives_reinitialize() {
    common::init_tracing();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");

    let mut store = SettingsStore::new(Arc::new(FileSettingsRepository::new(&path)));
    store.initialize().await;
    store.set(SettingKey::MaxClips, 7).await.unwrap();

    let mut reopened = SettingsStore::new(Arc::new(FileSettingsRepository::new(&path)));
    let settings = reopened.initialize().await;

    assert_eq!(settings.max_clips, 7);
    assert_eq!(settings.poll_interval_ms, 200);
    assert_eq!(reopened.get(SettingKey::MaxClips).await, Ok(Some(7)));
}

#[tokio::test(start_paused = true)]
async fn apply_settings_writes_changes_and_retimes_poller() {
    common::init_tracing();
    let backing = Arc::new(InMemorySettingsRepository::new());
    let clipboard = CountingClipboard::new();
    let mut app = AppContext::bootstrap(backing.clone(), clipboard.clone()).await;
    let mut rx = app.subscribe();
    app.start().unwrap();

    let applied = app
        .apply_settings(SettingsForm {
            poll_interval_ms: 1_000,
            max_clips: 3,
        })
        .await
        .unwrap();
    let applied_at = Instant::now();

    assert_eq!(applied.len(), 2);
    assert_eq!(backing.stored(SettingKey::PollInterval), Some(1_000));
    assert_eq!(backing.stored(SettingKey::MaxClips), Some(3));

    while !matches!(rx.recv().await.unwrap(), HistoryEvent::Added(_)) {}
    let reads = clipboard.reads_since(applied_at);
    assert_eq!(reads.first().map(|at| *at - applied_at), Some(Duration::from_secs(1)));

    time::sleep(Duration::from_secs(5)).await;
    assert_eq!(app.history().await.unwrap().len(), 3);
    app.shutdown().await;
}

#[tokio::test]
async fn invalid_form_changes_nothing() {
    common::init_tracing();
    let backing = Arc::new(InMemorySettingsRepository::new());
    let mut app = AppContext::bootstrap(backing.clone(), CountingClipboard::new()).await;
    let writes_before = backing.write_count();

    let err = app
        .apply_settings(SettingsForm {
            poll_interval_ms: 500,
            max_clips: -1,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Settings(SettingsError::InvalidValue { .. })));
    assert_eq!(backing.write_count(), writes_before);
    assert_eq!(app.settings().poll_interval_ms, 200);
}

#[tokio::test]
async fn degraded_store_keeps_app_usable() {
    common::init_tracing();
    let backing = Arc::new(InMemorySettingsRepository::new());
    backing.set_fail_reads(true);
    backing.set_fail_writes(true);

    let mut app = AppContext::bootstrap(backing, CountingClipboard::new()).await;

    assert!(app.is_settings_degraded());
    assert_eq!(app.settings().max_clips, 10);
    let err = app.set_setting(SettingKey::MaxClips, 4).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Settings(SettingsError::BackingStoreUnavailable(_))
    ));
    assert_eq!(app.settings().max_clips, 10);
}

#[tokio::test(start_paused = true)]
async fn poller_failure_after_save_keeps_saved_value() {
    common::init_tracing();
    let backing = Arc::new(InMemorySettingsRepository::new());
    let mut app = AppContext::bootstrap(backing.clone(), Arc::new(CrashingClipboard)).await;
    app.start().unwrap();
    time::sleep(Duration::from_secs(1)).await;

    let err = app
        .set_setting(SettingKey::PollInterval, 500)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Poller(PollerError::WorkerGone)));
    assert_eq!(backing.stored(SettingKey::PollInterval), Some(500));
    assert_eq!(app.settings().poll_interval_ms, 500);
    app.shutdown().await;
}
