use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use cp_core::{ports::SettingsStorePort, SettingKey};
use serde_json::Value;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

/// Settings backing store kept in a single JSON object on disk.
///
/// The file maps key names to integers, e.g.
/// `{"max_clips": 10, "timer_interval": 200}`. Keys this version does not
/// know about are preserved on write.
pub struct FileSettingsRepository {
    path: PathBuf,
    // read-modify-write must not interleave
    write_lock: Mutex<()>,
}

impl FileSettingsRepository {
    /// Creates a FileSettingsRepository configured to use the given file path as the settings file.
    ///
    /// # Examples
    ///
    /// ```
    /// use cp_infra::FileSettingsRepository;
    /// let repo = FileSettingsRepository::new("config/settings.json");
    /// assert!(repo.path().ends_with("settings.json"));
    /// ```
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure the repository's parent directory exists, creating it if necessary.
    async fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create settings dir failed: {}", dir.display()))?;
        }
        Ok(())
    }

    /// Reads the whole document. A missing file is an empty document.
    async fn read_document(&self) -> Result<BTreeMap<String, Value>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("read settings failed: {}", self.path.display()))
            }
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content)
            .with_context(|| format!("parse settings failed: {}", self.path.display()))
    }

    /// Writes `content` next to the target, flushes it to disk, then renames
    /// it over the target. Readers see either the old or the new document.
    async fn atomic_write(&self, content: &str) -> Result<()> {
        self.ensure_parent_dir().await?;

        let tmp_path = self.path.with_extension("json.tmp");
        let mut tmp = fs::File::create(&tmp_path)
            .await
            .with_context(|| format!("create temp settings failed: {}", tmp_path.display()))?;
        tmp.write_all(content.as_bytes())
            .await
            .with_context(|| format!("write temp settings failed: {}", tmp_path.display()))?;
        tmp.sync_all()
            .await
            .with_context(|| format!("sync temp settings failed: {}", tmp_path.display()))?;
        drop(tmp);

        // TODO: rename over an existing file is not atomic on every Windows filesystem; switch to ReplaceFileW there.
        fs::rename(&tmp_path, &self.path).await.with_context(|| {
            format!(
                "rename temp settings to target failed: {} -> {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}

#[async_trait]
impl SettingsStorePort for FileSettingsRepository {
    async fn get(&self, key: SettingKey) -> Result<Option<i64>> {
        let document = self.read_document().await?;

        match document.get(key.as_str()) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value.as_i64().map(Some).ok_or_else(|| {
                anyhow!(
                    "setting `{}` in {} is not an integer: {}",
                    key,
                    self.path.display(),
                    value
                )
            }),
        }
    }

    async fn put(&self, key: SettingKey, value: i64) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut document = self.read_document().await?;
        document.insert(key.as_str().to_string(), Value::from(value));

        let content =
            serde_json::to_string_pretty(&document).context("serialize settings failed")?;
        self.atomic_write(&content).await?;

        debug!(key = %key, value, path = %self.path.display(), "setting persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repo_in(dir: &TempDir) -> FileSettingsRepository {
        FileSettingsRepository::new(dir.path().join("nested").join("settings.json"))
    }

    #[tokio::test]
    async fn missing_file_reads_as_absent() -> Result<()> {
        let dir = TempDir::new()?;
        let repo = repo_in(&dir);

        assert_eq!(repo.get(SettingKey::MaxClips).await?, None);
        assert!(!repo.path().exists());
        Ok(())
    }

    #[tokio::test]
    async fn put_creates_parent_dirs_and_round_trips() -> Result<()> {
        let dir = TempDir::new()?;
        let repo = repo_in(&dir);

        repo.put(SettingKey::MaxClips, 7).await?;

        assert_eq!(repo.get(SettingKey::MaxClips).await?, Some(7));
        assert_eq!(repo.get(SettingKey::PollInterval).await?, None);
        assert!(!repo.path().with_extension("json.tmp").exists());
        Ok(())
    }

    #[tokio::test]
    async fn file_uses_legacy_key_names() -> Result<()> {
        let dir = TempDir::new()?;
        let repo = repo_in(&dir);

        repo.put(SettingKey::PollInterval, 350).await?;

        let raw: Value = serde_json::from_str(&std::fs::read_to_string(repo.path())?)?;
        assert_eq!(raw["timer_interval"], Value::from(350));
        Ok(())
    }

    #[tokio::test]
    async fn unknown_keys_survive_a_write() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"launch_at_login": 1, "max_clips": 3}"#)?;
        let repo = FileSettingsRepository::new(&path);

        repo.put(SettingKey::MaxClips, 4).await?;

        let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        assert_eq!(raw["launch_at_login"], Value::from(1));
        assert_eq!(raw["max_clips"], Value::from(4));
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json")?;
        let repo = FileSettingsRepository::new(&path);

        assert!(repo.get(SettingKey::MaxClips).await.is_err());
        assert!(repo.put(SettingKey::MaxClips, 1).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn non_integer_value_is_an_error() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"max_clips": "ten"}"#)?;
        let repo = FileSettingsRepository::new(&path);

        let err = repo.get(SettingKey::MaxClips).await.unwrap_err();
        assert!(err.to_string().contains("not an integer"));
        Ok(())
    }
}
