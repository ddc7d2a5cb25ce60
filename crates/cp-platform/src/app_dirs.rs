use std::path::PathBuf;

use cp_core::{
    app_dirs::AppDirs,
    ports::{AppDirsError, AppDirsPort},
};

const APP_DIR_NAME: &str = "copypasta";

/// `COPYPASTA_PROFILE=dev` resolves to `copypasta-dev`, keeping settings of
/// parallel profiles apart.
fn resolved_app_dir_name() -> String {
    match std::env::var("COPYPASTA_PROFILE") {
        Ok(profile) if !profile.is_empty() => format!("{APP_DIR_NAME}-{profile}"),
        _ => APP_DIR_NAME.to_string(),
    }
}

#[derive(Default)]
pub struct DirsAppDirsAdapter {
    base_data_local_dir_override: Option<PathBuf>,
}

impl DirsAppDirsAdapter {
    pub fn new() -> Self {
        Self {
            base_data_local_dir_override: None,
        }
    }

    /// Resolves everything below `base` instead of the system data directory.
    pub fn with_base_data_local_dir(base: PathBuf) -> Self {
        Self {
            base_data_local_dir_override: Some(base),
        }
    }

    /// Resolve the base local data directory used for application data.
    ///
    /// Returns the override if one was set; otherwise `dirs::data_local_dir()`,
    /// which is `None` on systems without a home directory.
    pub fn base_data_local_dir(&self) -> Option<PathBuf> {
        if let Some(base) = &self.base_data_local_dir_override {
            return Some(base.clone());
        }
        dirs::data_local_dir()
    }
}

impl AppDirsPort for DirsAppDirsAdapter {
    fn get_app_dirs(&self) -> Result<AppDirs, AppDirsError> {
        let base_data = self
            .base_data_local_dir()
            .ok_or(AppDirsError::DataLocalDirUnavailable)?;

        Ok(AppDirs {
            app_data_root: base_data.join(resolved_app_dir_name()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static PROFILE_ENV_LOCK: Mutex<()> = Mutex::new(());

    fn with_profile<T>(value: Option<&str>, f: impl FnOnce() -> T) -> T {
        let _guard = PROFILE_ENV_LOCK.lock().unwrap();
        let previous = std::env::var("COPYPASTA_PROFILE").ok();

        match value {
            Some(profile) => std::env::set_var("COPYPASTA_PROFILE", profile),
            None => std::env::remove_var("COPYPASTA_PROFILE"),
        }

        let result = f();

        match previous {
            Some(profile) => std::env::set_var("COPYPASTA_PROFILE", profile),
            None => std::env::remove_var("COPYPASTA_PROFILE"),
        }

        result
    }

    #[test]
    fn adapter_appends_app_dir_name() {
        with_profile(None, || {
            let adapter = DirsAppDirsAdapter::with_base_data_local_dir(PathBuf::from("/tmp"));
            let dirs = adapter.get_app_dirs().unwrap();
            assert_eq!(dirs.app_data_root, PathBuf::from("/tmp/copypasta"));
        });
    }

    #[test]
    fn profiles_get_separate_dirs() {
        let a = with_profile(Some("a"), || {
            DirsAppDirsAdapter::with_base_data_local_dir(PathBuf::from("/tmp"))
                .get_app_dirs()
                .unwrap()
        });
        let b = with_profile(Some("b"), || {
            DirsAppDirsAdapter::with_base_data_local_dir(PathBuf::from("/tmp"))
                .get_app_dirs()
                .unwrap()
        });

        assert_eq!(a.app_data_root, PathBuf::from("/tmp/copypasta-a"));
        assert_eq!(b.app_data_root, PathBuf::from("/tmp/copypasta-b"));
    }

    #[test]
    fn empty_profile_is_ignored() {
        with_profile(Some(""), || {
            let adapter = DirsAppDirsAdapter::with_base_data_local_dir(PathBuf::from("/tmp"));
            assert_eq!(
                adapter.get_app_dirs().unwrap().app_data_root,
                PathBuf::from("/tmp/copypasta")
            );
        });
    }
}
