use std::path::PathBuf;

/// Root directory owned by the application. Everything persistent lives below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    pub app_data_root: PathBuf,
}
