use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppDirsError {
    #[error("platform data-local directory is unavailable")]
    DataLocalDirUnavailable,
}
