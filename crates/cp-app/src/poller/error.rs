use cp_core::{HistoryError, SettingsError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PollerError {
    /// Rejected interval. The running timer is untouched.
    #[error(transparent)]
    InvalidValue(#[from] SettingsError),

    #[error("clipboard poller is not running")]
    NotRunning,

    #[error("clipboard poller is already running")]
    AlreadyRunning,

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error("clipboard access failed: {0}")]
    Clipboard(String),

    /// The worker task ended without answering, usually because it panicked.
    #[error("clipboard poller worker is gone")]
    WorkerGone,
}
