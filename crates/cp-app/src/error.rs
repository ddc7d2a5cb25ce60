use cp_core::SettingsError;
use thiserror::Error;

use crate::poller::PollerError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Poller(#[from] PollerError),
}
