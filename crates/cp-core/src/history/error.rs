use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// The text is no longer (or never was) in the history, typically a stale
    /// menu item after an eviction.
    #[error("clip not found in history")]
    NotFound,
}
