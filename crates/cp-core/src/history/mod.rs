//! Clipboard history kept in memory.
//!
//! The history is a bounded queue with set membership: one entry per distinct
//! text, oldest evicted first. It is never persisted.

pub mod entry;
pub mod error;
pub mod store;

pub use entry::ClipEntry;
pub use error::HistoryError;
pub use store::{AddOutcome, HistoryStore};
