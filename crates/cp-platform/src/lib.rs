//! # cp-platform
//!
//! Platform-specific implementations for Copypasta.
//!
//! This crate contains the adapters that talk to the operating system:
//! the system clipboard and the per-user data directory.

pub mod app_dirs;
pub mod clipboard;

pub use app_dirs::DirsAppDirsAdapter;
pub use clipboard::LocalClipboard;
