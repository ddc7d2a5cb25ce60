use super::model::Settings;

/// Milliseconds between two clipboard reads on a fresh install.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 200;

/// History capacity on a fresh install.
pub const DEFAULT_MAX_CLIPS: usize = 10;

impl Default for Settings {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_clips: DEFAULT_MAX_CLIPS,
        }
    }
}
