use anyhow::Result;

/// Access to the OS clipboard, text only.
///
/// Calls are expected to return quickly; the poller invokes them from its
/// single worker and never concurrently.
pub trait SystemClipboardPort: Send + Sync {
    /// Current text content. `Ok(None)` when the clipboard is empty or holds
    /// something other than text.
    fn read_text(&self) -> Result<Option<String>>;

    fn write_text(&self, text: &str) -> Result<()>;
}
