use std::sync::Mutex;

use anyhow::{anyhow, Result};
use clipboard_rs::ClipboardContext;
use cp_core::ports::SystemClipboardPort;

use super::common::CommonClipboardImpl;

/// System clipboard backed by `clipboard-rs`.
pub struct LocalClipboard {
    inner: Mutex<ClipboardContext>,
}

impl LocalClipboard {
    pub fn new() -> Result<Self> {
        let context = ClipboardContext::new()
            .map_err(|e| anyhow!("ClipboardContext::new failed: {}", e))?;
        tracing::debug!("system clipboard context created");
        Ok(Self {
            inner: Mutex::new(context),
        })
    }

    fn with_context<T>(&self, f: impl FnOnce(&ClipboardContext) -> Result<T>) -> Result<T> {
        let ctx = self
            .inner
            .lock()
            .map_err(|_| anyhow!("clipboard context mutex poisoned"))?;
        f(&*ctx)
    }
}

impl SystemClipboardPort for LocalClipboard {
    fn read_text(&self) -> Result<Option<String>> {
        self.with_context(CommonClipboardImpl::read_text)
    }

    fn write_text(&self, text: &str) -> Result<()> {
        self.with_context(|ctx| CommonClipboardImpl::write_text(ctx, text))
            .inspect_err(|e| log::warn!("failed to write clipboard text: {}", e))
    }
}
