use anyhow::{anyhow, Result};
use clipboard_rs::{Clipboard, ContentFormat};

pub(super) struct CommonClipboardImpl;

fn map_clipboard_err<T>(
    result: std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>,
) -> Result<T> {
    result.map_err(|e| anyhow!(e))
}

impl CommonClipboardImpl {
    /// Reads the text representation, if the clipboard currently offers one.
    ///
    /// Images, file lists and other formats are reported as `None`, as is
    /// an empty string.
    pub fn read_text(ctx: &clipboard_rs::ClipboardContext) -> Result<Option<String>> {
        if !ctx.has(ContentFormat::Text) {
            return Ok(None);
        }

        let text = map_clipboard_err(ctx.get_text())?;
        Ok(Some(text).filter(|t| !t.is_empty()))
    }

    pub fn write_text(ctx: &clipboard_rs::ClipboardContext, text: &str) -> Result<()> {
        map_clipboard_err(ctx.set_text(text.to_string()))
    }
}
