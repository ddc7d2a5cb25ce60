use std::fmt;
use std::sync::Arc;

/// One distinct piece of text observed on the clipboard.
///
/// The text is the identity of the entry. Entries are immutable; cloning only
/// bumps a reference count.
#[derive(Clone, PartialEq, Eq)]
pub struct ClipEntry {
    text: Arc<str>,
    seq: u64,
}

impl ClipEntry {
    pub(crate) fn new(text: Arc<str>, seq: u64) -> Self {
        Self { text, seq }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Insertion order. Strictly increasing across the lifetime of a store.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub(crate) fn shared_text(&self) -> &Arc<str> {
        &self.text
    }

    /// Single-line label for menus, at most `max_chars` characters plus an
    /// ellipsis. Line breaks and tabs are folded into spaces.
    pub fn preview(&self, max_chars: usize) -> String {
        let mut out = String::new();
        let mut chars = self
            .text
            .chars()
            .map(|c| if c.is_control() { ' ' } else { c });

        for c in chars.by_ref().take(max_chars) {
            out.push(c);
        }
        if chars.next().is_some() {
            out.push('…');
        }
        out
    }
}

impl fmt::Debug for ClipEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClipEntry")
            .field("seq", &self.seq)
            .field("len", &self.text.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(text: &str) -> ClipEntry {
        ClipEntry::new(Arc::from(text), 0)
    }

    #[test]
    fn preview_keeps_short_text() {
        assert_eq!(entry("hello").preview(10), "hello");
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        assert_eq!(entry("héllo wörld").preview(5), "héllo…");
        assert_eq!(entry("日本語テキスト").preview(3), "日本語…");
    }

    #[test]
    fn preview_flattens_line_breaks() {
        assert_eq!(entry("a\nb\tc").preview(10), "a b c");
    }

    #[test]
    fn debug_does_not_leak_content() {
        let dbg = format!("{:?}", entry("secret"));
        assert!(!dbg.contains("secret"));
        assert!(dbg.contains("len: 6"));
    }
}
