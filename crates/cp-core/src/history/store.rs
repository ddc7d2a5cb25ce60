use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use super::entry::ClipEntry;
use super::error::HistoryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// Same text already stored. Nothing changed, including order.
    AlreadyPresent,
}

/// Bounded, deduplicated, insertion-ordered clipboard history.
///
/// ## Invariants / 不变量
/// - at most one entry per text
/// - after every `add`, `len() <= capacity()`
/// - surviving entries keep their relative insertion order
///
/// Entries are stored oldest-first in a deque (eviction pops the front), and
/// a text → seq index gives O(1) membership checks. All removals happen at the
/// oldest end, so the index never has to be searched for a victim.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    entries: VecDeque<ClipEntry>,
    index: HashMap<Arc<str>, u64>,
    capacity: usize,
    next_seq: u64,
}

impl HistoryStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            index: HashMap::with_capacity(capacity.min(1024)),
            capacity,
            next_seq: 0,
        }
    }

    /// Records `text` as the newest entry unless it is already present.
    ///
    /// The capacity in effect at call time is enforced here; when it has been
    /// lowered since the last add, every excess entry is dropped now.
    pub fn add(&mut self, text: &str) -> AddOutcome {
        if self.index.contains_key(text) {
            return AddOutcome::AlreadyPresent;
        }

        let text: Arc<str> = Arc::from(text);
        let seq = self.next_seq;
        self.next_seq += 1;

        self.index.insert(Arc::clone(&text), seq);
        self.entries.push_back(ClipEntry::new(text, seq));
        self.evict_overflow();

        AddOutcome::Added
    }

    fn evict_overflow(&mut self) {
        while self.entries.len() > self.capacity {
            let Some(oldest) = self.entries.pop_front() else {
                break;
            };
            self.index.remove(oldest.shared_text());

            #[cfg(feature = "tracing")]
            tracing::trace!(seq = oldest.seq(), capacity = self.capacity, "evicted oldest clip");
        }
    }

    /// Looks up the entry whose text is exactly `text`.
    ///
    /// Writing it back to the system clipboard is the caller's job.
    pub fn restore(&self, text: &str) -> Result<&ClipEntry, HistoryError> {
        let seq = *self.index.get(text).ok_or(HistoryError::NotFound)?;
        // seqs are strictly increasing front to back
        let pos = self
            .entries
            .binary_search_by_key(&seq, ClipEntry::seq)
            .map_err(|_| HistoryError::NotFound)?;
        Ok(&self.entries[pos])
    }

    /// Changes the capacity used by future `add` calls. Does not evict.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, text: &str) -> bool {
        self.index.contains_key(text)
    }

    /// Borrowing view, oldest first. Reverse it for a most-recent-first menu.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &ClipEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    pub fn entries_newest_first(&self) -> impl Iterator<Item = &ClipEntry> {
        self.entries.iter().rev()
    }

    pub fn newest(&self) -> Option<&ClipEntry> {
        self.entries.back()
    }

    /// Owned copy of the entries, oldest first.
    pub fn snapshot(&self) -> Vec<ClipEntry> {
        self.entries.iter().cloned().collect()
    }
}
