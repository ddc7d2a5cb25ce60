#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Once};

use cp_core::ports::SystemClipboardPort;
use tokio::time::Instant;

static TRACE_INIT: Once = Once::new();

/// Routes poller and settings logs to the test output; `RUST_LOG` filters.
pub fn init_tracing() {
    TRACE_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Clipboard whose content changes on every read, so every tick records a
/// new clip. Remembers when each read happened.
#[derive(Default)]
pub struct CountingClipboard {
    counter: AtomicU64,
    pub reads: Mutex<Vec<Instant>>,
    pub writes: Mutex<Vec<String>>,
}

impl CountingClipboard {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn read_count(&self) -> usize {
        self.reads.lock().unwrap().len()
    }

    pub fn reads_since(&self, since: Instant) -> Vec<Instant> {
        self.reads
            .lock()
            .unwrap()
            .iter()
            .copied()
            .filter(|at| *at > since)
            .collect()
    }
}

impl SystemClipboardPort for CountingClipboard {
    fn read_text(&self) -> anyhow::Result<Option<String>> {
        self.reads.lock().unwrap().push(Instant::now());
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        Ok(Some(format!("clip-{n}")))
    }

    fn write_text(&self, text: &str) -> anyhow::Result<()> {
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Clipboard whose text the test sets directly.
#[derive(Default)]
pub struct SettableClipboard {
    current: Mutex<Option<String>>,
    pub reads: Mutex<Vec<Instant>>,
}

impl SettableClipboard {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn copy(&self, text: &str) {
        *self.current.lock().unwrap() = Some(text.to_string());
    }
}

impl SystemClipboardPort for SettableClipboard {
    fn read_text(&self) -> anyhow::Result<Option<String>> {
        self.reads.lock().unwrap().push(Instant::now());
        Ok(self.current.lock().unwrap().clone())
    }

    fn write_text(&self, text: &str) -> anyhow::Result<()> {
        self.copy(text);
        Ok(())
    }
}

/// Clipboard that takes the worker down on its first read.
pub struct CrashingClipboard;

impl SystemClipboardPort for CrashingClipboard {
    fn read_text(&self) -> anyhow::Result<Option<String>> {
        panic!("clipboard backend crashed");
    }

    fn write_text(&self, _text: &str) -> anyhow::Result<()> {
        Ok(())
    }
}
