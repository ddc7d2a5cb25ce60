use std::sync::Arc;
use std::time::Duration;

use cp_core::ports::SystemClipboardPort;
use cp_core::{AddOutcome, ClipEntry, HistoryStore};
use tokio::sync::broadcast;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, trace, warn};

use super::command::{PollerCommand, PollerCommandReceiver};
use super::error::PollerError;
use super::HistoryEvent;

/// Single task owning the history and every clipboard access while running.
///
/// Ticks and commands are serialized by one `select!` loop, so a tick never
/// interleaves with a reconfigure, a capacity change or a restore.
pub(crate) struct PollerWorker {
    clipboard: Arc<dyn SystemClipboardPort>,
    history: HistoryStore,
    events: broadcast::Sender<HistoryEvent>,
    command_rx: PollerCommandReceiver,
    interval: Duration,
    read_failures: u64,
}

impl PollerWorker {
    pub(crate) fn new(
        clipboard: Arc<dyn SystemClipboardPort>,
        history: HistoryStore,
        events: broadcast::Sender<HistoryEvent>,
        command_rx: PollerCommandReceiver,
        interval: Duration,
    ) -> Self {
        Self {
            clipboard,
            history,
            events,
            command_rx,
            interval,
            read_failures: 0,
        }
    }

    /// Runs until `Shutdown` arrives or every sender is dropped, then hands
    /// the history back.
    pub(crate) async fn run(mut self) -> HistoryStore {
        let mut ticker = ticker_from_now(self.interval);
        info!(interval_ms = self.interval.as_millis() as u64, "Clipboard poller started");

        loop {
            tokio::select! {
                // Pending commands win over a due tick.
                biased;

                command = self.command_rx.recv() => match command {
                    Some(PollerCommand::Shutdown) | None => break,
                    Some(command) => self.handle_command(command, &mut ticker),
                },
                _ = ticker.tick() => self.tick(),
            }
        }

        info!("Clipboard poller stopped");
        self.history
    }

    fn handle_command(&mut self, command: PollerCommand, ticker: &mut Interval) {
        match command {
            PollerCommand::Reconfigure { interval, ack } => {
                debug!(
                    old_ms = self.interval.as_millis() as u64,
                    new_ms = interval.as_millis() as u64,
                    "Reconfiguring poll interval"
                );
                self.interval = interval;
                // Replacing the timer drops any tick scheduled with the old period.
                *ticker = ticker_from_now(interval);
                let _ = ack.send(());
            }
            PollerCommand::SetCapacity { capacity, ack } => {
                self.history.set_capacity(capacity);
                debug!(capacity, "History capacity updated");
                let _ = ack.send(());
            }
            PollerCommand::Snapshot { reply } => {
                let _ = reply.send(self.history.snapshot());
            }
            PollerCommand::Restore { text, reply } => {
                let _ = reply.send(self.restore(&text));
            }
            PollerCommand::Shutdown => {}
        }
    }

    fn tick(&mut self) {
        match self.clipboard.read_text() {
            Ok(content) => {
                if self.read_failures > 0 {
                    info!(failures = self.read_failures, "Clipboard readable again");
                    self.read_failures = 0;
                }
                if let Some(text) = content.filter(|t| !t.is_empty()) {
                    self.record(&text);
                }
            }
            Err(e) => {
                self.read_failures += 1;
                if self.read_failures == 1 {
                    warn!(error = %e, "Failed to read clipboard, skipping tick");
                } else {
                    debug!(error = %e, failures = self.read_failures, "Clipboard still unreadable");
                }
            }
        }
    }

    fn record(&mut self, text: &str) {
        match self.history.add(text) {
            AddOutcome::Added => {
                // Capacity 0 accepts the add but keeps nothing.
                if let Some(entry) = self.history.newest().filter(|e| e.text() == text) {
                    debug!(seq = entry.seq(), len = self.history.len(), "New clip recorded");
                    let _ = self.events.send(HistoryEvent::Added(entry.clone()));
                }
            }
            AddOutcome::AlreadyPresent => trace!("Clipboard unchanged"),
        }
    }

    fn restore(&self, text: &str) -> Result<ClipEntry, PollerError> {
        restore_into(self.clipboard.as_ref(), &self.history, text).map(|entry| {
            let _ = self.events.send(HistoryEvent::Restored(entry.clone()));
            entry
        })
    }
}

/// Looks `text` up and writes it back to the clipboard.
///
/// The restored text is already in the history, so the next tick sees it as
/// present and records nothing.
pub(crate) fn restore_into(
    clipboard: &dyn SystemClipboardPort,
    history: &HistoryStore,
    text: &str,
) -> Result<ClipEntry, PollerError> {
    let entry = history.restore(text).map_err(|e| {
        debug!("Restore requested for a clip that is no longer in history");
        PollerError::from(e)
    })?;
    clipboard
        .write_text(entry.text())
        .map_err(|e| PollerError::Clipboard(format!("{e:#}")))?;
    debug!(seq = entry.seq(), "Clip restored to clipboard");
    Ok(entry.clone())
}

/// First tick one full `period` from now, never immediately.
fn ticker_from_now(period: Duration) -> Interval {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}
