//! Periodic clipboard sampling feeding the history.
//! 剪贴板轮询

mod command;
mod error;
mod worker;

use std::sync::Arc;
use std::time::Duration;

use cp_core::ports::SystemClipboardPort;
use cp_core::{ClipEntry, HistoryStore, SettingKey};
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

pub use error::PollerError;

use command::{PollerCommand, PollerCommandSender};
use worker::{restore_into, PollerWorker};

const COMMAND_BUFFER: usize = 32;
const EVENT_BUFFER: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    Stopped,
    Running,
}

/// History change notifications for whoever renders the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEvent {
    Added(ClipEntry),
    Restored(ClipEntry),
}

struct RunningWorker {
    command_tx: PollerCommandSender,
    join: JoinHandle<HistoryStore>,
}

/// Samples the system clipboard on a fixed interval and records new text.
///
/// While running, the history and all clipboard I/O live on one worker task;
/// the handle talks to it over a command channel and waits for each command to
/// be applied. While stopped, the handle holds the history itself.
///
/// ## Behavior / 行为
/// - the first sample happens one interval after `start`, not immediately
/// - `reconfigure` returns once the new period is armed; no tick with the old
///   period follows
/// - `stop` returns after the worker exited; no tick follows
/// - a failed or empty read records nothing and polling continues
pub struct ClipboardPoller {
    clipboard: Arc<dyn SystemClipboardPort>,
    events: broadcast::Sender<HistoryEvent>,
    idle_history: Option<HistoryStore>,
    running: Option<RunningWorker>,
    capacity: usize,
}

impl ClipboardPoller {
    pub fn new(clipboard: Arc<dyn SystemClipboardPort>, history: HistoryStore) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        let capacity = history.capacity();
        Self {
            clipboard,
            events,
            idle_history: Some(history),
            running: None,
            capacity,
        }
    }

    pub fn state(&self) -> PollerState {
        if self.running.is_some() {
            PollerState::Running
        } else {
            PollerState::Stopped
        }
    }

    /// Capacity last accepted by the history.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn subscribe(&self) -> broadcast::Receiver<HistoryEvent> {
        self.events.subscribe()
    }

    /// Spawns the worker. Must be called from within a tokio runtime.
    pub fn start(&mut self, interval_ms: i64) -> Result<(), PollerError> {
        let interval = validate_interval(interval_ms)?;
        if self.running.is_some() {
            return Err(PollerError::AlreadyRunning);
        }

        let history = self
            .idle_history
            .take()
            .unwrap_or_else(|| HistoryStore::new(self.capacity));
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let worker = PollerWorker::new(
            self.clipboard.clone(),
            history,
            self.events.clone(),
            command_rx,
            interval,
        );
        let join = tokio::spawn(worker.run());

        self.running = Some(RunningWorker { command_tx, join });
        Ok(())
    }

    /// Replaces the poll interval. Only valid while running.
    ///
    /// An invalid value is rejected before anything is sent and the current
    /// timer keeps its period.
    pub async fn reconfigure(&self, interval_ms: i64) -> Result<(), PollerError> {
        let interval = validate_interval(interval_ms)?;
        let running = self.running.as_ref().ok_or(PollerError::NotRunning)?;

        let (ack, done) = oneshot::channel();
        send(running, PollerCommand::Reconfigure { interval, ack }).await?;
        done.await.map_err(|_| PollerError::WorkerGone)?;
        info!(interval_ms, "Poll interval reconfigured");
        Ok(())
    }

    /// Changes how many entries the history keeps from the next add on.
    pub async fn set_capacity(&mut self, capacity: usize) -> Result<(), PollerError> {
        match (&self.running, &mut self.idle_history) {
            (Some(running), _) => {
                let (ack, done) = oneshot::channel();
                send(running, PollerCommand::SetCapacity { capacity, ack }).await?;
                done.await.map_err(|_| PollerError::WorkerGone)?;
            }
            (None, Some(history)) => history.set_capacity(capacity),
            (None, None) => {}
        }
        // Only once the history holding the entries has accepted it.
        self.capacity = capacity;
        Ok(())
    }

    /// Copy of the history, oldest first.
    pub async fn entries(&self) -> Result<Vec<ClipEntry>, PollerError> {
        match &self.running {
            Some(running) => {
                let (reply, rx) = oneshot::channel();
                send(running, PollerCommand::Snapshot { reply }).await?;
                rx.await.map_err(|_| PollerError::WorkerGone)
            }
            None => Ok(self
                .idle_history
                .as_ref()
                .map(HistoryStore::snapshot)
                .unwrap_or_default()),
        }
    }

    /// Writes the entry with exactly `text` back to the system clipboard.
    pub async fn restore(&self, text: &str) -> Result<ClipEntry, PollerError> {
        match &self.running {
            Some(running) => {
                let (reply, rx) = oneshot::channel();
                let text = text.to_owned();
                send(running, PollerCommand::Restore { text, reply }).await?;
                rx.await.map_err(|_| PollerError::WorkerGone)?
            }
            None => {
                let history = self
                    .idle_history
                    .as_ref()
                    .ok_or(PollerError::History(cp_core::HistoryError::NotFound))?;
                let entry = restore_into(self.clipboard.as_ref(), history, text)?;
                let _ = self.events.send(HistoryEvent::Restored(entry.clone()));
                Ok(entry)
            }
        }
    }

    /// Stops the worker and takes the history back. No-op when stopped.
    pub async fn stop(&mut self) {
        let Some(running) = self.running.take() else {
            return;
        };

        // A closed channel also ends the worker, so a failed send is fine.
        let _ = running.command_tx.send(PollerCommand::Shutdown).await;
        let history = match running.join.await {
            Ok(history) => history,
            Err(e) => {
                error!(error = %e, "Clipboard poller worker failed, history lost");
                HistoryStore::new(self.capacity)
            }
        };
        self.idle_history = Some(history);
    }
}

impl Drop for ClipboardPoller {
    fn drop(&mut self) {
        if self.running.is_some() {
            // Dropping the sender ends the worker on its next select.
            warn!("Clipboard poller dropped while running");
        }
    }
}

fn validate_interval(interval_ms: i64) -> Result<Duration, PollerError> {
    SettingKey::PollInterval.validate(interval_ms)?;
    Ok(Duration::from_millis(interval_ms.unsigned_abs()))
}

async fn send(running: &RunningWorker, command: PollerCommand) -> Result<(), PollerError> {
    running
        .command_tx
        .send(command)
        .await
        .map_err(|_| PollerError::WorkerGone)
}
