//! Line console standing in for the tray menu.

use anyhow::Context;
use cp_app::{AppContext, HistoryEvent};
use cp_core::{ClipEntry, SettingKey};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info};

const PREVIEW_CHARS: usize = 60;

const HELP: &str = "\
commands:
  list                 show history, newest first
  restore <n>          copy item <n> of the last listing back to the clipboard
  get <key>            print a stored setting (timer_interval, max_clips)
  set <key> <value>    change a setting
  settings             print effective settings
  help                 this text
  quit                 stop polling and exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Restore(usize),
    Get(SettingKey),
    Set(SettingKey, i64),
    Settings,
    Help,
    Quit,
    Empty,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(ShellCommand::Empty);
        };
        let args: Vec<&str> = words.collect();

        let key = |s: &str| s.parse::<SettingKey>().map_err(|e| e.to_string());

        match (head, args.as_slice()) {
            ("list" | "ls", []) => Ok(ShellCommand::List),
            ("restore", [n]) => match n.parse::<usize>() {
                Ok(n) if n > 0 => Ok(ShellCommand::Restore(n)),
                _ => Err(format!("not an item number: {n}")),
            },
            ("get", [k]) => Ok(ShellCommand::Get(key(*k)?)),
            ("set", [k, v]) => {
                let value = v
                    .parse::<i64>()
                    .map_err(|_| format!("not an integer: {v}"))?;
                Ok(ShellCommand::Set(key(*k)?, value))
            }
            ("settings", []) => Ok(ShellCommand::Settings),
            ("help" | "?", []) => Ok(ShellCommand::Help),
            ("quit" | "exit", []) => Ok(ShellCommand::Quit),
            _ => Err(format!("unrecognized command `{}`, try `help`", line.trim())),
        }
    }
}

/// Menu state: the listing the user last saw. `restore <n>` refers to it,
/// so an item evicted since then reports not found, like a stale menu entry.
#[derive(Default)]
struct Shell {
    listed: Vec<ClipEntry>,
}

impl Shell {
    async fn execute(&mut self, app: &mut AppContext, command: ShellCommand) -> anyhow::Result<()> {
        match command {
            ShellCommand::List => {
                self.listed = app.history().await?.into_iter().rev().collect();
                if self.listed.is_empty() {
                    println!("(history is empty)");
                }
                for (i, entry) in self.listed.iter().enumerate() {
                    println!("{:>3}. {}", i + 1, entry.preview(PREVIEW_CHARS));
                }
            }
            ShellCommand::Restore(n) => {
                let entry = self
                    .listed
                    .get(n - 1)
                    .with_context(|| format!("no item {n} in the last listing, run `list`"))?;
                let restored = app.restore(entry.text()).await?;
                println!("restored: {}", restored.preview(PREVIEW_CHARS));
            }
            ShellCommand::Get(key) => match app.stored_setting(key).await? {
                Some(value) => println!("{key} = {value}"),
                None => println!("{key} is not set"),
            },
            ShellCommand::Set(key, value) => {
                app.set_setting(key, value).await?;
                println!("{key} = {value}");
            }
            ShellCommand::Settings => {
                let settings = app.settings();
                println!("timer_interval = {}", settings.poll_interval_ms);
                println!("max_clips = {}", settings.max_clips);
                if app.is_settings_degraded() {
                    println!("(settings store unavailable, changes may not persist)");
                }
            }
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Quit | ShellCommand::Empty => {}
        }
        Ok(())
    }
}

/// Reads commands from stdin until `quit`, end of input or Ctrl-C.
pub async fn run_console(app: &mut AppContext) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut events = app.subscribe();
    let mut shell = Shell::default();

    println!("{HELP}");
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    debug!("stdin closed");
                    break;
                };
                match ShellCommand::parse(&line) {
                    Ok(ShellCommand::Quit) => break,
                    Ok(command) => {
                        if let Err(e) = shell.execute(app, command).await {
                            println!("error: {e:#}");
                        }
                    }
                    Err(message) => println!("{message}"),
                }
            }
            event = events.recv() => match event {
                Ok(HistoryEvent::Added(entry)) => println!("+ {}", entry.preview(PREVIEW_CHARS)),
                Ok(HistoryEvent::Restored(_)) => {}
                Err(RecvError::Lagged(skipped)) => debug!(skipped, "Console missed history events"),
                Err(RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        }
    }
    Ok(())
}
