mod bootstrap;
mod shell;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use cp_app::{AppPaths, SettingsStore};
use cp_core::config::AppConfig;
use cp_core::SettingKey;
use tracing::{info, warn};

use bootstrap::tracing::init_tracing_subscriber;
use bootstrap::wiring;

/// Clipboard history utility
///
/// Samples the clipboard on an interval, keeps the most recent distinct
/// texts and lets you copy any of them back.
#[derive(Debug, Parser)]
#[command(name = "copypasta", version, about)]
struct Cli {
    /// Path to a copypasta.toml (default: <data dir>/copypasta/copypasta.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Poll the clipboard and open the history console (default)
    Run,
    /// Print the stored value of a setting
    Get {
        /// timer_interval or max_clips
        key: SettingKey,
    },
    /// Validate and store a setting
    Set {
        /// timer_interval or max_clips
        key: SettingKey,
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    /// Print resolved file locations
    Paths,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let app_paths = wiring::resolve_app_paths();
    let config = bootstrap::resolve_config(
        cli.config.clone(),
        app_paths.as_ref().map(|p| p.config_path.as_path()),
    )?;
    let _log_guard = init_tracing_subscriber(wiring::log_dir(&config, app_paths.as_ref()).as_deref())?;

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => run(&config, app_paths.as_ref()).await,
        Command::Get { key } => {
            let store = SettingsStore::new(wiring::settings_backing(&config, app_paths.as_ref()));
            match store.get(key).await? {
                Some(value) => println!("{value}"),
                None => println!("{key} is not set (default {})", key.default_value()),
            }
            Ok(())
        }
        Command::Set { key, value } => {
            let mut store = SettingsStore::new(wiring::settings_backing(&config, app_paths.as_ref()));
            store.set(key, value).await?;
            println!("{key} = {value}");
            Ok(())
        }
        Command::Paths => {
            print_paths(&config, app_paths.as_ref());
            Ok(())
        }
    }
}

async fn run(config: &AppConfig, paths: Option<&AppPaths>) -> anyhow::Result<()> {
    let mut app = wiring::build_app_context(config, paths).await?;
    if app.is_settings_degraded() {
        warn!("Settings store unavailable, running on defaults");
    }

    app.start().context("Failed to start clipboard poller")?;
    info!(version = env!("CARGO_PKG_VERSION"), "Copypasta running");

    let result = shell::run_console(&mut app).await;
    app.shutdown().await;
    result
}

fn print_paths(config: &AppConfig, paths: Option<&AppPaths>) {
    let show = |p: Option<PathBuf>| {
        p.map(|p| p.display().to_string())
            .unwrap_or_else(|| "(unavailable)".to_string())
    };
    println!("settings: {}", show(wiring::settings_path(config, paths)));
    println!("config:   {}", show(paths.map(|p| p.config_path.clone())));
    match wiring::log_dir(config, paths) {
        Some(dir) => println!("logs:     {}", dir.display()),
        None => println!("logs:     (file logging off)"),
    }
}
