//! Tracing configuration for Copypasta
//!
//! ## Architecture / 架构
//!
//! - console layer on stderr, always on
//! - optional daily-rolling file layer, non-blocking
//! - `log` records from adapters are forwarded through `tracing-log`

use std::io;
use std::path::Path;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry, EnvFilter};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Check if running in development environment
fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Build the default filter directives for tracing
///
/// ## Behavior / 行为
/// - **Development**: debug level for the app crates
/// - **Production**: info level
/// - clipboard-rs internals stay at warn either way
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let level = if is_dev { "debug" } else { "info" };
    vec![
        level.to_string(),
        "clipboard_rs=warn".to_string(),
        format!("cp_platform={level}"),
        format!("cp_infra={level}"),
    ]
}

/// Initialize the global subscriber.
///
/// `RUST_LOG` overrides the default directives. When `file_dir` is given a
/// daily file `copypasta.log.<date>` is written there as well; the returned
/// guard flushes it and must be held until exit.
///
/// ## Errors / 错误
///
/// Fails when a subscriber or `log` logger is already installed, or when the
/// log directory cannot be created.
pub fn init_tracing_subscriber(file_dir: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(build_filter_directives(is_development()).join(",")));

    let console_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(BoxMakeWriter::new(io::stderr));

    let (file_layer, guard) = match file_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, "copypasta.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
                .with_level(true)
                .with_file(true)
                .with_line_number(true)
                .with_target(true)
                .with_ansi(false) // No ANSI colors in file logs
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_log::LogTracer::init().context("Failed to install log bridge")?;

    let subscriber = registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer);
    tracing::subscriber::set_global_default(subscriber)
        .context("Tracing subscriber already initialized")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_directives() {
        let dev_directives = build_filter_directives(true);
        assert!(dev_directives.contains(&"debug".to_string()));
        assert!(dev_directives.contains(&"cp_platform=debug".to_string()));
        assert!(dev_directives.contains(&"clipboard_rs=warn".to_string()));

        let prod_directives = build_filter_directives(false);
        assert!(prod_directives.contains(&"info".to_string()));
        assert!(prod_directives.contains(&"cp_infra=info".to_string()));
    }

    #[test]
    fn test_default_directives_parse() {
        for is_dev in [true, false] {
            let directives = build_filter_directives(is_dev).join(",");
            assert!(EnvFilter::try_new(&directives).is_ok(), "{directives}");
        }
    }
}
