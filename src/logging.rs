//! Logging infrastructure for portcall
//!
//! Logs go to the console and to a daily-rolling file in the platform data
//! directory. Initialise once from the binary, then use the `tracing` macros:
//!
//! ```no_run
//! portcall::logging::init().expect("Failed to initialize logging");
//! tracing::info!("Pipeline started");
//! ```

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// Gets the log directory path based on platform conventions
///
/// - Windows: `%APPDATA%/portcall/logs`
/// - macOS: `~/Library/Application Support/portcall/logs`
/// - Linux: `~/.local/share/portcall/logs`
pub fn get_log_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to determine data directory")?;
    let log_dir = base_dir.join("portcall").join("logs");

    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    }

    Ok(log_dir)
}

/// Initializes console and file logging.
///
/// The file appender keeps seven daily `portcall.*.log` files. The level
/// defaults to INFO and can be overridden with `RUST_LOG`.
///
/// # Errors
///
/// Returns error if the log directory cannot be created or the appender fails
pub fn init() -> Result<()> {
    let log_dir = get_log_dir()?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(7)
        .filename_prefix("portcall")
        .filename_suffix("log")
        .build(&log_dir)
        .context("Failed to create file appender")?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Failed to create env filter")?;

    // The console report owns stdout, so log lines go to stderr.
    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .compact();

    let file_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false)
        .with_writer(file_appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!("Logging initialized, log directory: {}", log_dir.display());

    Ok(())
}
