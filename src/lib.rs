//! arknotify — a scheduled check for newly added digital-archive items that
//! posts rich summaries to a Discord channel.
//!
//! Each invocation runs to completion once: it queries the archive's
//! `/items` API for the configured time window (looking back up to 30 days
//! when a window is too quiet), drops uncatalogued placeholder entries, and
//! sends the survivors to Discord in chunked multi-embed messages.
//!
//! # Architecture
//!
//! - [`archive`] — the Omeka-S-style API client, item model, and
//!   window/lookback policy
//! - [`discord`] — embed construction and the gateway connect/send/close
//!   lifecycle
//! - [`runner`] — the linear orchestration of one run
//! - Tokio for async I/O, reqwest for the archive API, serenity for Discord
//!
//! # Example
//!
//! ```no_run
//! use arknotify::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     arknotify::setup_logging("logs/arknotify.log")?;
//!     let config = AppConfig::from_env()?;
//!     arknotify::runner::run(&config).await?;
//!     Ok(())
//! }
//! ```

pub mod archive;
pub mod config;
pub mod discord;
pub mod errors;
pub mod runner;

/// Configure line-oriented logging to stdout and an append-only log file.
///
/// Both outputs carry timestamp, level, and source location. The level
/// defaults to `info` and can be overridden through `RUST_LOG`.
///
/// # Errors
///
/// Fails when the log file (or its parent directory) cannot be created, or
/// when a global subscriber is already installed.
pub fn setup_logging(log_file: &str) -> std::io::Result<()> {
    use std::fs;
    use std::sync::Arc;

    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if let Some(parent) = std::path::Path::new(log_file).parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = fmt::layer().with_file(true).with_line_number(true);
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_writer(Arc::new(file));

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(std::io::Error::other)?;
    Ok(())
}
