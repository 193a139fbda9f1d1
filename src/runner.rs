//! Run Orchestrator.
//!
//! One linear pass: fetch → log → (no items? end) → connect → send → close.
//! Fetch and connect failures end the run gracefully with an error log; the
//! Discord connection is only opened once there is something to send.

use tracing::{error, info};

use crate::archive::{ArchiveClient, Item};
use crate::config::AppConfig;
use crate::discord::DiscordNotifier;
use crate::errors::NotifyError;

/// Execute one fetch-filter-notify pass.
///
/// # Errors
///
/// Fetch, connect, and send failures are all recovered here and logged; an
/// error return is reserved for failures no stage claimed, which the caller
/// logs before exiting cleanly.
pub async fn run(config: &AppConfig) -> Result<(), NotifyError> {
    let client = ArchiveClient::new(config.archive_api_url.clone());
    let items = match client
        .fetch_recent(config.window_strategy, config.lookback)
        .await
    {
        Ok(items) => items,
        Err(e) => {
            error!("Failed to fetch items from archive API: {e}");
            return Ok(());
        }
    };

    log_new_items(&items);

    if items.is_empty() {
        info!("No items to send to Discord");
        return Ok(());
    }

    info!("Initializing Discord notification");
    let notifier = match DiscordNotifier::connect(config).await {
        Ok(notifier) => notifier,
        Err(e) => {
            error!("{e}");
            return Ok(());
        }
    };

    if let Err(e) = notifier.send_notification(&items).await {
        error!("Discord notification failed: {e}");
    }
    notifier.close().await;

    Ok(())
}

fn log_new_items(items: &[Item]) {
    if items.is_empty() {
        info!("No new items found");
        return;
    }
    info!("Found {} new item(s)", items.len());
    for item in items {
        info!(
            "Item ID: {}, Title: {}, Created: {}",
            item.id_display(),
            item.display_title(),
            item.created_display()
        );
    }
}
