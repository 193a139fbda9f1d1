//! Discord gateway lifecycle: connect, send, close.
//!
//! The gateway client runs on its own task; the run's thread of control
//! only ever suspends on the ready signal (bounded by a timeout) and on the
//! sends themselves.

use std::sync::Arc;
use std::time::Duration;

use serenity::all::{
    Channel, ChannelId, Client, Context, CreateMessage, EventHandler, GatewayIntents, Ready,
    ShardManager,
};
use serenity::http::Http;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};
use tracing::{error, info};

use super::embeds;
use crate::archive::Item;
use crate::config::AppConfig;
use crate::errors::NotifyError;

/// Pause between chunk sends to stay under the outbound rate limit.
const INTER_CHUNK_DELAY: Duration = Duration::from_secs(1);

/// Forwards the gateway ready event to the waiting connect call, replacing
/// the shared-flag callback pattern with an awaited signal.
struct ReadySignal {
    tx: mpsc::Sender<String>,
}

#[serenity::async_trait]
impl EventHandler for ReadySignal {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        let _ = self.tx.send(ready.user.name.clone()).await;
    }
}

pub struct DiscordNotifier {
    http: Arc<Http>,
    shard_manager: Arc<ShardManager>,
    gateway_task: JoinHandle<()>,
    channel_id: ChannelId,
    archive_base_url: String,
}

impl DiscordNotifier {
    /// Open the gateway connection, wait (bounded) for it to become ready,
    /// and resolve the target channel.
    ///
    /// # Errors
    ///
    /// `NotifyError::ConnectError` when the client cannot be built, the
    /// ready event does not arrive within the configured timeout, or the
    /// channel id does not resolve. The gateway is shut down before any of
    /// these are returned.
    pub async fn connect(config: &AppConfig) -> Result<Self, NotifyError> {
        info!(
            "Attempting to connect to Discord (channel id: {})",
            config.discord_channel_id
        );

        let (tx, mut rx) = mpsc::channel(1);
        let mut client = Client::builder(&config.discord_token, GatewayIntents::empty())
            .event_handler(ReadySignal { tx })
            .await
            .map_err(|e| NotifyError::ConnectError(e.to_string()))?;

        let http = client.http.clone();
        let shard_manager = client.shard_manager.clone();
        let gateway_task = tokio::spawn(async move {
            if let Err(e) = client.start().await {
                error!("Discord client terminated with an error: {e}");
            }
        });

        let ready_wait = Duration::from_secs(config.connect_timeout_secs);
        match timeout(ready_wait, rx.recv()).await {
            Ok(Some(bot_name)) => info!("Logged in as {bot_name}"),
            Ok(None) => {
                shutdown(&shard_manager, gateway_task).await;
                return Err(NotifyError::ConnectError(
                    "gateway closed before signalling ready".to_string(),
                ));
            }
            Err(_) => {
                shutdown(&shard_manager, gateway_task).await;
                return Err(NotifyError::ConnectError(format!(
                    "timed out after {}s waiting for the gateway ready event",
                    config.connect_timeout_secs
                )));
            }
        }

        let channel_id = ChannelId::new(config.discord_channel_id);
        match http.get_channel(channel_id).await {
            Ok(channel) => info!(
                "Successfully found Discord channel: {}",
                channel_label(&channel)
            ),
            Err(e) => {
                shutdown(&shard_manager, gateway_task).await;
                return Err(NotifyError::ConnectError(format!(
                    "could not resolve channel {}: {e}",
                    config.discord_channel_id
                )));
            }
        }

        Ok(Self {
            http,
            shard_manager,
            gateway_task,
            channel_id,
            archive_base_url: config.archive_base_url.clone(),
        })
    }

    /// Send one message per chunk of items; no-op on an empty list.
    ///
    /// Chunks are isolated: a failed send is logged in full and the
    /// remaining chunks are still attempted. Nothing already sent is rolled
    /// back.
    ///
    /// # Errors
    ///
    /// `NotifyError::SendError` after the loop when any chunk failed.
    pub async fn send_notification(&self, items: &[Item]) -> Result<(), NotifyError> {
        if items.is_empty() {
            info!("No items to send to Discord");
            return Ok(());
        }
        info!("Preparing Discord message for {} item(s)", items.len());

        let chunks = embeds::chunk_items(items);
        let chunk_count = chunks.len();
        let mut failed_chunks = 0usize;

        for (index, chunk) in chunks.iter().enumerate() {
            let message_embeds = embeds::build_message_embeds(
                chunk,
                index,
                chunk_count,
                items.len(),
                &self.archive_base_url,
            );
            let message = CreateMessage::new().embeds(message_embeds);

            match self.channel_id.send_message(&self.http, message).await {
                Ok(_) => info!(
                    "Successfully sent Discord message chunk {} of {}",
                    index + 1,
                    chunk_count
                ),
                Err(e) => {
                    failed_chunks += 1;
                    error!(
                        "Failed to send Discord message chunk {} of {}: {e:?}",
                        index + 1,
                        chunk_count
                    );
                }
            }

            if index + 1 < chunk_count {
                sleep(INTER_CHUNK_DELAY).await;
            }
        }

        if failed_chunks > 0 {
            return Err(NotifyError::SendError(format!(
                "{failed_chunks} of {chunk_count} message chunk(s) failed"
            )));
        }
        Ok(())
    }

    /// Shut the gateway down and wait for the client task to finish.
    pub async fn close(self) {
        info!("Closing Discord connection");
        shutdown(&self.shard_manager, self.gateway_task).await;
        info!("Discord connection closed");
    }
}

async fn shutdown(shard_manager: &Arc<ShardManager>, gateway_task: JoinHandle<()>) {
    shard_manager.shutdown_all().await;
    // A shard that never finished connecting can outlive shutdown_all; give
    // the client task a bounded grace period before cancelling it.
    let abort = gateway_task.abort_handle();
    match timeout(Duration::from_secs(5), gateway_task).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!("Discord client task ended abnormally: {e}"),
        Err(_) => abort.abort(),
    }
}

fn channel_label(channel: &Channel) -> String {
    match channel {
        Channel::Guild(guild_channel) => format!("#{}", guild_channel.name),
        other => other.id().to_string(),
    }
}
