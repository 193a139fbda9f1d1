//! Notification Formatter/Sender: chunked embed messages over the Discord
//! gateway.

pub mod embeds;
pub mod notifier;

pub use notifier::DiscordNotifier;
