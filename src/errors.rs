use thiserror::Error;

/// Errors produced while checking the archive and notifying Discord.
///
/// The variants follow the failure points of a run: bad configuration at
/// startup, the archive fetch, the Discord gateway connection, and the
/// message send. Nothing here escapes the process; every variant ends up in
/// the log.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Failed to fetch items from archive API: {0}")]
    FetchError(String),

    #[error("Failed to connect to Discord: {0}")]
    ConnectError(String),

    #[error("Failed to send Discord notification: {0}")]
    SendError(String),
}

impl From<reqwest::Error> for NotifyError {
    fn from(error: reqwest::Error) -> Self {
        NotifyError::FetchError(error.to_string())
    }
}

// Serenity errors surface during the send loop; connection-phase failures are
// mapped to ConnectError explicitly at the call site.
impl From<serenity::Error> for NotifyError {
    fn from(error: serenity::Error) -> Self {
        NotifyError::SendError(error.to_string())
    }
}
