use std::env;

use url::Url;

use crate::archive::window::{LookbackPolicy, WindowStrategy};
use crate::errors::NotifyError;

pub const DEFAULT_API_URL: &str = "https://archive.hitsave.org/api";
pub const DEFAULT_BASE_URL: &str = "https://archive.hitsave.org";
pub const DEFAULT_LOG_FILE: &str = "logs/arknotify.log";
pub const DEFAULT_MIN_ITEMS: usize = 9;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub archive_api_url: String,
    pub archive_base_url: String,
    pub discord_token: String,
    pub discord_channel_id: u64,
    pub window_strategy: WindowStrategy,
    pub lookback: LookbackPolicy,
    pub connect_timeout_secs: u64,
    pub log_file: String,
}

impl AppConfig {
    /// Load configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::ConfigError` when `DISCORD_TOKEN` or
    /// `DISCORD_CHANNEL_ID` is missing or malformed, or when an optional
    /// variable is present but unparseable.
    pub fn from_env() -> Result<Self, NotifyError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// `from_env` delegates here; tests pass a closure over a map instead of
    /// mutating process environment (which is unsafe in edition 2024).
    ///
    /// # Errors
    ///
    /// Same failure modes as [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, NotifyError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = lookup("DISCORD_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| NotifyError::ConfigError("DISCORD_TOKEN is not set".to_string()))?;

        let discord_channel_id = lookup("DISCORD_CHANNEL_ID")
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| NotifyError::ConfigError("DISCORD_CHANNEL_ID is not set".to_string()))?
            .trim()
            .parse::<u64>()
            .map_err(|e| NotifyError::ConfigError(format!("DISCORD_CHANNEL_ID: {e}")))?;
        if discord_channel_id == 0 {
            return Err(NotifyError::ConfigError(
                "DISCORD_CHANNEL_ID must be a non-zero channel id".to_string(),
            ));
        }

        let archive_api_url = checked_url("ARCHIVE_API_URL", lookup("ARCHIVE_API_URL"), DEFAULT_API_URL)?;
        let archive_base_url =
            checked_url("ARCHIVE_BASE_URL", lookup("ARCHIVE_BASE_URL"), DEFAULT_BASE_URL)?;

        let window_strategy = match lookup("WINDOW_STRATEGY") {
            None => WindowStrategy::CalendarDay,
            Some(raw) => raw
                .parse::<WindowStrategy>()
                .map_err(|e| NotifyError::ConfigError(format!("WINDOW_STRATEGY: {e}")))?,
        };

        let lookback_enabled = match lookup("LOOKBACK_ENABLED") {
            None => true,
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| NotifyError::ConfigError(format!("LOOKBACK_ENABLED: {raw:?} is not a boolean")))?,
        };

        let min_items = match lookup("LOOKBACK_MIN_ITEMS") {
            None => DEFAULT_MIN_ITEMS,
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|e| NotifyError::ConfigError(format!("LOOKBACK_MIN_ITEMS: {e}")))?,
        };

        let connect_timeout_secs = match lookup("CONNECT_TIMEOUT_SECS") {
            None => DEFAULT_CONNECT_TIMEOUT_SECS,
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| NotifyError::ConfigError(format!("CONNECT_TIMEOUT_SECS: {e}")))?,
        };

        let log_file = lookup("LOG_FILE").unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

        Ok(Self {
            archive_api_url,
            archive_base_url,
            discord_token,
            discord_channel_id,
            window_strategy,
            lookback: LookbackPolicy {
                enabled: lookback_enabled,
                min_items,
            },
            connect_timeout_secs,
            log_file,
        })
    }
}

/// Validate a URL-valued variable and normalize away any trailing slash so
/// permalinks and query paths can be built by simple concatenation.
fn checked_url(name: &str, value: Option<String>, default: &str) -> Result<String, NotifyError> {
    let raw = value.unwrap_or_else(|| default.to_string());
    Url::parse(&raw).map_err(|e| NotifyError::ConfigError(format!("{name}: {e}")))?;
    Ok(raw.trim_end_matches('/').to_string())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
