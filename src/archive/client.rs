//! Archive API client.
//!
//! One `GET /items` per window, restricted to items with attached media.
//! A transport failure or non-2xx status is a fetch error, never an empty
//! list, so callers can tell "nothing new" apart from "could not ask".

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{info, warn};

use super::item::Item;
use super::window::{
    FetchWindow, LOOKBACK_LIMIT_DAYS, LookbackPolicy, WindowStrategy, lookback_floor,
};
use crate::errors::NotifyError;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

pub struct ArchiveClient {
    http: Client,
    api_url: String,
}

impl ArchiveClient {
    #[must_use]
    pub fn new(api_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            http,
            api_url: api_url.into(),
        }
    }

    /// Fetch items created inside `window` that have media, with placeholder
    /// entries already filtered out.
    ///
    /// # Errors
    ///
    /// `NotifyError::FetchError` on transport failure, a non-2xx response,
    /// or a body that does not decode as an item list.
    pub async fn fetch_window(&self, window: FetchWindow) -> Result<Vec<Item>, NotifyError> {
        let url = format!("{}/items", self.api_url);
        let response = self
            .http
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .query(&[
                ("created_after", window.start.to_rfc3339()),
                ("created_before", window.end.to_rfc3339()),
                ("has_media", "1".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let items: Vec<Item> = response.json().await?;
        let fetched = items.len();
        let items: Vec<Item> = items.into_iter().filter(|i| !i.is_placeholder()).collect();
        if items.len() < fetched {
            info!(
                "Filtered {} placeholder item(s) from window {}",
                fetched - items.len(),
                window
            );
        }
        info!("Found {} item(s) with media in window {}", items.len(), window);
        Ok(items)
    }

    /// Fetch the strategy's current window and, when the lookback policy asks
    /// for more, keep pulling in preceding days.
    ///
    /// # Errors
    ///
    /// Fails only when the initial window cannot be fetched; see
    /// [`collect_with_lookback`] for how lookback failures are absorbed.
    pub async fn fetch_recent(
        &self,
        strategy: WindowStrategy,
        policy: LookbackPolicy,
    ) -> Result<Vec<Item>, NotifyError> {
        let now = Utc::now();
        collect_with_lookback(strategy.initial_window(now), policy, now, |w| {
            self.fetch_window(w)
        })
        .await
    }
}

/// Lookback loop, generic over the fetch so tests can drive it with stubs.
///
/// Fetches `initial`, then while the policy wants more items (count checked
/// after filtering) steps back one day at a time, appending older results
/// after newer ones. The regression ends when the threshold is met, the
/// window start reaches the 30-day floor, or a lookback fetch fails — a
/// failed lookback keeps whatever was already collected, only a failed
/// initial fetch is an error.
///
/// # Errors
///
/// Propagates the error of the initial fetch.
pub async fn collect_with_lookback<F, Fut>(
    initial: FetchWindow,
    policy: LookbackPolicy,
    now: DateTime<Utc>,
    fetch: F,
) -> Result<Vec<Item>, NotifyError>
where
    F: Fn(FetchWindow) -> Fut,
    Fut: Future<Output = Result<Vec<Item>, NotifyError>>,
{
    let mut window = initial;
    let mut items = fetch(window).await?;
    let floor = lookback_floor(now);

    while policy.wants_more(items.len()) {
        if window.start <= floor {
            info!(
                "Lookback reached the {LOOKBACK_LIMIT_DAYS}-day limit with {} item(s)",
                items.len()
            );
            break;
        }
        window = window.previous_day();
        info!(
            "Only found {} of {} wanted item(s), checking previous day {}",
            items.len(),
            policy.min_items,
            window
        );
        match fetch(window).await {
            Ok(older) => items.extend(older),
            Err(e) => {
                warn!(
                    "Lookback fetch failed, keeping the {} item(s) collected so far: {}",
                    items.len(),
                    e
                );
                break;
            }
        }
    }

    Ok(items)
}
