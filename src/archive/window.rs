//! Time-window selection for archive queries.
//!
//! The checker historically shipped two near-identical variants: one that
//! queried the current calendar day and one that queried a rolling 24-hour
//! span. Both are expressed here as a single [`WindowStrategy`] so the client
//! has one code path.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveTime, Utc};

/// How far back a quiet window may regress before lookback gives up.
pub const LOOKBACK_LIMIT_DAYS: i64 = 30;

/// Half-open UTC interval `[start, end)` used for `created_after` /
/// `created_before` query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl FetchWindow {
    /// The calendar day immediately preceding this window's start.
    #[must_use]
    pub fn previous_day(&self) -> FetchWindow {
        FetchWindow {
            start: self.start - Duration::days(1),
            end: self.start,
        }
    }
}

impl fmt::Display for FetchWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}

/// Strategy for the initial query window of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowStrategy {
    /// Midnight today to midnight tomorrow (UTC).
    CalendarDay,
    /// The last N hours ending now.
    RollingHours(u32),
}

impl WindowStrategy {
    #[must_use]
    pub fn initial_window(&self, now: DateTime<Utc>) -> FetchWindow {
        match self {
            WindowStrategy::CalendarDay => {
                let start = now.date_naive().and_time(NaiveTime::MIN).and_utc();
                FetchWindow {
                    start,
                    end: start + Duration::days(1),
                }
            }
            WindowStrategy::RollingHours(hours) => FetchWindow {
                start: now - Duration::hours(i64::from(*hours)),
                end: now,
            },
        }
    }
}

impl FromStr for WindowStrategy {
    type Err = String;

    /// Accepts `calendar-day`, `rolling-24h`, or `rolling-<N>h` generally.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        if normalized == "calendar-day" {
            return Ok(WindowStrategy::CalendarDay);
        }
        if let Some(hours) = normalized
            .strip_prefix("rolling-")
            .and_then(|rest| rest.strip_suffix('h'))
        {
            let hours: u32 = hours
                .parse()
                .map_err(|_| format!("{s:?} is not a window strategy"))?;
            if hours == 0 {
                return Err("rolling window must span at least one hour".to_string());
            }
            return Ok(WindowStrategy::RollingHours(hours));
        }
        Err(format!(
            "{s:?} is not a window strategy (expected \"calendar-day\" or \"rolling-<N>h\")"
        ))
    }
}

/// Widen the search backward when a window yields too few items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookbackPolicy {
    pub enabled: bool,
    /// Stop looking back once this many items have been collected. A zero
    /// threshold disables lookback regardless of `enabled`.
    pub min_items: usize,
}

impl LookbackPolicy {
    #[must_use]
    pub fn disabled() -> Self {
        LookbackPolicy {
            enabled: false,
            min_items: 0,
        }
    }

    /// Whether a window holding `collected` items so far warrants another
    /// step back in time.
    #[must_use]
    pub fn wants_more(&self, collected: usize) -> bool {
        self.enabled && self.min_items > 0 && collected < self.min_items
    }
}

/// The earliest instant lookback is allowed to reach. Windows whose start is
/// at or before this point end the regression.
#[must_use]
pub fn lookback_floor(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(LOOKBACK_LIMIT_DAYS)
}
