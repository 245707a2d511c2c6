//! Scrape configuration with sensible defaults.
//!
//! [`ScrapeConfig`] controls where the schedule is fetched from, how long the
//! request may take, and how scraped wall-clock times are anchored.

use crate::error::ScrapeError;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use url::Url;

/// Page the schedule is scraped from by default.
pub const DEFAULT_SCHEDULE_URL: &str = "https://ngeurope.org";

/// Largest accepted UTC offset, in minutes (UTC+14:00).
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Configuration for fetching and parsing the schedule page.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Page containing the schedule markup.
    pub url: String,
    /// HTTP request timeout in seconds.
    pub timeout_seconds: u64,
    /// User-Agent sent with the request.
    pub user_agent: String,
    /// Offset from UTC, in minutes, at which the page's times are written.
    pub utc_offset_minutes: i32,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SCHEDULE_URL.to_owned(),
            timeout_seconds: 15,
            user_agent: concat!("confsched/", env!("CARGO_PKG_VERSION")).to_owned(),
            utc_offset_minutes: 0,
        }
    }
}

impl ScrapeConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `url` must parse and use `http` or `https`
    /// - `timeout_seconds` must be greater than 0
    /// - `user_agent` must not be empty
    /// - `utc_offset_minutes` must be within ±14 hours
    pub fn validate(&self) -> Result<(), ScrapeError> {
        let url = Url::parse(&self.url)
            .map_err(|e| ScrapeError::Config(format!("invalid url {:?}: {e}", self.url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ScrapeError::Config(format!(
                "url scheme must be http or https, got {}",
                url.scheme()
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(ScrapeError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ScrapeError::Config("user_agent must not be empty".into()));
        }
        self.utc_offset()?;
        Ok(())
    }

    /// The configured offset as a chrono [`FixedOffset`].
    pub fn utc_offset(&self) -> Result<FixedOffset, ScrapeError> {
        if self.utc_offset_minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(ScrapeError::Config(format!(
                "utc_offset_minutes out of range: {}",
                self.utc_offset_minutes
            )));
        }
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(|| {
            ScrapeError::Config(format!(
                "utc_offset_minutes out of range: {}",
                self.utc_offset_minutes
            ))
        })
    }
}
