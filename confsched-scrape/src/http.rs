//! HTTP retrieval of the schedule page.
//!
//! Provides a configured [`reqwest::Client`] and a single GET helper that
//! maps every transport or status failure to [`ScrapeError::Network`].

use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use std::time::Duration;

/// Build a [`reqwest::Client`] for fetching the schedule page.
///
/// The client has:
/// - Timeout from config
/// - The configured User-Agent
/// - Brotli and gzip decompression
///
/// # Errors
///
/// Returns [`ScrapeError::Network`] if the client cannot be constructed.
pub fn build_client(config: &ScrapeConfig) -> Result<reqwest::Client, ScrapeError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| ScrapeError::Network(format!("failed to build HTTP client: {e}")))
}

/// GET `config.url` and return the response body as text.
///
/// # Errors
///
/// Returns [`ScrapeError::Network`] if the request fails, times out, the
/// server answers with a non-success status, or the body cannot be read.
pub async fn fetch_html(config: &ScrapeConfig) -> Result<String, ScrapeError> {
    let client = build_client(config)?;

    tracing::trace!(url = %config.url, "fetching schedule page");

    let response = client
        .get(&config.url)
        .header("Accept", "text/html")
        .send()
        .await
        .map_err(|e| ScrapeError::Network(format!("schedule request failed: {e}")))?
        .error_for_status()
        .map_err(|e| ScrapeError::Network(format!("schedule HTTP error: {e}")))?;

    let html = response
        .text()
        .await
        .map_err(|e| ScrapeError::Network(format!("schedule response read failed: {e}")))?;

    tracing::debug!(bytes = html.len(), "schedule page received");
    Ok(html)
}
