//! Error types for the confsched-scrape crate.
//!
//! Messages are stable lower-case strings so callers can display them
//! directly or match on the variant.

/// Errors that can occur while fetching or parsing a schedule page.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// The HTTP retrieval failed (transport, timeout, or non-success status).
    #[error("network error: {0}")]
    Network(String),

    /// The page did not have the expected markup structure.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid scrape configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for confsched-scrape results.
pub type Result<T> = std::result::Result<T, ScrapeError>;
