//! Error types for the schedule store.

use confsched_scrape::ScrapeError;

/// Top-level error type for schedule caching and starring.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// Fetching or parsing the remote schedule failed.
    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    /// A star operation named an entry that is not in the current snapshot.
    #[error("entry not found in schedule: {0}")]
    Lookup(String),

    /// Durable storage could not be read, written, or decoded.
    #[error("storage error: {0}")]
    Storage(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ScheduleError>;
