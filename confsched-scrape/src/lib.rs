//! # confsched-scrape
//!
//! Fetches a conference schedule page and scrapes it into structured
//! [`ScheduleEntry`] values.
//!
//! ## Design
//!
//! - One HTTP GET against a configurable page, bounded by a timeout
//! - CSS-selector parsing of a fixed timeline markup
//! - Icon classes mapped to categories through an ordered table
//! - Graceful degradation: an unparseable item becomes a placeholder entry
//!   instead of failing the whole page
//!
//! Persistence is not handled here; see the `confsched` crate.

pub mod category;
pub mod config;
pub mod error;
pub mod http;
pub mod parser;
pub mod types;

pub use config::ScrapeConfig;
pub use error::{Result, ScrapeError};
pub use types::{EntryType, ScheduleEntry};

/// Fetch the schedule page and parse it into entries.
///
/// # Errors
///
/// Returns [`ScrapeError::Config`] for an invalid `config`,
/// [`ScrapeError::Network`] if the page cannot be retrieved, and
/// [`ScrapeError::Parse`] if the schedule container or list is missing.
/// Individual broken items are not errors.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> confsched_scrape::Result<()> {
/// let config = confsched_scrape::ScrapeConfig::default();
/// let entries = confsched_scrape::fetch_schedule(&config).await?;
/// for entry in &entries {
///     println!("{}: {}", entry.kind, entry.title);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn fetch_schedule(config: &ScrapeConfig) -> Result<Vec<ScheduleEntry>> {
    config.validate()?;
    let offset = config.utc_offset()?;
    let html = http::fetch_html(config).await?;
    parser::parse_schedule_html(&html, offset)
}
