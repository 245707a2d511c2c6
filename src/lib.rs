//! # confsched
//!
//! Conference schedule with a local cache and starred favorites.
//!
//! The schedule is scraped from a remote page by [`confsched_scrape`],
//! cached in a [`KeyValueStore`], and seeded on first run from a bundled
//! dataset. Favorites are kept as a set of positions in the cached schedule.
//!
//! ```no_run
//! # async fn example() -> confsched::Result<()> {
//! use confsched::{AppConfig, FileStore, ScheduleStore};
//!
//! let config = AppConfig::default();
//! let mut store = ScheduleStore::new(FileStore::new(config.storage_dir()), config.source)?;
//! store.update().await?;
//! let keynote = store.find_by_title("Keynote")?.cloned();
//! if let Some(entry) = keynote {
//!     store.toggle_star(&entry)?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod confsched_dirs;
pub mod error;
pub mod shipped;
pub mod storage;
pub mod store;

pub use config::{AppConfig, StorageConfig};
pub use confsched_scrape::{EntryType, ScheduleEntry, ScrapeConfig, ScrapeError};
pub use error::{Result, ScheduleError};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{ListFilter, ListedEntry, ScheduleStore};
