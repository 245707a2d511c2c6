//! Cached schedule snapshot and starred-entry bookkeeping.
//!
//! [`ScheduleStore`] owns the in-memory snapshot and a [`KeyValueStore`]
//! backend. Two keys are persisted:
//!
//! - `schedule`: JSON array of [`ScheduleEntry`], in display order
//! - `stars`: JSON array of positional indices into that array
//!
//! Star indices are positional. When [`ScheduleStore::update`] replaces the
//! snapshot with a differently ordered one, existing stars may point at other
//! entries or past the end; they are not migrated, only reported.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use confsched_scrape::{ScheduleEntry, ScrapeConfig};

use crate::error::{Result, ScheduleError};
use crate::shipped::shipped_schedule;
use crate::storage::KeyValueStore;

/// Storage key of the schedule snapshot.
pub const SCHEDULE_KEY: &str = "schedule";

/// Storage key of the starred index set.
pub const STARS_KEY: &str = "stars";

/// Which entries [`ScheduleStore::list_entries`] keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Only starred entries.
    pub starred_only: bool,
    /// Only entries that have not finished yet.
    pub upcoming_only: bool,
}

/// One row of a schedule listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListedEntry<'a> {
    /// Position in the snapshot, as used by the star set.
    pub index: usize,
    /// The entry itself.
    pub entry: &'a ScheduleEntry,
    /// Whether `index` is in the star set.
    pub starred: bool,
}

/// Local schedule cache with starred favorites.
#[derive(Debug)]
pub struct ScheduleStore<S> {
    storage: S,
    source: ScrapeConfig,
    shipped: Vec<ScheduleEntry>,
    snapshot: Option<Vec<ScheduleEntry>>,
}

impl<S: KeyValueStore> ScheduleStore<S> {
    /// Create a store seeded from the bundled schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::Storage`] if the bundled schedule cannot be decoded.
    pub fn new(storage: S, source: ScrapeConfig) -> Result<Self> {
        Ok(Self::with_shipped(storage, source, shipped_schedule()?))
    }

    /// Create a store with an explicit first-run dataset.
    ///
    /// An empty `shipped` disables seeding.
    pub fn with_shipped(storage: S, source: ScrapeConfig, shipped: Vec<ScheduleEntry>) -> Self {
        Self {
            storage,
            source,
            shipped,
            snapshot: None,
        }
    }

    /// The storage backend.
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the store, returning its storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Where [`update`](Self::update) fetches from.
    #[must_use]
    pub fn source(&self) -> &ScrapeConfig {
        &self.source
    }

    /// Return the current snapshot, loading it from storage on first use.
    ///
    /// On first load the bundled schedule is written to storage if, and only
    /// if, no snapshot has been persisted yet. If storage holds nothing and
    /// there is no bundled schedule the result is empty.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::Storage`] if storage fails or the persisted
    /// snapshot cannot be decoded.
    pub fn get_stored(&mut self) -> Result<&[ScheduleEntry]> {
        if self.snapshot.is_none() {
            self.seed_shipped()?;
            match self.storage.get(SCHEDULE_KEY)? {
                Some(json) => self.snapshot = Some(decode_schedule(&json)?),
                None => tracing::info!("no stored schedule found"),
            }
        }
        Ok(self.snapshot.as_deref().unwrap_or_default())
    }

    fn seed_shipped(&mut self) -> Result<()> {
        if self.shipped.is_empty() || self.storage.contains(SCHEDULE_KEY)? {
            return Ok(());
        }
        tracing::info!(entries = self.shipped.len(), "seeding bundled schedule");
        let json = encode_schedule(&self.shipped)?;
        self.storage.set(SCHEDULE_KEY, &json)
    }

    /// Fetch and parse the remote schedule, then make it the new snapshot.
    ///
    /// Storage is written before the in-memory snapshot is replaced, so a
    /// failed write leaves both untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::Scrape`] if the page cannot be fetched or its
    /// structure is not recognised, and [`ScheduleError::Storage`] if the new
    /// snapshot cannot be persisted. In every error case the previously
    /// persisted snapshot is kept.
    pub async fn update(&mut self) -> Result<&[ScheduleEntry]> {
        let entries = confsched_scrape::fetch_schedule(&self.source).await?;
        let json = encode_schedule(&entries)?;
        self.storage.set(SCHEDULE_KEY, &json)?;

        self.report_stale_stars(entries.len());
        tracing::info!(entries = entries.len(), "schedule updated");
        self.snapshot = Some(entries);
        Ok(self.snapshot.as_deref().unwrap_or_default())
    }

    fn report_stale_stars(&self, len: usize) {
        match self.get_starred() {
            Ok(starred) => {
                let stale: Vec<usize> = starred.range(len..).copied().collect();
                if !stale.is_empty() {
                    tracing::warn!(?stale, len, "starred indices fall outside the new schedule");
                }
            }
            Err(e) => tracing::warn!(error = %e, "cannot read stars after update"),
        }
    }

    /// The persisted set of starred indices (empty if none were stored).
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::Storage`] if the star set cannot be read or decoded.
    pub fn get_starred(&self) -> Result<BTreeSet<usize>> {
        match self.storage.get(STARS_KEY)? {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| ScheduleError::Storage(format!("cannot decode stars: {e}"))),
            None => Ok(BTreeSet::new()),
        }
    }

    fn write_starred(&mut self, starred: &BTreeSet<usize>) -> Result<()> {
        let json = serde_json::to_string(starred)
            .map_err(|e| ScheduleError::Storage(format!("cannot encode stars: {e}")))?;
        self.storage.set(STARS_KEY, &json)
    }

    /// Position of the first snapshot entry titled like `entry`.
    fn index_of(&mut self, entry: &ScheduleEntry) -> Result<usize> {
        self.get_stored()?
            .iter()
            .position(|e| e.title == entry.title)
            .ok_or_else(|| ScheduleError::Lookup(entry.title.clone()))
    }

    /// Star `entry`.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::Lookup`] if no snapshot entry has the same
    /// title, or a storage error.
    pub fn add_star(&mut self, entry: &ScheduleEntry) -> Result<()> {
        let idx = self.index_of(entry)?;
        let mut starred = self.get_starred()?;
        starred.insert(idx);
        self.write_starred(&starred)
    }

    /// Unstar `entry`.
    ///
    /// # Errors
    ///
    /// Same as [`add_star`](Self::add_star).
    pub fn remove_star(&mut self, entry: &ScheduleEntry) -> Result<()> {
        let idx = self.index_of(entry)?;
        let mut starred = self.get_starred()?;
        starred.remove(&idx);
        self.write_starred(&starred)
    }

    /// Whether `entry` is starred.
    ///
    /// # Errors
    ///
    /// Same as [`add_star`](Self::add_star).
    pub fn is_starred(&mut self, entry: &ScheduleEntry) -> Result<bool> {
        let idx = self.index_of(entry)?;
        Ok(self.get_starred()?.contains(&idx))
    }

    /// Flip the starred state of `entry`, returning the new state.
    ///
    /// # Errors
    ///
    /// Same as [`add_star`](Self::add_star).
    pub fn toggle_star(&mut self, entry: &ScheduleEntry) -> Result<bool> {
        if self.is_starred(entry)? {
            self.remove_star(entry)?;
            Ok(false)
        } else {
            self.add_star(entry)?;
            Ok(true)
        }
    }

    /// First snapshot entry with exactly this title.
    ///
    /// # Errors
    ///
    /// Same as [`get_stored`](Self::get_stored).
    pub fn find_by_title(&mut self, title: &str) -> Result<Option<&ScheduleEntry>> {
        Ok(self.get_stored()?.iter().find(|e| e.title == title))
    }

    /// Starred entries with their indices, in snapshot order.
    ///
    /// Indices past the end of the snapshot are skipped.
    ///
    /// # Errors
    ///
    /// Same as [`get_stored`](Self::get_stored) and [`get_starred`](Self::get_starred).
    pub fn starred_entries(&mut self) -> Result<Vec<(usize, &ScheduleEntry)>> {
        let starred = self.get_starred()?;
        let entries = self.get_stored()?;
        Ok(starred
            .into_iter()
            .filter_map(|idx| entries.get(idx).map(|e| (idx, e)))
            .collect())
    }

    /// Snapshot entries passing `filter`, with their index and star state.
    ///
    /// # Errors
    ///
    /// Same as [`starred_entries`](Self::starred_entries).
    pub fn list_entries(
        &mut self,
        filter: ListFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<ListedEntry<'_>>> {
        let starred = self.get_starred()?;
        let entries = self.get_stored()?;
        Ok(entries
            .iter()
            .enumerate()
            .map(|(index, entry)| ListedEntry {
                index,
                entry,
                starred: starred.contains(&index),
            })
            .filter(|row| !filter.starred_only || row.starred)
            .filter(|row| !filter.upcoming_only || row.entry.is_upcoming(now))
            .collect())
    }
}

fn encode_schedule(entries: &[ScheduleEntry]) -> Result<String> {
    serde_json::to_string(entries)
        .map_err(|e| ScheduleError::Storage(format!("cannot encode schedule: {e}")))
}

fn decode_schedule(json: &str) -> Result<Vec<ScheduleEntry>> {
    serde_json::from_str(json)
        .map_err(|e| ScheduleError::Storage(format!("cannot decode stored schedule: {e}")))
}
