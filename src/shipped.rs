//! Schedule bundled with the binary, used to seed storage on first run.

use crate::error::{Result, ScheduleError};
use confsched_scrape::ScheduleEntry;

/// JSON of the bundled two-day schedule.
pub const SHIPPED_SCHEDULE_JSON: &str = include_str!("../assets/shipped_schedule.json");

/// Decode the bundled schedule.
///
/// # Errors
///
/// Returns [`ScheduleError::Storage`] if the embedded JSON is malformed.
pub fn shipped_schedule() -> Result<Vec<ScheduleEntry>> {
    serde_json::from_str(SHIPPED_SCHEDULE_JSON)
        .map_err(|e| ScheduleError::Storage(format!("bundled schedule is invalid: {e}")))
}
