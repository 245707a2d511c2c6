//! Schedule page parser.
//!
//! The page renders each day as a collapsible panel holding a `.timeline`
//! list. Every `<li>` in that list is one entry:
//!
//! ```text
//! <li>
//!   <div class="timeline-badge"><i class="fa fa-microphone"></i></div>
//!   <div class="timeline-panel">
//!     <div class="timeline-heading">
//!       <h4 class="timeline-title">Keynote</h4>
//!       <p><small class="text-muted">
//!         <span>Jan 01, 2020, 09:00am</span> <span>30</span>
//!       </small></p>
//!     </div>
//!     <div class="timeline-body"><p>Welcome</p></div>
//!   </div>
//! </li>
//! ```
//!
//! A missing container or list aborts the parse. A broken item only costs
//! that item: it is logged and replaced by [`ScheduleEntry::parse_error`].

use crate::category;
use crate::error::{Result, ScrapeError};
use crate::types::ScheduleEntry;
use chrono::{FixedOffset, NaiveDateTime, TimeZone, Utc};
use scraper::{ElementRef, Html, Selector};

/// Id of the panel holding the schedule list.
pub const CONTAINER_SELECTOR: &str = "#day3-collapse";

/// Class of the list inside the container.
pub const LIST_SELECTOR: &str = ".timeline";

/// chrono format of the muted start-time text, e.g. `Jan 01, 2020, 09:00am`.
pub const TIME_FORMAT: &str = "%b %d, %Y, %I:%M%p";

struct Selectors {
    container: Selector,
    list: Selector,
    item: Selector,
    badge_icon: Selector,
    title: Selector,
    muted: Selector,
    body: Selector,
}

impl Selectors {
    fn new() -> Result<Self> {
        Ok(Self {
            container: selector(CONTAINER_SELECTOR)?,
            list: selector(LIST_SELECTOR)?,
            item: selector("li")?,
            badge_icon: selector(".timeline-badge i")?,
            title: selector(".timeline-panel .timeline-title")?,
            muted: selector(".timeline-panel .timeline-heading .text-muted")?,
            body: selector(".timeline-panel .timeline-body")?,
        })
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Parse(format!("invalid selector {css}: {e:?}")))
}

/// Parse a schedule page, substituting placeholders for broken items.
///
/// `offset` is the UTC offset the page's wall-clock times are written in.
///
/// # Errors
///
/// Returns [`ScrapeError::Parse`] with `"container not found"` or
/// `"list not found"` when the page structure is not recognised.
pub fn parse_schedule_html(html: &str, offset: FixedOffset) -> Result<Vec<ScheduleEntry>> {
    let items = parse_schedule_items(html, offset)?;
    let entries: Vec<ScheduleEntry> = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            item.unwrap_or_else(|e| {
                tracing::warn!(index, error = %e, "failed to parse schedule entry");
                ScheduleEntry::parse_error()
            })
        })
        .collect();

    tracing::info!(count = entries.len(), "parsed schedule entries");
    Ok(entries)
}

/// Parse a schedule page into one result per list item.
///
/// Only structural failures (missing container or list) are returned as the
/// outer error; per-item failures stay in the returned vector.
///
/// # Errors
///
/// Same as [`parse_schedule_html`].
pub fn parse_schedule_items(
    html: &str,
    offset: FixedOffset,
) -> Result<Vec<Result<ScheduleEntry>>> {
    let document = Html::parse_document(html);
    let sel = Selectors::new()?;

    let container = document
        .select(&sel.container)
        .next()
        .ok_or_else(|| ScrapeError::Parse("container not found".into()))?;
    let list = container
        .select(&sel.list)
        .next()
        .ok_or_else(|| ScrapeError::Parse("list not found".into()))?;

    // Every `li` below the list counts, nested ones included, so positions
    // line up with the page's own item numbering.
    Ok(list
        .select(&sel.item)
        .map(|li| parse_entry(li, &sel, offset))
        .collect())
}

fn parse_entry(li: ElementRef<'_>, sel: &Selectors, offset: FixedOffset) -> Result<ScheduleEntry> {
    let icon = li
        .select(&sel.badge_icon)
        .next()
        .ok_or_else(|| ScrapeError::Parse("badge icon not found".into()))?;
    let kind = category::classify(icon.value().attr("class").unwrap_or_default());

    let title = li
        .select(&sel.title)
        .next()
        .map(collapsed_text)
        .ok_or_else(|| ScrapeError::Parse("title not found".into()))?;
    if title.is_empty() {
        return Err(ScrapeError::Parse("title is empty".into()));
    }

    let (time, duration) = match li.select(&sel.muted).next() {
        Some(muted) => {
            let (time, duration) = parse_time_and_duration(muted, offset)?;
            (Some(time), Some(duration))
        }
        None => (None, None),
    };

    let description = li
        .select(&sel.body)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_owned())
        .filter(|text| !text.is_empty());

    Ok(ScheduleEntry {
        kind,
        title,
        time,
        duration,
        description,
    })
}

/// The muted heading holds two child elements: the start time, then the
/// duration in minutes.
fn parse_time_and_duration(
    muted: ElementRef<'_>,
    offset: FixedOffset,
) -> Result<(chrono::DateTime<Utc>, u32)> {
    let mut parts = muted.children().filter_map(ElementRef::wrap);
    let time_el = parts
        .next()
        .ok_or_else(|| ScrapeError::Parse("start time not found".into()))?;
    let duration_el = parts
        .next()
        .ok_or_else(|| ScrapeError::Parse("duration not found".into()))?;

    let time = parse_time(&collapsed_text(time_el), offset)?;
    let duration_text = collapsed_text(duration_el);
    let duration = duration_text
        .parse::<u32>()
        .map_err(|e| ScrapeError::Parse(format!("invalid duration {duration_text:?}: {e}")))?;

    Ok((time, duration))
}

/// Parse `Jan 01, 2020, 09:00am` written at `offset` into UTC.
pub fn parse_time(text: &str, offset: FixedOffset) -> Result<chrono::DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(text, TIME_FORMAT)
        .map_err(|e| ScrapeError::Parse(format!("invalid start time {text:?}: {e}")))?;
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|t| t.with_timezone(&Utc))
        .ok_or_else(|| ScrapeError::Parse(format!("ambiguous start time {text:?}")))
}

fn collapsed_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
