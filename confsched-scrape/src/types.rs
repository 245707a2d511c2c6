//! Core types for scraped schedule entries.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Title given to entries whose markup could not be parsed.
pub const PARSE_ERROR_TITLE: &str = "[parse error]";

/// Category of a schedule entry, derived from the icon shown next to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryType {
    /// No known icon matched.
    #[default]
    Unknown,
    /// Coffee break.
    Break,
    /// Breakfast, lunch, dinner.
    Eat,
    /// Day separator heading.
    NewDay,
    /// Entertainment slot.
    Play,
    /// Q&A panel.
    Questions,
    /// Registration / check-in.
    Registration,
    /// A talk.
    Talk,
}

impl EntryType {
    /// Returns the upper snake-case name used in persisted JSON.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Break => "BREAK",
            Self::Eat => "EAT",
            Self::NewDay => "NEW_DAY",
            Self::Play => "PLAY",
            Self::Questions => "QUESTIONS",
            Self::Registration => "REGISTRATION",
            Self::Talk => "TALK",
        }
    }

    /// Whether front ends should offer a star toggle for this kind of entry.
    pub fn is_starable(&self) -> bool {
        matches!(self, Self::Talk | Self::Questions | Self::Play)
    }

    /// Returns all variants in declaration order.
    pub fn all() -> &'static [EntryType] {
        &[
            Self::Unknown,
            Self::Break,
            Self::Eat,
            Self::NewDay,
            Self::Play,
            Self::Questions,
            Self::Registration,
            Self::Talk,
        ]
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// A single item of a conference schedule.
///
/// Within one snapshot the `title` acts as the identity key: lookups take
/// the first entry with a matching title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Entry category.
    #[serde(rename = "type", default)]
    pub kind: EntryType,
    /// Display name.
    pub title: String,
    /// Start time, if the entry is scheduled.
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
    /// Length in minutes.
    #[serde(default)]
    pub duration: Option<u32>,
    /// Free-text body.
    #[serde(default)]
    pub description: Option<String>,
}

impl ScheduleEntry {
    /// Create an entry with only a category and title.
    pub fn new(kind: EntryType, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            time: None,
            duration: None,
            description: None,
        }
    }

    /// Placeholder substituted for list items that failed to parse.
    pub fn parse_error() -> Self {
        Self::new(EntryType::Unknown, PARSE_ERROR_TITLE)
    }

    /// Returns `true` if this is the parse-failure placeholder.
    pub fn is_parse_error(&self) -> bool {
        self.kind == EntryType::Unknown && self.title == PARSE_ERROR_TITLE
    }

    /// When the entry finishes: start plus duration, or just the start if
    /// no duration is known.
    pub fn ends_at(&self) -> Option<DateTime<Utc>> {
        let start = self.time?;
        match self.duration {
            Some(minutes) => Some(start + Duration::minutes(i64::from(minutes))),
            None => Some(start),
        }
    }

    /// Whether the entry is still worth showing at `now`.
    ///
    /// Untimed entries (day headings) have no end and are never upcoming.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.ends_at().is_some_and(|end| now < end)
    }
}
