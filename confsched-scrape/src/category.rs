//! Icon-class classification of schedule entries.
//!
//! The schedule page marks each item with a Font Awesome icon. The table
//! below maps icon class substrings to entry categories; it is evaluated in
//! declaration order and the first match wins.

use crate::types::EntryType;

/// Ordered `(class substring, category)` pairs.
pub const ICON_CATEGORIES: &[(&str, EntryType)] = &[
    ("fa-calendar", EntryType::NewDay),
    ("fa-ticket", EntryType::Registration),
    ("fa-cutlery", EntryType::Eat),
    ("fa-microphone", EntryType::Talk),
    ("fa-coffee", EntryType::Break),
    ("fa-question", EntryType::Questions),
    ("fa-play", EntryType::Play),
];

/// Classify an icon's `class` attribute, defaulting to [`EntryType::Unknown`].
pub fn classify(class_list: &str) -> EntryType {
    classify_with(ICON_CATEGORIES, class_list)
}

/// Classify against an explicit table. First matching needle wins.
pub fn classify_with(table: &[(&str, EntryType)], class_list: &str) -> EntryType {
    table
        .iter()
        .find(|(needle, _)| class_list.contains(needle))
        .map(|(_, kind)| *kind)
        .unwrap_or_default()
}
