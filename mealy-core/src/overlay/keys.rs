//! Overlay map keys.
//!
//! Recipe-scoped entries are keyed by display name with a stringified-id
//! fallback: a recipe is created (and its image stored) before the
//! backend has assigned it an id, so the name is the only key available
//! at write time. Slot-scoped entries are keyed by day and time joined
//! with a separator outside both alphabets.

use chrono::{NaiveDate, NaiveTime};

/// Separator for composite slot keys. Day (`YYYY-MM-DD`) and time
/// (`HH:MM`) alphabets are digits plus `-` and `:`, so `|` cannot occur
/// in either component.
pub const SLOT_KEY_SEPARATOR: char = '|';

/// Ordered lookup keys for a recipe-scoped overlay entry: name first,
/// then the stringified id. Empty components and duplicates are dropped.
pub fn recipe_key_candidates(name: &str, id: Option<&str>) -> Vec<String> {
    let mut keys = Vec::new();
    let name = name.trim();
    if !name.is_empty() {
        keys.push(name.to_string());
    }
    if let Some(id) = id {
        let id = id.trim();
        if !id.is_empty() && id != name {
            keys.push(id.to_string());
        }
    }
    keys
}

/// Joins a calendar slot into a single overlay key.
pub fn slot_key(day: &str, time: &str) -> String {
    format!("{}{}{}", day, SLOT_KEY_SEPARATOR, time)
}

/// Day component shape: a real calendar date written `YYYY-MM-DD`.
pub fn is_valid_day(day: &str) -> bool {
    day.len() == 10 && NaiveDate::parse_from_str(day, "%Y-%m-%d").is_ok()
}

/// Time component shape: 24-hour `HH:MM`.
pub fn is_valid_time(time: &str) -> bool {
    time.len() == 5 && NaiveTime::parse_from_str(time, "%H:%M").is_ok()
}
