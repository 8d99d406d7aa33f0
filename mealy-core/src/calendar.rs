//! Client-side calendar state for the meal plan.
//!
//! The backend is the source of truth for which slots exist; this is the
//! rendered view built from it. A slot is identified by (day, time) and
//! holds at most one event.

use serde::Serialize;

use crate::models::NutritionFacts;
use crate::view::DataSource;

/// Renders an event title: `"12:00: Pasta (650 kcal)"`. The calorie
/// suffix is omitted when the count is zero or absent.
pub fn slot_title(time: &str, recipe_name: &str, calories: f64) -> String {
    let base = format!("{}: {}", time, recipe_name);
    if calories > 0.0 {
        format!("{} ({} kcal)", base, calories)
    } else {
        base
    }
}

/// One rendered calendar entry.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CalendarEvent {
    pub day: String,
    pub time: String,
    pub recipe_name: String,
    pub title: String,
    pub nutrition: NutritionFacts,
    /// Where the nutrition values came from, if anywhere.
    pub nutrition_source: Option<DataSource>,
}

impl CalendarEvent {
    pub fn new(
        day: impl Into<String>,
        time: impl Into<String>,
        recipe_name: impl Into<String>,
        nutrition: NutritionFacts,
        nutrition_source: Option<DataSource>,
    ) -> Self {
        let day = day.into();
        let time = time.into();
        let recipe_name = recipe_name.into();
        let title = slot_title(&time, &recipe_name, nutrition.calories);
        Self {
            day,
            time,
            recipe_name,
            title,
            nutrition,
            nutrition_source,
        }
    }
}

/// The calendar itself: a chronologically ordered set of events, at most
/// one per (day, time) slot.
#[derive(Debug, Default)]
pub struct Calendar {
    events: Vec<CalendarEvent>,
}

impl Calendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an event, replacing any existing event in the same
    /// (day, time) slot. Events without a day or time are ignored.
    pub fn upsert(&mut self, event: CalendarEvent) {
        if event.day.is_empty() || event.time.is_empty() {
            return;
        }
        self.events
            .retain(|e| !(e.day == event.day && e.time == event.time));
        self.events.push(event);
        self.events
            .sort_by(|a, b| (a.day.as_str(), a.time.as_str()).cmp(&(b.day.as_str(), b.time.as_str())));
    }

    /// Removes the event in a slot. Returns whether one existed.
    pub fn remove(&mut self, day: &str, time: &str) -> bool {
        let before = self.events.len();
        self.events.retain(|e| !(e.day == day && e.time == time));
        self.events.len() != before
    }

    /// Drops every event, ahead of a full reload from the backend.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Events in chronological order.
    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(day: &str, time: &str, name: &str, calories: f64) -> CalendarEvent {
        CalendarEvent::new(
            day,
            time,
            name,
            NutritionFacts::new(calories, 0.0, 0.0, 0.0),
            None,
        )
    }

    #[test]
    fn test_title_with_calories() {
        assert_eq!(slot_title("12:00", "Pasta", 650.0), "12:00: Pasta (650 kcal)");
    }

    #[test]
    fn test_title_without_calories() {
        assert_eq!(slot_title("18:30", "Salad", 0.0), "18:30: Salad");
    }

    #[test]
    fn test_upsert_replaces_same_slot() {
        let mut calendar = Calendar::new();
        calendar.upsert(event("2026-05-01", "12:00", "Pasta", 650.0));
        calendar.upsert(event("2026-05-01", "12:00", "Salad", 320.0));

        assert_eq!(calendar.len(), 1);
        let only = &calendar.events()[0];
        assert_eq!(only.recipe_name, "Salad");
        assert_eq!(only.title, "12:00: Salad (320 kcal)");
    }

    #[test]
    fn test_upsert_keeps_distinct_slots() {
        let mut calendar = Calendar::new();
        calendar.upsert(event("2026-05-01", "12:00", "Pasta", 0.0));
        calendar.upsert(event("2026-05-01", "18:30", "Salad", 0.0));
        calendar.upsert(event("2026-05-02", "12:00", "Soup", 0.0));

        assert_eq!(calendar.len(), 3);
    }

    #[test]
    fn test_upsert_ignores_incomplete_slots() {
        let mut calendar = Calendar::new();
        calendar.upsert(event("", "12:00", "Pasta", 0.0));
        calendar.upsert(event("2026-05-01", "", "Pasta", 0.0));
        assert!(calendar.is_empty());
    }

    #[test]
    fn test_events_in_chronological_order() {
        let mut calendar = Calendar::new();
        calendar.upsert(event("2026-05-02", "08:00", "Toast", 0.0));
        calendar.upsert(event("2026-05-01", "18:30", "Salad", 0.0));
        calendar.upsert(event("2026-05-01", "12:00", "Pasta", 0.0));

        let order: Vec<&str> = calendar
            .events()
            .iter()
            .map(|e| e.recipe_name.as_str())
            .collect();
        assert_eq!(order, vec!["Pasta", "Salad", "Toast"]);
    }

    #[test]
    fn test_remove_slot() {
        let mut calendar = Calendar::new();
        calendar.upsert(event("2026-05-01", "12:00", "Pasta", 0.0));

        assert!(calendar.remove("2026-05-01", "12:00"));
        assert!(!calendar.remove("2026-05-01", "12:00"));
        assert!(calendar.is_empty());
    }

    #[test]
    fn test_clear_for_reload() {
        let mut calendar = Calendar::new();
        calendar.upsert(event("2026-05-01", "12:00", "Pasta", 0.0));
        calendar.clear();
        assert!(calendar.is_empty());
    }
}
