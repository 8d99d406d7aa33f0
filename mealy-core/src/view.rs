//! Merged view models.
//!
//! A rendered recipe or meal slot combines backend fields with overlay
//! fields. Precedence is fixed: the backend wins wherever it supplies a
//! value, the overlay fills the gaps, and the view records which source
//! ended up populating it.

use serde::Serialize;
use std::fmt;

use crate::calendar::CalendarEvent;
use crate::models::{
    average_stars, format_average, Ingredient, MealEntry, NutritionFacts, PartialNutrition,
    RatingEntry, RecipeDetail, SlotNutrition,
};

/// Which side supplied a view field.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DataSource {
    Backend,
    LocalOverlay,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Backend => write!(f, "backend"),
            DataSource::LocalOverlay => write!(f, "local"),
        }
    }
}

/// Resolves nutrition with field-level precedence: backend-supplied
/// values win, the overlay fills in the rest. The source is `Backend`
/// as soon as the backend supplied any field.
pub fn merge_nutrition(
    backend: &PartialNutrition,
    overlay: Option<&NutritionFacts>,
) -> (Option<NutritionFacts>, Option<DataSource>) {
    match (backend.is_empty(), overlay) {
        (true, None) => (None, None),
        (true, Some(facts)) => (Some(*facts), Some(DataSource::LocalOverlay)),
        (false, None) => (Some(backend.to_facts()), Some(DataSource::Backend)),
        (false, Some(facts)) => (Some(backend.with_fallback(facts)), Some(DataSource::Backend)),
    }
}

/// Overlay fields already fetched for one recipe.
#[derive(Debug, Clone, Default)]
pub struct RecipeOverlay {
    pub image: Option<String>,
    pub nutrition: Option<NutritionFacts>,
}

/// Read-only merged recipe view.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecipeView {
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub ingredients: Vec<Ingredient>,
    pub owner: Option<String>,
    /// Encoded image payload, always overlay-sourced.
    pub image: Option<String>,
    pub nutrition: Option<NutritionFacts>,
    pub nutrition_source: Option<DataSource>,
}

impl RecipeView {
    /// Combines a backend recipe record with its overlay fields.
    pub fn merge(detail: RecipeDetail, overlay: RecipeOverlay) -> Self {
        let (nutrition, nutrition_source) =
            merge_nutrition(&detail.nutrition, overlay.nutrition.as_ref());
        Self {
            id: detail.id,
            name: detail.name,
            description: detail.description,
            ingredients: detail.ingredients,
            owner: detail.owner,
            image: overlay.image,
            nutrition,
            nutrition_source,
        }
    }
}

/// Builds the calendar event for one backend meal entry, merging in the
/// slot's overlay nutrition record if one exists.
pub fn merge_slot(entry: &MealEntry, overlay: Option<&SlotNutrition>) -> CalendarEvent {
    let (nutrition, source) = merge_nutrition(&entry.nutrition, overlay.map(|r| &r.facts));
    CalendarEvent::new(
        entry.day.clone(),
        entry.time.clone(),
        entry.name.clone(),
        nutrition.unwrap_or_default(),
        source,
    )
}

/// Aggregated ratings for one shared recipe.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RatingSummary {
    pub average: f64,
    pub count: usize,
    pub source: DataSource,
}

impl RatingSummary {
    pub fn from_entries(entries: &[RatingEntry], source: DataSource) -> Self {
        Self {
            average: average_stars(entries),
            count: entries.len(),
            source,
        }
    }
}

impl fmt::Display for RatingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "★ {} ({})", format_average(self.average), self.count)
    }
}
