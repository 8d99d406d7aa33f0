//! Mealy Core Library
//!
//! API client, local overlay cache and shared types for Mealy clients.

pub mod api;
pub mod auth;
pub mod calendar;
pub mod image;
pub mod models;
pub mod numeric;
pub mod overlay;
pub mod validate;
pub mod view;

pub use api::{ApiClient, ApiError, NewMealSlot, NewRating, RegisterRequest, UpdateUserRequest};
pub use auth::{AuthError, SessionStore};
pub use calendar::{slot_title, Calendar, CalendarEvent};
pub use image::{encode_data_url, prepare_image, ImageError};
pub use models::{
    average_stars, format_average, Ingredient, MealEntry, NewRecipe, NutritionFacts,
    PartialNutrition, RatingEntry, RecipeDetail, RecipeSummary, SharedRecipeSummary, SlotNutrition,
    UserProfile,
};
pub use numeric::{num_or_zero, LooseNumber};
pub use overlay::{FileBackend, MemoryBackend, OverlayStore, StorageBackend, StorageError};
pub use validate::{validate_registration, validate_slot, validate_stars, ValidationError};
pub use view::{merge_nutrition, merge_slot, DataSource, RatingSummary, RecipeOverlay, RecipeView};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
