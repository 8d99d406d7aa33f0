mod ingredient;
mod meal;
mod nutrition;
mod rating;
mod recipe;
mod user;

pub use ingredient::Ingredient;
pub use meal::MealEntry;
pub use nutrition::{NutritionFacts, PartialNutrition, SlotNutrition};
pub use rating::{average_stars, format_average, RatingEntry};
pub use recipe::{NewRecipe, RecipeDetail, RecipeSummary, SharedRecipeSummary};
pub use user::UserProfile;
