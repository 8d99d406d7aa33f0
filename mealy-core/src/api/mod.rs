//! REST client for the meal planner backend.

mod client;
mod error;
mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use types::{
    MealPlanResponse, MealSlotRef, MessageResponse, NewMealSlot, NewRating, RegisterRequest,
    ShareResponse, TokenResponse, UpdateUserRequest, UpdateUserResponse,
};
