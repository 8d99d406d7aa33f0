use serde::{Deserialize, Serialize};

use crate::models::MealEntry;

/// Body for `POST /api/register`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub user_name: String,
    pub password: String,
}

/// Body for `POST /api/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body for `PUT /api/user`. Only the fields being changed are sent.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UpdateUserRequest {
    pub fn is_empty(&self) -> bool {
        self.user_name.is_none() && self.email.is_none() && self.password.is_none()
    }
}

/// Body for `POST /api/mealplan`. The backend wants the recipe id as a string.
#[derive(Debug, Clone, Serialize)]
pub struct NewMealSlot {
    pub day: String,
    pub time: String,
    pub id: String,
}

/// Body for `DELETE /api/mealplan`, addressing a slot without a recipe.
#[derive(Debug, Clone, Serialize)]
pub struct MealSlotRef {
    pub day: String,
    pub time: String,
}

/// Body for `POST /api/shared-recipes/{id}/ratings`.
#[derive(Debug, Clone, Serialize)]
pub struct NewRating {
    pub stars: u8,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

/// Generic `{"message": ...}` acknowledgement.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response to `POST /api/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Response to `PUT /api/user`. Changing account details rotates the token.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserResponse {
    pub message: String,
    #[serde(default)]
    pub token: Option<String>,
}

/// Response to share and unshare calls.
#[derive(Debug, Clone, Deserialize)]
pub struct ShareResponse {
    pub message: String,
    pub shared: bool,
}

/// Response to `GET /api/mealplan` once decoded.
#[derive(Debug, Clone, Deserialize)]
pub struct MealPlanResponse {
    #[serde(default)]
    pub meals: Vec<MealEntry>,
}

/// Error payload the backend attaches to non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_uses_camel_case() {
        let req = RegisterRequest {
            email: "ada@example.com".to_string(),
            user_name: "ada".to_string(),
            password: "hunter2".to_string(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"userName\":\"ada\""));
        assert!(!json.contains("user_name"));
    }

    #[test]
    fn test_update_request_skips_unset_fields() {
        let req = UpdateUserRequest {
            email: Some("new@example.com".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, "{\"email\":\"new@example.com\"}");
        assert!(!req.is_empty());
        assert!(UpdateUserRequest::default().is_empty());
    }

    #[test]
    fn test_meal_slot_sends_id_as_string() {
        let slot = NewMealSlot {
            day: "2026-03-02".to_string(),
            time: "12:30".to_string(),
            id: "7".to_string(),
        };
        let json = serde_json::to_string(&slot).unwrap();
        assert!(json.contains("\"id\":\"7\""));
    }

    #[test]
    fn test_rating_without_comment_omits_field() {
        let rating = NewRating {
            stars: 4,
            comment: String::new(),
        };
        let json = serde_json::to_string(&rating).unwrap();
        assert_eq!(json, "{\"stars\":4}");
    }

    #[test]
    fn test_update_response_token_is_optional() {
        let resp: UpdateUserResponse =
            serde_json::from_str("{\"message\": \"Account details successfully changed\"}")
                .unwrap();
        assert!(resp.token.is_none());
    }
}
