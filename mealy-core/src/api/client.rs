use std::collections::HashMap;

use tracing::debug;

use crate::api::error::ApiError;
use crate::api::types::{
    ErrorBody, LoginRequest, MealPlanResponse, MealSlotRef, MessageResponse, NewMealSlot,
    NewRating, RegisterRequest, ShareResponse, TokenResponse, UpdateUserRequest,
    UpdateUserResponse,
};
use crate::models::{
    MealEntry, NewRecipe, RatingEntry, RecipeDetail, RecipeSummary, SharedRecipeSummary,
    UserProfile,
};

/// HTTP client for the meal planner backend.
///
/// Holds the configured server address and a reused connection pool. All
/// calls return [`ApiError`]; a non-success status becomes
/// [`ApiError::Backend`] carrying the reason the server gave.
pub struct ApiClient {
    http: reqwest::Client,
    server_url: String,
}

/// Builds a full endpoint URL from the configured server address.
///
/// Accepts addresses with or without a scheme and with or without a
/// trailing slash. The backend mounts everything under `/api`.
fn build_api_url(server_url: &str, path: &str) -> String {
    let base = if server_url.starts_with("http://") || server_url.starts_with("https://") {
        server_url.to_string()
    } else {
        format!("http://{}", server_url)
    };
    format!("{}/api{}", base.trim_end_matches('/'), path)
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Turns a non-success response body into an [`ApiError::Backend`].
///
/// The backend reports failures as `{"reason": "..."}`; older endpoints
/// answer with plain text. Either way the caller gets something printable.
fn error_from_status(status: u16, body: &str) -> ApiError {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return ApiError::Backend {
            status,
            reason: parsed.reason,
        };
    }
    let raw = body.trim();
    let reason = if raw.is_empty() {
        format!("request failed with status {}", status)
    } else {
        raw.to_string()
    };
    ApiError::Backend { status, reason }
}

async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(error_from_status(status.as_u16(), &body))
}

/// Decodes the `GET /mealplan` body.
///
/// Some backend versions serialize the plan twice, so the document arrives
/// as a JSON string whose content is the actual object. Both shapes are
/// accepted; an empty body counts as an empty plan.
fn parse_meal_plan(body: &str) -> Result<Vec<MealEntry>, ApiError> {
    let text = body.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    if let Ok(plan) = serde_json::from_str::<MealPlanResponse>(text) {
        return Ok(plan.meals);
    }
    if let Ok(inner) = serde_json::from_str::<String>(text) {
        if let Ok(plan) = serde_json::from_str::<MealPlanResponse>(&inner) {
            debug!("meal plan arrived double-encoded");
            return Ok(plan.meals);
        }
    }
    let snippet: String = text.chars().take(120).collect();
    Err(ApiError::Decode(format!(
        "unrecognized meal plan payload: {}",
        snippet
    )))
}

impl ApiClient {
    pub fn new(server_url: impl Into<String>) -> Self {
        ApiClient {
            http: reqwest::Client::new(),
            server_url: server_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        build_api_url(&self.server_url, path)
    }

    /// `POST /register`. Returns the confirmation message.
    pub async fn register(&self, request: &RegisterRequest) -> Result<String, ApiError> {
        let resp = self
            .http
            .post(self.url("/register"))
            .json(request)
            .send()
            .await?;
        let resp = check(resp).await?;
        let body: MessageResponse = resp.json().await?;
        Ok(body.message)
    }

    /// `POST /login`. Returns the session token on success.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let resp = self
            .http
            .post(self.url("/login"))
            .json(&request)
            .send()
            .await?;
        let resp = check(resp).await?;
        let body: TokenResponse = resp.json().await?;
        Ok(body.token)
    }

    /// `GET /user`.
    pub async fn fetch_profile(&self, token: &str) -> Result<UserProfile, ApiError> {
        let resp = self
            .http
            .get(self.url("/user"))
            .header("Authorization", bearer(token))
            .send()
            .await?;
        let resp = check(resp).await?;
        Ok(resp.json().await?)
    }

    /// `PUT /user`. The response may carry a fresh token; changing the
    /// email re-keys the session and the old token stops working.
    pub async fn update_profile(
        &self,
        token: &str,
        request: &UpdateUserRequest,
    ) -> Result<UpdateUserResponse, ApiError> {
        let resp = self
            .http
            .put(self.url("/user"))
            .header("Authorization", bearer(token))
            .json(request)
            .send()
            .await?;
        let resp = check(resp).await?;
        Ok(resp.json().await?)
    }

    /// `DELETE /user`.
    pub async fn delete_account(&self, token: &str) -> Result<String, ApiError> {
        let resp = self
            .http
            .delete(self.url("/user"))
            .header("Authorization", bearer(token))
            .send()
            .await?;
        let resp = check(resp).await?;
        let body: MessageResponse = resp.json().await?;
        Ok(body.message)
    }

    /// `GET /collection`. The backend answers with a map of id to recipe
    /// name; the list comes back sorted by name for stable output.
    pub async fn list_recipes(&self, token: &str) -> Result<Vec<RecipeSummary>, ApiError> {
        let resp = self
            .http
            .get(self.url("/collection"))
            .header("Authorization", bearer(token))
            .send()
            .await?;
        let resp = check(resp).await?;
        let names: HashMap<String, String> = resp.json().await?;
        let mut recipes: Vec<RecipeSummary> = names
            .into_iter()
            .map(|(id, name)| RecipeSummary { id, name })
            .collect();
        recipes.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(recipes)
    }

    /// `POST /recipe`. This endpoint answers with plain text, not JSON.
    pub async fn create_recipe(&self, token: &str, recipe: &NewRecipe) -> Result<String, ApiError> {
        let resp = self
            .http
            .post(self.url("/recipe"))
            .header("Authorization", bearer(token))
            .json(recipe)
            .send()
            .await?;
        let resp = check(resp).await?;
        Ok(resp.text().await?.trim().to_string())
    }

    /// `GET /recipe/detail/{id}`.
    pub async fn recipe_detail(&self, token: &str, id: &str) -> Result<RecipeDetail, ApiError> {
        let resp = self
            .http
            .get(self.url(&format!("/recipe/detail/{}", id)))
            .header("Authorization", bearer(token))
            .send()
            .await?;
        let resp = check(resp).await?;
        Ok(resp.json().await?)
    }

    /// `DELETE /recipe/detail/{id}`.
    pub async fn delete_recipe(&self, token: &str, id: &str) -> Result<String, ApiError> {
        let resp = self
            .http
            .delete(self.url(&format!("/recipe/detail/{}", id)))
            .header("Authorization", bearer(token))
            .send()
            .await?;
        let resp = check(resp).await?;
        let body: MessageResponse = resp.json().await?;
        Ok(body.message)
    }

    /// `POST /recipe/{id}/share`.
    pub async fn share_recipe(&self, token: &str, id: &str) -> Result<ShareResponse, ApiError> {
        let resp = self
            .http
            .post(self.url(&format!("/recipe/{}/share", id)))
            .header("Authorization", bearer(token))
            .send()
            .await?;
        let resp = check(resp).await?;
        Ok(resp.json().await?)
    }

    /// `DELETE /recipe/{id}/share`.
    pub async fn unshare_recipe(&self, token: &str, id: &str) -> Result<ShareResponse, ApiError> {
        let resp = self
            .http
            .delete(self.url(&format!("/recipe/{}/share", id)))
            .header("Authorization", bearer(token))
            .send()
            .await?;
        let resp = check(resp).await?;
        Ok(resp.json().await?)
    }

    /// `GET /mealplan`. Tolerates the double-encoded body shape.
    pub async fn meal_plan(&self, token: &str) -> Result<Vec<MealEntry>, ApiError> {
        let resp = self
            .http
            .get(self.url("/mealplan"))
            .header("Authorization", bearer(token))
            .send()
            .await?;
        let resp = check(resp).await?;
        let body = resp.text().await?;
        parse_meal_plan(&body)
    }

    /// `POST /mealplan`. Plain text response, like recipe creation.
    pub async fn add_meal(&self, token: &str, slot: &NewMealSlot) -> Result<String, ApiError> {
        let resp = self
            .http
            .post(self.url("/mealplan"))
            .header("Authorization", bearer(token))
            .json(slot)
            .send()
            .await?;
        let resp = check(resp).await?;
        Ok(resp.text().await?.trim().to_string())
    }

    /// `DELETE /mealplan`. The slot to clear travels in the body.
    pub async fn remove_meal(&self, token: &str, day: &str, time: &str) -> Result<String, ApiError> {
        let slot = MealSlotRef {
            day: day.to_string(),
            time: time.to_string(),
        };
        let resp = self
            .http
            .delete(self.url("/mealplan"))
            .header("Authorization", bearer(token))
            .json(&slot)
            .send()
            .await?;
        let resp = check(resp).await?;
        let body: MessageResponse = resp.json().await?;
        Ok(body.message)
    }

    /// `GET /shared-recipes`. Public, no token required.
    pub async fn shared_recipes(&self) -> Result<Vec<SharedRecipeSummary>, ApiError> {
        let resp = self.http.get(self.url("/shared-recipes")).send().await?;
        let resp = check(resp).await?;
        let mut recipes: Vec<SharedRecipeSummary> = resp.json().await?;
        recipes.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(recipes)
    }

    /// `GET /shared-recipes/{id}`. Public. The id is URL-encoded because
    /// shared entries may be addressed by name on older backends.
    pub async fn shared_recipe_detail(&self, id: &str) -> Result<RecipeDetail, ApiError> {
        let path = format!("/shared-recipes/{}", urlencoding::encode(id));
        let resp = self.http.get(self.url(&path)).send().await?;
        let resp = check(resp).await?;
        Ok(resp.json().await?)
    }

    /// `GET /shared-recipes/{id}/ratings`.
    pub async fn shared_ratings(&self, id: &str) -> Result<Vec<RatingEntry>, ApiError> {
        let path = format!("/shared-recipes/{}/ratings", urlencoding::encode(id));
        let resp = self.http.get(self.url(&path)).send().await?;
        let resp = check(resp).await?;
        Ok(resp.json().await?)
    }

    /// `POST /shared-recipes/{id}/ratings`. One rating per user per recipe;
    /// posting again overwrites the previous one.
    pub async fn post_rating(
        &self,
        token: &str,
        id: &str,
        rating: &NewRating,
    ) -> Result<String, ApiError> {
        let path = format!("/shared-recipes/{}/ratings", urlencoding::encode(id));
        let resp = self
            .http
            .post(self.url(&path))
            .header("Authorization", bearer(token))
            .json(rating)
            .send()
            .await?;
        let resp = check(resp).await?;
        let body: MessageResponse = resp.json().await?;
        Ok(body.message)
    }
}
