use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::ingredient::Ingredient;
use super::nutrition::PartialNutrition;

/// Backend entity ids are numbers on the wire but strings everywhere in
/// the client, where they double as overlay map keys.
fn id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    })
}

/// One entry of the private recipe collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeSummary {
    pub id: String,
    pub name: String,
}

impl fmt::Display for RecipeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.id, self.name)
    }
}

/// Full recipe record as the backend returns it.
///
/// Later backend versions inline nutrition fields on the detail record;
/// older ones do not, which is why they are modeled as a partial set.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RecipeDetail {
    #[serde(default, deserialize_with = "id_string")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(flatten)]
    pub nutrition: PartialNutrition,
}

/// Request body for creating a recipe.
#[derive(Debug, Clone, Serialize)]
pub struct NewRecipe {
    pub name: String,
    pub description: String,
    pub ingredients: Vec<Ingredient>,
}

impl NewRecipe {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ingredients: Vec::new(),
        }
    }

    pub fn with_ingredients(mut self, ingredients: Vec<Ingredient>) -> Self {
        self.ingredients = ingredients;
        self
    }
}

/// One row of the public shared-recipes listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SharedRecipeSummary {
    #[serde(default, deserialize_with = "id_string")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub owner: Option<String>,
}

impl fmt::Display for SharedRecipeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(owner) = &self.owner {
            write!(f, " (by {})", owner)?;
        }
        Ok(())
    }
}
