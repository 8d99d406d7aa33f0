use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::numeric::LooseNumber;

fn loose_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(LooseNumber::deserialize(deserializer)?.value())
}

/// Fully resolved macro values for one recipe or meal slot.
///
/// Deserialization is lenient (numbers, locale strings, or missing
/// fields all resolve to finite values); serialization always writes
/// plain numbers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct NutritionFacts {
    #[serde(default, deserialize_with = "loose_f64")]
    pub calories: f64,
    #[serde(default, deserialize_with = "loose_f64")]
    pub protein: f64,
    #[serde(default, deserialize_with = "loose_f64")]
    pub carbs: f64,
    #[serde(default, deserialize_with = "loose_f64")]
    pub fats: f64,
}

impl NutritionFacts {
    pub fn new(calories: f64, protein: f64, carbs: f64, fats: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fats,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.calories == 0.0 && self.protein == 0.0 && self.carbs == 0.0 && self.fats == 0.0
    }
}

impl fmt::Display for NutritionFacts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} kcal, {} g protein, {} g carbs, {} g fat",
            self.calories, self.protein, self.carbs, self.fats
        )
    }
}

/// Nutrition fields as a backend record carries them: any subset may be
/// present, and present values may be numbers or locale-formatted strings.
///
/// Unlike [`NutritionFacts`] this keeps track of which fields were
/// actually supplied, so merge logic can give them precedence one field
/// at a time.
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq)]
pub struct PartialNutrition {
    #[serde(default)]
    pub calories: Option<LooseNumber>,
    #[serde(default)]
    pub protein: Option<LooseNumber>,
    #[serde(default)]
    pub carbs: Option<LooseNumber>,
    #[serde(default)]
    pub fats: Option<LooseNumber>,
}

impl PartialNutrition {
    /// True when the record carries no nutrition field at all.
    pub fn is_empty(&self) -> bool {
        self.calories.is_none()
            && self.protein.is_none()
            && self.carbs.is_none()
            && self.fats.is_none()
    }

    /// Resolves to facts, treating missing fields as zero.
    pub fn to_facts(&self) -> NutritionFacts {
        self.with_fallback(&NutritionFacts::default())
    }

    /// Resolves to facts field by field: a value present here wins,
    /// a missing one is taken from `fallback`.
    pub fn with_fallback(&self, fallback: &NutritionFacts) -> NutritionFacts {
        NutritionFacts {
            calories: self.calories.map(f64::from).unwrap_or(fallback.calories),
            protein: self.protein.map(f64::from).unwrap_or(fallback.protein),
            carbs: self.carbs.map(f64::from).unwrap_or(fallback.carbs),
            fats: self.fats.map(f64::from).unwrap_or(fallback.fats),
        }
    }
}

/// Overlay record for one meal slot.
///
/// The camelCase field names and flattened macros are part of the stored
/// JSON contract; records written by earlier client versions must keep
/// reading back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SlotNutrition {
    #[serde(default)]
    pub recipe_id: Option<String>,
    #[serde(default)]
    pub recipe_name: String,
    #[serde(flatten)]
    pub facts: NutritionFacts,
}

impl SlotNutrition {
    pub fn new(recipe_id: Option<String>, recipe_name: impl Into<String>, facts: NutritionFacts) -> Self {
        Self {
            recipe_id,
            recipe_name: recipe_name.into(),
            facts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facts_display() {
        let facts = NutritionFacts::new(650.0, 32.0, 70.0, 18.0);
        assert_eq!(
            format!("{}", facts),
            "650 kcal, 32 g protein, 70 g carbs, 18 g fat"
        );
    }

    #[test]
    fn test_is_zero() {
        assert!(NutritionFacts::default().is_zero());
        assert!(!NutritionFacts::new(1.0, 0.0, 0.0, 0.0).is_zero());
    }

    #[test]
    fn test_facts_read_tolerates_strings() {
        let json = r#"{"calories": "650", "protein": "32,5", "carbs": "", "fats": 18}"#;
        let facts: NutritionFacts = serde_json::from_str(json).unwrap();
        assert_eq!(facts, NutritionFacts::new(650.0, 32.5, 0.0, 18.0));
    }

    #[test]
    fn test_partial_from_mixed_wire_shapes() {
        let json = r#"{"calories": 650, "protein": "32,5", "fats": null}"#;
        let partial: PartialNutrition = serde_json::from_str(json).unwrap();
        let facts = partial.to_facts();
        assert_eq!(facts.calories, 650.0);
        assert_eq!(facts.protein, 32.5);
        assert_eq!(facts.carbs, 0.0);
        assert_eq!(facts.fats, 0.0);
    }

    #[test]
    fn test_partial_empty() {
        let partial: PartialNutrition = serde_json::from_str("{}").unwrap();
        assert!(partial.is_empty());
        assert!(partial.to_facts().is_zero());
    }

    #[test]
    fn test_with_fallback_is_field_level() {
        let json = r#"{"calories": 500}"#;
        let partial: PartialNutrition = serde_json::from_str(json).unwrap();
        let overlay = NutritionFacts::new(650.0, 32.0, 70.0, 18.0);
        let merged = partial.with_fallback(&overlay);
        assert_eq!(merged.calories, 500.0);
        assert_eq!(merged.protein, 32.0);
        assert_eq!(merged.carbs, 70.0);
        assert_eq!(merged.fats, 18.0);
    }

    #[test]
    fn test_slot_nutrition_json_contract() {
        let record = SlotNutrition::new(
            Some("12".into()),
            "Pasta",
            NutritionFacts::new(650.0, 32.0, 70.0, 18.0),
        );
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"recipeId\":\"12\""));
        assert!(json.contains("\"recipeName\":\"Pasta\""));
        assert!(json.contains("\"calories\":650.0"));

        let parsed: SlotNutrition = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_slot_nutrition_reads_legacy_string_values() {
        let json = r#"{"recipeId": null, "recipeName": "Soup", "calories": "210,5", "protein": "9"}"#;
        let parsed: SlotNutrition = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.recipe_id, None);
        assert_eq!(parsed.facts.calories, 210.5);
        assert_eq!(parsed.facts.protein, 9.0);
        assert_eq!(parsed.facts.carbs, 0.0);
    }
}
