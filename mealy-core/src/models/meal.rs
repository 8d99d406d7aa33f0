use serde::Deserialize;

use super::nutrition::PartialNutrition;

/// One meal slot as `GET /mealplan` returns it.
///
/// Nutrition fields only appear once the backend has resolved them for
/// the slot's recipe; until then the record carries just the slot keys
/// and the recipe name.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MealEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub time: String,
    #[serde(flatten)]
    pub nutrition: PartialNutrition,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_with_nutrition() {
        let json = r#"{"name": "Pasta", "day": "2026-05-01", "time": "12:00",
                       "calories": 650, "protein": 32, "carbs": 70, "fats": 18}"#;
        let entry: MealEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.name, "Pasta");
        assert_eq!(entry.day, "2026-05-01");
        assert_eq!(entry.time, "12:00");
        assert_eq!(entry.nutrition.to_facts().calories, 650.0);
    }

    #[test]
    fn test_entry_without_nutrition() {
        let json = r#"{"name": "Salad", "day": "2026-05-01", "time": "18:30"}"#;
        let entry: MealEntry = serde_json::from_str(json).unwrap();
        assert!(entry.nutrition.is_empty());
    }
}
