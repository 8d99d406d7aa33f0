use serde::{Deserialize, Serialize};
use std::fmt;

/// One ingredient line of a recipe, as the backend stores it.
///
/// `amount` is optional on the wire; free-text ingredients ("salt to
/// taste") carry neither amount nor unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    pub name: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub amount: Option<f64>,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, amount: Option<f64>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            amount,
        }
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.amount {
            Some(amount) if !self.unit.is_empty() => {
                write!(f, "{} {} {}", amount, self.unit, self.name)
            }
            Some(amount) => write!(f, "{} {}", amount, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingredient_display_full() {
        let ingredient = Ingredient::new("flour", Some(200.0), "g");
        assert_eq!(format!("{}", ingredient), "200 g flour");
    }

    #[test]
    fn test_ingredient_display_without_unit() {
        let ingredient = Ingredient::new("eggs", Some(2.0), "");
        assert_eq!(format!("{}", ingredient), "2 eggs");
    }

    #[test]
    fn test_ingredient_display_name_only() {
        let ingredient = Ingredient::new("salt to taste", None, "");
        assert_eq!(format!("{}", ingredient), "salt to taste");
    }

    #[test]
    fn test_ingredient_json_roundtrip() {
        let ingredient = Ingredient::new("butter", Some(50.0), "g");
        let json = serde_json::to_string(&ingredient).unwrap();
        let parsed: Ingredient = serde_json::from_str(&json).unwrap();
        assert_eq!(ingredient, parsed);
    }

    #[test]
    fn test_ingredient_missing_amount_on_wire() {
        let parsed: Ingredient = serde_json::from_str(r#"{"name": "basil"}"#).unwrap();
        assert_eq!(parsed.name, "basil");
        assert_eq!(parsed.amount, None);
        assert!(parsed.unit.is_empty());
    }
}
