//! Canonical nutrition records produced by meal analysis.

use serde::{Deserialize, Serialize};

/// Output language for prompts and placeholder names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Hebrew,
}

impl Language {
    /// Map a language tag onto a `Language`.
    ///
    /// `"hebrew"` (any ASCII case) selects Hebrew; every other tag falls back
    /// to English.
    pub fn parse(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case("hebrew") {
            Language::Hebrew
        } else {
            Language::English
        }
    }

    /// Placeholder used when the model omits the meal name.
    pub fn unknown_meal(self) -> &'static str {
        match self {
            Language::English => "Unknown meal",
            Language::Hebrew => "ארוחה לא מזוהה",
        }
    }

    /// Placeholder used when the model omits an ingredient name.
    pub fn unknown_ingredient(self) -> &'static str {
        match self {
            Language::English => "Unknown ingredient",
            Language::Hebrew => "רכיב לא מזוהה",
        }
    }
}

/// Required nutrient estimates for a meal or a single ingredient.
///
/// These fields are always present in a normalized record; missing or
/// non-numeric values in the model's reply become 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Nutrients {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
    pub fiber_g: f64,
    pub sugar_g: f64,
    pub sodium_mg: f64,
    #[serde(flatten)]
    pub extended: ExtendedNutrients,
}

/// Less common nutrition attributes.
///
/// Kept absent rather than zeroed when the model does not provide them, so
/// callers can tell "not estimated" from "estimated as zero".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtendedNutrients {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturated_fats_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monounsaturated_fats_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polyunsaturated_fats_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub omega_3_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub omega_6_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cholesterol_mg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soluble_fiber_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insoluble_fiber_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alcohol_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caffeine_mg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serving_size_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glycemic_index: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insulin_index: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub potassium_mg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calcium_mg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iron_mg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magnesium_mg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zinc_mg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vitamin_c_mg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vitamin_d_mcg: Option<f64>,
}

/// One food component of a meal with its own nutrient breakdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ingredient {
    pub name: String,
    #[serde(flatten)]
    pub nutrients: Nutrients,
}

/// The structured nutrition estimate derived from one meal photo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MealAnalysis {
    pub meal_name: String,
    /// Model's self-reported confidence in the estimate, 0 to 1.
    pub confidence: f64,
    #[serde(flatten)]
    pub nutrients: Nutrients,
    pub ingredients: Vec<Ingredient>,
}

/// A user-edited ingredient row passed back in for re-analysis.
///
/// Only the fields the user actually touched need to be present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditedIngredient {
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fats_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiber_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sugar_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sodium_mg: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_parse_hebrew() {
        assert_eq!(Language::parse("hebrew"), Language::Hebrew);
        assert_eq!(Language::parse("Hebrew"), Language::Hebrew);
        assert_eq!(Language::parse("HEBREW"), Language::Hebrew);
    }

    #[test]
    fn test_language_parse_falls_back_to_english() {
        assert_eq!(Language::parse("english"), Language::English);
        assert_eq!(Language::parse("french"), Language::English);
        assert_eq!(Language::parse(""), Language::English);
    }

    #[test]
    fn test_placeholders_per_language() {
        assert_eq!(Language::English.unknown_ingredient(), "Unknown ingredient");
        assert_eq!(Language::Hebrew.unknown_ingredient(), "רכיב לא מזוהה");
        assert_eq!(Language::Hebrew.unknown_meal(), "ארוחה לא מזוהה");
    }

    #[test]
    fn test_extended_fields_skipped_when_absent() {
        let analysis = MealAnalysis {
            meal_name: "Toast".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&analysis).unwrap();
        assert!(json.contains("\"calories\":0.0"));
        assert!(!json.contains("omega_3_g"));
        assert!(!json.contains("glycemic_index"));
    }
}
