//! Loosely-typed view of the model's reply and normalization into the
//! canonical records.
//!
//! Replies are free-form JSON: fields go missing, numbers arrive as strings,
//! and the same nutrient shows up under different names (`protein` vs
//! `protein_g`). Everything here is optional and coerced at the boundary, so
//! a single odd field never rejects an otherwise usable analysis.

use serde::Deserialize;
use serde_json::Value;

use crate::types::{ExtendedNutrients, Ingredient, Language, MealAnalysis, Nutrients};

/// Relative deviation above which the ingredient calorie sum is considered
/// inconsistent with the meal-level total.
pub const CALORIE_MISMATCH_TOLERANCE: f64 = 0.2;

/// A numeric field as models actually emit it: a JSON number, a numeric
/// string, or something unusable. Unusable values deserialize to absent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LooseNumber(pub Option<f64>);

impl<'de> Deserialize<'de> for LooseNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(LooseNumber(coerce_number(&value)))
    }
}

/// A name field that tolerates non-string values. Blank strings count as
/// absent so placeholders kick in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LooseString(pub Option<String>);

impl<'de> Deserialize<'de> for LooseString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let name = match value {
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        };
        Ok(LooseString(name))
    }
}

fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Nutrient fields as the model may spell them, shared between the meal level
/// and each ingredient. Aliases are separate fields merged during
/// normalization; the suffixed canonical spelling wins when both are present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawNutrients {
    pub calories: LooseNumber,
    pub total_calories: LooseNumber,
    pub protein_g: LooseNumber,
    pub protein: LooseNumber,
    pub carbs_g: LooseNumber,
    pub carbs: LooseNumber,
    pub carbohydrates: LooseNumber,
    pub fats_g: LooseNumber,
    pub fat_g: LooseNumber,
    pub fats: LooseNumber,
    pub fat: LooseNumber,
    pub fiber_g: LooseNumber,
    pub fiber: LooseNumber,
    pub sugar_g: LooseNumber,
    pub sugar: LooseNumber,
    pub sodium_mg: LooseNumber,
    pub sodium: LooseNumber,
    pub saturated_fats_g: LooseNumber,
    pub saturated_fat: LooseNumber,
    pub monounsaturated_fats_g: LooseNumber,
    pub monounsaturated_fat: LooseNumber,
    pub polyunsaturated_fats_g: LooseNumber,
    pub polyunsaturated_fat: LooseNumber,
    pub omega_3_g: LooseNumber,
    pub omega_3: LooseNumber,
    pub omega_6_g: LooseNumber,
    pub omega_6: LooseNumber,
    pub cholesterol_mg: LooseNumber,
    pub cholesterol: LooseNumber,
    pub soluble_fiber_g: LooseNumber,
    pub soluble_fiber: LooseNumber,
    pub insoluble_fiber_g: LooseNumber,
    pub insoluble_fiber: LooseNumber,
    pub alcohol_g: LooseNumber,
    pub alcohol: LooseNumber,
    pub caffeine_mg: LooseNumber,
    pub caffeine: LooseNumber,
    pub serving_size_g: LooseNumber,
    pub serving_size: LooseNumber,
    pub glycemic_index: LooseNumber,
    pub insulin_index: LooseNumber,
    pub potassium_mg: LooseNumber,
    pub potassium: LooseNumber,
    pub calcium_mg: LooseNumber,
    pub calcium: LooseNumber,
    pub iron_mg: LooseNumber,
    pub iron: LooseNumber,
    pub magnesium_mg: LooseNumber,
    pub magnesium: LooseNumber,
    pub zinc_mg: LooseNumber,
    pub zinc: LooseNumber,
    pub vitamin_c_mg: LooseNumber,
    pub vitamin_c: LooseNumber,
    pub vitamin_d_mcg: LooseNumber,
    pub vitamin_d: LooseNumber,
}

impl RawNutrients {
    /// Merge aliases and apply the defaulting policy: required fields fall
    /// back to 0, extended fields stay absent.
    fn normalize(&self) -> Nutrients {
        Nutrients {
            calories: self.calories.0.or(self.total_calories.0).unwrap_or(0.0),
            protein_g: self.protein_g.0.or(self.protein.0).unwrap_or(0.0),
            carbs_g: self
                .carbs_g
                .0
                .or(self.carbs.0)
                .or(self.carbohydrates.0)
                .unwrap_or(0.0),
            fats_g: self
                .fats_g
                .0
                .or(self.fat_g.0)
                .or(self.fats.0)
                .or(self.fat.0)
                .unwrap_or(0.0),
            fiber_g: self.fiber_g.0.or(self.fiber.0).unwrap_or(0.0),
            sugar_g: self.sugar_g.0.or(self.sugar.0).unwrap_or(0.0),
            sodium_mg: self.sodium_mg.0.or(self.sodium.0).unwrap_or(0.0),
            extended: ExtendedNutrients {
                saturated_fats_g: self.saturated_fats_g.0.or(self.saturated_fat.0),
                monounsaturated_fats_g: self
                    .monounsaturated_fats_g
                    .0
                    .or(self.monounsaturated_fat.0),
                polyunsaturated_fats_g: self
                    .polyunsaturated_fats_g
                    .0
                    .or(self.polyunsaturated_fat.0),
                omega_3_g: self.omega_3_g.0.or(self.omega_3.0),
                omega_6_g: self.omega_6_g.0.or(self.omega_6.0),
                cholesterol_mg: self.cholesterol_mg.0.or(self.cholesterol.0),
                soluble_fiber_g: self.soluble_fiber_g.0.or(self.soluble_fiber.0),
                insoluble_fiber_g: self.insoluble_fiber_g.0.or(self.insoluble_fiber.0),
                alcohol_g: self.alcohol_g.0.or(self.alcohol.0),
                caffeine_mg: self.caffeine_mg.0.or(self.caffeine.0),
                serving_size_g: self.serving_size_g.0.or(self.serving_size.0),
                glycemic_index: self.glycemic_index.0,
                insulin_index: self.insulin_index.0,
                potassium_mg: self.potassium_mg.0.or(self.potassium.0),
                calcium_mg: self.calcium_mg.0.or(self.calcium.0),
                iron_mg: self.iron_mg.0.or(self.iron.0),
                magnesium_mg: self.magnesium_mg.0.or(self.magnesium.0),
                zinc_mg: self.zinc_mg.0.or(self.zinc.0),
                vitamin_c_mg: self.vitamin_c_mg.0.or(self.vitamin_c.0),
                vitamin_d_mcg: self.vitamin_d_mcg.0.or(self.vitamin_d.0),
            },
        }
    }
}

/// One ingredient as it appears in the reply.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawIngredient {
    pub name: LooseString,
    pub ingredient_name: LooseString,
    #[serde(flatten)]
    pub nutrients: RawNutrients,
}

impl RawIngredient {
    /// Collapse into the canonical ingredient record.
    pub fn normalize(self, language: Language) -> Ingredient {
        Ingredient {
            name: self
                .name
                .0
                .or(self.ingredient_name.0)
                .unwrap_or_else(|| language.unknown_ingredient().to_string()),
            nutrients: self.nutrients.normalize(),
        }
    }
}

/// The whole reply as it appears on the wire.
///
/// `ingredients` stays as raw values so one malformed entry degrades to a
/// placeholder ingredient instead of rejecting the reply.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawMealAnalysis {
    pub meal_name: LooseString,
    pub name: LooseString,
    pub confidence: LooseNumber,
    #[serde(flatten)]
    pub nutrients: RawNutrients,
    pub ingredients: Vec<Value>,
}

impl RawMealAnalysis {
    /// Collapse the loose reply into the canonical record, applying alias
    /// merging and the defaulting policy.
    pub fn normalize(self, language: Language) -> MealAnalysis {
        let ingredients = self
            .ingredients
            .into_iter()
            .map(|value| {
                serde_json::from_value::<RawIngredient>(value)
                    .unwrap_or_default()
                    .normalize(language)
            })
            .collect();

        MealAnalysis {
            meal_name: self
                .meal_name
                .0
                .or(self.name.0)
                .unwrap_or_else(|| language.unknown_meal().to_string()),
            confidence: self.confidence.0.unwrap_or(0.0),
            nutrients: self.nutrients.normalize(),
            ingredients,
        }
    }
}

/// Relative deviation between the meal-level calorie total and the sum of
/// ingredient calories, when it exceeds [`CALORIE_MISMATCH_TOLERANCE`].
///
/// Returns `None` when the totals agree, the ingredient list is empty, or the
/// meal total is zero (no meaningful ratio). Observability only: a mismatch
/// never fails the analysis.
pub fn calorie_mismatch(analysis: &MealAnalysis) -> Option<f64> {
    if analysis.ingredients.is_empty() {
        return None;
    }
    let total = analysis.nutrients.calories;
    if total <= 0.0 {
        return None;
    }
    let sum: f64 = analysis
        .ingredients
        .iter()
        .map(|i| i.nutrients.calories)
        .sum();
    let deviation = (sum - total).abs() / total;
    (deviation > CALORIE_MISMATCH_TOLERANCE).then_some(deviation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> RawMealAnalysis {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_missing_required_fields_default_to_zero() {
        let analysis = parse(r#"{"meal_name": "Salad"}"#).normalize(Language::English);
        assert_eq!(analysis.meal_name, "Salad");
        assert_eq!(analysis.nutrients.calories, 0.0);
        assert_eq!(analysis.nutrients.protein_g, 0.0);
        assert_eq!(analysis.nutrients.sodium_mg, 0.0);
        assert_eq!(analysis.confidence, 0.0);
        assert!(analysis.ingredients.is_empty());
    }

    #[test]
    fn test_missing_extended_fields_stay_absent() {
        let analysis = parse(r#"{"calories": 300}"#).normalize(Language::English);
        assert_eq!(analysis.nutrients.extended.omega_3_g, None);
        assert_eq!(analysis.nutrients.extended.glycemic_index, None);
        assert_eq!(analysis.nutrients.extended.vitamin_d_mcg, None);
    }

    #[test]
    fn test_alias_merging_uses_whichever_is_present() {
        let from_plain = parse(r#"{"protein": 22}"#).normalize(Language::English);
        assert_eq!(from_plain.nutrients.protein_g, 22.0);

        let from_suffixed = parse(r#"{"protein_g": 31}"#).normalize(Language::English);
        assert_eq!(from_suffixed.nutrients.protein_g, 31.0);

        let carbs = parse(r#"{"carbohydrates": 45}"#).normalize(Language::English);
        assert_eq!(carbs.nutrients.carbs_g, 45.0);
    }

    #[test]
    fn test_suffixed_alias_wins_when_both_present() {
        let analysis = parse(r#"{"protein": 10, "protein_g": 12}"#).normalize(Language::English);
        assert_eq!(analysis.nutrients.protein_g, 12.0);
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let analysis =
            parse(r#"{"calories": "450", "sugar_g": " 12.5 "}"#).normalize(Language::English);
        assert_eq!(analysis.nutrients.calories, 450.0);
        assert_eq!(analysis.nutrients.sugar_g, 12.5);
    }

    #[test]
    fn test_non_numeric_required_field_becomes_zero() {
        let analysis =
            parse(r#"{"calories": "about 400", "fiber_g": null}"#).normalize(Language::English);
        assert_eq!(analysis.nutrients.calories, 0.0);
        assert_eq!(analysis.nutrients.fiber_g, 0.0);
    }

    #[test]
    fn test_non_numeric_extended_field_stays_absent() {
        let analysis =
            parse(r#"{"cholesterol_mg": "unknown"}"#).normalize(Language::English);
        assert_eq!(analysis.nutrients.extended.cholesterol_mg, None);
    }

    #[test]
    fn test_extended_zero_is_kept_distinct_from_absent() {
        let analysis = parse(r#"{"alcohol_g": 0}"#).normalize(Language::English);
        assert_eq!(analysis.nutrients.extended.alcohol_g, Some(0.0));
        assert_eq!(analysis.nutrients.extended.caffeine_mg, None);
    }

    #[test]
    fn test_ingredient_name_placeholder_per_language() {
        let english = parse(r#"{"ingredients": [{"calories": 90}]}"#).normalize(Language::English);
        assert_eq!(english.ingredients[0].name, "Unknown ingredient");

        let hebrew = parse(r#"{"ingredients": [{"calories": 90}]}"#).normalize(Language::Hebrew);
        assert_eq!(hebrew.ingredients[0].name, "רכיב לא מזוהה");
        assert_eq!(hebrew.meal_name, "ארוחה לא מזוהה");
    }

    #[test]
    fn test_ingredient_alias_name() {
        let analysis = parse(r#"{"ingredients": [{"ingredient_name": "rice", "carbs": 40}]}"#)
            .normalize(Language::English);
        assert_eq!(analysis.ingredients[0].name, "rice");
        assert_eq!(analysis.ingredients[0].nutrients.carbs_g, 40.0);
    }

    #[test]
    fn test_malformed_ingredient_entry_degrades_to_placeholder() {
        let analysis = parse(r#"{"ingredients": ["just a string", {"name": "egg"}]}"#)
            .normalize(Language::English);
        assert_eq!(analysis.ingredients.len(), 2);
        assert_eq!(analysis.ingredients[0].name, "Unknown ingredient");
        assert_eq!(analysis.ingredients[0].nutrients.calories, 0.0);
        assert_eq!(analysis.ingredients[1].name, "egg");
    }

    #[test]
    fn test_blank_name_gets_placeholder() {
        let analysis = parse(r#"{"meal_name": "   "}"#).normalize(Language::English);
        assert_eq!(analysis.meal_name, "Unknown meal");
    }

    #[test]
    fn test_calorie_mismatch_detected_above_tolerance() {
        let analysis = parse(
            r#"{"calories": 1000, "ingredients": [{"calories": 300}, {"calories": 300}]}"#,
        )
        .normalize(Language::English);
        let deviation = calorie_mismatch(&analysis).unwrap();
        assert!((deviation - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_calorie_mismatch_none_within_tolerance() {
        let analysis = parse(
            r#"{"calories": 1000, "ingredients": [{"calories": 500}, {"calories": 450}]}"#,
        )
        .normalize(Language::English);
        assert_eq!(calorie_mismatch(&analysis), None);
    }

    #[test]
    fn test_calorie_mismatch_skipped_without_basis() {
        let no_ingredients = parse(r#"{"calories": 500}"#).normalize(Language::English);
        assert_eq!(calorie_mismatch(&no_ingredients), None);

        let zero_total =
            parse(r#"{"ingredients": [{"calories": 250}]}"#).normalize(Language::English);
        assert_eq!(calorie_mismatch(&zero_total), None);
    }
}
