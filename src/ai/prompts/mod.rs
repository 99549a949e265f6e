//! AI prompt templates.

pub mod analyze_meal;
pub mod update_analysis;

pub use analyze_meal::{render_analyze_meal_system_prompt, render_correction_context};
pub use update_analysis::{render_update_system_prompt, render_update_user_prompt};

/// The JSON structure every analysis reply must follow. Field names stay in
/// English for both output languages; only names and descriptions are
/// localized.
pub(crate) const RESPONSE_SHAPE: &str = r#"{
  "meal_name": "short name of the dish",
  "calories": <number>,
  "protein_g": <number>,
  "carbs_g": <number>,
  "fats_g": <number>,
  "fiber_g": <number>,
  "sugar_g": <number>,
  "sodium_mg": <number>,
  "confidence": <number between 0 and 1>,
  "ingredients": [
    {
      "name": "ingredient name",
      "calories": <number>,
      "protein_g": <number>,
      "carbs_g": <number>,
      "fats_g": <number>,
      "fiber_g": <number>,
      "sugar_g": <number>,
      "sodium_mg": <number>
    }
  ]
}"#;

/// Optional nutrient fields the model may add when it can estimate them.
pub(crate) const EXTENDED_FIELDS: &str = "saturated_fats_g, monounsaturated_fats_g, \
polyunsaturated_fats_g, omega_3_g, omega_6_g, cholesterol_mg, soluble_fiber_g, \
insoluble_fiber_g, alcohol_g, caffeine_mg, serving_size_g, glycemic_index, insulin_index, \
potassium_mg, calcium_mg, iron_mg, magnesium_mg, zinc_mg, vitamin_c_mg, vitamin_d_mcg";
