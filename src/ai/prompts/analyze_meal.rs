//! Prompt templates for fresh meal analysis from a photo.

use super::{EXTENDED_FIELDS, RESPONSE_SHAPE};
use crate::types::{EditedIngredient, Language};

/// Prompt name used in logs.
pub const ANALYZE_MEAL_PROMPT_NAME: &str = "analyze_meal";

/// Render the system prompt describing the exact JSON shape wanted.
pub fn render_analyze_meal_system_prompt(language: Language) -> String {
    match language {
        Language::English => format!(
            r#"You are a nutrition analysis assistant. You are given a photo of a meal.
Identify the dish and every visible ingredient, estimate portion sizes from the photo, and estimate nutrition values for each ingredient and for the whole meal.

Return the analysis as JSON with this exact structure:
{shape}

Optional fields you may add at the meal level or per ingredient, when you can actually estimate them: {extended}.
Omit any optional field you are unsure about instead of writing zero.

Rules:
- All names must be in English.
- Meal-level values must equal the sum over the ingredients.
- Numeric values must be numbers, not strings.
- Return ONLY the JSON, no other text."#,
            shape = RESPONSE_SHAPE,
            extended = EXTENDED_FIELDS
        ),
        Language::Hebrew => format!(
            r#"אתה עוזר לניתוח תזונתי. מוצגת לך תמונה של ארוחה.
זהה את המנה ואת כל רכיב הנראה לעין, הערך את גודל המנות מתוך התמונה, והערך ערכים תזונתיים לכל רכיב ולארוחה כולה.

החזר את הניתוח כ-JSON במבנה המדויק הבא:
{shape}

שדות אופציונליים שמותר להוסיף ברמת הארוחה או לכל רכיב, רק כאשר באמת ניתן להעריך אותם: {extended}.
השמט כל שדה אופציונלי שאינך בטוח בו במקום לרשום אפס.

כללים:
- כל השמות חייבים להיות בעברית.
- הערכים ברמת הארוחה חייבים להיות שווים לסכום על פני הרכיבים.
- ערכים מספריים חייבים להיות מספרים, לא מחרוזות.
- החזר אך ורק את ה-JSON, ללא טקסט נוסף."#,
            shape = RESPONSE_SHAPE,
            extended = EXTENDED_FIELDS
        ),
    }
}

/// The short user instruction that accompanies the photo.
pub fn render_analyze_meal_user_text(language: Language) -> &'static str {
    match language {
        Language::English => "Analyze the meal in this photo.",
        Language::Hebrew => "נתח את הארוחה שבתמונה.",
    }
}

/// Render the user-correction context appended when re-analyzing with prior
/// feedback. Returns `None` when there is nothing to add.
pub fn render_correction_context(
    update_text: Option<&str>,
    edited_ingredients: &[EditedIngredient],
    language: Language,
) -> Option<String> {
    if update_text.is_none() && edited_ingredients.is_empty() {
        return None;
    }

    let mut context = String::new();
    match language {
        Language::English => {
            context.push_str("The user reviewed an earlier analysis of this photo.\n");
            if let Some(text) = update_text {
                context.push_str("User feedback: ");
                context.push_str(text);
                context.push('\n');
            }
            if !edited_ingredients.is_empty() {
                context.push_str(
                    "The user corrected these ingredients by hand; treat them as accurate:\n",
                );
            }
        }
        Language::Hebrew => {
            context.push_str("המשתמש עבר על ניתוח קודם של התמונה הזו.\n");
            if let Some(text) = update_text {
                context.push_str("משוב מהמשתמש: ");
                context.push_str(text);
                context.push('\n');
            }
            if !edited_ingredients.is_empty() {
                context.push_str("המשתמש תיקן ידנית את הרכיבים הבאים; התייחס אליהם כמדויקים:\n");
            }
        }
    }

    for ingredient in edited_ingredients {
        context.push_str("- ");
        context.push_str(&format_edited_ingredient(ingredient, language));
        context.push('\n');
    }

    Some(context)
}

/// One edited ingredient as a prompt line, listing only the fields the user
/// actually set. Field labels stay in English to match the JSON field names.
fn format_edited_ingredient(ingredient: &EditedIngredient, language: Language) -> String {
    let name = ingredient
        .name
        .as_deref()
        .unwrap_or_else(|| language.unknown_ingredient());

    let mut parts = Vec::new();
    if let Some(calories) = ingredient.calories {
        parts.push(format!("calories {}", calories));
    }
    if let Some(protein) = ingredient.protein_g {
        parts.push(format!("protein {} g", protein));
    }
    if let Some(carbs) = ingredient.carbs_g {
        parts.push(format!("carbs {} g", carbs));
    }
    if let Some(fats) = ingredient.fats_g {
        parts.push(format!("fats {} g", fats));
    }
    if let Some(fiber) = ingredient.fiber_g {
        parts.push(format!("fiber {} g", fiber));
    }
    if let Some(sugar) = ingredient.sugar_g {
        parts.push(format!("sugar {} g", sugar));
    }
    if let Some(sodium) = ingredient.sodium_mg {
        parts.push(format!("sodium {} mg", sodium));
    }

    if parts.is_empty() {
        name.to_string()
    } else {
        format!("{} ({})", name, parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_describes_shape() {
        let prompt = render_analyze_meal_system_prompt(Language::English);
        assert!(prompt.contains("nutrition analysis assistant"));
        assert!(prompt.contains("\"meal_name\""));
        assert!(prompt.contains("\"sodium_mg\""));
        assert!(prompt.contains("glycemic_index"));
        assert!(prompt.contains("Return ONLY the JSON"));
    }

    #[test]
    fn test_hebrew_system_prompt() {
        let prompt = render_analyze_meal_system_prompt(Language::Hebrew);
        assert!(prompt.contains("בעברית"));
        assert!(prompt.contains("\"meal_name\""));
        assert!(prompt.contains("ללא טקסט נוסף"));
    }

    #[test]
    fn test_correction_context_empty_when_nothing_to_add() {
        assert_eq!(render_correction_context(None, &[], Language::English), None);
    }

    #[test]
    fn test_correction_context_includes_feedback_and_edits() {
        let edited = vec![EditedIngredient {
            name: Some("rice".to_string()),
            calories: Some(210.0),
            protein_g: Some(4.0),
            ..Default::default()
        }];
        let context =
            render_correction_context(Some("the portion is smaller"), &edited, Language::English)
                .unwrap();
        assert!(context.contains("User feedback: the portion is smaller"));
        assert!(context.contains("rice (calories 210, protein 4 g)"));
    }

    #[test]
    fn test_correction_context_hebrew() {
        let context =
            render_correction_context(Some("פחות אורז"), &[], Language::Hebrew).unwrap();
        assert!(context.contains("משוב מהמשתמש: פחות אורז"));
    }

    #[test]
    fn test_edited_ingredient_without_values() {
        let edited = vec![EditedIngredient {
            name: Some("lettuce".to_string()),
            ..Default::default()
        }];
        let context = render_correction_context(None, &edited, Language::English).unwrap();
        assert!(context.contains("- lettuce\n"));
    }
}
