//! Prompt templates for revising an existing meal analysis.

use super::RESPONSE_SHAPE;
use crate::types::Language;

/// Prompt name used in logs.
pub const UPDATE_ANALYSIS_PROMPT_NAME: &str = "update_analysis";

/// Render the system prompt for the revision flow.
pub fn render_update_system_prompt(language: Language) -> String {
    match language {
        Language::English => format!(
            r#"You are a nutrition analysis assistant. The user will give you an existing meal analysis as JSON and a correction describing what to change. Apply the correction and return the complete updated analysis.

IMPORTANT RULES:
- Return the COMPLETE analysis, not just the changed parts.
- Preserve every field the correction does not affect.
- Keep meal-level values equal to the sum over the ingredients.
- All names must be in English.
- Return ONLY valid JSON matching this exact structure, no other text:
{shape}"#,
            shape = RESPONSE_SHAPE
        ),
        Language::Hebrew => format!(
            r#"אתה עוזר לניתוח תזונתי. המשתמש ייתן לך ניתוח ארוחה קיים בפורמט JSON ותיקון המתאר מה לשנות. החל את התיקון והחזר את הניתוח המעודכן במלואו.

כללים חשובים:
- החזר את הניתוח המלא, לא רק את החלקים שהשתנו.
- שמור על כל שדה שהתיקון אינו משפיע עליו.
- שמור על ערכים ברמת הארוחה שווים לסכום על פני הרכיבים.
- כל השמות חייבים להיות בעברית.
- החזר אך ורק JSON תקין במבנה המדויק הבא, ללא טקסט נוסף:
{shape}"#,
            shape = RESPONSE_SHAPE
        ),
    }
}

/// Render the user message embedding the prior analysis JSON verbatim plus
/// the correction text.
pub fn render_update_user_prompt(
    analysis_json: &str,
    update_text: &str,
    language: Language,
) -> String {
    match language {
        Language::English => format!(
            "Here is the current analysis:\n\n{analysis_json}\n\nApply this correction: {update_text}"
        ),
        Language::Hebrew => format!(
            "הנה הניתוח הנוכחי:\n\n{analysis_json}\n\nהחל את התיקון הבא: {update_text}"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_system_prompt() {
        let prompt = render_update_system_prompt(Language::English);
        assert!(prompt.contains("existing meal analysis"));
        assert!(prompt.contains("COMPLETE analysis"));
        assert!(prompt.contains("\"ingredients\""));
    }

    #[test]
    fn test_render_user_prompt_embeds_json_verbatim() {
        let json = r#"{"meal_name": "Pasta", "calories": 600.0}"#;
        let prompt = render_update_user_prompt(json, "add parmesan", Language::English);
        assert!(prompt.contains(json));
        assert!(prompt.contains("Apply this correction: add parmesan"));
    }

    #[test]
    fn test_render_user_prompt_hebrew() {
        let json = r#"{"meal_name": "פסטה"}"#;
        let prompt = render_update_user_prompt(json, "הוסף פרמזן", Language::Hebrew);
        assert!(prompt.contains(json));
        assert!(prompt.contains("החל את התיקון הבא: הוסף פרמזן"));
    }
}
