//! Revision of a prior meal analysis from user feedback.

use crate::ai::analyze_meal::{parse_meal_reply, AnalyzeMealOutcome};
use crate::ai::prompts::update_analysis::{
    render_update_system_prompt, render_update_user_prompt, UPDATE_ANALYSIS_PROMPT_NAME,
};
use crate::ai::{AiClient, AiError, ChatMessage, ChatRequest};
use crate::types::{Language, MealAnalysis};

const UPDATE_MAX_TOKENS: u32 = 1500;
const UPDATE_TEMPERATURE: f32 = 0.1;

/// Revise a previously produced analysis given free-text feedback.
///
/// The prior analysis is serialized into the prompt verbatim; the model
/// returns a complete replacement, which goes through the same
/// extract/normalize pipeline as a fresh analysis.
pub async fn update_meal_analysis(
    ai_client: &dyn AiClient,
    prior: &MealAnalysis,
    update_text: &str,
    language: Language,
) -> Result<AnalyzeMealOutcome, AiError> {
    let analysis_json = serde_json::to_string_pretty(prior)
        .map_err(|e| AiError::Parse(format!("Failed to serialize prior analysis: {}", e)))?;

    let request = ChatRequest {
        messages: vec![
            ChatMessage::system(render_update_system_prompt(language)),
            ChatMessage::user(render_update_user_prompt(
                &analysis_json,
                update_text,
                language,
            )),
        ],
        json_response: true,
        max_tokens: Some(UPDATE_MAX_TOKENS),
        temperature: Some(UPDATE_TEMPERATURE),
    };

    let response = ai_client
        .complete(UPDATE_ANALYSIS_PROMPT_NAME, request)
        .await?;
    let analysis = parse_meal_reply(&response.content, language)?;

    Ok(AnalyzeMealOutcome {
        analysis,
        usage: response.usage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::FakeClient;
    use crate::reply::RawMealAnalysis;

    fn prior() -> MealAnalysis {
        let raw: RawMealAnalysis = serde_json::from_str(
            r#"{"meal_name": "Shakshuka", "calories": 540,
                "ingredients": [{"name": "eggs", "calories": 280}]}"#,
        )
        .unwrap();
        raw.normalize(Language::English)
    }

    #[tokio::test]
    async fn test_update_meal_analysis() {
        let client = FakeClient::with_meal_responses();
        let outcome = update_meal_analysis(&client, &prior(), "I added feta", Language::English)
            .await
            .unwrap();

        assert_eq!(outcome.analysis.meal_name, "Shakshuka with feta");
        assert_eq!(outcome.analysis.nutrients.calories, 640.0);
        assert_eq!(outcome.analysis.ingredients.len(), 4);
    }

    #[tokio::test]
    async fn test_update_prompt_carries_prior_analysis() {
        // Match on a value that only appears in the serialized prior analysis.
        let client = FakeClient::with_response(
            "\"meal_name\": \"Shakshuka\"",
            r#"{"meal_name": "Revised", "calories": 500}"#,
        );
        let outcome = update_meal_analysis(&client, &prior(), "smaller", Language::English)
            .await
            .unwrap();
        assert_eq!(outcome.analysis.meal_name, "Revised");
    }

    #[tokio::test]
    async fn test_update_unparseable_reply() {
        let client = FakeClient::with_response("current analysis", "cannot help with that");
        let result = update_meal_analysis(&client, &prior(), "more", Language::English).await;
        assert!(matches!(result, Err(AiError::Parse(_))));
    }
}
