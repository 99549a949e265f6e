//! Fresh meal analysis from a photo.

use crate::ai::prompts::analyze_meal::{
    render_analyze_meal_system_prompt, render_analyze_meal_user_text, render_correction_context,
    ANALYZE_MEAL_PROMPT_NAME,
};
use crate::ai::{AiClient, AiError, ChatMessage, ChatRequest, ImageData, Usage};
use crate::extract::extract_json_object;
use crate::reply::{calorie_mismatch, RawMealAnalysis};
use crate::types::{EditedIngredient, Language, MealAnalysis};

const ANALYZE_MAX_TOKENS: u32 = 2000;
const ANALYZE_TEMPERATURE: f32 = 0.1;

/// Input to a fresh meal analysis.
#[derive(Debug, Clone)]
pub struct AnalyzeMealRequest {
    /// The meal photo.
    pub image: ImageData,
    /// Language for prompts, names, and placeholders.
    pub language: Language,
    /// Free-text feedback from the user about a prior attempt.
    pub update_text: Option<String>,
    /// Ingredient rows the user edited by hand.
    pub edited_ingredients: Vec<EditedIngredient>,
}

impl AnalyzeMealRequest {
    pub fn new(image: ImageData, language: Language) -> Self {
        Self {
            image,
            language,
            update_text: None,
            edited_ingredients: Vec::new(),
        }
    }
}

/// Result of an analysis call.
#[derive(Debug, Clone)]
pub struct AnalyzeMealOutcome {
    pub analysis: MealAnalysis,
    pub usage: Usage,
}

/// Analyze a meal photo into a normalized nutrition record.
pub async fn analyze_meal_image(
    ai_client: &dyn AiClient,
    request: AnalyzeMealRequest,
) -> Result<AnalyzeMealOutcome, AiError> {
    let system_prompt = render_analyze_meal_system_prompt(request.language);

    let mut user_text = render_analyze_meal_user_text(request.language).to_string();
    if let Some(context) = render_correction_context(
        request.update_text.as_deref(),
        &request.edited_ingredients,
        request.language,
    ) {
        user_text.push_str("\n\n");
        user_text.push_str(&context);
    }

    let chat = ChatRequest {
        messages: vec![
            ChatMessage::system(system_prompt),
            ChatMessage::user_with_images(user_text, vec![request.image]),
        ],
        json_response: true,
        max_tokens: Some(ANALYZE_MAX_TOKENS),
        temperature: Some(ANALYZE_TEMPERATURE),
    };

    let response = ai_client.complete(ANALYZE_MEAL_PROMPT_NAME, chat).await?;
    let analysis = parse_meal_reply(&response.content, request.language)?;

    Ok(AnalyzeMealOutcome {
        analysis,
        usage: response.usage,
    })
}

/// Shared reply handling for the analysis operations: extract the JSON
/// object, parse the loose shape, normalize, and log a calorie-consistency
/// warning when the totals disagree.
pub(crate) fn parse_meal_reply(
    content: &str,
    language: Language,
) -> Result<MealAnalysis, AiError> {
    if content.trim().is_empty() {
        return Err(AiError::EmptyResponse);
    }

    let json = extract_json_object(content).ok_or_else(|| {
        AiError::Parse(format!(
            "No JSON object in response: {}",
            content.chars().take(120).collect::<String>()
        ))
    })?;

    let raw: RawMealAnalysis = serde_json::from_str(json)
        .map_err(|e| AiError::Parse(format!("Failed to parse analysis response: {}", e)))?;

    let analysis = raw.normalize(language);

    if let Some(deviation) = calorie_mismatch(&analysis) {
        tracing::warn!(
            meal = %analysis.meal_name,
            deviation_pct = (deviation * 100.0).round(),
            "ingredient calories disagree with the meal total"
        );
    }

    Ok(analysis)
}
