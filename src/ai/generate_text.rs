//! Generic single-turn text generation passthrough.

use crate::ai::{AiClient, AiError, ChatMessage, ChatRequest, Usage};

/// Prompt name used in logs.
pub const GENERATE_TEXT_PROMPT_NAME: &str = "generate_text";

/// Token budget used when the caller does not specify one.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Result of a text generation call.
#[derive(Debug, Clone)]
pub struct GenerateTextOutcome {
    pub text: String,
    pub usage: Usage,
}

/// Send a single prompt and return the raw text reply, no parsing.
pub async fn generate_text(
    ai_client: &dyn AiClient,
    prompt: &str,
    max_tokens: Option<u32>,
) -> Result<GenerateTextOutcome, AiError> {
    let request = ChatRequest {
        messages: vec![ChatMessage::user(prompt)],
        json_response: false,
        max_tokens: Some(max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)),
        temperature: Some(DEFAULT_TEMPERATURE),
    };

    let response = ai_client.complete(GENERATE_TEXT_PROMPT_NAME, request).await?;

    if response.content.trim().is_empty() {
        return Err(AiError::EmptyResponse);
    }

    Ok(GenerateTextOutcome {
        text: response.content,
        usage: response.usage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::FakeClient;

    #[tokio::test]
    async fn test_generate_text_passthrough() {
        let client = FakeClient::with_response("motivation", "Keep logging your meals!");
        let outcome = generate_text(&client, "Write a short motivation line", None)
            .await
            .unwrap();
        assert_eq!(outcome.text, "Keep logging your meals!");
    }

    #[tokio::test]
    async fn test_generate_text_empty_reply() {
        let client = FakeClient::with_response("motivation", "");
        let result = generate_text(&client, "motivation please", Some(50)).await;
        assert!(matches!(result, Err(AiError::EmptyResponse)));
    }
}
