//! Fake AI client for testing.
//!
//! Returns deterministic responses based on prompt matching, allowing tests
//! to run without network access or API costs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use super::client::{AiClient, AiError};
use super::types::{ChatRequest, ChatResponse, Usage};

/// A fake AI client for testing.
///
/// Responses are matched by checking if any message in the request contains a
/// registered substring. If no match is found, returns the default response
/// or an error.
#[derive(Debug)]
pub struct FakeClient {
    /// Map of prompt substring -> response content
    responses: RwLock<HashMap<String, String>>,
    /// Default response if no match found
    default_response: Option<String>,
}

impl Default for FakeClient {
    fn default() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            default_response: Some("{}".to_string()),
        }
    }
}

impl FakeClient {
    /// Create a new FakeClient with no registered responses.
    pub fn new() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            default_response: None,
        }
    }

    /// Create a FakeClient that returns a specific response for requests
    /// containing a substring.
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        let mut client = Self::new();
        client.add_response(prompt_contains, response);
        client
    }

    /// Add a response for requests containing a specific substring.
    pub fn add_response(&mut self, prompt_contains: &str, response: &str) {
        self.responses
            .write()
            .unwrap()
            .insert(prompt_contains.to_string(), response.to_string());
    }

    /// Set the default response when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Create a FakeClient with standard responses for meal analysis testing.
    pub fn with_meal_responses() -> Self {
        let mut client = Self::new();

        // Fresh analysis response
        client.add_response(
            "photo of a meal",
            r#"{
                "meal_name": "Shakshuka",
                "calories": 540,
                "protein_g": 24,
                "carbs_g": 30,
                "fats_g": 36,
                "fiber_g": 6,
                "sugar_g": 12,
                "sodium_mg": 980,
                "confidence": 0.82,
                "cholesterol_mg": 370,
                "ingredients": [
                    {"name": "eggs", "calories": 280, "protein_g": 18, "fats_g": 20},
                    {"name": "tomato sauce", "calories": 160, "carbs_g": 24, "sugar_g": 11},
                    {"name": "olive oil", "calories": 100, "fats_g": 12}
                ]
            }"#,
        );

        // Update response
        client.add_response(
            "current analysis",
            r#"{
                "meal_name": "Shakshuka with feta",
                "calories": 640,
                "protein_g": 30,
                "carbs_g": 31,
                "fats_g": 43,
                "fiber_g": 6,
                "sugar_g": 12,
                "sodium_mg": 1300,
                "confidence": 0.85,
                "ingredients": [
                    {"name": "eggs", "calories": 280, "protein_g": 18, "fats_g": 20},
                    {"name": "tomato sauce", "calories": 160, "carbs_g": 24, "sugar_g": 11},
                    {"name": "olive oil", "calories": 100, "fats_g": 12},
                    {"name": "feta", "calories": 100, "protein_g": 6, "fats_g": 7}
                ]
            }"#,
        );

        client
    }
}

#[async_trait]
impl AiClient for FakeClient {
    async fn complete(
        &self,
        _prompt_name: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, AiError> {
        let haystack = request
            .messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
            .to_lowercase();

        let responses = self.responses.read().unwrap();

        // Find first matching pattern (case-insensitive)
        for (pattern, response) in responses.iter() {
            if haystack.contains(&pattern.to_lowercase()) {
                return Ok(ChatResponse {
                    content: response.clone(),
                    usage: Usage::default(),
                });
            }
        }

        // Return default or error
        match &self.default_response {
            Some(response) => Ok(ChatResponse {
                content: response.clone(),
                usage: Usage::default(),
            }),
            None => Err(AiError::Api(format!(
                "FakeClient: No response configured for request (first 100 chars): {}",
                haystack.chars().take(100).collect::<String>()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::ChatMessage;

    fn user_request(content: &str) -> ChatRequest {
        ChatRequest {
            messages: vec![ChatMessage::user(content)],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_fake_client_matching() {
        let client = FakeClient::with_response("hello", "world");
        let response = client.complete("test", user_request("Say hello")).await.unwrap();
        assert_eq!(response.content, "world");
    }

    #[tokio::test]
    async fn test_fake_client_case_insensitive() {
        let client = FakeClient::with_response("HELLO", "world");
        let response = client
            .complete("test", user_request("hello there"))
            .await
            .unwrap();
        assert_eq!(response.content, "world");
    }

    #[tokio::test]
    async fn test_fake_client_no_match() {
        let client = FakeClient::new();
        let result = client.complete("test", user_request("random prompt")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fake_client_default_response() {
        let client = FakeClient::new().with_default_response("default");
        let response = client
            .complete("test", user_request("random prompt"))
            .await
            .unwrap();
        assert_eq!(response.content, "default");
    }

    #[tokio::test]
    async fn test_fake_client_matches_system_message() {
        let client = FakeClient::with_response("nutrition", "ok");
        let request = ChatRequest {
            messages: vec![
                ChatMessage::system("You are a nutrition analysis assistant."),
                ChatMessage::user("go"),
            ],
            ..Default::default()
        };
        let response = client.complete("test", request).await.unwrap();
        assert_eq!(response.content, "ok");
    }
}
