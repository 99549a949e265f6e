//! Meal analysis service facade.
//!
//! Owns the configured/disabled decision: the service is built with an AI
//! client when a credential is available and without one otherwise. Every
//! operation on a disabled service fails with
//! [`AnalysisError::NotConfigured`] before any network I/O.

use crate::ai::{
    analyze_meal_image, generate_text, update_meal_analysis, AiClient, AnalyzeMealRequest,
    OpenRouterClient,
};
use crate::error::AnalysisError;
use crate::types::{Language, MealAnalysis};

/// Facade over the AI-backed analysis operations.
pub struct MealAnalysisService {
    client: Option<Box<dyn AiClient>>,
}

impl MealAnalysisService {
    /// Build a service around an explicit client.
    pub fn new(client: Box<dyn AiClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// Build a service that rejects every operation with `NotConfigured`.
    pub fn disabled() -> Self {
        Self { client: None }
    }

    /// Build from environment configuration.
    ///
    /// A missing credential yields a disabled service rather than an error,
    /// so the hosting application can start without AI features.
    pub fn from_env() -> Self {
        match OpenRouterClient::from_env() {
            Ok(client) => Self::new(Box::new(client)),
            Err(err) => {
                tracing::warn!(error = %err, "meal analysis disabled");
                Self::disabled()
            }
        }
    }

    /// Whether an AI client is configured.
    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    fn client(&self) -> Result<&dyn AiClient, AnalysisError> {
        self.client.as_deref().ok_or(AnalysisError::NotConfigured)
    }

    /// Analyze a meal photo into a nutrition record.
    pub async fn analyze_image(
        &self,
        request: AnalyzeMealRequest,
    ) -> Result<MealAnalysis, AnalysisError> {
        let client = self.client()?;
        let outcome = analyze_meal_image(client, request).await?;
        tracing::debug!(
            meal = %outcome.analysis.meal_name,
            total_tokens = outcome.usage.total_tokens,
            "meal analysis complete"
        );
        Ok(outcome.analysis)
    }

    /// Revise a prior analysis given free-text user feedback.
    pub async fn update_analysis(
        &self,
        prior: &MealAnalysis,
        update_text: &str,
        language: Language,
    ) -> Result<MealAnalysis, AnalysisError> {
        let client = self.client()?;
        let outcome = update_meal_analysis(client, prior, update_text, language).await?;
        tracing::debug!(
            meal = %outcome.analysis.meal_name,
            total_tokens = outcome.usage.total_tokens,
            "analysis update complete"
        );
        Ok(outcome.analysis)
    }

    /// Generic single-turn completion with no parsing.
    pub async fn generate_text(
        &self,
        prompt: &str,
        max_tokens: Option<u32>,
    ) -> Result<String, AnalysisError> {
        let client = self.client()?;
        let outcome = generate_text(client, prompt, max_tokens).await?;
        Ok(outcome.text)
    }
}
