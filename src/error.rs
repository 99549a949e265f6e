//! User-facing error taxonomy for meal analysis.
//!
//! Provider failures arrive as free-form error text. Callers only ever see
//! the small set of conditions below; the mapping is substring-based, with a
//! generic provider failure as the fallback. No retry or backoff happens at
//! this layer.

use thiserror::Error;

use crate::ai::AiError;

/// Errors surfaced to callers of the analysis operations.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// No API credential is configured; no request was attempted.
    #[error("meal analysis is not configured: set OPENROUTER_API_KEY")]
    NotConfigured,

    #[error("AI quota exceeded, try again later")]
    QuotaExceeded,

    #[error("AI provider is rate limiting requests, try again shortly")]
    RateLimited,

    #[error("the image could not be processed, send a clear JPEG or PNG photo")]
    InvalidImage,

    #[error("AI returned an empty response")]
    EmptyResponse,

    #[error("failed to parse AI response: {0}")]
    Parse(String),

    #[error("AI request failed: {0}")]
    Provider(String),
}

impl From<AiError> for AnalysisError {
    fn from(err: AiError) -> Self {
        match err {
            AiError::Config(_) => AnalysisError::NotConfigured,
            AiError::EmptyResponse => AnalysisError::EmptyResponse,
            AiError::Parse(message) => AnalysisError::Parse(message),
            AiError::Api(message) => classify_provider_error(&message),
        }
    }
}

/// Map provider error text onto the user-facing conditions by substring.
fn classify_provider_error(message: &str) -> AnalysisError {
    let lower = message.to_lowercase();

    if lower.contains("quota")
        || lower.contains("billing")
        || lower.contains("insufficient credits")
        || lower.contains("402")
    {
        return AnalysisError::QuotaExceeded;
    }
    if lower.contains("rate limit")
        || lower.contains("too many requests")
        || lower.contains("429")
    {
        return AnalysisError::RateLimited;
    }
    if lower.contains("image")
        && (lower.contains("invalid")
            || lower.contains("unsupported")
            || lower.contains("format")
            || lower.contains("could not process"))
    {
        return AnalysisError::InvalidImage;
    }

    AnalysisError::Provider(message.to_string())
}
