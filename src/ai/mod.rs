//! AI client module for meal analysis via OpenRouter.
//!
//! This module provides:
//! - `AiClient` trait for abstracting AI providers
//! - `OpenRouterClient` implementation over the OpenAI-compatible API
//! - `FakeClient` for tests, no network required
//! - Prompt templates and one function per AI-backed operation
//!
//! # Configuration
//!
//! Set these environment variables:
//!
//! - `OPENROUTER_API_KEY` (required): Your OpenRouter API key
//! - `PLATELOG_AI_MODEL` (optional): Model name, e.g., "openai/gpt-4o-mini"
//! - `PLATELOG_AI_BASE_URL` (optional): API base URL
//!
//! # Example
//!
//! ```ignore
//! use platelog_core::ai::{analyze_meal_image, AnalyzeMealRequest, ImageData, OpenRouterClient};
//! use platelog_core::types::Language;
//!
//! let client = OpenRouterClient::from_env()?;
//! let request = AnalyzeMealRequest::new(ImageData::jpeg(photo_base64), Language::English);
//! let outcome = analyze_meal_image(&client, request).await?;
//! println!("{} kcal", outcome.analysis.nutrients.calories);
//! ```

mod analyze_meal;
mod client;
mod config;
mod fake;
mod generate_text;
pub mod prompts;
mod types;
mod update_analysis;

pub use analyze_meal::{analyze_meal_image, AnalyzeMealOutcome, AnalyzeMealRequest};
pub use client::{AiClient, AiError, OpenRouterClient};
pub use config::{AiConfig, ConfigError, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use fake::FakeClient;
pub use generate_text::{generate_text, GenerateTextOutcome, DEFAULT_MAX_TOKENS};
pub use types::{ChatMessage, ChatRequest, ChatResponse, ImageData, Role, Usage};
pub use update_analysis::update_meal_analysis;
