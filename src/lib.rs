//! Meal photo nutrition analysis via hosted multimodal LLMs.
//!
//! Given a meal photo (and optionally prior analysis plus user corrections),
//! this crate builds a bilingual instruction prompt, sends one multimodal
//! chat-completion request, extracts the JSON object from the model's
//! free-form reply, and normalizes it into a fixed-shape nutrition record
//! with per-meal and per-ingredient estimates.
//!
//! The entry point is [`MealAnalysisService`]; the underlying operations and
//! client abstractions live in [`ai`].

pub mod ai;
pub mod error;
pub mod extract;
pub mod reply;
pub mod service;
pub mod types;

pub use ai::{
    analyze_meal_image, generate_text, update_meal_analysis, AiClient, AiConfig, AiError,
    AnalyzeMealOutcome, AnalyzeMealRequest, ChatMessage, ChatRequest, ChatResponse, ConfigError,
    FakeClient, GenerateTextOutcome, ImageData, OpenRouterClient, Role, Usage,
};
pub use error::AnalysisError;
pub use extract::extract_json_object;
pub use reply::{calorie_mismatch, RawIngredient, RawMealAnalysis, CALORIE_MISMATCH_TOLERANCE};
pub use service::MealAnalysisService;
pub use types::{
    EditedIngredient, ExtendedNutrients, Ingredient, Language, MealAnalysis, Nutrients,
};
