//! Hosted text-generation adapters.

mod api_types;
mod gemini;

pub use gemini::GeminiClient;
