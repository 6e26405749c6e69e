//! All AI/LLM functionality

pub mod analysis;
pub mod client;
pub mod prompt;

// Re-export main types for convenience
pub use analysis::{RESPONSE_TEXT_FIELDS, extract_response_text, parse_analysis};
pub use client::{InferenceService, WorkersAiClient};
pub use prompt::{ANALYSIS_SYSTEM_PROMPT, DEFAULT_MODEL, build_analysis_prompt};
