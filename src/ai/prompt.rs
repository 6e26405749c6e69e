use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};

/// Model used when `AI_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "@cf/meta/llama-3.1-8b-instruct";

pub const ANALYSIS_SYSTEM_PROMPT: &str = "You are a product manager assistant. \
    Return ONLY valid JSON with keys: summary (1-2 sentences), \
    sentiment (positive|neutral|negative), themes (array of 3 short phrases), \
    urgency (low|medium|high). No extra keys.";

/// Build the two-message chat sent for every submission: the fixed
/// instruction followed by the feedback itself.
#[must_use]
pub fn build_analysis_prompt(feedback_text: &str) -> Vec<ChatCompletionMessage> {
    vec![
        ChatCompletionMessage {
            role: MessageRole::system,
            content: Content::Text(ANALYSIS_SYSTEM_PROMPT.to_string()),
            name: None,
            tool_calls: None,
            tool_call_id: None,
        },
        ChatCompletionMessage {
            role: MessageRole::user,
            content: Content::Text(feedback_text.to_string()),
            name: None,
            tool_calls: None,
            tool_call_id: None,
        },
    ]
}
