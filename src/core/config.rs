use std::env;

use crate::ai::prompt::DEFAULT_MODEL;

pub const DEFAULT_AI_BASE_URL: &str = "https://api.cloudflare.com/client/v4";
pub const DEFAULT_FEEDBACK_PARAM_PREFIX: &str = "/feedback-lens/";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub cf_account_id: String,
    pub cf_api_token: String,
    pub ai_model: String,
    pub ai_base_url: String,
    pub feedback_param_prefix: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            cf_account_id: env::var("CF_ACCOUNT_ID")
                .map_err(|e| format!("CF_ACCOUNT_ID: {}", e))?,
            cf_api_token: env::var("CF_API_TOKEN").map_err(|e| format!("CF_API_TOKEN: {}", e))?,
            ai_model: env::var("AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            ai_base_url: env::var("AI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_AI_BASE_URL.to_string()),
            feedback_param_prefix: env::var("FEEDBACK_PARAM_PREFIX")
                .unwrap_or_else(|_| DEFAULT_FEEDBACK_PARAM_PREFIX.to_string()),
        })
    }
}
