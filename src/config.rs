use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Completion-service credential. Absence is not fatal at startup; requests
    /// fail with a configuration error until it is supplied.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub max_output_tokens: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());
        let gemini_model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.0-flash".into());
        let max_output_tokens = std::env::var("GEMINI_MAX_OUTPUT_TOKENS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(8192);

        Self {
            gemini_api_key,
            gemini_model,
            max_output_tokens,
        }
    }
}
