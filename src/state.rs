use crate::completion::{CompletionClient, GeminiClient};
use crate::config::AppConfig;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// None when no credential is configured; requests then fail with a
    /// configuration error before any network call.
    pub completion: Option<Arc<dyn CompletionClient>>,
}

impl AppState {
    pub fn init() -> Self {
        let config = Arc::new(AppConfig::from_env());

        let completion = config.gemini_api_key.clone().map(|key| {
            Arc::new(GeminiClient::new(
                key,
                config.gemini_model.clone(),
                config.max_output_tokens,
            )) as Arc<dyn CompletionClient>
        });

        if completion.is_none() {
            tracing::warn!("GEMINI_API_KEY is not set; analysis requests will fail");
        }

        Self { config, completion }
    }

    pub fn from_parts(config: Arc<AppConfig>, completion: Option<Arc<dyn CompletionClient>>) -> Self {
        Self { config, completion }
    }
}
