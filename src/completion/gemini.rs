//! Gemini (Google AI) completion client.

use super::{CompletionClient, CompletionError, UserMessage};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Gemini `generateContent` API client.
#[derive(Debug)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    max_output_tokens: u32,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, max_output_tokens: u32) -> Self {
        Self {
            api_key,
            model,
            max_output_tokens,
            client: reqwest::Client::new(),
        }
    }
}

/// Gemini API request format.
#[derive(Debug, Serialize)]
struct GenerateRequest {
    #[serde(rename = "systemInstruction")]
    system_instruction: Content,
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            inline_data: None,
        }
    }

    fn inline(mime_type: &str, data: &str) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.to_string(),
                data: data.to_string(),
            }),
        }
    }
}

#[derive(Debug, Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

/// Gemini API response format.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Error envelope from the Gemini API.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

fn parts_for(message: &UserMessage) -> Vec<Part> {
    match message {
        UserMessage::Text(text) => vec![Part::text(text)],
        UserMessage::Image {
            data,
            mime_type,
            instruction,
        } => vec![Part::inline(mime_type, data), Part::text(instruction)],
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(
        &self,
        system: &str,
        message: &UserMessage,
    ) -> Result<String, CompletionError> {
        let request = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part::text(system)],
            },
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: parts_for(message),
            }],
            generation_config: GenerationConfig {
                max_output_tokens: self.max_output_tokens,
            },
        };

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.model
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();

        let body = response
            .text()
            .await
            .map_err(|e| CompletionError::RequestFailed(e.to_string()))?;

        if status != 200 {
            if let Ok(error_response) = serde_json::from_str::<ApiErrorResponse>(&body) {
                return Err(CompletionError::ApiError {
                    status,
                    message: error_response.error.message,
                });
            }
            return Err(CompletionError::ApiError {
                status,
                message: body,
            });
        }

        let response: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| CompletionError::ParseError(e.to_string()))?;

        // Concatenate the text parts of the first candidate.
        let text = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .filter(|t| !t.is_empty())
            .ok_or_else(|| CompletionError::ParseError("no text content in reply".to_string()))?;

        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
