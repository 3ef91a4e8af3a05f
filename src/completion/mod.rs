//! Completion-service abstraction.
//!
//! The relay makes exactly one non-streaming call per request. The trait keeps
//! the transport swappable so tests can run against a deterministic fake.

mod fake;
mod gemini;

pub use fake::FakeCompletion;
pub use gemini::GeminiClient;

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for completion-service calls.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("failed to read reply: {0}")]
    ParseError(String),
}

/// The single user message sent alongside the fixed system instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserMessage {
    Text(String),
    Image {
        /// Base64 image bytes, passed through as received from the client.
        data: String,
        mime_type: String,
        instruction: String,
    },
}

/// A client for the external LLM completion service.
///
/// Implementations must be stateless and thread-safe, and must await the full
/// reply before returning; there is no partial-result handling.
#[async_trait]
pub trait CompletionClient: Send + Sync + fmt::Debug {
    /// Send the system instruction plus one user message, return the raw text reply.
    async fn complete(&self, system: &str, message: &UserMessage)
        -> Result<String, CompletionError>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}
