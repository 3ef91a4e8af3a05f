//! Fake completion client for tests.
//!
//! Returns a scripted reply without network access and counts calls, so tests
//! can assert both on the reply handling and on whether a call was attempted.

use super::{CompletionClient, CompletionError, UserMessage};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug)]
enum Script {
    Reply(String),
    ApiError { status: u16, message: String },
}

#[derive(Debug)]
#[allow(dead_code)]
pub struct FakeCompletion {
    script: Script,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl FakeCompletion {
    /// Always reply with the given text.
    pub fn with_reply(reply: &str) -> Self {
        Self {
            script: Script::Reply(reply.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always fail as if the API returned a non-success status.
    pub fn with_api_error(status: u16, message: &str) -> Self {
        Self {
            script: Script::ApiError {
                status,
                message: message.to_string(),
            },
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of completed `complete` calls.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for FakeCompletion {
    async fn complete(
        &self,
        _system: &str,
        _message: &UserMessage,
    ) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Reply(text) => Ok(text.clone()),
            Script::ApiError { status, message } => Err(CompletionError::ApiError {
                status: *status,
                message: message.clone(),
            }),
        }
    }

    fn model_name(&self) -> &str {
        "fake"
    }
}
