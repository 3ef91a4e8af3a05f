use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::completion::CompletionError;

/// Everything a request can fail with, mapped one-to-one onto a response.
///
/// There is no retry and no partial success; each failure is converted to a
/// response at the point of detection.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Client-caused: bad JSON, missing or empty fields, unsupported mode.
    #[error("{0}")]
    InvalidRequest(String),

    /// Deployment-caused: the completion-service credential is absent.
    #[error("{0}")]
    Configuration(String),

    /// Transport or auth failure from the completion service.
    #[error("completion service call failed: {message}")]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    /// The completion service replied, but the text is not recoverable as the
    /// expected JSON object.
    #[error("completion service reply was not the expected JSON object")]
    MalformedUpstreamResponse {
        /// Truncated prefix of the raw reply, for diagnosis.
        snippet: String,
    },
}

impl RelayError {
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::InvalidRequest(_) => "invalid_request",
            RelayError::Configuration(_) => "configuration_error",
            RelayError::Upstream { .. } => "upstream_error",
            RelayError::MalformedUpstreamResponse { .. } => "malformed_upstream_response",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            RelayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            RelayError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            RelayError::MalformedUpstreamResponse { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = json!({
            "kind": self.kind(),
            "error": self.to_string(),
        });
        match &self {
            RelayError::Upstream {
                status: Some(upstream),
                ..
            } => {
                body["details"] = json!(format!("upstream status {upstream}"));
            }
            RelayError::MalformedUpstreamResponse { snippet } => {
                body["details"] = json!(snippet);
            }
            _ => {}
        }
        (status, Json(body)).into_response()
    }
}

impl From<CompletionError> for RelayError {
    fn from(e: CompletionError) -> Self {
        match e {
            CompletionError::RequestFailed(message) => RelayError::Upstream {
                status: None,
                message,
            },
            CompletionError::ApiError { status, message } => RelayError::Upstream {
                status: Some(status),
                message,
            },
            CompletionError::ParseError(message) => {
                RelayError::MalformedUpstreamResponse { snippet: message }
            }
        }
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            RelayError::InvalidRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RelayError::Configuration("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            RelayError::Upstream {
                status: Some(401),
                message: "x".into()
            }
            .status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            RelayError::MalformedUpstreamResponse { snippet: "x".into() }.status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_kinds_are_stable() {
        assert_eq!(RelayError::InvalidRequest("x".into()).kind(), "invalid_request");
        assert_eq!(
            RelayError::MalformedUpstreamResponse { snippet: "x".into() }.kind(),
            "malformed_upstream_response"
        );
    }
}
