//! Groq chat-completion client
//!
//! One best-effort HTTP call per user action: no retries, no backoff, no
//! streaming. Failures are mapped onto a small taxonomy so the UI can tell a
//! rejected credential apart from a connectivity problem.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::inference::credential::{Credential, CredentialError};

/// Chat-completion endpoint (OpenAI-compatible)
pub const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Errors that can occur during an inference call
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("{0}")]
    Credential(#[from] CredentialError),

    #[error("The API rejected the credential (HTTP {status}): {message}")]
    InvalidCredential { status: u16, message: String },

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse API response: {0}")]
    Parse(String),

    #[error("The model returned no completion")]
    EmptyCompletion,
}

/// Sampling parameters for a completion request
#[derive(Debug, Clone, Copy)]
pub struct RequestParams {
    /// Temperature for sampling (0.0 = deterministic)
    pub temperature: f32,
    /// Maximum number of tokens in the completion
    pub max_tokens: u32,
}

impl Default for RequestParams {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            max_tokens: 1024,
        }
    }
}

// ============================================================================
// Wire types (OpenAI-compatible chat completions)
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Option<Vec<Choice>>,
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

// ============================================================================
// GroqClient
// ============================================================================

/// Client for the Groq chat-completion endpoint
#[derive(Debug, Clone)]
pub struct GroqClient {
    http: reqwest::Client,
    credential: Credential,
    model: String,
}

impl GroqClient {
    /// Create a client for a fixed model using the given credential
    pub fn new(credential: Credential, model: impl Into<String>) -> Result<Self, InferenceError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| InferenceError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            credential,
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one prompt and return the completion text
    pub async fn complete(&self, prompt: &str, params: &RequestParams) -> Result<String, InferenceError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        tracing::info!("Requesting completion from {} ({} byte prompt)", self.model, prompt.len());

        let response = self
            .http
            .post(GROQ_API_URL)
            .bearer_auth(self.credential.secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| InferenceError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| InferenceError::Network(e.to_string()))?;

        if !(200..300).contains(&status) {
            let err = classify_failure(status, &body);
            tracing::warn!("Completion request failed: {err}");
            return Err(err);
        }

        parse_completion(&body)
    }
}

/// Map a non-success HTTP response onto the error taxonomy.
///
/// 401/403 become `InvalidCredential` so the UI can distinguish a rejected
/// key from connectivity problems.
fn classify_failure(status: u16, body: &str) -> InferenceError {
    let message = serde_json::from_str::<ApiErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    match status {
        401 | 403 => InferenceError::InvalidCredential { status, message },
        _ => InferenceError::Api { status, message },
    }
}

/// Extract the completion text from a success response body
fn parse_completion(body: &str) -> Result<String, InferenceError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| InferenceError::Parse(e.to_string()))?;

    // Some gateways return HTTP 200 with an error object in the body
    if let Some(error) = response.error {
        return Err(InferenceError::Api {
            status: 200,
            message: error.message,
        });
    }

    response
        .choices
        .and_then(|choices| choices.into_iter().next())
        .map(|choice| choice.message.content)
        .filter(|content| !content.is_empty())
        .ok_or(InferenceError::EmptyCompletion)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_completion() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"The average age is 31.67."}}]}"#;
        assert_eq!(parse_completion(body).unwrap(), "The average age is 31.67.");
    }

    #[test]
    fn test_parse_empty_choices() {
        let body = r#"{"choices":[]}"#;
        assert!(matches!(parse_completion(body), Err(InferenceError::EmptyCompletion)));
    }

    #[test]
    fn test_parse_error_in_success_body() {
        let body = r#"{"error":{"message":"model decommissioned"}}"#;
        match parse_completion(body) {
            Err(InferenceError::Api { message, .. }) => assert_eq!(message, "model decommissioned"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_parse_garbage_body() {
        assert!(matches!(parse_completion("<html>"), Err(InferenceError::Parse(_))));
    }

    #[test]
    fn test_auth_rejection_is_distinct_from_network_failure() {
        let err = classify_failure(401, r#"{"error":{"message":"Invalid API Key"}}"#);
        match err {
            InferenceError::InvalidCredential { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid API Key");
            }
            other => panic!("unexpected classification: {other:?}"),
        }

        // A quota failure stays a plain API error
        assert!(matches!(
            classify_failure(429, r#"{"error":{"message":"rate limited"}}"#),
            InferenceError::Api { status: 429, .. }
        ));
    }

    #[test]
    fn test_unparseable_error_body_falls_back_to_raw_text() {
        match classify_failure(502, "Bad Gateway") {
            InferenceError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected classification: {other:?}"),
        }
    }

    #[test]
    fn test_request_serialization() {
        let request = ChatRequest {
            model: DEFAULT_MODEL.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: "hello".to_string(),
            }],
            temperature: 0.2,
            max_tokens: 1024,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], DEFAULT_MODEL);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hello");
        assert!((json["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
        assert_eq!(json["max_tokens"], 1024);
    }
}
