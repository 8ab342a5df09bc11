//! Remote inference
//!
//! This module handles all interaction with the Groq chat-completion API:
//! credential loading and the single-call HTTP client.

pub mod client;
pub mod credential;

// Re-export main types for convenience
pub use client::{GroqClient, InferenceError, RequestParams, DEFAULT_MODEL};
pub use credential::{credential, Credential, CredentialError, CREDENTIAL_ENV_VAR};
