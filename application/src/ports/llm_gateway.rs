//! LLM Gateway port
//!
//! Defines the interface for sending one chat completion to a backend.

use async_trait::async_trait;
use debate_domain::ResolvedModel;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Empty response")]
    EmptyResponse,

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Credential error: {0}")]
    Credential(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// One system + user message pair addressed to a resolved model.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: ResolvedModel,
    pub system: String,
    pub user: String,
    pub max_output_tokens: u32,
    /// Time the backend is given to answer
    pub deadline: Duration,
}

/// Gateway for LLM communication
///
/// This port defines how the application layer reaches chat-completion
/// backends. Implementations (adapters) live in the infrastructure layer and
/// own connection pooling and any request-shape differences between
/// backends. Deadline enforcement is done by the caller as well, so an
/// adapter that ignores `deadline` still cannot hang a round.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send the request and return the generated text.
    async fn complete(&self, request: CompletionRequest) -> Result<String, GatewayError>;
}
