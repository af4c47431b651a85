//! Chat provider port
//!
//! Defines the interface the conversation loop uses to talk to an upstream
//! chat-completion backend. Adapters for each wire protocol live in the
//! infrastructure layer.

use async_trait::async_trait;
use hostscope_domain::{Message, ProviderReply};
use serde_json::Value;
use thiserror::Error;

/// Errors from a provider call. Every variant aborts the current turn.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Upstream answered with a non-success status.
    #[error("API request failed with status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    /// Upstream answered 2xx but the body could not be understood.
    #[error("Malformed response: {reason}")]
    Malformed { reason: String, body: String },

    #[error("Request timed out")]
    Timeout,

    #[error("Request cancelled")]
    Cancelled,
}

impl ProviderError {
    pub fn malformed(reason: impl Into<String>, body: impl Into<String>) -> Self {
        ProviderError::Malformed {
            reason: reason.into(),
            body: body.into(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ProviderError::Cancelled)
    }

    /// Upstream HTTP status, if the failure carried one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A chat-completion backend.
///
/// `tools` are provider-neutral schemas produced by
/// [`ToolSchemaPort`](super::tool_schema::ToolSchemaPort); each adapter
/// reshapes them for its wire format.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Short provider label for logs (e.g., "anthropic", "deepseek").
    fn name(&self) -> &str;

    /// Model identifier sent with each request.
    fn model(&self) -> &str;

    async fn send(
        &self,
        history: &[Message],
        tools: &[Value],
        system_prompt: &str,
    ) -> Result<ProviderReply, ProviderError>;
}
