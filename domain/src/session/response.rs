//! Normalized provider reply.
//!
//! Every adapter returns a [`ProviderReply`] regardless of which wire
//! protocol it speaks.

use super::entities::{ContentSegment, ToolArguments};
use serde::{Deserialize, Serialize};

/// Reason the model stopped generating.
///
/// Unknown wire values are kept verbatim in [`StopReason::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural end of response.
    EndTurn,
    /// The model wants tools executed.
    ToolUse,
    /// Hit the token limit; the reply may be truncated.
    MaxTokens,
    /// Provider-specific stop reason.
    Other(String),
}

impl StopReason {
    pub fn from_wire(value: &str) -> Self {
        match value {
            "end_turn" => StopReason::EndTurn,
            "tool_use" => StopReason::ToolUse,
            "max_tokens" => StopReason::MaxTokens,
            other => StopReason::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            StopReason::EndTurn => "end_turn",
            StopReason::ToolUse => "tool_use",
            StopReason::MaxTokens => "max_tokens",
            StopReason::Other(s) => s,
        }
    }
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// A reply from one provider call.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderReply {
    pub segments: Vec<ContentSegment>,
    pub stop_reason: StopReason,
    /// Model identifier, if returned by the API.
    pub model: Option<String>,
    pub usage: Option<TokenUsage>,
}

impl ProviderReply {
    pub fn new(segments: Vec<ContentSegment>, stop_reason: StopReason) -> Self {
        Self {
            segments,
            stop_reason,
            model: None,
            usage: None,
        }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(vec![ContentSegment::text(text)], StopReason::EndTurn)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn text_content(&self) -> String {
        self.segments
            .iter()
            .filter_map(|s| s.as_text())
            .collect::<Vec<_>>()
            .join("")
    }

    pub fn invocations(&self) -> impl Iterator<Item = (&str, &str, &ToolArguments)> {
        self.segments.iter().filter_map(|s| s.as_invocation())
    }

    pub fn has_invocations(&self) -> bool {
        self.invocations().next().is_some()
    }
}
