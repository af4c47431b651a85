//! Canonical message model shared by every provider adapter.
//!
//! Both upstream wire protocols are normalized into [`Message`]s made of
//! ordered [`ContentSegment`]s. Adapters convert to and from this model at
//! the edge; nothing else in the system sees a wire format.

use serde::{Deserialize, Serialize};

/// Arguments of a tool invocation.
///
/// A `serde_json::Map` keeps keys in a deterministic order, which keeps
/// serialized requests and audit records stable.
pub type ToolArguments = serde_json::Map<String, serde_json::Value>;

/// Author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single piece of a message.
///
/// `ToolInvocation` only appears in assistant messages. `ToolResult` only
/// appears in the synthetic user message that directly follows the
/// assistant message holding the matching invocation.
///
/// # Examples
///
/// ```
/// use hostscope_domain::session::entities::ContentSegment;
///
/// let text = ContentSegment::text("Let me look at the logs.");
/// assert_eq!(text.as_text(), Some("Let me look at the logs."));
///
/// let call = ContentSegment::invocation("call_1", "read_logs", Default::default());
/// assert_eq!(call.as_invocation().map(|(id, _, _)| id), Some("call_1"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentSegment {
    Text {
        text: String,
    },
    ToolInvocation {
        /// Provider-assigned identifier, echoed back by the matching result.
        id: String,
        name: String,
        arguments: ToolArguments,
    },
    ToolResult {
        invocation_id: String,
        content: String,
    },
}

impl ContentSegment {
    pub fn text(text: impl Into<String>) -> Self {
        ContentSegment::Text { text: text.into() }
    }

    pub fn invocation(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: ToolArguments,
    ) -> Self {
        ContentSegment::ToolInvocation {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }

    pub fn result(invocation_id: impl Into<String>, content: impl Into<String>) -> Self {
        ContentSegment::ToolResult {
            invocation_id: invocation_id.into(),
            content: content.into(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentSegment::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Returns `(id, name, arguments)` if this is a `ToolInvocation`.
    pub fn as_invocation(&self) -> Option<(&str, &str, &ToolArguments)> {
        match self {
            ContentSegment::ToolInvocation {
                id,
                name,
                arguments,
            } => Some((id, name, arguments)),
            _ => None,
        }
    }

    /// Returns `(invocation_id, content)` if this is a `ToolResult`.
    pub fn as_result(&self) -> Option<(&str, &str)> {
        match self {
            ContentSegment::ToolResult {
                invocation_id,
                content,
            } => Some((invocation_id, content)),
            _ => None,
        }
    }
}

/// One message of a conversation. Segment order is significant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub segments: Vec<ContentSegment>,
}

impl Message {
    pub fn new(role: Role, segments: Vec<ContentSegment>) -> Self {
        Self { role, segments }
    }

    pub fn user_text(text: impl Into<String>) -> Self {
        Self::new(Role::User, vec![ContentSegment::text(text)])
    }

    pub fn assistant(segments: Vec<ContentSegment>) -> Self {
        Self::new(Role::Assistant, segments)
    }

    /// Synthetic user message carrying tool results.
    pub fn tool_results(results: Vec<ContentSegment>) -> Self {
        Self::new(Role::User, results)
    }

    /// Concatenation of all text segments.
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

    pub fn results(&self) -> impl Iterator<Item = (&str, &str)> {
        self.segments.iter().filter_map(|s| s.as_result())
    }

    pub fn has_invocations(&self) -> bool {
        self.invocations().next().is_some()
    }

    pub fn has_results(&self) -> bool {
        self.results().next().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
