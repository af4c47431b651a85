//! Wire types for the Anthropic Messages API and their conversions.
//!
//! The native protocol is structurally the same as the canonical model:
//! content blocks map one to one onto segments.

use hostscope_domain::{
    ContentSegment, Message, ProviderReply, StopReason, TokenUsage, ToolArguments,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct MessagesRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<&'a str>,
    #[serde(skip_serializing_if = "<[Value]>::is_empty")]
    pub tools: &'a [Value],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: String,
    pub content: Vec<WireBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WireBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        #[serde(default)]
        input: ToolArguments,
    },
    ToolResult {
        tool_use_id: String,
        content: String,
    },
    /// Thinking, images and anything newer.
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<WireBlock>,
    pub stop_reason: Option<String>,
    pub model: Option<String>,
    pub usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
pub struct WireUsage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
}

// ─── Domain → Anthropic ──────────────────────────────────────────

fn convert_segment(segment: &ContentSegment) -> Option<WireBlock> {
    match segment {
        // The API rejects empty text blocks.
        ContentSegment::Text { text } if text.is_empty() => None,
        ContentSegment::Text { text } => Some(WireBlock::Text { text: text.clone() }),
        ContentSegment::ToolInvocation {
            id,
            name,
            arguments,
        } => Some(WireBlock::ToolUse {
            id: id.clone(),
            name: name.clone(),
            input: arguments.clone(),
        }),
        ContentSegment::ToolResult {
            invocation_id,
            content,
        } => Some(WireBlock::ToolResult {
            tool_use_id: invocation_id.clone(),
            content: content.clone(),
        }),
    }
}

/// Convert the history. Messages left with no blocks are dropped.
pub fn convert_messages(history: &[Message]) -> Vec<WireMessage> {
    history
        .iter()
        .filter_map(|message| {
            let content: Vec<WireBlock> = message.segments.iter().filter_map(convert_segment).collect();
            (!content.is_empty()).then(|| WireMessage {
                role: message.role.as_str().to_string(),
                content,
            })
        })
        .collect()
}

// ─── Anthropic → Domain ──────────────────────────────────────────

pub fn convert_response(response: MessagesResponse) -> ProviderReply {
    let segments = response
        .content
        .into_iter()
        .filter_map(|block| match block {
            WireBlock::Text { text } => Some(ContentSegment::Text { text }),
            WireBlock::ToolUse { id, name, input } => Some(ContentSegment::ToolInvocation {
                id,
                name,
                arguments: input,
            }),
            WireBlock::ToolResult { .. } | WireBlock::Unsupported => None,
        })
        .collect();

    let stop_reason = response
        .stop_reason
        .as_deref()
        .map(StopReason::from_wire)
        .unwrap_or(StopReason::EndTurn);

    let mut reply = ProviderReply::new(segments, stop_reason);
    reply.model = response.model;
    reply.usage = response.usage.map(|u| TokenUsage {
        input_tokens: u.input_tokens,
        output_tokens: u.output_tokens,
    });
    reply
}
