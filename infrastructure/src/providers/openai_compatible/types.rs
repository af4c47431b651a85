//! Wire types for OpenAI-style chat completions and their conversions.
//!
//! Chat completions carry tool traffic differently from the canonical
//! model: invocations live in `tool_calls` on the assistant message with
//! JSON-string arguments, and each result is its own `tool` message.

use hostscope_domain::{
    ContentSegment, Message, ProviderReply, Role, StopReason, TokenUsage, ToolArguments,
};
use hostscope_application::ProviderError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<FunctionTool>,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<WireToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    fn plain(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: Some(content.into()),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireToolCall {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default = "function_kind")]
    pub kind: String,
    pub function: WireFunctionCall,
}

fn function_kind() -> String {
    "function".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireFunctionCall {
    #[serde(default)]
    pub name: String,
    /// JSON-encoded argument object.
    #[serde(default)]
    pub arguments: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionTool {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub function: FunctionSpec,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionSpec {
    pub name: Value,
    pub description: Value,
    pub parameters: Value,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub model: Option<String>,
    pub usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChatMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireUsage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
}

// ─── Domain → Chat completions ───────────────────────────────────

/// Re-shape a canonical tool schema (`name`, `description`,
/// `input_schema`) into a function tool.
pub fn convert_tools(schemas: &[Value]) -> Vec<FunctionTool> {
    schemas
        .iter()
        .map(|schema| FunctionTool {
            kind: "function",
            function: FunctionSpec {
                name: schema.get("name").cloned().unwrap_or(Value::Null),
                description: schema.get("description").cloned().unwrap_or(Value::Null),
                parameters: schema.get("input_schema").cloned().unwrap_or(Value::Null),
            },
        })
        .collect()
}

fn convert_message(message: &Message, out: &mut Vec<ChatMessage>) {
    let text = message.text_content();

    if message.role == Role::Assistant && message.has_invocations() {
        let tool_calls = message
            .invocations()
            .map(|(id, name, arguments)| WireToolCall {
                id: id.to_string(),
                kind: function_kind(),
                function: WireFunctionCall {
                    name: name.to_string(),
                    arguments: Value::Object(arguments.clone()).to_string(),
                },
            })
            .collect();
        out.push(ChatMessage {
            role: "assistant".to_string(),
            content: (!text.is_empty()).then_some(text),
            tool_calls,
            tool_call_id: None,
        });
        return;
    }

    if message.has_results() {
        for (invocation_id, content) in message.results() {
            out.push(ChatMessage {
                role: "tool".to_string(),
                content: Some(content.to_string()),
                tool_calls: Vec::new(),
                tool_call_id: Some(invocation_id.to_string()),
            });
        }
    }

    if !text.is_empty() {
        out.push(ChatMessage::plain(message.role.as_str(), text));
    }
}

/// Convert the history, prefixed with a system message when the prompt is
/// non-empty.
pub fn convert_messages(history: &[Message], system_prompt: &str) -> Vec<ChatMessage> {
    let mut out = Vec::with_capacity(history.len() + 1);
    if !system_prompt.is_empty() {
        out.push(ChatMessage::plain("system", system_prompt));
    }
    for message in history {
        convert_message(message, &mut out);
    }
    out
}

// ─── Chat completions → Domain ───────────────────────────────────

fn parse_arguments(tool: &str, raw: &str) -> ToolArguments {
    if raw.trim().is_empty() {
        return ToolArguments::new();
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            tracing::warn!(tool, arguments = %other, "Tool call arguments are not an object");
            ToolArguments::new()
        }
        Err(e) => {
            tracing::warn!(tool, error = %e, "Could not parse tool call arguments");
            ToolArguments::new()
        }
    }
}

fn convert_finish_reason(reason: Option<&str>) -> StopReason {
    match reason {
        Some("tool_calls") => StopReason::ToolUse,
        Some("stop") | None => StopReason::EndTurn,
        Some(other) => StopReason::from_wire(other),
    }
}

/// Convert the first choice. `raw` is kept for the error when there is none.
pub fn convert_response(
    response: ChatCompletionResponse,
    raw: &str,
) -> Result<ProviderReply, ProviderError> {
    let Some(choice) = response.choices.into_iter().next() else {
        return Err(ProviderError::malformed("response has no choices", raw));
    };

    let mut segments = Vec::new();
    if let Some(content) = choice.message.content
        && !content.is_empty()
    {
        segments.push(ContentSegment::text(content));
    }
    for call in choice.message.tool_calls {
        let arguments = parse_arguments(&call.function.name, &call.function.arguments);
        segments.push(ContentSegment::invocation(
            call.id,
            call.function.name,
            arguments,
        ));
    }

    let mut reply = ProviderReply::new(
        segments,
        convert_finish_reason(choice.finish_reason.as_deref()),
    );
    reply.model = response.model;
    reply.usage = response.usage.map(|u| TokenUsage {
        input_tokens: u.prompt_tokens,
        output_tokens: u.completion_tokens,
    });
    Ok(reply)
}
