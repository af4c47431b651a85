//! Port for the session audit log.
//!
//! Every externally observable step of a session is written as one
//! independent, timestamped record. This is separate from `tracing`:
//! tracing carries diagnostics, the audit sink carries the transcript.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Kind of an audit record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventKind {
    SessionStart,
    UserMessage,
    AssistantMessage,
    ToolUse,
    ToolResult,
    SessionEnd,
    Error,
}

impl AuditEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditEventKind::SessionStart => "session_start",
            AuditEventKind::UserMessage => "user_message",
            AuditEventKind::AssistantMessage => "assistant_message",
            AuditEventKind::ToolUse => "tool_use",
            AuditEventKind::ToolResult => "tool_result",
            AuditEventKind::SessionEnd => "session_end",
            AuditEventKind::Error => "error",
        }
    }
}

/// One audit record.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditRecord {
    pub timestamp: DateTime<Utc>,
    pub session_id: String,
    pub kind: AuditEventKind,
    pub data: Value,
}

impl AuditRecord {
    /// Create a record stamped with the current UTC time.
    pub fn new(session_id: impl Into<String>, kind: AuditEventKind, data: Value) -> Self {
        Self {
            timestamp: Utc::now(),
            session_id: session_id.into(),
            kind,
            data,
        }
    }

    /// Line format: `{timestamp, session_id, type, data}`.
    pub fn to_json(&self) -> Value {
        json!({
            "timestamp": self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            "session_id": self.session_id,
            "type": self.kind.as_str(),
            "data": self.data,
        })
    }
}

/// Port for writing audit records.
///
/// `record` is synchronous and infallible: a broken sink must never disturb
/// the conversation, so implementations swallow their own failures.
pub trait AuditSink: Send + Sync {
    fn record(&self, record: AuditRecord);
}

/// No-op implementation for tests and when auditing is disabled.
pub struct NoAuditSink;

impl AuditSink for NoAuditSink {
    fn record(&self, _record: AuditRecord) {}
}
