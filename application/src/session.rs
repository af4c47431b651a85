//! Chat session
//!
//! A [`ChatSession`] lives as long as one client connection. It owns the
//! conversation history and the audit sink for that connection.
//!
//! The history sits behind a `std::sync::Mutex`: the inbound-message path
//! appends user messages while the conversation loop reads snapshots and
//! appends replies. The lock is only held for a clone or a push, never
//! across an `.await`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hostscope_domain::{ContentSegment, Conversation, DomainError, Message};
use serde_json::{Value, json};

use crate::ports::audit_sink::{AuditEventKind, AuditRecord, AuditSink};

pub struct ChatSession {
    id: String,
    conversation: Mutex<Conversation>,
    audit: Arc<dyn AuditSink>,
    ended: AtomicBool,
}

impl ChatSession {
    /// Open a session and record `session_start` with `metadata` as data.
    pub fn start(id: impl Into<String>, audit: Arc<dyn AuditSink>, metadata: Value) -> Self {
        let session = Self {
            id: id.into(),
            conversation: Mutex::new(Conversation::new()),
            audit,
            ended: AtomicBool::new(false),
        };
        session.audit(AuditEventKind::SessionStart, metadata);
        tracing::info!(session_id = %session.id, "Session started");
        session
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    fn lock(&self) -> MutexGuard<'_, Conversation> {
        self.conversation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a user message and record it.
    pub fn add_user_message(&self, text: &str) {
        self.lock().push_user_text(text);
        self.audit(AuditEventKind::UserMessage, json!({ "content": text }));
    }

    /// Copy of the current history.
    pub fn snapshot(&self) -> Vec<Message> {
        self.lock().snapshot()
    }

    pub fn message_count(&self) -> usize {
        self.lock().len()
    }

    pub fn push_assistant(&self, segments: Vec<ContentSegment>) {
        self.lock().push_assistant(segments);
    }

    /// Append tool results; rejected if they do not pair with the last
    /// assistant message.
    pub fn append_tool_results(&self, results: Vec<ContentSegment>) -> Result<(), DomainError> {
        self.lock().append_tool_results(results)
    }

    /// Write one audit record for this session.
    pub fn audit(&self, kind: AuditEventKind, data: Value) {
        self.audit.record(AuditRecord::new(&self.id, kind, data));
    }

    /// Record `session_end`. Only the first call has an effect.
    pub fn end(&self, reason: &str) {
        if self.ended.swap(true, Ordering::SeqCst) {
            return;
        }
        self.audit(AuditEventKind::SessionEnd, json!({ "reason": reason }));
        tracing::info!(session_id = %self.id, reason, "Session ended");
    }

    pub fn is_ended(&self) -> bool {
        self.ended.load(Ordering::SeqCst)
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.end("connection closed");
    }
}
