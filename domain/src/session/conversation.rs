//! Append-only conversation history and the result pairing rule.

use super::entities::{ContentSegment, Message, Role};
use crate::core::error::DomainError;

/// Check that `results` correctly answers the invocations in `preceding`.
///
/// The preceding message must be an assistant message; every segment of
/// `results` must be a tool result; there must be exactly one result per
/// invocation, in invocation order.
pub fn check_result_pairing(
    preceding: Option<&Message>,
    results: &[ContentSegment],
) -> Result<(), DomainError> {
    let Some(preceding) = preceding else {
        return Err(DomainError::MalformedHistory(
            "tool results without a preceding assistant message".to_string(),
        ));
    };
    if preceding.role != Role::Assistant {
        return Err(DomainError::MalformedHistory(
            "tool results must follow an assistant message".to_string(),
        ));
    }

    let expected: Vec<&str> = preceding.invocations().map(|(id, _, _)| id).collect();
    let mut actual = Vec::with_capacity(results.len());
    for segment in results {
        match segment.as_result() {
            Some((id, _)) => actual.push(id),
            None => {
                return Err(DomainError::MalformedHistory(
                    "tool result message contains a non-result segment".to_string(),
                ));
            }
        }
    }

    if expected.len() != actual.len() {
        return Err(DomainError::MalformedHistory(format!(
            "expected {} tool results, got {}",
            expected.len(),
            actual.len()
        )));
    }
    for (position, (want, got)) in expected.iter().zip(actual.iter()).enumerate() {
        if want != got {
            return Err(DomainError::MalformedHistory(format!(
                "result #{} answers '{}' but invocation '{}' was expected",
                position, got, want
            )));
        }
    }
    Ok(())
}

/// The message history of one session.
///
/// Messages are only ever appended. Tool results go through
/// [`Conversation::append_tool_results`], which enforces the pairing rule.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn push_user_text(&mut self, text: impl Into<String>) {
        self.messages.push(Message::user_text(text));
    }

    pub fn push_assistant(&mut self, segments: Vec<ContentSegment>) {
        self.messages.push(Message::assistant(segments));
    }

    pub fn append_tool_results(&mut self, results: Vec<ContentSegment>) -> Result<(), DomainError> {
        check_result_pairing(self.messages.last(), &results)?;
        self.messages.push(Message::tool_results(results));
        Ok(())
    }

    /// Copy of the history, suitable for sending to a provider.
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
    }

    /// Validate the pairing rule over the whole history.
    pub fn validate(&self) -> Result<(), DomainError> {
        for (index, message) in self.messages.iter().enumerate() {
            if message.role == Role::User && message.has_results() {
                let preceding = index.checked_sub(1).map(|i| &self.messages[i]);
                check_result_pairing(preceding, &message.segments)?;
            } else if message.has_invocations() {
                let answered = self
                    .messages
                    .get(index + 1)
                    .is_some_and(|next| next.role == Role::User && next.has_results());
                if !answered {
                    return Err(DomainError::MalformedHistory(format!(
                        "assistant message #{} has unanswered tool invocations",
                        index
                    )));
                }
            }
        }
        Ok(())
    }
}
