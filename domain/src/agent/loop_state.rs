//! State machine of one user turn.
//!
//! ```text
//!            ┌──────────────── reply has invocations ───────────────┐
//!            ▼                                                      │
//!   AwaitingModel ── reply without invocations ──▶ Done             │
//!      │    ▲                                                       │
//!      │    └──────── results appended ◀── ExecutingTools ◀─────────┘
//!      └── provider error / cancelled ──▶ Aborted
//! ```
//!
//! The budget counts provider calls. When it runs out while the model still
//! asks for tools, the turn ends as `Done` with the budget flagged as
//! exhausted.

use serde::{Deserialize, Serialize};

/// Maximum provider calls per user message.
pub const MAX_TURNS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopState {
    AwaitingModel,
    ExecutingTools,
    Done,
    Aborted,
}

impl LoopState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoopState::Done | LoopState::Aborted)
    }

    /// Next state after a provider reply.
    pub fn after_reply(has_invocations: bool) -> Self {
        if has_invocations {
            LoopState::ExecutingTools
        } else {
            LoopState::Done
        }
    }

    /// Next state after tool results are appended, given provider calls
    /// made so far.
    pub fn after_tools(turns_taken: usize) -> Self {
        if turns_taken >= MAX_TURNS {
            LoopState::Done
        } else {
            LoopState::AwaitingModel
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoopState::AwaitingModel => "awaiting_model",
            LoopState::ExecutingTools => "executing_tools",
            LoopState::Done => "done",
            LoopState::Aborted => "aborted",
        }
    }
}

impl std::fmt::Display for LoopState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        assert_eq!(LoopState::after_reply(true), LoopState::ExecutingTools);
        assert_eq!(LoopState::after_reply(false), LoopState::Done);
        assert_eq!(LoopState::after_tools(3), LoopState::AwaitingModel);
        assert_eq!(LoopState::after_tools(MAX_TURNS), LoopState::Done);
    }

    #[test]
    fn test_terminal_states() {
        assert!(LoopState::Done.is_terminal());
        assert!(LoopState::Aborted.is_terminal());
        assert!(!LoopState::AwaitingModel.is_terminal());
        assert!(!LoopState::ExecutingTools.is_terminal());
    }
}
