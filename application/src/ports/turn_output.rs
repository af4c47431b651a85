//! Port for streaming a turn's progress to the client.
//!
//! The loop emits events as they happen: text as soon as a reply arrives,
//! tool start and finish around each dispatch. Transports (REPL, socket)
//! implement [`TurnOutput`].

/// Events visible to the client during a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputEvent {
    /// Assistant text segment.
    Text(String),
    ToolStarted { id: String, name: String },
    ToolFinished { id: String, name: String, is_error: bool },
    /// The turn was aborted; earlier events stay valid.
    Error(String),
    /// End of the turn, emitted exactly once.
    Done,
}

pub trait TurnOutput: Send + Sync {
    fn emit(&self, event: OutputEvent);
}

/// No-op implementation.
pub struct NoTurnOutput;

impl TurnOutput for NoTurnOutput {
    fn emit(&self, _event: OutputEvent) {}
}
