//! Application layer for hostscope
//!
//! This crate contains the conversation use case, the tool catalog and
//! dispatcher, the chat session, and port definitions. It depends only on
//! the domain layer.

pub mod ports;
pub mod session;
pub mod tools;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    api_invoker::ApiInvokerPort,
    audit_sink::{AuditEventKind, AuditRecord, AuditSink, NoAuditSink},
    builtin_tool::BuiltinTool,
    chat_provider::{ChatProvider, ProviderError},
    tool_schema::ToolSchemaPort,
    turn_output::{NoTurnOutput, OutputEvent, TurnOutput},
};
pub use session::ChatSession;
pub use tools::{CatalogEntry, ToolBinding, ToolCatalog, ToolDispatcher};
pub use use_cases::run_conversation::{
    RunConversationError, RunConversationInput, RunConversationOutput, RunConversationUseCase,
};
