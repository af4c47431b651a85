//! Domain layer for hostscope
//!
//! This crate contains the conversation model, tool definitions, API tool
//! synthesis and the rules of the tool-use loop. It performs no I/O and has
//! no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Canonical messages
//!
//! Every provider wire format is normalized into [`Message`]s made of
//! ordered [`ContentSegment`]s: text, tool invocations and tool results.
//!
//! ## Tools
//!
//! - **Builtin**: read-only helpers over the source tree and logs
//! - **Api**: operations of the host application's REST API, synthesized
//!   from its OpenAPI document

pub mod agent;
pub mod core;
pub mod openapi;
pub mod prompt;
pub mod session;
pub mod tool;

// Re-export commonly used types
pub use agent::{LoopState, MAX_TURNS};
pub use self::core::error::DomainError;
pub use openapi::{
    ApiDocument, ApiParameter, ApiRequest, ApiTool, HttpMethod, MAX_API_TOOLS, RequestBodySchema,
    SynthesisOutcome, generate_operation_id, synthesize,
};
pub use prompt::PromptTemplate;
pub use session::{
    ContentSegment, Conversation, Message, ProviderReply, Role, StopReason, TokenUsage,
    ToolArguments, check_result_pairing,
};
pub use tool::{ParameterLocation, ToolDefinition, ToolError, ToolParameter, ToolSource};
