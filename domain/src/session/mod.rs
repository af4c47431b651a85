//! Conversation domain module
//!
//! Defines the canonical message model that every provider adapter maps
//! onto, the append-only [`Conversation`] history, and the normalized
//! [`ProviderReply`].
//!
//! ```text
//! Conversation
//!   ├─ Message { role: user,      [Text] }
//!   ├─ Message { role: assistant, [Text, ToolInvocation(a), ToolInvocation(b)] }
//!   └─ Message { role: user,      [ToolResult(a), ToolResult(b)] }
//! ```
//!
//! Tool results always live in the message right after the assistant
//! message that requested them, one per invocation, in the same order.

pub mod conversation;
pub mod entities;
pub mod response;

pub use conversation::{Conversation, check_result_pairing};
pub use entities::{ContentSegment, Message, Role, ToolArguments};
pub use response::{ProviderReply, StopReason, TokenUsage};
