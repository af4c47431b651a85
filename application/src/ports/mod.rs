//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod api_invoker;
pub mod audit_sink;
pub mod builtin_tool;
pub mod chat_provider;
pub mod tool_schema;
pub mod turn_output;
