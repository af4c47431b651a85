//! Tool domain module
//!
//! A tool is described by a [`ToolDefinition`]: a name, a description and
//! typed parameters. The same definition shape covers both kinds of tools
//! the agent can call:
//!
//! | Source | Examples | Parameters |
//! |--------|----------|------------|
//! | **Builtin** | `read_file`, `grep`, `glob`, `read_logs` | plain arguments |
//! | **Api** | `getUsersId`, `createOrder` | path, query and body roles |
//!
//! Execution lives outside the domain: the application layer dispatches
//! by name, infrastructure performs file I/O and HTTP.

pub mod entities;
pub mod value_objects;

pub use entities::{ParameterLocation, ToolDefinition, ToolParameter, ToolSource};
pub use value_objects::ToolError;
