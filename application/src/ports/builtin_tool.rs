//! Built-in tool port
//!
//! In-process tool handlers (file read, search, logs, code index) implement
//! [`BuiltinTool`]. The dispatcher only knows them through this trait.

use async_trait::async_trait;
use hostscope_domain::{ToolArguments, ToolDefinition, ToolError};

#[async_trait]
pub trait BuiltinTool: Send + Sync {
    /// Metadata offered to the model. The name must be stable.
    fn definition(&self) -> &ToolDefinition;

    /// Run the tool and return the text handed back to the model.
    async fn execute(&self, arguments: &ToolArguments) -> Result<String, ToolError>;
}
