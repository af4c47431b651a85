//! Tool error value object.
//!
//! Tool failures never abort a conversation: the loop folds them into the
//! result text as `Error: <error>` and lets the model react.

use serde::{Deserialize, Serialize};

/// Error that occurred while resolving or executing a tool.
///
/// | Code | Description |
/// |------|-------------|
/// | `UNKNOWN_TOOL` | No catalog entry with that name |
/// | `INVALID_ARGUMENT` | Missing or malformed argument |
/// | `NOT_FOUND` | File, pattern target or resource missing |
/// | `CONFIGURATION` | Tool needs configuration that is absent |
/// | `EXECUTION_FAILED` | I/O or transport failure |
/// | `TIMEOUT` | Deadline elapsed |
/// | `CANCELLED` | Caller cancelled the call |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::new("UNKNOWN_TOOL", format!("unknown tool: {}", name.into()))
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            "NOT_FOUND",
            format!("Resource not found: {}", resource.into()),
        )
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new("INVALID_ARGUMENT", message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new("CONFIGURATION", message)
    }

    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::new("EXECUTION_FAILED", message)
    }

    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::new(
            "TIMEOUT",
            format!("Operation timed out: {}", operation.into()),
        )
    }

    pub fn cancelled() -> Self {
        Self::new("CANCELLED", "Operation cancelled")
    }

    pub fn is_unknown_tool(&self) -> bool {
        self.code == "UNKNOWN_TOOL"
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ToolError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code_and_details() {
        let err = ToolError::execution_failed("connection refused").with_details("GET /health");
        assert_eq!(
            err.to_string(),
            "[EXECUTION_FAILED] connection refused (GET /health)"
        );
    }

    #[test]
    fn test_unknown_tool() {
        let err = ToolError::unknown_tool("rm_rf");
        assert!(err.is_unknown_tool());
        assert_eq!(err.message, "unknown tool: rm_rf");
    }
}
