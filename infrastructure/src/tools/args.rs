//! Argument accessors shared by the built-in tools.

use hostscope_domain::{ToolArguments, ToolError};
use serde_json::Value;

pub fn require_str<'a>(arguments: &'a ToolArguments, name: &str) -> Result<&'a str, ToolError> {
    match arguments.get(name) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s),
        Some(Value::String(_)) | None | Some(Value::Null) => Err(ToolError::invalid_argument(
            format!("{name} parameter is required"),
        )),
        Some(_) => Err(ToolError::invalid_argument(format!(
            "{name} must be a string"
        ))),
    }
}

pub fn optional_str<'a>(arguments: &'a ToolArguments, name: &str) -> Option<&'a str> {
    arguments
        .get(name)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Non-negative integer; models sometimes send `10.0`.
pub fn optional_usize(arguments: &ToolArguments, name: &str) -> Option<usize> {
    let value = arguments.get(name)?;
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
        .map(|n| n as usize)
}

pub fn optional_bool(arguments: &ToolArguments, name: &str) -> Option<bool> {
    arguments.get(name).and_then(Value::as_bool)
}

/// Run blocking filesystem work off the async runtime.
pub async fn blocking<T, F>(work: F) -> Result<T, ToolError>
where
    F: FnOnce() -> Result<T, ToolError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ToolError::execution_failed(format!("tool task failed: {e}")))?
}

pub const RULE: &str =
    "--------------------------------------------------------------------------------";
