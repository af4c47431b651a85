//! Log search tool: read_logs

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use hostscope_application::BuiltinTool;
use hostscope_domain::{ToolArguments, ToolDefinition, ToolError, ToolParameter};
use serde_json::Value;

use super::args::{RULE, blocking, optional_usize, require_str};

pub const READ_LOGS: &str = "read_logs";

const DEFAULT_CONTEXT_LINES: usize = 5;

/// Output entries per file before truncating (each match adds a block and a
/// blank separator).
const MAX_ENTRIES_PER_FILE: usize = 50;

pub fn read_logs_definition() -> ToolDefinition {
    ToolDefinition::new(
        READ_LOGS,
        "Query application logs by request ID or search pattern. Returns relevant log entries with context.",
    )
    .with_parameter(ToolParameter::new(
        "query",
        "The search query (e.g., request ID, error message, or any text to search for)",
        true,
    ))
    .with_parameter(
        ToolParameter::new(
            "context_lines",
            "Optional: Number of context lines to show before and after each match (default: 5)",
            false,
        )
        .with_type("integer"),
    )
}

/// Case-insensitive search over the configured log files.
pub struct ReadLogsTool {
    files: Vec<PathBuf>,
    definition: ToolDefinition,
}

impl ReadLogsTool {
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self {
            files,
            definition: read_logs_definition(),
        }
    }
}

/// A line matches when it contains the query, or when it is a JSON object
/// with a string field that does.
fn line_matches(line: &str, needle: &str) -> bool {
    if line.to_lowercase().contains(needle) {
        return true;
    }
    match serde_json::from_str::<Value>(line) {
        Ok(Value::Object(fields)) => fields
            .values()
            .filter_map(Value::as_str)
            .any(|s| s.to_lowercase().contains(needle)),
        _ => false,
    }
}

fn search_file(path: &Path, needle: &str, context: usize) -> std::io::Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    let lines: Vec<&str> = content.lines().collect();
    let mut entries = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if !line_matches(line, needle) {
            continue;
        }
        let start = i.saturating_sub(context);
        let end = (i + context + 1).min(lines.len());
        let block: Vec<String> = (start..end)
            .map(|j| {
                let marker = if j == i { "> " } else { "  " };
                format!("{marker}{}", lines[j])
            })
            .collect();
        entries.push(block.join("\n"));
        entries.push(String::new());

        if entries.len() >= MAX_ENTRIES_PER_FILE {
            entries.push(format!(
                "... (showing first ~{MAX_ENTRIES_PER_FILE} matches)"
            ));
            break;
        }
    }
    Ok(entries)
}

fn search_logs(files: &[PathBuf], query: &str, context: usize) -> String {
    let needle = query.to_lowercase();
    let mut output = Vec::new();
    let mut total = 0;

    for file in files {
        match search_file(file, &needle, context) {
            Ok(entries) if !entries.is_empty() => {
                output.push(format!("\n=== Log file: {} ===", file.display()));
                total += entries.len();
                output.extend(entries);
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(file = %file.display(), error = %e, "Could not read log file");
                output.push(format!("Error reading {}: {e}", file.display()));
            }
        }
    }

    if total == 0 {
        return format!("No log entries found for query: {query}");
    }
    format!(
        "Found {total} log entries for query: {query}\n{RULE}\n{}",
        output.join("\n")
    )
}

#[async_trait]
impl BuiltinTool for ReadLogsTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, arguments: &ToolArguments) -> Result<String, ToolError> {
        let query = require_str(arguments, "query")?.to_string();
        let context = optional_usize(arguments, "context_lines").unwrap_or(DEFAULT_CONTEXT_LINES);
        if self.files.is_empty() {
            return Err(ToolError::configuration("no log files configured"));
        }
        let files = self.files.clone();
        blocking(move || Ok(search_logs(&files, &query, context))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn args(value: Value) -> ToolArguments {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_read_logs_marks_match_with_context() {
        let dir = tempdir().unwrap();
        let log = dir.path().join("app.log");
        fs::write(
            &log,
            "start\nGET /users 200\nGET /orders 500 req=abc123\nretrying\nshutdown\n",
        )
        .unwrap();

        let output = ReadLogsTool::new(vec![log.clone()])
            .execute(&args(json!({"query": "ABC123", "context_lines": 1})))
            .await
            .unwrap();

        assert!(output.starts_with("Found 2 log entries for query: ABC123\n"));
        assert!(output.contains(&format!("=== Log file: {} ===", log.display())));
        assert!(output.contains("  GET /users 200\n> GET /orders 500 req=abc123\n  retrying"));
        assert!(!output.contains("start"));
    }

    #[tokio::test]
    async fn test_read_logs_matches_json_string_fields() {
        let dir = tempdir().unwrap();
        let log = dir.path().join("app.jsonl");
        fs::write(
            &log,
            "{\"level\":\"error\",\"msg\":\"connection refused \\u0041\"}\n{\"level\":\"info\",\"msg\":\"ok\"}\n",
        )
        .unwrap();

        let output = ReadLogsTool::new(vec![log])
            .execute(&args(json!({"query": "refused a", "context_lines": 0})))
            .await
            .unwrap();
        assert!(output.contains("> {\"level\":\"error\""));
        assert!(!output.contains("\"ok\""));
    }

    #[tokio::test]
    async fn test_read_logs_skips_unreadable_file_when_nothing_matches() {
        let dir = tempdir().unwrap();
        let present = dir.path().join("present.log");
        fs::write(&present, "all good\n").unwrap();
        let missing = dir.path().join("missing.log");

        let output = ReadLogsTool::new(vec![missing, present])
            .execute(&args(json!({"query": "timeout"})))
            .await
            .unwrap();
        assert_eq!(output, "No log entries found for query: timeout");
    }

    #[tokio::test]
    async fn test_read_logs_caps_entries_per_file() {
        let dir = tempdir().unwrap();
        let log = dir.path().join("noisy.log");
        let body: String = (0..100).map(|i| format!("ERROR {i}\n")).collect();
        fs::write(&log, body).unwrap();

        let output = ReadLogsTool::new(vec![log])
            .execute(&args(json!({"query": "error", "context_lines": 0})))
            .await
            .unwrap();
        assert!(output.contains("... (showing first ~50 matches)"));
        assert!(!output.contains("ERROR 30"));
    }

    #[tokio::test]
    async fn test_read_logs_without_files_is_configuration_error() {
        let err = ReadLogsTool::new(Vec::new())
            .execute(&args(json!({"query": "x"})))
            .await
            .unwrap_err();
        assert_eq!(err.code, "CONFIGURATION");
    }
}
