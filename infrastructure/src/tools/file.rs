//! File tool: read_file

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use hostscope_application::BuiltinTool;
use hostscope_domain::{ToolArguments, ToolDefinition, ToolError, ToolParameter};

use super::args::{RULE, blocking, optional_usize, require_str};

pub const READ_FILE: &str = "read_file";

/// Maximum file size to read (10 MB)
const MAX_READ_SIZE: u64 = 10 * 1024 * 1024;

pub fn read_file_definition() -> ToolDefinition {
    ToolDefinition::new(
        READ_FILE,
        "Read the contents of a file from the source code directory. Returns the file content with line numbers.",
    )
    .with_parameter(
        ToolParameter::new(
            "file_path",
            "The path to the file to read, relative to the source directory",
            true,
        )
        .with_type("path"),
    )
    .with_parameter(
        ToolParameter::new(
            "start_line",
            "Optional: The line number to start reading from (1-indexed)",
            false,
        )
        .with_type("integer"),
    )
    .with_parameter(
        ToolParameter::new(
            "end_line",
            "Optional: The line number to stop reading at (inclusive)",
            false,
        )
        .with_type("integer"),
    )
}

/// Reads files below the source root with `%4d | ` line numbers.
pub struct ReadFileTool {
    root: PathBuf,
    definition: ToolDefinition,
}

impl ReadFileTool {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            definition: read_file_definition(),
        }
    }
}

/// Resolve `relative` under `root`, refusing anything that lands outside it.
pub(crate) fn resolve_under(root: &Path, relative: &str) -> Result<PathBuf, ToolError> {
    let root = root
        .canonicalize()
        .map_err(|e| ToolError::configuration(format!("source path {}: {e}", root.display())))?;
    let candidate = root.join(relative);
    let resolved = candidate
        .canonicalize()
        .map_err(|_| ToolError::not_found(relative))?;
    if !resolved.starts_with(&root) {
        return Err(ToolError::invalid_argument(format!(
            "{relative} is outside the source directory"
        )));
    }
    Ok(resolved)
}

fn read_numbered(
    path: &Path,
    display: &str,
    start_line: usize,
    end_line: Option<usize>,
) -> Result<String, ToolError> {
    if !path.is_file() {
        return Err(ToolError::invalid_argument(format!("'{display}' is not a file")));
    }
    let size = fs::metadata(path)
        .map_err(|e| ToolError::execution_failed(format!("failed to stat file: {e}")))?
        .len();
    if size > MAX_READ_SIZE {
        return Err(ToolError::invalid_argument(format!(
            "File too large ({size} bytes). Maximum size is {MAX_READ_SIZE} bytes"
        )));
    }

    let file = fs::File::open(path)
        .map_err(|e| ToolError::execution_failed(format!("failed to open file: {e}")))?;
    let mut lines = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let number = index + 1;
        if end_line.is_some_and(|end| number > end) {
            break;
        }
        let line =
            line.map_err(|e| ToolError::execution_failed(format!("error reading file: {e}")))?;
        if number >= start_line {
            lines.push(format!("{number:4} | {line}"));
        }
    }

    if lines.is_empty() {
        return Err(ToolError::invalid_argument(
            "no lines found in specified range",
        ));
    }
    Ok(format!("File: {display}\n{RULE}\n{}", lines.join("\n")))
}

#[async_trait]
impl BuiltinTool for ReadFileTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, arguments: &ToolArguments) -> Result<String, ToolError> {
        let file_path = require_str(arguments, "file_path")?.to_string();
        let start_line = optional_usize(arguments, "start_line").unwrap_or(1);
        let end_line = optional_usize(arguments, "end_line");
        let root = self.root.clone();

        blocking(move || {
            let path = resolve_under(&root, &file_path)?;
            read_numbered(&path, &file_path, start_line, end_line)
        })
        .await
    }
}
