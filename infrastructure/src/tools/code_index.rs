//! Pre-built code index and the `search_code_index` tool.
//!
//! The index is a JSON file of per-file summaries produced ahead of time.
//! Searching is a case-insensitive substring match over summary and path.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use hostscope_application::BuiltinTool;
use hostscope_domain::{ToolArguments, ToolDefinition, ToolError, ToolParameter};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::args::{RULE, optional_usize, require_str};

pub const SEARCH_CODE_INDEX: &str = "search_code_index";

const DEFAULT_LIMIT: usize = 10;

#[derive(Error, Debug)]
pub enum CodeIndexError {
    #[error("failed to read code index {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid code index {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSummary {
    pub path: String,
    pub summary: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub last_indexed: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodeIndex {
    #[serde(default)]
    pub files: BTreeMap<String, FileSummary>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub source_path: Option<String>,
}

impl CodeIndex {
    pub fn load(path: &Path) -> Result<Self, CodeIndexError> {
        let display = path.display().to_string();
        let data = fs::read_to_string(path).map_err(|source| CodeIndexError::Io {
            path: display.clone(),
            source,
        })?;
        let index: Self = serde_json::from_str(&data).map_err(|source| CodeIndexError::Json {
            path: display,
            source,
        })?;
        tracing::info!(files = index.files.len(), path = %path.display(), "Loaded code index");
        Ok(index)
    }

    /// Entries whose summary or path contains `query`, in path order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&FileSummary> {
        let query = query.to_lowercase();
        self.files
            .values()
            .filter(|f| {
                f.summary.to_lowercase().contains(&query) || f.path.to_lowercase().contains(&query)
            })
            .take(limit)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

pub fn search_code_index_definition() -> ToolDefinition {
    ToolDefinition::new(
        SEARCH_CODE_INDEX,
        "Search the pre-built code index for files by what they do. Matches keywords against per-file summaries and paths.",
    )
    .with_parameter(ToolParameter::new(
        "query",
        "Keywords describing the functionality to find (e.g., 'user authentication')",
        true,
    ))
    .with_parameter(
        ToolParameter::new(
            "limit",
            "Optional: Maximum number of files to return (default: 10)",
            false,
        )
        .with_type("integer"),
    )
}

pub struct SearchCodeIndexTool {
    index: CodeIndex,
    definition: ToolDefinition,
}

impl SearchCodeIndexTool {
    pub fn new(index: CodeIndex) -> Self {
        Self {
            index,
            definition: search_code_index_definition(),
        }
    }
}

#[async_trait]
impl BuiltinTool for SearchCodeIndexTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, arguments: &ToolArguments) -> Result<String, ToolError> {
        let query = require_str(arguments, "query")?;
        let limit = optional_usize(arguments, "limit").unwrap_or(DEFAULT_LIMIT);
        let results = self.index.search(query, limit);

        if results.is_empty() {
            return Ok(format!(
                "No files found matching query: {query}\n\nTip: Try different keywords or use glob/grep tools for exact pattern matching."
            ));
        }

        let mut output = format!(
            "Found {} file(s) matching '{query}':\n{RULE}\n\n",
            results.len()
        );
        for (i, file) in results.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, file.path));
            output.push_str(&format!("   Summary: {}\n", file.summary));
            output.push_str(&format!(
                "   Size: {} bytes, Last indexed: {}\n\n",
                file.size, file.last_indexed
            ));
        }
        output.push_str(RULE);
        output.push_str("\nUse read_file to view the contents of relevant files.\n");
        Ok(output)
    }
}
