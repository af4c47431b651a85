//! Search tools over the source tree: grep, glob

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use glob::{MatchOptions, Pattern, glob_with};
use hostscope_application::BuiltinTool;
use hostscope_domain::{ToolArguments, ToolDefinition, ToolError, ToolParameter};
use regex::RegexBuilder;

use super::args::{RULE, blocking, optional_bool, optional_str, require_str};

pub const GREP: &str = "grep";
pub const GLOB: &str = "glob";

/// Maximum number of matches or paths returned
const MAX_RESULTS: usize = 100;

/// Maximum file size for grep (5 MB)
const MAX_GREP_FILE_SIZE: u64 = 5 * 1024 * 1024;

const SKIP_DIRS: [&str; 4] = [".git", "node_modules", "vendor", "target"];

const TEXT_EXTENSIONS: [&str; 16] = [
    "go", "js", "ts", "py", "java", "rb", "php", "c", "cpp", "h", "rs", "md", "yaml", "yml",
    "json", "xml",
];

pub fn grep_definition() -> ToolDefinition {
    ToolDefinition::new(
        GREP,
        "Search for a pattern in source code files using regex. Returns matching lines with file paths and line numbers.",
    )
    .with_parameter(ToolParameter::new("pattern", "The regex pattern to search for", true))
    .with_parameter(ToolParameter::new(
        "file_pattern",
        "Optional: Limit search to files matching this glob pattern (e.g., '*.go', '**/*.js')",
        false,
    ))
    .with_parameter(
        ToolParameter::new(
            "ignore_case",
            "Optional: Whether to ignore case when matching",
            false,
        )
        .with_type("boolean"),
    )
}

pub fn glob_definition() -> ToolDefinition {
    ToolDefinition::new(
        GLOB,
        "Find files matching a glob pattern in the source code directory. Returns a list of matching file paths.",
    )
    .with_parameter(ToolParameter::new(
        "pattern",
        "The glob pattern to match (e.g., '*.go', '**/*.js', 'handlers/**')",
        true,
    ))
}

fn match_options() -> MatchOptions {
    MatchOptions {
        case_sensitive: true,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    }
}

/// Files under `root` matching `pattern` (relative), skipping vendored and
/// VCS directories. Returned paths are relative to `root`, sorted.
fn walk_files(root: &Path, pattern: &str) -> Result<Vec<PathBuf>, ToolError> {
    let full = format!(
        "{}/{}",
        Pattern::escape(&root.to_string_lossy()),
        pattern.trim_start_matches("./")
    );
    let entries = glob_with(&full, match_options())
        .map_err(|e| ToolError::invalid_argument(format!("Invalid glob pattern: {e}")))?;

    let mut files = Vec::new();
    for path in entries.flatten() {
        if !path.is_file() {
            continue;
        }
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        let skipped = relative.components().any(|c| {
            c.as_os_str()
                .to_str()
                .is_some_and(|name| SKIP_DIRS.contains(&name))
        });
        if !skipped {
            files.push(relative.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

fn has_text_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| TEXT_EXTENSIONS.contains(&ext))
}

// ─── grep ────────────────────────────────────────────────────────

pub struct GrepTool {
    root: PathBuf,
    definition: ToolDefinition,
}

impl GrepTool {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            definition: grep_definition(),
        }
    }
}

fn grep(
    root: &Path,
    pattern: &str,
    file_pattern: Option<&str>,
    ignore_case: bool,
) -> Result<String, ToolError> {
    let regex = RegexBuilder::new(pattern)
        .case_insensitive(ignore_case)
        .build()
        .map_err(|e| ToolError::invalid_argument(format!("invalid regex pattern: {e}")))?;
    let filter = file_pattern
        .map(Pattern::new)
        .transpose()
        .map_err(|e| ToolError::invalid_argument(format!("Invalid glob pattern: {e}")))?;

    let mut matches = Vec::new();
    let mut truncated = false;

    'files: for relative in walk_files(root, "**/*")? {
        if !has_text_extension(&relative) {
            continue;
        }
        if let Some(filter) = &filter {
            let base_matches = relative
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| filter.matches(name));
            if !base_matches && !filter.matches_path_with(&relative, match_options()) {
                continue;
            }
        }

        let path = root.join(&relative);
        if fs::metadata(&path).is_ok_and(|m| m.len() > MAX_GREP_FILE_SIZE) {
            continue;
        }
        // Binary or unreadable files are skipped.
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };

        for (index, line) in content.lines().enumerate() {
            if regex.is_match(line) {
                matches.push(format!("{}:{}: {}", relative.display(), index + 1, line));
                if matches.len() >= MAX_RESULTS {
                    truncated = true;
                    break 'files;
                }
            }
        }
    }

    if matches.is_empty() {
        return Ok(format!("No matches found for pattern: {pattern}"));
    }

    let count = matches.len();
    if truncated {
        matches.push(format!("\n... (showing first {MAX_RESULTS} matches)"));
    }
    Ok(format!(
        "Found {count} matches for pattern: {pattern}\n{RULE}\n{}",
        matches.join("\n")
    ))
}

#[async_trait]
impl BuiltinTool for GrepTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, arguments: &ToolArguments) -> Result<String, ToolError> {
        let pattern = require_str(arguments, "pattern")?.to_string();
        let file_pattern = optional_str(arguments, "file_pattern").map(str::to_string);
        let ignore_case = optional_bool(arguments, "ignore_case").unwrap_or(false);
        let root = self.root.clone();

        blocking(move || grep(&root, &pattern, file_pattern.as_deref(), ignore_case)).await
    }
}

// ─── glob ────────────────────────────────────────────────────────

pub struct GlobTool {
    root: PathBuf,
    definition: ToolDefinition,
}

impl GlobTool {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            definition: glob_definition(),
        }
    }
}

fn find_files(root: &Path, pattern: &str) -> Result<String, ToolError> {
    // A bare name pattern matches at any depth.
    let effective = if pattern.contains('/') {
        pattern.to_string()
    } else {
        format!("**/{pattern}")
    };
    let files = walk_files(root, &effective)?;

    if files.is_empty() {
        return Ok(format!("No files found matching pattern: {pattern}"));
    }

    let total = files.len();
    let mut lines: Vec<String> = files
        .iter()
        .take(MAX_RESULTS)
        .map(|p| p.display().to_string())
        .collect();
    if total > MAX_RESULTS {
        lines.push(format!("... (showing first {MAX_RESULTS} matches)"));
    }
    Ok(format!(
        "Found {total} files matching pattern: {pattern}\n{RULE}\n{}",
        lines.join("\n")
    ))
}

#[async_trait]
impl BuiltinTool for GlobTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, arguments: &ToolArguments) -> Result<String, ToolError> {
        let pattern = require_str(arguments, "pattern")?.to_string();
        let root = self.root.clone();
        blocking(move || find_files(&root, &pattern)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use tempfile::{TempDir, tempdir};

    fn args(value: Value) -> ToolArguments {
        value.as_object().cloned().unwrap()
    }

    fn source_tree() -> TempDir {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("handlers")).unwrap();
        fs::create_dir_all(root.join("node_modules/lib")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(
            root.join("handlers/user.go"),
            "package handlers\n\nfunc GetUser() {\n\tpanic(\"db down\")\n}\n",
        )
        .unwrap();
        fs::write(root.join("main.go"), "package main\n// Panic handler\n").unwrap();
        fs::write(root.join("node_modules/lib/index.js"), "panic()\n").unwrap();
        fs::write(root.join(".git/config.json"), "{\"panic\": 1}\n").unwrap();
        fs::write(root.join("notes.txt"), "panic in notes\n").unwrap();
        dir
    }

    #[tokio::test]
    async fn test_grep_finds_matches_with_relative_paths() {
        let dir = source_tree();
        let output = GrepTool::new(dir.path())
            .execute(&args(json!({"pattern": "panic"})))
            .await
            .unwrap();

        assert!(output.starts_with("Found 1 matches for pattern: panic\n"));
        assert!(output.contains("handlers/user.go:4: \tpanic(\"db down\")"));
        assert!(!output.contains("node_modules"));
        assert!(!output.contains(".git"));
        assert!(!output.contains("notes.txt"));
    }

    #[tokio::test]
    async fn test_grep_ignore_case_and_file_pattern() {
        let dir = source_tree();
        let output = GrepTool::new(dir.path())
            .execute(&args(json!({"pattern": "PANIC", "ignore_case": true, "file_pattern": "main.*"})))
            .await
            .unwrap();

        assert!(output.contains("main.go:2: // Panic handler"));
        assert!(!output.contains("handlers/user.go"));
    }

    #[tokio::test]
    async fn test_grep_no_matches_and_bad_regex() {
        let dir = source_tree();
        let tool = GrepTool::new(dir.path());

        let output = tool
            .execute(&args(json!({"pattern": "segfault"})))
            .await
            .unwrap();
        assert_eq!(output, "No matches found for pattern: segfault");

        let err = tool
            .execute(&args(json!({"pattern": "(unclosed"})))
            .await
            .unwrap_err();
        assert_eq!(err.code, "INVALID_ARGUMENT");
    }

    #[tokio::test]
    async fn test_grep_caps_matches() {
        let dir = tempdir().unwrap();
        let body: String = (0..150).map(|i| format!("TODO {i}\n")).collect();
        fs::write(dir.path().join("big.rs"), body).unwrap();

        let output = GrepTool::new(dir.path())
            .execute(&args(json!({"pattern": "TODO"})))
            .await
            .unwrap();
        assert!(output.starts_with("Found 100 matches"));
        assert!(output.ends_with("... (showing first 100 matches)"));
    }

    #[tokio::test]
    async fn test_glob_bare_pattern_matches_any_depth() {
        let dir = source_tree();
        let output = GlobTool::new(dir.path())
            .execute(&args(json!({"pattern": "*.go"})))
            .await
            .unwrap();

        assert!(output.starts_with("Found 2 files matching pattern: *.go\n"));
        assert!(output.contains("handlers/user.go"));
        assert!(output.contains("main.go"));
    }

    #[tokio::test]
    async fn test_glob_path_pattern_and_no_match() {
        let dir = source_tree();
        let tool = GlobTool::new(dir.path());

        let output = tool
            .execute(&args(json!({"pattern": "handlers/**"})))
            .await
            .unwrap();
        assert!(output.contains("handlers/user.go"));
        assert!(!output.contains("main.go"));

        let output = tool
            .execute(&args(json!({"pattern": "*.py"})))
            .await
            .unwrap();
        assert_eq!(output, "No files found matching pattern: *.py");
    }
}
