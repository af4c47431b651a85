//! Evidence sources from TOML (`[source]`, `[logs]`, `[api]`, `[code_index]`)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root of the host application's source tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSourceConfig {
    pub path: PathBuf,
}

impl Default for FileSourceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
        }
    }
}

/// Log files searchable through `read_logs`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLogsConfig {
    pub files: Vec<PathBuf>,
}

/// Host API description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApiConfig {
    /// OpenAPI document (YAML or JSON).
    pub spec: Option<PathBuf>,
    /// Base URL for API calls. Defaults to the document's first server.
    pub host_base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCodeIndexConfig {
    /// Pre-built JSON code index.
    pub path: Option<PathBuf>,
}
