//! Audit configuration from TOML (`[audit]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAuditConfig {
    /// Write one JSONL file per session.
    pub enabled: bool,
    /// Directory for session files.
    pub dir: PathBuf,
}

impl Default for FileAuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: PathBuf::from("./sessions"),
        }
    }
}
