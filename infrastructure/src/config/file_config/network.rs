//! Network deadlines from TOML (`[network]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileNetworkConfig {
    /// Whole-request deadline for model provider calls.
    pub provider_timeout_secs: u64,
    /// Whole-request deadline for host API tool calls.
    pub tool_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl FileNetworkConfig {
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }

    pub fn tool_timeout(&self) -> Duration {
        Duration::from_secs(self.tool_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for FileNetworkConfig {
    fn default() -> Self {
        Self {
            provider_timeout_secs: 120,
            tool_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}
