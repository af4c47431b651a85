//! Configuration file loading for hostscope
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `HOSTSCOPE_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./hostscope.toml` or `./.hostscope.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/hostscope/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileApiConfig, FileAuditConfig, FileCodeIndexConfig, FileConfig,
    FileLogsConfig, FileNetworkConfig, FileProviderConfig, FileSourceConfig,
};
pub use loader::ConfigLoader;
