//! Infrastructure layer for hostscope
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: model providers, built-in tools, the host API
//! invoker and the JSONL audit sink. It also loads configuration files and
//! OpenAPI documents.

pub mod config;
pub mod logging;
pub mod openapi;
pub mod providers;
pub mod tools;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileApiConfig, FileAuditConfig, FileCodeIndexConfig,
    FileConfig, FileLogsConfig, FileNetworkConfig, FileProviderConfig, FileSourceConfig,
};
pub use logging::JsonlAuditSink;
pub use openapi::{OpenApiLoadError, OpenApiLoader};
pub use providers::{
    AnthropicProvider, OpenAiCompatibleProvider, ProviderConfigError, ProviderFactory,
    build_client,
};
pub use tools::{
    CodeIndex, CodeIndexError, HttpApiInvoker, JsonSchemaToolConverter, builtin_tools,
};
