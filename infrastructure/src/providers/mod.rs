//! Model provider adapters.
//!
//! Two wire protocols sit behind [`hostscope_application::ChatProvider`]:
//! the native Anthropic Messages API and OpenAI-style chat completions.
//! [`ProviderFactory`] picks one from the configured preset.

pub mod anthropic;
pub mod factory;
pub mod http;
pub mod openai_compatible;
pub mod presets;

pub use anthropic::AnthropicProvider;
pub use factory::{ProviderConfigError, ProviderFactory};
pub use http::build_client;
pub use openai_compatible::OpenAiCompatibleProvider;
pub use presets::{PRESETS, Protocol, ProviderPreset};
