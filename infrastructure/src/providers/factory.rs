//! Build the configured [`ChatProvider`] from `[provider]` settings.

use std::sync::Arc;

use hostscope_application::ChatProvider;
use thiserror::Error;

use super::anthropic::AnthropicProvider;
use super::openai_compatible::OpenAiCompatibleProvider;
use super::presets::{self, Protocol, ProviderPreset};
use crate::config::FileProviderConfig;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProviderConfigError {
    #[error("unknown provider '{kind}' (expected one of: {known})")]
    UnknownProvider { kind: String, known: String },

    #[error("no API key for {provider}: set {env} or provider.api_key")]
    MissingApiKey { provider: String, env: String },

    #[error("provider '{0}' needs provider.base_url")]
    MissingBaseUrl(String),

    #[error("provider '{0}' needs provider.model")]
    MissingModel(String),
}

/// Creates provider adapters; the protocol is fixed by the preset.
pub struct ProviderFactory;

impl ProviderFactory {
    pub fn create(
        config: &FileProviderConfig,
        client: reqwest::Client,
    ) -> Result<Arc<dyn ChatProvider>, ProviderConfigError> {
        Self::create_with_env(config, client, |name| std::env::var(name).ok())
    }

    fn create_with_env(
        config: &FileProviderConfig,
        client: reqwest::Client,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Arc<dyn ChatProvider>, ProviderConfigError> {
        let preset = presets::find(&config.kind).ok_or_else(|| {
            ProviderConfigError::UnknownProvider {
                kind: config.kind.clone(),
                known: presets::ids().collect::<Vec<_>>().join(", "),
            }
        })?;

        let base_url = non_empty(config.base_url.as_deref())
            .or(non_empty(Some(preset.base_url)))
            .ok_or_else(|| ProviderConfigError::MissingBaseUrl(preset.id.to_string()))?;
        let model = non_empty(config.model.as_deref())
            .or(non_empty(Some(preset.default_model)))
            .ok_or_else(|| ProviderConfigError::MissingModel(preset.id.to_string()))?;
        let api_key = resolve_api_key(config, preset, env)?;

        tracing::info!(
            provider = preset.id,
            model,
            base_url,
            "Using {}",
            preset.display_name
        );

        let provider: Arc<dyn ChatProvider> = match preset.protocol {
            Protocol::AnthropicMessages => Arc::new(
                AnthropicProvider::new(client, api_key, base_url, model)
                    .with_max_tokens(config.max_tokens),
            ),
            Protocol::ChatCompletions => Arc::new(
                OpenAiCompatibleProvider::new(client, preset.id, api_key, base_url, model)
                    .with_max_tokens(config.max_tokens),
            ),
        };
        Ok(provider)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn resolve_api_key(
    config: &FileProviderConfig,
    preset: &ProviderPreset,
    env: impl Fn(&str) -> Option<String>,
) -> Result<String, ProviderConfigError> {
    if let Some(key) = non_empty(config.api_key.as_deref()) {
        return Ok(key.to_string());
    }
    let var = non_empty(config.api_key_env.as_deref()).unwrap_or(preset.api_key_env);
    env(var)
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| ProviderConfigError::MissingApiKey {
            provider: preset.id.to_string(),
            env: var.to_string(),
        })
}
