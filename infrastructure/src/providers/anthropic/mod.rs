//! Anthropic Messages API adapter.

pub mod types;

use async_trait::async_trait;
use hostscope_application::{ChatProvider, ProviderError};
use hostscope_domain::{Message, ProviderReply};
use serde_json::Value;
use tracing::debug;

use super::http::{decode, read_success_body, transport_error};
use types::{MessagesRequest, MessagesResponse, convert_messages, convert_response};

pub const DEFAULT_API_VERSION: &str = "2023-06-01";

/// Native adapter: `POST {base_url}/v1/messages`.
pub struct AnthropicProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    api_version: String,
}

impl AnthropicProvider {
    pub fn new(
        client: reqwest::Client,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: model.into(),
            max_tokens: 4096,
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn send(
        &self,
        history: &[Message],
        tools: &[Value],
        system_prompt: &str,
    ) -> Result<ProviderReply, ProviderError> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: convert_messages(history),
            system: (!system_prompt.is_empty()).then_some(system_prompt),
            tools,
        };

        debug!(endpoint = %self.endpoint(), messages = request.messages.len(), "Anthropic request");
        let response = self
            .client
            .post(self.endpoint())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.api_version)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let body = read_success_body(response).await?;
        let parsed: MessagesResponse = decode(&body)?;
        Ok(convert_response(parsed))
    }
}
