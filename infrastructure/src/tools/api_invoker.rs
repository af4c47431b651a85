//! HTTP executor for synthesized host API tools.

use async_trait::async_trait;
use hostscope_application::ApiInvokerPort;
use hostscope_domain::{ApiRequest, HttpMethod, ToolError};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

/// Calls the host application over `reqwest`. Deadlines come from the
/// client's configured timeout.
pub struct HttpApiInvoker {
    client: reqwest::Client,
}

impl HttpApiInvoker {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

/// Pretty-print JSON bodies; anything else is returned as-is.
fn render_body(body: String) -> String {
    match serde_json::from_str::<Value>(&body) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or(body),
        Err(_) => body,
    }
}

#[async_trait]
impl ApiInvokerPort for HttpApiInvoker {
    async fn invoke(
        &self,
        base_url: &str,
        request: &ApiRequest,
        authorization: Option<&str>,
    ) -> Result<String, ToolError> {
        let url = request.url(base_url);
        let mut builder = self
            .client
            .request(method(request.method), &url)
            .header(ACCEPT, "application/json");
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(Value::Object(body.clone()).to_string());
        }
        if let Some(auth) = authorization {
            builder = builder.header(AUTHORIZATION, auth);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ToolError::timeout(format!("{} {}", request.method, request.path))
            } else {
                ToolError::execution_failed(format!("failed to call API: {e}"))
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ToolError::execution_failed(format!("failed to read response: {e}")))?;
        tracing::debug!(url = %url, status = status.as_u16(), "Host API responded");

        if !status.is_success() {
            return Ok(format!(
                "API call failed with status {}: {body}",
                status.as_u16()
            ));
        }
        Ok(render_body(body))
    }
}
