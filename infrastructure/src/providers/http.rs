//! Shared HTTP plumbing for provider adapters.

use std::time::Duration;

use hostscope_application::ProviderError;

/// Build the client used for provider calls. `timeout` bounds the whole
/// request, including reading the body.
pub fn build_client(timeout: Duration, connect_timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(connect_timeout)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not build configured HTTP client, using defaults");
            reqwest::Client::new()
        })
}

/// Map a transport failure to a provider error.
pub fn transport_error(error: reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::Network(error.to_string())
    }
}

/// Read the body; any non-2xx status becomes [`ProviderError::Upstream`].
pub async fn read_success_body(response: reqwest::Response) -> Result<String, ProviderError> {
    let status = response.status();
    let body = response.text().await.map_err(transport_error)?;
    if !status.is_success() {
        return Err(ProviderError::Upstream {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

/// Decode a success body, keeping the raw text on failure.
pub fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ProviderError> {
    serde_json::from_str(body).map_err(|e| ProviderError::malformed(e.to_string(), body))
}
