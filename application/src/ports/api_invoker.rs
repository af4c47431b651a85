//! Host API invoker port
//!
//! Executes a planned [`ApiRequest`] against the host application. The
//! adapter decides how non-2xx statuses and response bodies are rendered
//! into the result text; only transport failures are errors.

use async_trait::async_trait;
use hostscope_domain::{ApiRequest, ToolError};

#[async_trait]
pub trait ApiInvokerPort: Send + Sync {
    /// `authorization` is the caller's `Authorization` header value,
    /// forwarded verbatim when present.
    async fn invoke(
        &self,
        base_url: &str,
        request: &ApiRequest,
        authorization: Option<&str>,
    ) -> Result<String, ToolError>;
}
