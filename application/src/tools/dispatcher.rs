//! Tool Dispatcher
//!
//! Resolves a tool invocation by name and runs it: host API operations go
//! through the [`ApiInvokerPort`], built-ins run in process. Every call can
//! be cancelled.

use std::sync::Arc;

use hostscope_domain::{ApiRequest, ApiTool, ToolArguments, ToolError};
use tokio_util::sync::CancellationToken;

use super::catalog::{ToolBinding, ToolCatalog};
use crate::ports::api_invoker::ApiInvokerPort;

/// Routes invocations to their executor.
pub struct ToolDispatcher {
    catalog: Arc<ToolCatalog>,
    api_invoker: Option<Arc<dyn ApiInvokerPort>>,
    host_base_url: Option<String>,
}

impl ToolDispatcher {
    pub fn new(catalog: Arc<ToolCatalog>) -> Self {
        Self {
            catalog,
            api_invoker: None,
            host_base_url: None,
        }
    }

    /// Enable host API tools. A `None` base URL keeps them listed but makes
    /// every call fail with a configuration error.
    pub fn with_api(
        mut self,
        invoker: Arc<dyn ApiInvokerPort>,
        host_base_url: Option<String>,
    ) -> Self {
        self.api_invoker = Some(invoker);
        self.host_base_url = host_base_url.filter(|url| !url.is_empty());
        self
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    pub fn host_base_url(&self) -> Option<&str> {
        self.host_base_url.as_deref()
    }

    /// Execute one invocation.
    ///
    /// `authorization` is the end user's `Authorization` header, forwarded
    /// to host API calls only.
    pub async fn execute(
        &self,
        name: &str,
        arguments: &ToolArguments,
        authorization: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<String, ToolError> {
        let entry = self
            .catalog
            .get(name)
            .ok_or_else(|| ToolError::unknown_tool(name))?;

        tracing::debug!(tool = %name, source = %entry.source(), "Dispatching tool");

        let run = async {
            match entry.binding() {
                ToolBinding::Api(tool) => self.call_api(tool, arguments, authorization).await,
                ToolBinding::Builtin(tool) => tool.execute(arguments).await,
            }
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ToolError::cancelled()),
            result = run => result,
        }
    }

    async fn call_api(
        &self,
        tool: &ApiTool,
        arguments: &ToolArguments,
        authorization: Option<&str>,
    ) -> Result<String, ToolError> {
        let Some(base_url) = self.host_base_url.as_deref() else {
            return Err(ToolError::configuration("host base URL is not configured"));
        };
        let Some(invoker) = &self.api_invoker else {
            return Err(ToolError::configuration("host API calls are not enabled"));
        };

        let request = ApiRequest::plan(tool, arguments);
        tracing::debug!(
            method = %request.method,
            path = %request.path,
            "Calling host API"
        );
        invoker.invoke(base_url, &request, authorization).await
    }
}
