//! Planning an HTTP request from a tool invocation.
//!
//! Arguments are routed by the role their parameter was declared with,
//! never by position: path parameters fill `{name}` tokens, query
//! parameters become query pairs, and everything else goes into a flat JSON
//! body when the operation declares one. Required parameters are not
//! checked here; the host API rejects incomplete requests itself.

use super::entities::{ApiTool, HttpMethod};
use crate::session::entities::ToolArguments;
use crate::tool::entities::ParameterLocation;
use serde_json::Value;

/// A fully resolved request against the host API, minus the base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Path with each supplied `{name}` token substituted. Tokens without
    /// an argument are left as-is.
    pub path: String,
    pub query: Vec<(String, String)>,
    /// `None` when the operation has no body or no body argument was given.
    pub body: Option<ToolArguments>,
}

impl ApiRequest {
    pub fn plan(tool: &ApiTool, arguments: &ToolArguments) -> Self {
        let mut path = tool.path.clone();
        let mut query = Vec::new();
        let mut body = ToolArguments::new();

        for (name, value) in arguments {
            match tool.parameter(name).map(|p| p.location) {
                Some(ParameterLocation::Path) => {
                    path = path.replace(&format!("{{{}}}", name), &value_to_string(value));
                }
                Some(ParameterLocation::Query) => {
                    query.push((name.clone(), value_to_string(value)));
                }
                _ if tool.request_body.is_some() => {
                    body.insert(name.clone(), value.clone());
                }
                _ => {}
            }
        }

        Self {
            method: tool.method,
            path,
            query,
            body: (!body.is_empty()).then_some(body),
        }
    }

    /// Join with a base URL, dropping any trailing slash on the base.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path)
    }
}

/// Strings are used verbatim; other values use their JSON text.
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
