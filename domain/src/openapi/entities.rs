//! Tools synthesized from an API description.

use crate::tool::entities::{ParameterLocation, ToolDefinition, ToolParameter};
use serde::{Deserialize, Serialize};

/// HTTP methods that become tools. Other path item keys are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Parse a path item key, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            "PUT" => Some(HttpMethod::Put),
            "PATCH" => Some(HttpMethod::Patch),
            "DELETE" => Some(HttpMethod::Delete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A path or query parameter of an operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiParameter {
    pub name: String,
    /// `Path` or `Query`.
    pub location: ParameterLocation,
    pub description: String,
    pub required: bool,
    pub param_type: String,
}

/// A top-level property of a JSON request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyProperty {
    pub name: String,
    pub param_type: String,
    pub description: String,
}

/// The `application/json` request body of an operation.
///
/// Only top-level properties are captured; nested objects are passed
/// through as whatever value the model supplies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestBodySchema {
    pub description: String,
    pub required: Vec<String>,
    pub properties: Vec<BodyProperty>,
}

impl RequestBodySchema {
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

/// One operation of the host API, exposed as a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiTool {
    pub name: String,
    pub description: String,
    pub method: HttpMethod,
    /// Path template, e.g. `/users/{id}`.
    pub path: String,
    pub parameters: Vec<ApiParameter>,
    pub request_body: Option<RequestBodySchema>,
}

impl ApiTool {
    pub fn parameter(&self, name: &str) -> Option<&ApiParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Tool definition offered to the model: path and query parameters
    /// first, then body properties.
    pub fn to_tool_definition(&self) -> ToolDefinition {
        let mut definition = ToolDefinition::new(&self.name, &self.description);

        for param in &self.parameters {
            definition = definition.with_parameter(
                ToolParameter::new(&param.name, &param.description, param.required)
                    .with_type(&param.param_type)
                    .at(param.location),
            );
        }

        if let Some(body) = &self.request_body {
            for prop in &body.properties {
                definition = definition.with_parameter(
                    ToolParameter::new(&prop.name, &prop.description, body.is_required(&prop.name))
                        .with_type(&prop.param_type)
                        .at(ParameterLocation::Body),
                );
            }
        }

        definition
    }
}

/// The parsed API description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiDocument {
    pub title: String,
    pub description: String,
    /// `servers[0].url`, if present.
    pub server_url: Option<String>,
    pub tools: Vec<ApiTool>,
}

impl ApiDocument {
    pub fn tool(&self, name: &str) -> Option<&ApiTool> {
        self.tools.iter().find(|t| t.name == name)
    }
}
