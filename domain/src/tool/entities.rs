//! Tool domain entities

use serde::{Deserialize, Serialize};

/// Where a tool parameter goes when the tool is executed.
///
/// Built-in tools take plain arguments. Tools synthesized from an API
/// description route each argument to the path, the query string or the
/// JSON body according to the role it was declared with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    #[default]
    Argument,
    Path,
    Query,
    Body,
}

impl ParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Argument => "argument",
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Body => "body",
        }
    }
}

/// Which executor backs a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolSource {
    /// In-process handler (file read, search, logs, code index).
    Builtin,
    /// HTTP call against the host application's API.
    Api,
}

impl std::fmt::Display for ToolSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolSource::Builtin => write!(f, "builtin"),
            ToolSource::Api => write!(f, "api"),
        }
    }
}

/// Definition of a tool offered to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "read_file")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Parameter specifications
    pub parameters: Vec<ToolParameter>,
}

/// Parameter specification for a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    pub description: String,
    pub required: bool,
    /// Type hint (e.g., "string", "path", "integer")
    pub param_type: String,
    #[serde(default)]
    pub location: ParameterLocation,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&ToolParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn required_parameters(&self) -> impl Iterator<Item = &ToolParameter> {
        self.parameters.iter().filter(|p| p.required)
    }
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: "string".to_string(),
            location: ParameterLocation::Argument,
        }
    }

    pub fn with_type(mut self, param_type: impl Into<String>) -> Self {
        self.param_type = param_type.into();
        self
    }

    pub fn at(mut self, location: ParameterLocation) -> Self {
        self.location = location;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_definition_builder() {
        let tool = ToolDefinition::new("read_file", "Read a source file")
            .with_parameter(ToolParameter::new("file_path", "Path to read", true).with_type("path"))
            .with_parameter(
                ToolParameter::new("start_line", "First line", false).with_type("integer"),
            );

        assert_eq!(tool.parameters.len(), 2);
        assert_eq!(tool.parameter("file_path").unwrap().param_type, "path");
        assert_eq!(
            tool.required_parameters().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            vec!["file_path"]
        );
    }

    #[test]
    fn test_parameter_location_defaults_to_argument() {
        let param = ToolParameter::new("q", "query", false);
        assert_eq!(param.location, ParameterLocation::Argument);
        assert_eq!(param.at(ParameterLocation::Query).location.as_str(), "query");
    }
}
