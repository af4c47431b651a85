//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] that produces provider-neutral
//! JSON Schema. Provider adapters reshape it for their wire format.

use hostscope_application::ToolSchemaPort;
use hostscope_domain::ToolDefinition;
use serde_json::{Map, Value, json};

/// Default implementation producing provider-neutral JSON Schema.
///
/// Handles param_type → JSON Schema type mapping:
/// - `"string"`, `"path"`, `""` → `"string"`
/// - `"number"`, `"integer"`, `"boolean"`, `"array"`, `"object"` → unchanged
/// - anything else → `"string"`
pub struct JsonSchemaToolConverter;

fn schema_type(param_type: &str) -> &'static str {
    match param_type {
        "number" => "number",
        "integer" => "integer",
        "boolean" => "boolean",
        "array" => "array",
        "object" => "object",
        _ => "string",
    }
}

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            // A body property may shadow a path/query parameter of the same name.
            if properties.contains_key(&param.name) {
                continue;
            }
            properties.insert(
                param.name.clone(),
                json!({
                    "type": schema_type(&param.param_type),
                    "description": param.description,
                }),
            );
            if param.required {
                required.push(json!(param.name));
            }
        }

        let mut input_schema = Map::new();
        input_schema.insert("type".to_string(), json!("object"));
        input_schema.insert("properties".to_string(), Value::Object(properties));
        if !required.is_empty() {
            input_schema.insert("required".to_string(), Value::Array(required));
        }

        json!({
            "name": tool.name,
            "description": tool.description,
            "input_schema": input_schema,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostscope_domain::{ParameterLocation, ToolParameter};

    #[test]
    fn test_tool_to_schema() {
        let converter = JsonSchemaToolConverter;
        let tool = ToolDefinition::new("read_file", "Read file contents")
            .with_parameter(
                ToolParameter::new("file_path", "File path to read", true).with_type("path"),
            )
            .with_parameter(
                ToolParameter::new("start_line", "First line", false).with_type("integer"),
            );

        let schema = converter.tool_to_schema(&tool);

        assert_eq!(schema["name"], "read_file");
        assert_eq!(schema["description"], "Read file contents");
        assert_eq!(schema["input_schema"]["type"], "object");

        let path_prop = &schema["input_schema"]["properties"]["file_path"];
        assert_eq!(path_prop["type"], "string"); // "path" maps to "string"
        assert_eq!(path_prop["description"], "File path to read");
        assert_eq!(
            schema["input_schema"]["properties"]["start_line"]["type"],
            "integer"
        );

        let required = schema["input_schema"]["required"].as_array().unwrap();
        assert_eq!(required, &vec![json!("file_path")]);
    }

    #[test]
    fn test_required_omitted_when_empty() {
        let tool = ToolDefinition::new("listOrders", "GET /orders").with_parameter(
            ToolParameter::new("status", "", false).at(ParameterLocation::Query),
        );
        let schema = JsonSchemaToolConverter.tool_to_schema(&tool);
        assert!(schema["input_schema"].get("required").is_none());
        assert_eq!(schema["input_schema"]["properties"]["status"]["type"], "string");
    }

    #[test]
    fn test_unknown_types_fall_back_to_string() {
        let tool = ToolDefinition::new("createOrder", "")
            .with_parameter(ToolParameter::new("items", "", true).with_type("array"))
            .with_parameter(ToolParameter::new("when", "", false).with_type("date-time"));
        let props = &JsonSchemaToolConverter.tool_to_schema(&tool)["input_schema"]["properties"];
        assert_eq!(props["items"]["type"], "array");
        assert_eq!(props["when"]["type"], "string");
    }

    #[test]
    fn test_first_parameter_with_a_name_wins() {
        let tool = ToolDefinition::new("updateUser", "")
            .with_parameter(
                ToolParameter::new("id", "path id", true).at(ParameterLocation::Path),
            )
            .with_parameter(
                ToolParameter::new("id", "body id", false)
                    .with_type("integer")
                    .at(ParameterLocation::Body),
            );
        let schema = JsonSchemaToolConverter.tool_to_schema(&tool);
        assert_eq!(schema["input_schema"]["properties"]["id"]["description"], "path id");
        assert_eq!(schema["input_schema"]["required"].as_array().unwrap().len(), 1);
    }
}
