//! Turning an OpenAPI document into [`ApiTool`]s.
//!
//! Input is the already-decoded document as a `serde_json::Value`; decoding
//! YAML or JSON from disk is an infrastructure concern.

use super::entities::{
    ApiDocument, ApiParameter, ApiTool, BodyProperty, HttpMethod, RequestBodySchema,
};
use crate::core::error::DomainError;
use crate::tool::entities::ParameterLocation;
use serde_json::{Map, Value};

/// Upper bound on tools synthesized from one document.
pub const MAX_API_TOOLS: usize = 50;

/// Result of synthesis, with the counts needed to report truncation.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisOutcome {
    pub document: ApiDocument,
    /// Operations found in the document.
    pub discovered: usize,
    /// Operations turned into tools.
    pub loaded: usize,
}

impl SynthesisOutcome {
    /// True only when the cap dropped operations. Operations skipped for
    /// being malformed do not count.
    pub fn is_truncated(&self) -> bool {
        self.discovered > MAX_API_TOOLS
    }

    /// Message to log when the cap dropped operations.
    pub fn truncation_warning(&self) -> Option<String> {
        self.is_truncated().then(|| {
            format!(
                "API document has {} operations, only the first {} are loaded",
                self.discovered, MAX_API_TOOLS
            )
        })
    }
}

/// Build tools from a decoded OpenAPI document.
///
/// Operations are visited in path order, then method order, which is
/// deterministic for a given document. At most [`MAX_API_TOOLS`] tools are
/// built; the rest are counted but dropped.
pub fn synthesize(raw: &Value) -> Result<SynthesisOutcome, DomainError> {
    let root = raw.as_object().ok_or_else(|| {
        DomainError::InvalidApiDocument("document root must be an object".to_string())
    })?;

    let mut document = ApiDocument::default();

    if let Some(info) = root.get("info").and_then(Value::as_object) {
        document.title = get_string(info, "title");
        document.description = get_string(info, "description");
    }

    document.server_url = root
        .get("servers")
        .and_then(Value::as_array)
        .and_then(|servers| servers.first())
        .and_then(Value::as_object)
        .map(|server| get_string(server, "url"))
        .filter(|url| !url.is_empty());

    let Some(paths) = root.get("paths").and_then(Value::as_object) else {
        return Ok(SynthesisOutcome {
            document,
            discovered: 0,
            loaded: 0,
        });
    };

    let mut discovered = 0;
    for (path, item) in paths {
        let Some(methods) = item.as_object() else {
            continue;
        };
        for (key, operation) in methods {
            let Some(method) = HttpMethod::parse(key) else {
                continue;
            };
            discovered += 1;

            let Some(operation) = operation.as_object() else {
                continue;
            };
            if document.tools.len() >= MAX_API_TOOLS {
                continue;
            }
            document.tools.push(build_tool(path, method, operation));
        }
    }

    let loaded = document.tools.len();
    Ok(SynthesisOutcome {
        document,
        discovered,
        loaded,
    })
}

/// Name for an operation without an `operationId`.
///
/// Lower-case method followed by each non-empty path segment with braces
/// stripped and its first letter upper-cased.
///
/// ```
/// use hostscope_domain::openapi::{HttpMethod, generate_operation_id};
///
/// assert_eq!(generate_operation_id(HttpMethod::Get, "/users/{id}"), "getUsersId");
/// assert_eq!(generate_operation_id(HttpMethod::Post, "/orders/"), "postOrders");
/// ```
pub fn generate_operation_id(method: HttpMethod, path: &str) -> String {
    let mut name = method.as_str().to_ascii_lowercase();
    for segment in path.split('/') {
        let segment = segment.trim().trim_start_matches('{').trim_end_matches('}');
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
        }
    }
    name
}

fn build_tool(path: &str, method: HttpMethod, op: &Map<String, Value>) -> ApiTool {
    let name = Some(get_string(op, "operationId"))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| generate_operation_id(method, path));

    let description = [get_string(op, "description"), get_string(op, "summary")]
        .into_iter()
        .find(|s| !s.is_empty())
        .unwrap_or_else(|| format!("{} {}", method, path));

    let parameters = op
        .get("parameters")
        .and_then(Value::as_array)
        .map(|params| params.iter().filter_map(build_parameter).collect())
        .unwrap_or_default();

    let request_body = op
        .get("requestBody")
        .and_then(Value::as_object)
        .map(build_request_body);

    ApiTool {
        name,
        description,
        method,
        path: path.to_string(),
        parameters,
        request_body,
    }
}

fn build_parameter(raw: &Value) -> Option<ApiParameter> {
    let param = raw.as_object()?;
    let location = match get_string(param, "in").as_str() {
        "path" => ParameterLocation::Path,
        "query" => ParameterLocation::Query,
        _ => return None,
    };
    let declared_required = param
        .get("required")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    Some(ApiParameter {
        name: get_string(param, "name"),
        location,
        description: get_string(param, "description"),
        required: declared_required || location == ParameterLocation::Path,
        param_type: schema_type(param.get("schema")),
    })
}

fn build_request_body(raw: &Map<String, Value>) -> RequestBodySchema {
    let mut body = RequestBodySchema {
        description: get_string(raw, "description"),
        ..Default::default()
    };

    let Some(schema) = raw
        .get("content")
        .and_then(|c| c.get("application/json"))
        .and_then(|c| c.get("schema"))
        .and_then(Value::as_object)
    else {
        return body;
    };

    body.required = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| {
            names
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    if let Some(props) = schema.get("properties").and_then(Value::as_object) {
        body.properties = props
            .iter()
            .filter(|(_, def)| def.is_object())
            .map(|(name, def)| BodyProperty {
                name: name.clone(),
                param_type: schema_type(Some(def)),
                description: def
                    .get("description")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            })
            .collect();
    }

    body
}

fn schema_type(schema: Option<&Value>) -> String {
    schema
        .and_then(|s| s.get("type"))
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .unwrap_or("string")
        .to_string()
}

fn get_string(map: &Map<String, Value>, key: &str) -> String {
    map.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
