//! OpenAPI file loader.
//!
//! Decodes a YAML or JSON document (chosen by file extension, YAML for
//! anything unrecognized) and hands the tree to domain synthesis.

use std::fs;
use std::path::Path;

use hostscope_domain::{DomainError, SynthesisOutcome, synthesize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum OpenApiLoadError {
    #[error("failed to read API document {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: String,
        source: serde_yaml::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Document(#[from] DomainError),
}

pub struct OpenApiLoader;

impl OpenApiLoader {
    /// Read, decode and synthesize. Logs a warning when the tool cap
    /// dropped operations.
    pub fn load(path: &Path) -> Result<SynthesisOutcome, OpenApiLoadError> {
        let shown = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|source| OpenApiLoadError::Io {
            path: shown.clone(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let raw = if is_json {
            Self::parse_json(&text, &shown)?
        } else {
            Self::parse_yaml(&text, &shown)?
        };

        let outcome = synthesize(&raw)?;
        if let Some(message) = outcome.truncation_warning() {
            warn!(
                discovered = outcome.discovered,
                loaded = outcome.loaded,
                "{message}"
            );
        }
        info!(
            path = %shown,
            title = %outcome.document.title,
            tools = outcome.loaded,
            "Loaded API document"
        );
        Ok(outcome)
    }

    pub fn parse_json(text: &str, path: &str) -> Result<Value, OpenApiLoadError> {
        serde_json::from_str(text).map_err(|source| OpenApiLoadError::Json {
            path: path.to_string(),
            source,
        })
    }

    pub fn parse_yaml(text: &str, path: &str) -> Result<Value, OpenApiLoadError> {
        serde_yaml::from_str(text).map_err(|source| OpenApiLoadError::Yaml {
            path: path.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostscope_domain::HttpMethod;

    const PETSTORE_YAML: &str = r#"
openapi: 3.0.0
info:
  title: Petstore
  description: Sells pets
servers:
  - url: http://localhost:8080/api
paths:
  /pets/{petId}:
    get:
      operationId: showPetById
      summary: Info for a specific pet
      parameters:
        - name: petId
          in: path
          required: true
          schema:
            type: string
  /pets:
    post:
      summary: Create a pet
      requestBody:
        content:
          application/json:
            schema:
              type: object
              required: [name]
              properties:
                name:
                  type: string
                age:
                  type: integer
"#;

    #[test]
    fn test_load_yaml_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("openapi.yaml");
        fs::write(&path, PETSTORE_YAML).unwrap();

        let outcome = OpenApiLoader::load(&path).unwrap();
        let doc = &outcome.document;
        assert_eq!(doc.title, "Petstore");
        assert_eq!(doc.server_url.as_deref(), Some("http://localhost:8080/api"));
        assert_eq!(outcome.loaded, 2);

        let show = doc.tool("showPetById").unwrap();
        assert_eq!(show.method, HttpMethod::Get);
        assert!(show.parameter("petId").unwrap().required);

        let create = doc.tool("postPets").unwrap();
        assert!(create.request_body.as_ref().unwrap().is_required("name"));
    }

    #[test]
    fn test_load_json_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("openapi.JSON");
        fs::write(
            &path,
            r#"{"info": {"title": "Shop"}, "paths": {"/orders": {"get": {}}}}"#,
        )
        .unwrap();

        let outcome = OpenApiLoader::load(&path).unwrap();
        assert_eq!(outcome.document.title, "Shop");
        assert!(outcome.document.tool("getOrders").is_some());
    }

    #[test]
    fn test_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.yaml");
        let err = OpenApiLoader::load(&missing).unwrap_err();
        assert!(matches!(err, OpenApiLoadError::Io { .. }));
        assert!(err.to_string().contains("missing.yaml"));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{not json").unwrap();
        assert!(matches!(
            OpenApiLoader::load(&broken).unwrap_err(),
            OpenApiLoadError::Json { .. }
        ));

        let scalar = dir.path().join("scalar.yaml");
        fs::write(&scalar, "just a string").unwrap();
        assert!(matches!(
            OpenApiLoader::load(&scalar).unwrap_err(),
            OpenApiLoadError::Document(_)
        ));
    }
}
