//! Host API tools
//!
//! The host application describes its REST API with an OpenAPI document.
//! Each operation becomes an [`ApiTool`] the model can call; invoking it is
//! planned into an [`ApiRequest`] and executed over HTTP by infrastructure.
//!
//! - [`synthesize`]: document → tools, capped at [`MAX_API_TOOLS`]
//! - [`generate_operation_id`]: names for operations without `operationId`
//! - [`ApiRequest::plan`]: invocation arguments → path, query and body

pub mod entities;
pub mod request;
pub mod synthesis;

pub use entities::{
    ApiDocument, ApiParameter, ApiTool, BodyProperty, HttpMethod, RequestBodySchema,
};
pub use request::ApiRequest;
pub use synthesis::{MAX_API_TOOLS, SynthesisOutcome, generate_operation_id, synthesize};
