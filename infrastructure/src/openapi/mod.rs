//! Reading the host application's OpenAPI document from disk.

mod loader;

pub use loader::{OpenApiLoadError, OpenApiLoader};
