//! Tool catalog and dispatch
//!
//! ```text
//! ToolCatalog ──▶ ToolDispatcher ──┬─▶ ApiInvokerPort (host API)
//!   (names)        (by name)        └─▶ BuiltinTool   (in process)
//! ```

pub mod catalog;
pub mod dispatcher;

pub use catalog::{CatalogEntry, ToolBinding, ToolCatalog};
pub use dispatcher::ToolDispatcher;
