//! Tool schema conversion port.
//!
//! Separates "which tools exist" (catalog) from "how to describe them to the
//! model" (infrastructure). Implementations emit a provider-neutral
//! `{name, description, input_schema}` object per tool; provider adapters
//! reshape it for their wire format.

use crate::tools::catalog::ToolCatalog;
use hostscope_domain::ToolDefinition;

pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single tool definition to provider-neutral JSON Schema.
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Convert every catalog entry, in catalog order.
    fn catalog_schema(&self, catalog: &ToolCatalog) -> Vec<serde_json::Value> {
        catalog
            .entries()
            .map(|entry| self.tool_to_schema(entry.definition()))
            .collect()
    }
}
