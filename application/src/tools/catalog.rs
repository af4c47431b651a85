//! Tool Catalog
//!
//! The [`ToolCatalog`] is the ordered set of tools offered to the model in
//! one session: built-in handlers first, then operations of the host API.
//!
//! # Name collisions
//!
//! Names are unique within the catalog, so the model sees one schema per
//! name. Host API tools resolve before built-ins: an API operation named
//! like a built-in takes over the built-in's slot, whatever the
//! registration order. Between two entries of the same source the first
//! registration wins. Every collision logs a warning.
//!
//! ```ignore
//! let mut catalog = ToolCatalog::new();
//! catalog.register_builtin(Arc::new(ReadFileTool::new(root)));
//! catalog.register_api_tools(document.tools);
//! ```

use std::sync::Arc;

use hostscope_domain::{ApiTool, ToolDefinition, ToolSource};

use crate::ports::builtin_tool::BuiltinTool;

/// Executor behind a catalog entry.
#[derive(Clone)]
pub enum ToolBinding {
    Builtin(Arc<dyn BuiltinTool>),
    Api(ApiTool),
}

/// One named tool and how to run it.
#[derive(Clone)]
pub struct CatalogEntry {
    definition: ToolDefinition,
    binding: ToolBinding,
}

impl CatalogEntry {
    pub fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn binding(&self) -> &ToolBinding {
        &self.binding
    }

    pub fn source(&self) -> ToolSource {
        match self.binding {
            ToolBinding::Builtin(_) => ToolSource::Builtin,
            ToolBinding::Api(_) => ToolSource::Api,
        }
    }
}

impl std::fmt::Debug for CatalogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogEntry")
            .field("name", &self.definition.name)
            .field("source", &self.source())
            .finish()
    }
}

/// Ordered, name-unique set of tools.
#[derive(Clone, Debug, Default)]
pub struct ToolCatalog {
    entries: Vec<CatalogEntry>,
}

impl ToolCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a built-in handler. Returns `false` if the name was taken.
    pub fn register_builtin(&mut self, tool: Arc<dyn BuiltinTool>) -> bool {
        let definition = tool.definition().clone();
        self.insert(CatalogEntry {
            definition,
            binding: ToolBinding::Builtin(tool),
        })
    }

    /// Register host API tools. Returns how many were added, counting those
    /// that replaced a built-in of the same name.
    pub fn register_api_tools(&mut self, tools: impl IntoIterator<Item = ApiTool>) -> usize {
        tools
            .into_iter()
            .map(|tool| {
                self.insert(CatalogEntry {
                    definition: tool.to_tool_definition(),
                    binding: ToolBinding::Api(tool),
                })
            })
            .filter(|added| *added)
            .count()
    }

    fn insert(&mut self, entry: CatalogEntry) -> bool {
        if let Some(slot) = self.entries.iter_mut().find(|e| e.name() == entry.name()) {
            let shadows = slot.source() == ToolSource::Builtin && entry.source() == ToolSource::Api;
            let (kept, dropped) = if shadows {
                (entry.source(), slot.source())
            } else {
                (slot.source(), entry.source())
            };
            tracing::warn!(
                tool = %entry.name(),
                %kept,
                %dropped,
                "Tool name collision, host API tools resolve before built-ins"
            );
            if shadows {
                *slot = entry;
            }
            return shadows;
        }
        tracing::debug!(tool = %entry.name(), source = %entry.source(), "Registered tool");
        self.entries.push(entry);
        true
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name())
    }

    /// `(definition, source)` pairs, in catalog order.
    pub fn definitions(&self) -> impl Iterator<Item = (&ToolDefinition, ToolSource)> {
        self.entries.iter().map(|e| (e.definition(), e.source()))
    }

    pub fn count_by_source(&self, source: ToolSource) -> usize {
        self.entries.iter().filter(|e| e.source() == source).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
