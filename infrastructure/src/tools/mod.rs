//! Tool implementations
//!
//! Built-in tools read the host application's source tree, logs and code
//! index. [`HttpApiInvoker`] executes synthesized host API operations.
//!
//! ## Built-ins
//!
//! - `read_file`, `grep`, `glob`: always available, rooted at the source path
//! - `read_logs`: only when log files are configured
//! - `search_code_index`: only when a code index is loaded

pub mod api_invoker;
pub mod code_index;
pub mod file;
pub mod logs;
pub mod schema;
pub mod search;

mod args;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use hostscope_application::BuiltinTool;

pub use api_invoker::HttpApiInvoker;
pub use code_index::{CodeIndex, CodeIndexError, SearchCodeIndexTool};
pub use file::ReadFileTool;
pub use logs::ReadLogsTool;
pub use schema::JsonSchemaToolConverter;
pub use search::{GlobTool, GrepTool};

/// Assemble the built-in tools in registration order.
pub fn builtin_tools(
    source_root: &Path,
    log_files: &[PathBuf],
    code_index: Option<CodeIndex>,
) -> Vec<Arc<dyn BuiltinTool>> {
    let mut tools: Vec<Arc<dyn BuiltinTool>> = vec![
        Arc::new(ReadFileTool::new(source_root)),
        Arc::new(GrepTool::new(source_root)),
        Arc::new(GlobTool::new(source_root)),
    ];
    if !log_files.is_empty() {
        tools.push(Arc::new(ReadLogsTool::new(log_files.to_vec())));
    }
    if let Some(index) = code_index {
        tools.push(Arc::new(SearchCodeIndexTool::new(index)));
    }
    tools
}
