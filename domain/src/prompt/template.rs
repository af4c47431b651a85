//! System prompt for the debugging assistant

use crate::tool::entities::{ToolDefinition, ToolSource};

/// Templates for the assistant's system prompt
pub struct PromptTemplate;

impl PromptTemplate {
    /// Base instructions, independent of the configured tools.
    pub fn debugging_assistant() -> &'static str {
        r#"You are an AI debugging assistant embedded in a running application.

Your role:
- Help users diagnose and fix issues in their application
- Access the application's source code to understand the codebase
- Read application logs to understand what went wrong
- Provide clear, actionable solutions

When a user reports an error:
1. Use read_logs to find relevant log entries (if they provide a request ID or error details)
2. Use read_file to examine the code where the error occurred
3. Analyze the root cause
4. Suggest a fix with specific file and line numbers

Be concise, technical, and focus on solving the problem quickly. Always reference specific files and line numbers when suggesting fixes."#
    }

    /// Full system prompt: application header, base instructions and the
    /// list of tools actually available in this session.
    pub fn system_prompt<'a>(
        app: Option<(&str, &str)>,
        tools: impl IntoIterator<Item = (&'a ToolDefinition, ToolSource)>,
    ) -> String {
        let mut prompt = String::new();

        if let Some((title, description)) = app.filter(|(title, _)| !title.is_empty()) {
            prompt.push_str(&format!("Application: {}\n", title));
            if !description.is_empty() {
                prompt.push_str(&format!("{}\n", description));
            }
            prompt.push('\n');
        }

        prompt.push_str(Self::debugging_assistant());

        let mut builtin = Vec::new();
        let mut api = Vec::new();
        for (tool, source) in tools {
            let line = format!("- {}: {}", tool.name, first_line(&tool.description));
            match source {
                ToolSource::Builtin => builtin.push(line),
                ToolSource::Api => api.push(line),
            }
        }

        if !builtin.is_empty() {
            prompt.push_str("\n\nAvailable tools:\n");
            prompt.push_str(&builtin.join("\n"));
        }
        if !api.is_empty() {
            prompt.push_str(
                "\n\nHost API operations (live calls against the running application):\n",
            );
            prompt.push_str(&api.join("\n"));
        }

        prompt
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}
