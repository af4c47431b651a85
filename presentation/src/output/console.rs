//! Console rendering of turn events and the tool catalog

use colored::Colorize;
use hostscope_application::{OutputEvent, ToolCatalog, TurnOutput};
use hostscope_domain::ToolSource;
use std::io::Write;

/// Streams a turn to stdout as it happens.
///
/// Assistant text is printed verbatim; tool activity gets a dimmed status
/// line; errors go to stderr.
#[derive(Debug, Default)]
pub struct ConsoleTurnOutput {
    show_tools: bool,
}

impl ConsoleTurnOutput {
    pub fn new() -> Self {
        Self { show_tools: true }
    }

    /// Hide tool status lines.
    pub fn quiet(mut self) -> Self {
        self.show_tools = false;
        self
    }

    fn render(&self, event: &OutputEvent) -> Option<String> {
        match event {
            OutputEvent::Text(text) => Some(format!("{}\n", text)),
            OutputEvent::ToolStarted { name, .. } if self.show_tools => {
                Some(format!("{} {}\n", "→".cyan(), name.cyan().bold()))
            }
            OutputEvent::ToolFinished { name, is_error, .. } if self.show_tools => {
                if *is_error {
                    Some(format!("{} {} failed\n", "✗".red(), name))
                } else {
                    Some(format!("{} {}\n", "✓".green(), name.dimmed()))
                }
            }
            OutputEvent::Error(message) => Some(format!("{}\n", message.red())),
            _ => None,
        }
    }
}

impl TurnOutput for ConsoleTurnOutput {
    fn emit(&self, event: OutputEvent) {
        let Some(line) = self.render(&event) else {
            return;
        };
        if matches!(event, OutputEvent::Error(_)) {
            eprint!("{}", line);
        } else {
            print!("{}", line);
            let _ = std::io::stdout().flush();
        }
    }
}

/// Static formatting helpers for non-streaming output.
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Tool catalog grouped by source, in registration order.
    pub fn tool_list(catalog: &ToolCatalog) -> String {
        let mut output = String::new();
        for (source, title) in [
            (ToolSource::Builtin, "Built-in tools"),
            (ToolSource::Api, "Host API tools"),
        ] {
            let count = catalog.count_by_source(source);
            if count == 0 {
                continue;
            }
            output.push_str(&format!("{} ({})\n", title.cyan().bold(), count));
            for (definition, _) in catalog.definitions().filter(|(_, s)| *s == source) {
                let summary = definition.description.lines().next().unwrap_or_default();
                output.push_str(&format!("  {:<28} {}\n", definition.name.yellow(), summary));
            }
            output.push('\n');
        }
        if output.is_empty() {
            output.push_str("No tools registered.\n");
        }
        output
    }

    /// Create a section header
    pub fn section_header(title: &str) -> String {
        format!("\n{}\n", format!("── {} ──", title).yellow().bold())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use hostscope_application::BuiltinTool;
    use hostscope_domain::{
        ApiTool, HttpMethod, ToolArguments, ToolDefinition, ToolError, ToolParameter,
    };
    use std::sync::Arc;

    struct Named(ToolDefinition);

    #[async_trait]
    impl BuiltinTool for Named {
        fn definition(&self) -> &ToolDefinition {
            &self.0
        }

        async fn execute(&self, _arguments: &ToolArguments) -> Result<String, ToolError> {
            Ok(String::new())
        }
    }

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_render_events() {
        plain();
        let output = ConsoleTurnOutput::new();
        assert_eq!(
            output.render(&OutputEvent::Text("hello".into())).as_deref(),
            Some("hello\n")
        );
        assert_eq!(
            output
                .render(&OutputEvent::ToolStarted {
                    id: "t1".into(),
                    name: "grep".into()
                })
                .as_deref(),
            Some("→ grep\n")
        );
        assert_eq!(
            output
                .render(&OutputEvent::ToolFinished {
                    id: "t1".into(),
                    name: "grep".into(),
                    is_error: true
                })
                .as_deref(),
            Some("✗ grep failed\n")
        );
        assert!(output.render(&OutputEvent::Done).is_none());
    }

    #[test]
    fn test_quiet_hides_tool_lines_but_not_errors() {
        plain();
        let output = ConsoleTurnOutput::new().quiet();
        assert!(
            output
                .render(&OutputEvent::ToolStarted {
                    id: "t1".into(),
                    name: "grep".into()
                })
                .is_none()
        );
        assert_eq!(
            output.render(&OutputEvent::Error("Error: boom".into())).as_deref(),
            Some("Error: boom\n")
        );
    }

    #[test]
    fn test_tool_list_groups_by_source() {
        plain();
        let mut catalog = ToolCatalog::new();
        catalog.register_builtin(Arc::new(Named(
            ToolDefinition::new("read_file", "Read a file.\nMore detail.")
                .with_parameter(ToolParameter::new("path", "File path", true)),
        )));
        catalog.register_api_tools([ApiTool {
            name: "getUser".to_string(),
            description: "Fetch a user".to_string(),
            method: HttpMethod::Get,
            path: "/users/{id}".to_string(),
            parameters: Vec::new(),
            request_body: None,
        }]);

        let listing = ConsoleFormatter::tool_list(&catalog);
        assert!(listing.starts_with("Built-in tools (1)\n"));
        assert!(listing.contains("read_file"));
        assert!(listing.contains("Read a file.\n"));
        assert!(!listing.contains("More detail"));
        assert!(listing.contains("Host API tools (1)\n"));
        assert!(listing.contains("getUser"));
    }

    #[test]
    fn test_tool_list_empty_catalog() {
        assert_eq!(
            ConsoleFormatter::tool_list(&ToolCatalog::new()),
            "No tools registered.\n"
        );
    }
}
