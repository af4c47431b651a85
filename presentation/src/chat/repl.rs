//! REPL (Read-Eval-Print Loop) for interactive debugging sessions

use crate::output::console::{ConsoleFormatter, ConsoleTurnOutput};
use colored::Colorize;
use hostscope_application::{
    ChatSession, RunConversationError, RunConversationInput, RunConversationOutput,
    RunConversationUseCase,
};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// What a slash command asks the loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandOutcome {
    Continue,
    Exit,
}

/// Interactive chat REPL bound to one session
pub struct ChatRepl {
    use_case: Arc<RunConversationUseCase>,
    session: Arc<ChatSession>,
    authorization: Option<String>,
    output: ConsoleTurnOutput,
}

impl ChatRepl {
    pub fn new(use_case: Arc<RunConversationUseCase>, session: Arc<ChatSession>) -> Self {
        Self {
            use_case,
            session,
            authorization: None,
            output: ConsoleTurnOutput::new(),
        }
    }

    /// Authorization header forwarded to host API tools
    pub fn with_authorization(mut self, authorization: Option<String>) -> Self {
        self.authorization = authorization;
        self
    }

    /// Hide tool status lines
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        if quiet {
            self.output = ConsoleTurnOutput::new().quiet();
        }
        self
    }

    /// Run the interactive REPL until `/quit` or EOF.
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = dirs::data_dir().map(|p| p.join("hostscope").join("history.txt"));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            match rl.readline("hostscope> ") {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(line) == CommandOutcome::Exit {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);
                    println!();
                    let _ = self.ask(line).await;
                    println!();
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        self.session.end("client closed");
        Ok(())
    }

    /// Run one message through the loop, streaming to the console.
    ///
    /// Ctrl-C while the turn runs cancels it; the session stays usable.
    /// Failures are already printed by the time this returns.
    pub async fn ask(
        &self,
        message: &str,
    ) -> Result<RunConversationOutput, RunConversationError> {
        let token = CancellationToken::new();
        let watcher = {
            let token = token.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    token.cancel();
                }
            })
        };

        let input = RunConversationInput::new(message)
            .with_authorization(self.authorization.clone())
            .with_cancellation(token);
        let result = self
            .use_case
            .execute(&self.session, input, &self.output)
            .await;
        watcher.abort();

        match &result {
            Ok(summary) if summary.budget_exhausted => {
                println!(
                    "{}",
                    format!(
                        "Stopped after {} model calls; ask again to let it continue.",
                        summary.turns
                    )
                    .yellow()
                );
            }
            Ok(summary) => {
                tracing::debug!(
                    turns = summary.turns,
                    tool_calls = summary.tool_calls,
                    "Turn finished"
                );
            }
            Err(e) if e.is_cancelled() => println!("{}", "Cancelled.".yellow()),
            Err(_) => {}
        }
        result
    }

    fn print_welcome(&self) {
        let catalog = self.use_case.catalog();
        let provider = self.use_case.provider();
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│          hostscope - Debugging Chat         │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!(
            "{} {} ({})",
            "Provider:".cyan().bold(),
            provider.name(),
            provider.model()
        );
        println!("{} {}", "Tools:".cyan().bold(), catalog.len());
        println!("{} {}", "Session:".cyan().bold(), self.session.id());
        println!();
        Self::print_commands();
    }

    fn print_commands() {
        println!("Commands:");
        println!("  /help, /h, /?     - Show this help");
        println!("  /tools            - List available tools");
        println!("  /session          - Show session details");
        println!("  /quit, /exit, /q  - Exit chat");
        println!();
    }

    fn handle_command(&self, cmd: &str) -> CommandOutcome {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                CommandOutcome::Exit
            }
            "/help" | "/h" | "/?" => {
                println!();
                Self::print_commands();
                CommandOutcome::Continue
            }
            "/tools" => {
                print!("{}", ConsoleFormatter::section_header("Tools"));
                print!("{}", ConsoleFormatter::tool_list(self.use_case.catalog()));
                CommandOutcome::Continue
            }
            "/session" => {
                print!("{}", ConsoleFormatter::section_header("Session"));
                println!("  id:        {}", self.session.id());
                println!("  messages:  {}", self.session.message_count());
                println!(
                    "  provider:  {} ({})",
                    self.use_case.provider().name(),
                    self.use_case.provider().model()
                );
                println!();
                CommandOutcome::Continue
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                CommandOutcome::Continue
            }
        }
    }
}
