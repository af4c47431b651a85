//! Presentation layer for hostscope
//!
//! This crate contains the CLI definition, console rendering of turn
//! events, and the interactive chat REPL.

pub mod chat;
pub mod cli;
pub mod output;

// Re-export commonly used types
pub use chat::ChatRepl;
pub use cli::commands::Cli;
pub use output::console::{ConsoleFormatter, ConsoleTurnOutput};
