//! Prompt domain
//!
//! The system prompt sent with every provider call.

mod template;

pub use template::PromptTemplate;
