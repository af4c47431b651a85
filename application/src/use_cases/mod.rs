//! Use cases (application services)

pub mod run_conversation;
pub(crate) mod shared;
