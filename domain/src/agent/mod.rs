//! Agent domain module
//!
//! Rules of the bounded tool-use loop: the states one user turn moves
//! through and the turn budget.

pub mod loop_state;

pub use loop_state::{LoopState, MAX_TURNS};
