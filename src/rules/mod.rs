//! Game rules that do not depend on scheduling.
//!
//! - `advance`: who acts next
//! - `evaluate` / `settle`: whether an elimination ended the game
//!
//! The engine calls into these; they never look at phases or timers.

pub mod turn;
pub mod win;

pub use turn::advance;
pub use win::{evaluate, settle, Verdict};
