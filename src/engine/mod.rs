//! The game engine.
//!
//! ## Key Types
//!
//! - `Game`: owns config and state; applies actions and resolves tasks
//! - `Directive`: work handed to the host (fetch, narrate, schedule)
//! - `Task` / `Stamp`: deferred work and the state it was scheduled for
//! - `NarrationTicket`: guards late narration replies
//!
//! Round lifecycle (loading, arming, resets, manual placement) lives in
//! `round`; turn play, elimination and restart in `game`.

pub mod directive;
pub mod game;
mod round;

pub use directive::{Directive, NarrationTicket, ResetCause, Stamp, Task, TaskKind};
pub use game::Game;
