//! # safe-nuked
//!
//! Turn and round state machine for a hidden-trap elimination party game.
//!
//! Players take turns flipping cards from a shared deck. Some cards are
//! traps; flipping one eliminates the player. The last player standing wins.
//!
//! ## Design Principles
//!
//! 1. **Synchronous Core**: The engine never awaits. It returns directives
//!    (fetch content, narrate, run this task later) and the host feeds the
//!    results back.
//!
//! 2. **Stamped Deferred Work**: Every scheduled task carries the round,
//!    phase and generation it was scheduled for. Anything stale is dropped,
//!    so a late timer or provider reply can never act on a newer state.
//!
//! 3. **Deterministic**: Trap layouts, AI picks and commentary odds come from
//!    seeded ChaCha streams. Same seed and inputs, same game.
//!
//! ## Modules
//!
//! - `core`: Players, configuration, actions, state, RNG, errors
//! - `cards`: Cards and the per-round deck
//! - `traps`: Random and manual trap assignment
//! - `rules`: Turn order and win evaluation
//! - `content`: Content provider, narrator, accounts, offline content
//! - `engine`: The state machine and its directives
//! - `session`: Tokio worker that hosts a game behind a cloneable handle

pub mod core;
pub mod cards;
pub mod traps;
pub mod rules;
pub mod content;
pub mod engine;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, CardView, ConfigError, ContentSource, Controller, GameConfig,
    GameError, GameMode, GameRng, GameState, Pacing, Phase, Player, PlayerId, PlayerStatus,
    PublicState, Roster, TrapPlacement,
};

pub use crate::cards::{Card, CardId, Deck, DeckSource};

pub use crate::traps::{assign_random, ManualPlacement};

pub use crate::rules::Verdict;

pub use crate::content::{
    Account, AccountService, ContentProvider, ContentRequest, InMemoryAccounts, NarrationEvent,
    Narrator, OfflineContent, ProviderError, RoundContent,
};

pub use crate::engine::{Directive, Game, NarrationTicket, ResetCause, Stamp, Task, TaskKind};

pub use crate::session::{GameView, Session, SessionError, SessionHandle};
