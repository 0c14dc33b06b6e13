//! Core types: players, configuration, actions, state, RNG, errors.
//!
//! Everything the engine mutates lives here. The rules and engine modules
//! operate on these types rather than owning their own copies.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionRecord, RecordKind};
pub use config::{
    ConfigError, ContentSource, GameConfig, GameMode, Pacing, TrapPlacement, DECK_SIZE_RANGE,
    DECK_SIZE_STEP, MAX_TRAP_QUOTA, MIN_SAFE_CARDS, TURN_TIME_LIMIT,
};
pub use error::{GameError, Result};
pub use player::{
    next_avatar, normalize_name, Controller, Player, PlayerId, PlayerStatus, Roster, AI_AVATAR,
    AI_NAME, AVATARS, MAX_NAME_LEN,
};
pub use rng::GameRng;
pub use state::{CardView, GameState, Phase, PublicState, INITIAL_LOG, LOG_CAPACITY};
