//! Errors surfaced to the host for rejected lobby and setup input.
//!
//! Only configuration-class problems are errors. Out-of-turn clicks, early
//! confirms and stale scheduled tasks are ignored by the engine instead.

use thiserror::Error;

use super::config::ConfigError;
use super::state::Phase;

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("player name is empty")]
    EmptyName,

    #[error("no players have joined")]
    NoPlayers,

    #[error("{action} needs the {expected:?} phase, game is in {actual:?}")]
    WrongPhase {
        action: &'static str,
        expected: Phase,
        actual: Phase,
    },

    #[error("manual entry needs {required} non-empty cards, got {filled}")]
    ManualEntryIncomplete { filled: usize, required: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
