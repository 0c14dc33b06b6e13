//! What a screen renders.

use serde::{Deserialize, Serialize};

use crate::core::{Action, CardView, PublicState};
use crate::engine::Game;

/// Everything the table may see, plus the controls that would do something.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameView {
    pub public: PublicState,
    pub cards: Vec<CardView>,
    pub legal_actions: Vec<Action>,
}

impl GameView {
    #[must_use]
    pub fn of(game: &Game) -> Self {
        Self {
            public: game.public().clone(),
            cards: game.state().public_cards(),
            legal_actions: game.legal_actions(),
        }
    }
}
