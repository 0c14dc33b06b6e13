//! Win evaluation after an elimination.

use serde::{Deserialize, Serialize};

use crate::cards::Deck;
use crate::core::{PlayerId, PlayerStatus, Roster};

/// Outcome of evaluating the roster after an elimination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Two or more players are still alive.
    Continue,
    /// Exactly one survivor, who now holds `Winner`.
    Winner(PlayerId),
    /// Nobody survived. No winner is set.
    NoSurvivors,
}

impl Verdict {
    /// Check if the game ended.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Verdict::Continue)
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(self, player: PlayerId) -> bool {
        self == Verdict::Winner(player)
    }
}

/// Decide the game state after `eliminated` dropped out.
///
/// Pure: counts alive players other than `eliminated` and does not touch the
/// roster.
#[must_use]
pub fn evaluate(roster: &Roster, eliminated: PlayerId) -> Verdict {
    let alive = roster.alive_except(eliminated);
    match alive.as_slice() {
        [] => Verdict::NoSurvivors,
        [survivor] => Verdict::Winner(survivor.id),
        _ => Verdict::Continue,
    }
}

/// Evaluate and apply the end-of-game transitions.
///
/// On a terminal verdict every card is revealed, and a lone survivor is
/// promoted to `Winner`. `Continue` leaves roster and deck untouched.
pub fn settle(roster: &mut Roster, deck: &mut Deck, eliminated: PlayerId) -> Verdict {
    let verdict = evaluate(roster, eliminated);
    if verdict.is_terminal() {
        deck.reveal_all();
    }
    if let Verdict::Winner(id) = verdict {
        roster.set_status(id, PlayerStatus::Winner);
    }
    verdict
}
