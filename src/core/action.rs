//! User actions and the action history.
//!
//! Actions are what a person at the screen can do. Scheduled work (AI moves,
//! countdown ticks, provider completions) is not an action; it arrives as an
//! engine `Task` and is checked against the state it was scheduled for.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::cards::CardId;

/// A user-initiated action.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Leave the lobby and begin the first round.
    Start,
    /// Flip a card on the acting player's turn.
    RevealCard(CardId),
    /// Arm a card during manual placement, for the current placer.
    PlaceTrap(CardId),
    /// Leave manual placement once the quota is met.
    ConfirmTraps,
    /// Card texts typed in by the host, one per card.
    SubmitManualCards(Vec<String>),
    /// Back to the lobby after the game ended.
    Restart,
}

impl Action {
    /// Short name for logs and errors.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::RevealCard(_) => "reveal",
            Action::PlaceTrap(_) => "place trap",
            Action::ConfirmTraps => "confirm traps",
            Action::SubmitManualCards(_) => "submit manual cards",
            Action::Restart => "restart",
        }
    }
}

/// What happened in a recorded step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    /// A card was flipped; `trap` tells whether it eliminated the player.
    Reveal { card: CardId, trap: bool },
    /// A card was armed during manual placement. Which card stays private.
    PlaceTrap,
    /// The countdown ran out.
    Detonate,
}

/// A recorded step with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who acted (or placed, or ran out of time).
    pub player: PlayerId,

    pub kind: RecordKind,

    /// Round number when it happened.
    pub round: u32,

    /// Position in the game's history.
    pub sequence: u32,
}
