//! Sequential trap placement by the players.
//!
//! Placement rotates through the roster by position: placement `n` belongs
//! to the player at `n mod roster_len`. Players never see which cards are
//! already armed, so a card may be picked more than once; every pick counts
//! toward the quota, and the number of distinct armed cards can end up below
//! it. Finishing the last pick does not start play; a separate confirm does.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, Deck};
use crate::core::GameRng;

/// Progress of the placement phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualPlacement {
    quota: usize,
    placed: usize,
}

impl ManualPlacement {
    /// Start a placement phase with the given quota.
    #[must_use]
    pub fn new(quota: usize) -> Self {
        Self { quota, placed: 0 }
    }

    /// Placement actions taken so far.
    #[must_use]
    pub fn placed(&self) -> usize {
        self.placed
    }

    #[must_use]
    pub fn quota(&self) -> usize {
        self.quota
    }

    /// Check if every placement has been made. Confirm is gated on this.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.placed >= self.quota
    }

    /// Roster position of the player who places next.
    ///
    /// `None` once the quota is met or for an empty roster.
    #[must_use]
    pub fn placer_index(&self, roster_len: usize) -> Option<usize> {
        if self.is_complete() || roster_len == 0 {
            return None;
        }
        Some(self.placed % roster_len)
    }

    /// Arm `card` on behalf of `placer`.
    ///
    /// Armed cards may be picked again; the placer is appended either way.
    /// Returns false, without counting, if the quota is met or the card is
    /// not in the deck.
    pub fn place(&mut self, deck: &mut Deck, card: CardId, placer: &str) -> bool {
        if self.is_complete() {
            return false;
        }
        let Some(target) = deck.get_mut(card) else {
            return false;
        };
        target.arm(placer);
        self.placed += 1;
        tracing::debug!(%card, placer, placed = self.placed, quota = self.quota, "trap placed");
        true
    }

    /// A uniformly random card, armed or not. Used by the AI placer.
    #[must_use]
    pub fn random_pick(deck: &Deck, rng: &mut GameRng) -> Option<CardId> {
        if deck.is_empty() {
            return None;
        }
        deck.at(rng.gen_index(deck.len())).map(|c| c.id)
    }
}
