//! Uniform random trap placement.

use crate::cards::{Deck, RANDOM_PLACER};
use crate::core::GameRng;

/// Number of traps random placement arms for a deck of `deck_size` cards.
///
/// At least one card always stays safe.
#[must_use]
pub fn clamp_trap_count(requested: usize, deck_size: usize) -> usize {
    requested.min(deck_size.saturating_sub(1))
}

/// Arm `min(requested, deck.len() - 1)` distinct cards, chosen uniformly.
///
/// Every armed card is tagged with [`RANDOM_PLACER`]. Draws that land on an
/// already armed card are redrawn; the clamp keeps at least one unarmed card,
/// so the loop terminates. Returns the number of cards armed.
pub fn assign_random(deck: &mut Deck, requested: usize, rng: &mut GameRng) -> usize {
    let unarmed = deck.len() - deck.trap_count();
    let target = clamp_trap_count(requested, deck.len()).min(unarmed);

    let mut placed = 0;
    while placed < target {
        let index = rng.gen_index(deck.len());
        if let Some(card) = deck.at_mut(index) {
            if !card.is_trap {
                card.arm(RANDOM_PLACER);
                placed += 1;
            }
        }
    }

    tracing::debug!(requested, placed, deck_size = deck.len(), "random traps armed");
    placed
}
