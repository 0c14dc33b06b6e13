//! The ordered card set for the current round.
//!
//! Decks are rebuilt every round through [`Deck::build`]. A round either
//! starts from fresh item texts (provider payload or manual entry) or reuses
//! the texts of the previous round's deck; both go through the same path.

use serde::{Deserialize, Serialize};

use super::card::{Card, CardId};

/// Where a new deck's texts come from.
#[derive(Clone, Debug)]
pub enum DeckSource<'a> {
    /// New item texts, one card per item.
    Fresh(Vec<String>),
    /// The previous deck, stripped of trap, reveal and placer state.
    Reuse(&'a Deck),
}

/// Ordered card sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Build an unarmed, face-down deck.
    #[must_use]
    pub fn build(source: DeckSource<'_>) -> Self {
        let cards = match source {
            DeckSource::Fresh(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, text)| Card::new(CardId(i as u16), text))
                .collect(),
            DeckSource::Reuse(previous) => previous.cards.iter().map(Card::stripped).collect(),
        };
        Self { cards }
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the deck has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All cards in order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Get a card.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index()).filter(|c| c.id == id)
    }

    /// Get a mutable card.
    pub fn get_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(id.index()).filter(|c| c.id == id)
    }

    /// Card at a position.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Mutable card at a position.
    pub fn at_mut(&mut self, index: usize) -> Option<&mut Card> {
        self.cards.get_mut(index)
    }

    /// Flip a face-down card.
    ///
    /// Returns `None` if the card is unknown or already revealed.
    pub fn reveal(&mut self, id: CardId) -> Option<&Card> {
        let card = self.get_mut(id)?;
        if card.is_revealed {
            return None;
        }
        card.is_revealed = true;
        Some(&*card)
    }

    /// Flip every card face up.
    pub fn reveal_all(&mut self) {
        for card in &mut self.cards {
            card.is_revealed = true;
        }
    }

    /// Number of armed cards.
    #[must_use]
    pub fn trap_count(&self) -> usize {
        self.cards.iter().filter(|c| c.is_trap).count()
    }

    /// Face-down cards without a trap.
    #[must_use]
    pub fn safe_remaining(&self) -> usize {
        self.cards
            .iter()
            .filter(|c| !c.is_trap && !c.is_revealed)
            .count()
    }

    /// Ids of face-down cards.
    pub fn unrevealed(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().filter(|c| !c.is_revealed).map(|c| c.id)
    }

    /// Card texts in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.cards.iter().map(|c| c.text.as_str())
    }
}
