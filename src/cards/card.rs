//! A single card in the round's deck.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Card identifier, unique within a deck.
///
/// Ids are positional: the card built from the `n`th item text gets
/// `CardId(n)`, and a rebuilt deck keeps the same id/text pairing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u16);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Position of the card in its deck.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "card-{}", self.0)
    }
}

/// Who armed a trap. Random placement records [`RANDOM_PLACER`].
pub const RANDOM_PLACER: &str = "AI";

/// A card with its hidden and revealed state.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub text: String,
    pub is_trap: bool,
    pub is_revealed: bool,
    /// One name per placement, in placement order. Repeats are kept.
    pub placed_by: SmallVec<[String; 2]>,
}

impl Card {
    /// Create an unarmed, face-down card.
    #[must_use]
    pub fn new(id: CardId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            is_trap: false,
            is_revealed: false,
            placed_by: SmallVec::new(),
        }
    }

    /// Arm the card and record who did it.
    pub fn arm(&mut self, placer: &str) {
        self.is_trap = true;
        self.placed_by.push(placer.to_string());
    }

    /// Placer names joined with `", "`, or `None` if nobody armed it.
    ///
    /// ```
    /// use safe_nuked::cards::{Card, CardId};
    ///
    /// let mut card = Card::new(CardId::new(0), "Gouda");
    /// card.arm("Alice");
    /// card.arm("Bob");
    /// assert_eq!(card.placed_by_label().as_deref(), Some("Alice, Bob"));
    /// ```
    #[must_use]
    pub fn placed_by_label(&self) -> Option<String> {
        if self.placed_by.is_empty() {
            None
        } else {
            Some(self.placed_by.join(", "))
        }
    }

    /// A fresh copy with the same id and text and no trap or reveal state.
    #[must_use]
    pub fn stripped(&self) -> Self {
        Self::new(self.id, self.text.clone())
    }
}
