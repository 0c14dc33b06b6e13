//! Cards and the per-round deck.
//!
//! ## Key Types
//!
//! - `CardId`: Positional identifier, unique within a deck
//! - `Card`: Text plus hidden trap state and public reveal state
//! - `Deck`: Ordered cards for the current round
//! - `DeckSource`: Fresh item texts, or reuse of the previous deck's texts

pub mod card;
pub mod deck;

pub use card::{Card, CardId, RANDOM_PLACER};
pub use deck::{Deck, DeckSource};
