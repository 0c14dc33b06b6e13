//! Player identification and the ordered roster.
//!
//! ## PlayerId
//!
//! Opaque player identifier. Ids are allocated by the [`Roster`] and never
//! reused within a roster, so an id stays valid across restarts even though
//! AI participants are dropped.
//!
//! ## Roster
//!
//! Insertion-ordered collection of players. Roster order is turn order and
//! trap-placement order. Elimination is a status change, never a removal.

use serde::{Deserialize, Serialize};

/// Maximum display name length, in characters.
pub const MAX_NAME_LEN: usize = 10;

/// Display name given to the automatic opponent.
pub const AI_NAME: &str = "SYSTEM_AI";

/// Avatar given to the automatic opponent.
pub const AI_AVATAR: &str = "🤖";

/// Avatar symbols offered in the lobby, in picker order.
pub const AVATARS: [&str; 24] = [
    "💀", "🤖", "👽", "🤡", "👹", "🤠", "👻", "🎃",
    "👾", "👿", "🦄", "🐲", "🐹", "🐱", "🐼", "🦊",
    "🦁", "🐯", "🐙", "🦖", "🧛", "🧟", "🕵️", "🥷",
];

/// The avatar suggested after `current` has been taken.
///
/// Unknown avatars restart the cycle at the first symbol.
///
/// ```
/// use safe_nuked::core::{next_avatar, AVATARS};
///
/// assert_eq!(next_avatar(AVATARS[0]), AVATARS[1]);
/// assert_eq!(next_avatar(AVATARS[23]), AVATARS[0]);
/// ```
#[must_use]
pub fn next_avatar(current: &str) -> &'static str {
    let next = AVATARS
        .iter()
        .position(|&a| a == current)
        .map_or(0, |i| (i + 1) % AVATARS.len());
    AVATARS[next]
}

/// Opaque player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Lifecycle status of a player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerStatus {
    #[default]
    Alive,
    Eliminated,
    Winner,
}

/// Who makes decisions for a player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Controller {
    /// A person at the shared screen.
    #[default]
    Human,
    /// The automatic opponent. Acts through scheduled tasks.
    Ai,
}

/// A participant in the game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// Trimmed, at most [`MAX_NAME_LEN`] characters.
    pub name: String,
    pub status: PlayerStatus,
    pub avatar: String,
    pub is_host: bool,
    pub controller: Controller,
}

impl Player {
    /// Check if the player is still in the game.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.status == PlayerStatus::Alive
    }

    /// Check if the automatic opponent controls this player.
    #[must_use]
    pub fn is_ai(&self) -> bool {
        self.controller == Controller::Ai
    }
}

/// Normalize a display name: trim, then keep the first [`MAX_NAME_LEN`] chars.
///
/// Returns `None` for names that are blank after trimming.
#[must_use]
pub fn normalize_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_NAME_LEN).collect())
}

/// Ordered player collection. Order is turn order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<Player>,
    next_id: u32,
}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a human player.
    ///
    /// No-op returning `None` if the name is blank after trimming.
    /// The first player added becomes host.
    pub fn add_player(&mut self, name: &str, avatar: &str) -> Option<PlayerId> {
        let name = normalize_name(name)?;
        Some(self.push(name, avatar.to_string(), Controller::Human))
    }

    /// Add the automatic opponent.
    pub fn add_ai_opponent(&mut self) -> PlayerId {
        self.push(AI_NAME.to_string(), AI_AVATAR.to_string(), Controller::Ai)
    }

    fn push(&mut self, name: String, avatar: String, controller: Controller) -> PlayerId {
        let id = PlayerId(self.next_id);
        self.next_id += 1;
        let is_host = self.players.is_empty() && controller == Controller::Human;
        self.players.push(Player {
            id,
            name,
            status: PlayerStatus::Alive,
            avatar,
            is_host,
            controller,
        });
        id
    }

    /// Set a player's status. Returns false for unknown ids.
    pub fn set_status(&mut self, id: PlayerId, status: PlayerStatus) -> bool {
        match self.players.iter_mut().find(|p| p.id == id) {
            Some(player) => {
                player.status = status;
                true
            }
            None => false,
        }
    }

    /// Alive players other than `excluded`, in roster order.
    #[must_use]
    pub fn alive_except(&self, excluded: PlayerId) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|p| p.id != excluded && p.is_alive())
            .collect()
    }

    /// Number of alive players.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_alive()).count()
    }

    /// Get a player by id.
    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Get the player at a roster position.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    /// Roster position of a player.
    #[must_use]
    pub fn index_of(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    /// The player currently holding `Winner`, if any.
    #[must_use]
    pub fn winner(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.status == PlayerStatus::Winner)
    }

    /// Number of players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Check if nobody has joined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Iterate in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Drop AI participants and bring everyone else back to `Alive`.
    pub fn reset_for_lobby(&mut self) {
        self.players.retain(|p| !p.is_ai());
        for player in &mut self.players {
            player.status = PlayerStatus::Alive;
        }
    }
}
