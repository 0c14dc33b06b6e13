//! Game state: public and private information.
//!
//! ## PublicState
//!
//! Observable by everyone at the table:
//! - Phase, round, category
//! - Roster with statuses, acting player, countdown
//! - Game-master log and placement progress
//! - Action history
//!
//! ## GameState
//!
//! Complete state including:
//! - Public state
//! - The deck with hidden trap flags and placers
//! - RNG streams
//! - Bookkeeping that guards late async completions (generation, session,
//!   narration sequence)

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{ActionRecord, RecordKind};
use super::config::GameConfig;
use super::player::{Player, PlayerId, Roster};
use super::rng::GameRng;
use crate::cards::{CardId, Deck};
use crate::traps::ManualPlacement;

/// Log lines kept for display. Older lines are dropped.
pub const LOG_CAPACITY: usize = 50;

/// First line of every fresh game log.
pub const INITIAL_LOG: &str = "System initialized. Awaiting players.";

/// Game lifecycle phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Roster assembly and configuration.
    #[default]
    Lobby,
    /// Host is typing card texts.
    ManualEntry,
    /// Content fetch or deck rebuild in flight. Deck interaction closed.
    LoadingRound,
    /// Players arm cards one at a time.
    SetupTraps,
    /// Players take turns revealing cards.
    Playing,
    /// Terminal. Only restart is accepted.
    GameOver,
}

/// Public game state, observable by all players.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PublicState {
    pub phase: Phase,

    /// Round number (starts at 1).
    pub round: u32,

    /// Category label of the current deck.
    pub category: String,

    pub roster: Roster,

    /// Roster position of the acting player.
    pub current_player: usize,

    /// Seconds left on the countdown. Only runs in timed mode.
    pub time_left: u32,

    /// Game-master lines, oldest first.
    pub log: Vector<String>,

    /// Set while a narration request is outstanding. Display only.
    pub narrating: bool,

    /// Manual placement progress, during `SetupTraps`.
    pub placement: Option<ManualPlacement>,

    pub history: Vector<ActionRecord>,
}

impl PublicState {
    /// Create the lobby state.
    #[must_use]
    pub fn new(turn_time_limit: u32) -> Self {
        let mut log = Vector::new();
        log.push_back(INITIAL_LOG.to_string());
        Self {
            phase: Phase::Lobby,
            round: 1,
            category: String::new(),
            roster: Roster::new(),
            current_player: 0,
            time_left: turn_time_limit,
            log,
            narrating: false,
            placement: None,
            history: Vector::new(),
        }
    }

    /// The acting player.
    #[must_use]
    pub fn current(&self) -> Option<&Player> {
        self.roster.at(self.current_player)
    }

    /// The latest game-master line.
    #[must_use]
    pub fn latest_log(&self) -> Option<&str> {
        self.log.back().map(String::as_str)
    }

    /// Roster position of the next trap placer, during `SetupTraps`.
    #[must_use]
    pub fn placer_index(&self) -> Option<usize> {
        self.placement?.placer_index(self.roster.len())
    }

    /// Append a step to the history.
    pub fn record(&mut self, player: PlayerId, kind: RecordKind) {
        let sequence = self.history.len() as u32;
        self.history.push_back(ActionRecord {
            player,
            kind,
            round: self.round,
            sequence,
        });
    }
}

/// A card as the table sees it.
///
/// Trap flag and placers stay hidden until the card is face up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub id: CardId,
    pub text: String,
    pub is_revealed: bool,
    /// `None` while face down.
    pub is_trap: Option<bool>,
    /// `None` while face down or never armed.
    pub placed_by: Option<String>,
}

/// Full game state including hidden information.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Public state (observable by all).
    pub public: PublicState,

    /// Current round's cards with trap flags.
    pub deck: Deck,

    /// Trap layouts.
    pub trap_rng: GameRng,

    /// AI card choices.
    pub ai_rng: GameRng,

    /// Whether a safe reveal earns commentary.
    pub commentary_rng: GameRng,

    /// Bumped whenever pending scheduled work should stop applying.
    generation: u64,

    /// Bumped on restart; narration from an earlier game never applies.
    session: u32,

    /// Engine-written log lines, ever. Narration does not count.
    local_lines: u64,

    /// Narration tickets issued.
    narration_issued: u64,

    /// Sequence of the newest narration applied to the log.
    narration_applied: u64,

    /// Narration requests not yet answered.
    narration_pending: u32,
}

impl GameState {
    /// Create a new game state in the lobby.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let rng = GameRng::new(config.seed);
        Self {
            public: PublicState::new(config.turn_time_limit),
            deck: Deck::default(),
            trap_rng: rng.for_context("traps"),
            ai_rng: rng.for_context("ai"),
            commentary_rng: rng.for_context("commentary"),
            generation: 0,
            session: 0,
            local_lines: 1,
            narration_issued: 0,
            narration_applied: 0,
            narration_pending: 0,
        }
    }

    /// Reseed every stream, keeping everything else.
    pub fn reseed(&mut self, seed: u64) {
        let rng = GameRng::new(seed);
        self.trap_rng = rng.for_context("traps");
        self.ai_rng = rng.for_context("ai");
        self.commentary_rng = rng.for_context("commentary");
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.public.phase
    }

    /// Change phase. Invalidates pending scheduled work.
    pub fn set_phase(&mut self, phase: Phase) {
        self.public.phase = phase;
        self.bump();
    }

    /// Invalidate pending scheduled work.
    pub fn bump(&mut self) {
        self.generation += 1;
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn session(&self) -> u32 {
        self.session
    }

    /// Start a new session after restart. Outstanding narration is forgotten.
    pub fn next_session(&mut self) {
        self.session += 1;
        self.narration_pending = 0;
        self.public.narrating = false;
        self.bump();
    }

    /// Engine-written log lines, ever.
    #[must_use]
    pub fn local_lines(&self) -> u64 {
        self.local_lines
    }

    /// Write a game-master line.
    pub fn say(&mut self, line: impl Into<String>) {
        self.push_log(line.into());
        self.local_lines += 1;
    }

    fn push_log(&mut self, line: String) {
        tracing::trace!(%line, "game master");
        self.public.log.push_back(line);
        while self.public.log.len() > LOG_CAPACITY {
            self.public.log.pop_front();
        }
    }

    /// Reserve the next narration sequence and mark narration as pending.
    pub fn issue_narration(&mut self) -> u64 {
        self.narration_issued += 1;
        self.narration_pending += 1;
        self.public.narrating = true;
        self.narration_issued
    }

    /// Sequence of the newest narration applied so far.
    #[must_use]
    pub fn narration_applied(&self) -> u64 {
        self.narration_applied
    }

    /// A narration request came back, applied or not.
    pub fn narration_answered(&mut self) {
        self.narration_pending = self.narration_pending.saturating_sub(1);
        self.public.narrating = self.narration_pending > 0;
    }

    /// Write a narration line issued under `seq`.
    pub fn apply_narration(&mut self, seq: u64, line: String) {
        self.narration_applied = seq;
        self.push_log(line);
    }

    /// The deck as the table sees it.
    #[must_use]
    pub fn public_cards(&self) -> Vec<CardView> {
        self.deck
            .cards()
            .iter()
            .map(|card| CardView {
                id: card.id,
                text: card.text.clone(),
                is_revealed: card.is_revealed,
                is_trap: card.is_revealed.then_some(card.is_trap),
                placed_by: if card.is_revealed {
                    card.placed_by_label()
                } else {
                    None
                },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::DeckSource;
    use crate::core::AVATARS;

    #[test]
    fn test_new_state_is_lobby() {
        let state = GameState::new(&GameConfig::default());
        assert_eq!(state.phase(), Phase::Lobby);
        assert_eq!(state.public.round, 1);
        assert_eq!(state.public.time_left, 10);
        assert_eq!(state.public.latest_log(), Some(INITIAL_LOG));
        assert!(state.deck.is_empty());
    }

    #[test]
    fn test_set_phase_bumps_generation() {
        let mut state = GameState::new(&GameConfig::default());
        let before = state.generation();
        state.set_phase(Phase::LoadingRound);
        assert_eq!(state.phase(), Phase::LoadingRound);
        assert!(state.generation() > before);
    }

    #[test]
    fn test_say_caps_log() {
        let mut state = GameState::new(&GameConfig::default());
        for i in 0..(LOG_CAPACITY + 10) {
            state.say(format!("line {}", i));
        }
        assert_eq!(state.public.log.len(), LOG_CAPACITY);
        assert_eq!(state.public.latest_log(), Some("line 59"));
        assert_eq!(state.local_lines(), 1 + LOG_CAPACITY as u64 + 10);
    }

    #[test]
    fn test_narration_bookkeeping() {
        let mut state = GameState::new(&GameConfig::default());
        let lines = state.local_lines();

        let first = state.issue_narration();
        let second = state.issue_narration();
        assert!(second > first);
        assert!(state.public.narrating);

        state.apply_narration(second, "Boom.".into());
        state.narration_answered();
        assert!(state.public.narrating);
        state.narration_answered();
        assert!(!state.public.narrating);

        assert_eq!(state.narration_applied(), second);
        assert_eq!(state.public.latest_log(), Some("Boom."));
        // Narration is not an engine line
        assert_eq!(state.local_lines(), lines);
    }

    #[test]
    fn test_public_cards_hide_traps() {
        let mut state = GameState::new(&GameConfig::default());
        state.deck = Deck::build(DeckSource::Fresh(vec!["a".into(), "b".into()]));
        state.deck.get_mut(CardId(0)).unwrap().arm("Alice");
        state.deck.get_mut(CardId(1)).unwrap().arm("Bob");
        state.deck.reveal(CardId(1));

        let view = state.public_cards();
        assert_eq!(view[0].is_trap, None);
        assert_eq!(view[0].placed_by, None);
        assert_eq!(view[1].is_trap, Some(true));
        assert_eq!(view[1].placed_by.as_deref(), Some("Bob"));
    }

    #[test]
    fn test_record_sequences() {
        let mut state = GameState::new(&GameConfig::default());
        let id = state.public.roster.add_player("Alice", AVATARS[0]).unwrap();
        state.public.record(id, RecordKind::Detonate);
        state.public.record(id, RecordKind::PlaceTrap);

        let seqs: Vec<_> = state.public.history.iter().map(|r| r.sequence).collect();
        assert_eq!(seqs, vec![0, 1]);
        assert_eq!(state.public.current().map(|p| p.id), Some(id));
    }

    #[test]
    fn test_public_state_serialization() {
        let state = GameState::new(&GameConfig::default());
        let json = serde_json::to_string(&state.public).unwrap();
        let deserialized: PublicState = serde_json::from_str(&json).unwrap();
        assert_eq!(state.public, deserialized);
    }
}
