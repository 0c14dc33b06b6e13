//! Game configuration types.
//!
//! The host assembles a [`GameConfig`] in the lobby:
//! - `GameMode`: flavor of generated content, and whether turns are timed
//! - `ContentSource`: generated by the content provider, or typed in by hand
//! - `TrapPlacement`: random, or placed by the players in turn
//!
//! Manual card entry always uses random traps. `ContentSource` encodes that
//! directly, so there is no way to ask for manual entry and manual traps at
//! the same time.

use std::ops::RangeInclusive;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Seconds a player has to act in timed mode.
pub const TURN_TIME_LIMIT: u32 = 10;

/// Allowed deck sizes.
pub const DECK_SIZE_RANGE: RangeInclusive<usize> = 12..=24;

/// Deck sizes move in steps of this many cards.
pub const DECK_SIZE_STEP: usize = 4;

/// Upper bound on the trap quota regardless of deck size.
pub const MAX_TRAP_QUOTA: usize = 8;

/// The trap quota must leave at least this many cards untrapped.
pub const MIN_SAFE_CARDS: usize = 4;

/// Content flavor requested from the content provider.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// A random everyday category.
    #[default]
    Classic,
    /// Funny or edgy categories.
    Party,
    /// Quick-thinking categories, with a per-turn countdown.
    Timed,
    /// Items generated for a host-supplied topic.
    Custom(String),
}

impl GameMode {
    /// Check if turns run against the clock.
    #[must_use]
    pub fn is_timed(&self) -> bool {
        matches!(self, GameMode::Timed)
    }

    /// The custom topic, if one was supplied.
    #[must_use]
    pub fn topic(&self) -> Option<&str> {
        match self {
            GameMode::Custom(topic) => Some(topic.as_str()),
            _ => None,
        }
    }

    /// Upper-case label, as shown in the lobby.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            GameMode::Classic => "CLASSIC",
            GameMode::Party => "PARTY",
            GameMode::Timed => "TIMED",
            GameMode::Custom(_) => "CUSTOM",
        }
    }
}

/// How traps are armed at the start of each round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrapPlacement {
    /// Traps are spread uniformly at random.
    #[default]
    Random,
    /// Players take turns choosing trap cards, blind to earlier choices.
    Manual,
}

/// Where card texts come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentSource {
    /// Fetched from the content provider.
    Generated(TrapPlacement),
    /// Typed in by the host before the first round. Traps are always random.
    ManualEntry,
}

impl Default for ContentSource {
    fn default() -> Self {
        ContentSource::Generated(TrapPlacement::Random)
    }
}

impl ContentSource {
    /// Trap placement used by rounds built from this source.
    #[must_use]
    pub fn trap_placement(self) -> TrapPlacement {
        match self {
            ContentSource::Generated(placement) => placement,
            ContentSource::ManualEntry => TrapPlacement::Random,
        }
    }
}

/// Delays used by scheduled tasks. Purely for pacing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pacing {
    /// Before the AI reveals a card.
    pub ai_think: Duration,
    /// Before the AI places a trap.
    pub ai_place: Duration,
    /// Elimination message shown before reshuffling.
    pub elimination_pause: Duration,
    /// Reshuffle message shown before the new deck appears.
    pub reshuffle_pause: Duration,
    /// Countdown granularity in timed mode.
    pub tick: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            ai_think: Duration::from_millis(1500),
            ai_place: Duration::from_millis(1000),
            elimination_pause: Duration::from_millis(3000),
            reshuffle_pause: Duration::from_millis(2000),
            tick: Duration::from_secs(1),
        }
    }
}

impl Pacing {
    /// Every delay set to zero. Useful for tests and headless play.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            ai_think: Duration::ZERO,
            ai_place: Duration::ZERO,
            elimination_pause: Duration::ZERO,
            reshuffle_pause: Duration::ZERO,
            tick: Duration::ZERO,
        }
    }
}

/// Configuration rejected at game start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("deck size {0} must be 12, 16, 20 or 24")]
    DeckSize(usize),

    #[error("trap quota {quota} must be between 1 and {max}")]
    TrapQuota { quota: usize, max: usize },

    #[error("custom mode needs a topic")]
    MissingTopic,

    #[error("turn time limit must be at least one second")]
    TurnTimeLimit,

    #[error("safe commentary odds must be between 0 and 1")]
    CommentaryOdds,
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub mode: GameMode,

    pub source: ContentSource,

    /// Cards per round.
    pub deck_size: usize,

    /// Traps per round. Random placement clamps to `deck_size - 1`; manual
    /// placement counts placement actions, not distinct trapped cards.
    pub trap_quota: usize,

    /// Countdown start in seconds.
    pub turn_time_limit: u32,

    /// Chance that a human's safe reveal asks the narrator for commentary.
    pub safe_commentary_odds: f64,

    pub pacing: Pacing,

    /// Seed for trap layouts, AI picks and commentary odds.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Classic,
            source: ContentSource::default(),
            deck_size: 12,
            trap_quota: 4,
            turn_time_limit: TURN_TIME_LIMIT,
            safe_commentary_odds: 0.3,
            pacing: Pacing::default(),
            seed: 42,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: ContentSource) -> Self {
        self.source = source;
        self
    }

    #[must_use]
    pub fn with_deck_size(mut self, deck_size: usize) -> Self {
        self.deck_size = deck_size;
        self
    }

    #[must_use]
    pub fn with_trap_quota(mut self, quota: usize) -> Self {
        self.trap_quota = quota;
        self
    }

    #[must_use]
    pub fn with_turn_time_limit(mut self, seconds: u32) -> Self {
        self.turn_time_limit = seconds;
        self
    }

    #[must_use]
    pub fn with_safe_commentary_odds(mut self, odds: f64) -> Self {
        self.safe_commentary_odds = odds;
        self
    }

    #[must_use]
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Largest trap quota allowed for the configured deck size.
    #[must_use]
    pub fn max_trap_quota(&self) -> usize {
        MAX_TRAP_QUOTA.min(self.deck_size.saturating_sub(MIN_SAFE_CARDS))
    }

    /// Trap placement used by every round.
    #[must_use]
    pub fn trap_placement(&self) -> TrapPlacement {
        self.source.trap_placement()
    }

    /// Check the configuration before a game starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let deck_ok = DECK_SIZE_RANGE.contains(&self.deck_size)
            && (self.deck_size - DECK_SIZE_RANGE.start()) % DECK_SIZE_STEP == 0;
        if !deck_ok {
            return Err(ConfigError::DeckSize(self.deck_size));
        }

        let max = self.max_trap_quota();
        if self.trap_quota == 0 || self.trap_quota > max {
            return Err(ConfigError::TrapQuota {
                quota: self.trap_quota,
                max,
            });
        }

        if let (GameMode::Custom(topic), ContentSource::Generated(_)) = (&self.mode, self.source) {
            if topic.trim().is_empty() {
                return Err(ConfigError::MissingTopic);
            }
        }

        if self.turn_time_limit == 0 {
            return Err(ConfigError::TurnTimeLimit);
        }

        if !(0.0..=1.0).contains(&self.safe_commentary_odds) {
            return Err(ConfigError::CommentaryOdds);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.mode, GameMode::Classic);
        assert_eq!(config.deck_size, 12);
        assert_eq!(config.trap_quota, 4);
        assert_eq!(config.turn_time_limit, TURN_TIME_LIMIT);
        assert_eq!(config.trap_placement(), TrapPlacement::Random);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GameConfig::default()
            .with_mode(GameMode::Timed)
            .with_deck_size(16)
            .with_trap_quota(6)
            .with_seed(7);

        assert!(config.mode.is_timed());
        assert_eq!(config.deck_size, 16);
        assert_eq!(config.trap_quota, 6);
        assert_eq!(config.seed, 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deck_size_steps() {
        for size in [12, 16, 20, 24] {
            assert!(GameConfig::default().with_deck_size(size).validate().is_ok());
        }
        for size in [0, 8, 13, 18, 28] {
            assert_eq!(
                GameConfig::default().with_deck_size(size).validate(),
                Err(ConfigError::DeckSize(size))
            );
        }
    }

    #[test]
    fn test_trap_quota_cap() {
        // 12 cards leave room for at most 8 traps
        let config = GameConfig::default().with_trap_quota(9);
        assert_eq!(
            config.validate(),
            Err(ConfigError::TrapQuota { quota: 9, max: 8 })
        );

        let config = GameConfig::default().with_trap_quota(0);
        assert!(matches!(config.validate(), Err(ConfigError::TrapQuota { .. })));

        let config = GameConfig::default().with_deck_size(24).with_trap_quota(8);
        assert_eq!(config.max_trap_quota(), 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_topic_required_for_generated_content() {
        let config = GameConfig::default().with_mode(GameMode::Custom("  ".into()));
        assert_eq!(config.validate(), Err(ConfigError::MissingTopic));

        // Manual entry does not consult the provider, so no topic is needed
        let config = config.with_source(ContentSource::ManualEntry);
        assert!(config.validate().is_ok());

        let config = GameConfig::default().with_mode(GameMode::Custom("Cheese".into()));
        assert!(config.validate().is_ok());
        assert_eq!(config.mode.topic(), Some("Cheese"));
    }

    #[test]
    fn test_manual_entry_forces_random_traps() {
        assert_eq!(ContentSource::ManualEntry.trap_placement(), TrapPlacement::Random);
        assert_eq!(
            ContentSource::Generated(TrapPlacement::Manual).trap_placement(),
            TrapPlacement::Manual
        );
    }

    #[test]
    fn test_zero_time_limit_rejected() {
        let config = GameConfig::default().with_turn_time_limit(0);
        assert_eq!(config.validate(), Err(ConfigError::TurnTimeLimit));
    }

    #[test]
    fn test_commentary_odds_range() {
        for odds in [0.0, 0.3, 1.0] {
            let config = GameConfig::default().with_safe_commentary_odds(odds);
            assert!(config.validate().is_ok());
        }
        for odds in [f64::NAN, f64::INFINITY, -0.1, 1.5] {
            let config = GameConfig::default().with_safe_commentary_odds(odds);
            assert_eq!(config.validate(), Err(ConfigError::CommentaryOdds));
        }
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(GameMode::Classic.label(), "CLASSIC");
        assert_eq!(GameMode::Custom("x".into()).label(), "CUSTOM");
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::default()
            .with_mode(GameMode::Custom("Volcanoes".into()))
            .with_source(ContentSource::Generated(TrapPlacement::Manual));
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
