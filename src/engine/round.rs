//! Round lifecycle: loading a deck, arming it, and resetting it.
//!
//! A round reaches play through one path regardless of where its texts came
//! from: build the deck, arm it (random or manual), enter `Playing`. Resets
//! rebuild from the previous deck's texts; they never refetch content.

use crate::cards::{CardId, Deck, DeckSource};
use crate::content::RoundContent;
use crate::core::{Controller, Phase, RecordKind, TrapPlacement};
use crate::traps::{assign_random, ManualPlacement};

use super::directive::{Directive, ResetCause, TaskKind};
use super::game::Game;

impl Game {
    pub(super) fn on_content_ready(&mut self, content: RoundContent) -> Vec<Directive> {
        if self.state.phase() != Phase::LoadingRound {
            return Vec::new();
        }
        tracing::debug!(
            round = self.state.public.round,
            category = %content.category,
            fallback = content.is_fallback(),
            "round content ready"
        );
        self.state.public.category = content.category;
        self.state.deck = Deck::build(DeckSource::Fresh(content.items));
        self.arm_round()
    }

    /// Arm the freshly built deck and move on to setup or play.
    fn arm_round(&mut self) -> Vec<Directive> {
        match self.config.trap_placement() {
            TrapPlacement::Random => {
                assign_random(
                    &mut self.state.deck,
                    self.config.trap_quota,
                    &mut self.state.trap_rng,
                );
                self.enter_play()
            }
            TrapPlacement::Manual => {
                self.state.public.placement = Some(ManualPlacement::new(self.config.trap_quota));
                self.state.set_phase(Phase::SetupTraps);
                self.placement_tasks()
            }
        }
    }

    pub(super) fn enter_play(&mut self) -> Vec<Directive> {
        self.state.public.placement = None;
        self.state.public.time_left = self.config.turn_time_limit;
        self.state.set_phase(Phase::Playing);
        tracing::debug!(
            round = self.state.public.round,
            traps = self.state.deck.trap_count(),
            "round in play"
        );
        self.turn_tasks()
    }

    pub(super) fn begin_reshuffle(&mut self) -> Vec<Directive> {
        if self.state.phase() != Phase::LoadingRound {
            return Vec::new();
        }
        self.state.say("Reshuffling trap matrix...");
        self.state.bump();
        vec![self.schedule(
            self.config.pacing.reshuffle_pause,
            TaskKind::FinishReshuffle(ResetCause::Elimination),
        )]
    }

    /// Start the next round on the same texts.
    ///
    /// An exhausted deck hands the turn on here; an elimination already did.
    pub(super) fn finish_reshuffle(&mut self, cause: ResetCause) -> Vec<Directive> {
        if self.state.phase() != Phase::LoadingRound {
            return Vec::new();
        }
        self.state.public.round += 1;
        self.state.deck = Deck::build(DeckSource::Reuse(&self.state.deck));
        if cause == ResetCause::Exhausted {
            self.advance_turn();
        }
        tracing::info!(round = self.state.public.round, ?cause, "deck reset");
        self.arm_round()
    }

    // === Manual placement ===

    /// Schedule the AI's pick if it is the next placer.
    fn placement_tasks(&self) -> Vec<Directive> {
        if self.state.phase() != Phase::SetupTraps {
            return Vec::new();
        }
        match self.placer() {
            Some(p) if p.is_ai() => {
                vec![self.schedule(self.config.pacing.ai_place, TaskKind::AiPlaceTrap)]
            }
            _ => Vec::new(),
        }
    }

    pub(super) fn ai_place_trap(&mut self) -> Vec<Directive> {
        match ManualPlacement::random_pick(&self.state.deck, &mut self.state.ai_rng) {
            Some(card) => self.place_trap(card, Controller::Ai),
            None => Vec::new(),
        }
    }

    /// Arm `card` for the current placer, if `actor` controls them.
    pub(super) fn place_trap(&mut self, card: CardId, actor: Controller) -> Vec<Directive> {
        if self.state.phase() != Phase::SetupTraps {
            return Vec::new();
        }
        let Some(placer) = self.placer().filter(|p| p.controller == actor).cloned() else {
            return Vec::new();
        };
        let Some(mut placement) = self.state.public.placement else {
            return Vec::new();
        };
        if !placement.place(&mut self.state.deck, card, &placer.name) {
            return Vec::new();
        }

        self.state.public.placement = Some(placement);
        self.state
            .public
            .record(placer.id, RecordKind::PlaceTrap);
        self.state
            .say(format!("Sector armed by {}. Securing...", placer.name));
        self.state.bump();
        self.placement_tasks()
    }

    /// Leave setup once every placement is made. Early confirms are ignored.
    pub(super) fn confirm_traps(&mut self) -> Vec<Directive> {
        let complete = self
            .state
            .public
            .placement
            .is_some_and(|p| p.is_complete());
        if self.state.phase() != Phase::SetupTraps || !complete {
            return Vec::new();
        }
        self.state.say("Traps Armed. Proceed with caution.");
        self.enter_play()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, Pacing, PlayerStatus, AVATARS};
    use crate::engine::Task;

    fn loading_game(names: &[&str]) -> Game {
        let mut game = Game::new(GameConfig::default().with_pacing(Pacing::instant()));
        for (i, name) in names.iter().enumerate() {
            game.join(name, AVATARS[i]).unwrap();
        }
        game.apply(crate::core::Action::Start).unwrap();
        game
    }

    fn content(n: usize) -> RoundContent {
        RoundContent::new("TEST", (0..n).map(|i| format!("Card {}", i)).collect())
    }

    #[test]
    fn test_exhaustion_resets_and_advances_once() {
        let mut game = loading_game(&["Alice", "Bob", "Cara"]);
        game.resolve(Task::new(game.stamp(), TaskKind::ContentReady(content(12))));
        assert_eq!(game.phase(), Phase::Playing);

        // Flip every safe card but one behind the engine's back
        let safe: Vec<CardId> = game
            .state
            .deck
            .cards()
            .iter()
            .filter(|c| !c.is_trap)
            .map(|c| c.id)
            .collect();
        let (&safe_card, rest) = safe.split_last().unwrap();
        for &id in rest {
            game.state.deck.reveal(id);
        }

        let directives = game.apply(crate::core::Action::RevealCard(safe_card)).unwrap();
        assert_eq!(game.phase(), Phase::LoadingRound);
        assert_eq!(game.public().current_player, 0);
        assert_eq!(
            game.public().latest_log(),
            Some("All safe options exhausted. Reshuffling trap matrix.")
        );

        let task = directives.iter().find_map(Directive::scheduled).cloned().unwrap();
        assert_eq!(task.kind, TaskKind::FinishReshuffle(ResetCause::Exhausted));
        game.resolve(task);

        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(game.public().round, 2);
        assert_eq!(game.public().current_player, 1);
        assert_eq!(game.state.deck.len(), 12);
        assert_eq!(game.state.deck.trap_count(), 4);
        assert!(game.state.deck.cards().iter().all(|c| !c.is_revealed));
        assert!(game
            .public()
            .roster
            .iter()
            .all(|p| p.status == PlayerStatus::Alive));
    }

    #[test]
    fn test_reset_keeps_texts() {
        let mut game = loading_game(&["Alice", "Bob", "Cara"]);
        game.resolve(Task::new(game.stamp(), TaskKind::ContentReady(content(12))));
        let texts: Vec<String> = game.state.deck.texts().map(str::to_string).collect();

        game.state.set_phase(Phase::LoadingRound);
        game.resolve(Task::new(
            game.stamp(),
            TaskKind::FinishReshuffle(ResetCause::Elimination),
        ));
        let after: Vec<String> = game.state.deck.texts().map(str::to_string).collect();
        assert_eq!(texts, after);
        assert!(game
            .state
            .deck
            .cards()
            .iter()
            .filter(|c| c.is_trap)
            .all(|c| c.placed_by_label().as_deref() == Some("AI")));
    }

    #[test]
    fn test_content_after_restart_is_dropped() {
        let mut game = loading_game(&["Alice", "Bob"]);
        let stamp = game.stamp();
        game.state.set_phase(Phase::GameOver);
        game.apply(crate::core::Action::Restart).unwrap();

        assert!(game
            .resolve(Task::new(stamp, TaskKind::ContentReady(content(12))))
            .is_empty());
        assert_eq!(game.phase(), Phase::Lobby);
        assert!(game.state.deck.is_empty());
    }
}
