//! The game state machine.
//!
//! [`Game`] owns the configuration and the full [`GameState`]. Every input is
//! one of:
//! - a lobby call (`join`, `configure`)
//! - a user [`Action`] through [`Game::apply`]
//! - a scheduled or async completion through [`Game::resolve`]
//! - a narration reply through [`Game::narrated`]
//!
//! Each call runs to completion and returns the [`Directive`]s the host must
//! carry out. Nothing here sleeps, awaits or reads a clock, so a game driven
//! with the same inputs always ends in the same state.

use crate::cards::{CardId, Deck, DeckSource};
use crate::content::{Account, ContentRequest, NarrationEvent, USER_CONTENT_CATEGORY};
use crate::core::{
    Action, ContentSource, Controller, GameConfig, GameError, GameState, Phase, Player,
    PlayerId, PlayerStatus, PublicState, RecordKind, Result,
};
use crate::rules::{self, Verdict};
use crate::traps::assign_random;

use super::directive::{Directive, NarrationTicket, ResetCause, Stamp, Task, TaskKind};

/// A single game session on a shared screen.
#[derive(Clone, Debug)]
pub struct Game {
    pub(super) config: GameConfig,
    pub(super) state: GameState,
}

impl Game {
    /// Create a game in the lobby.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let state = GameState::new(&config);
        Self { config, state }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn public(&self) -> &PublicState {
        &self.state.public
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// The stamp a task scheduled right now would carry.
    #[must_use]
    pub fn stamp(&self) -> Stamp {
        Stamp {
            round: self.state.public.round,
            phase: self.state.phase(),
            generation: self.state.generation(),
        }
    }

    fn require_phase(&self, action: &'static str, expected: Phase) -> Result<()> {
        let actual = self.state.phase();
        if actual != expected {
            return Err(GameError::WrongPhase {
                action,
                expected,
                actual,
            });
        }
        Ok(())
    }

    // === Lobby ===

    /// Add a local player.
    ///
    /// The name is trimmed and cut to ten characters. The first player to
    /// join is host.
    pub fn join(&mut self, name: &str, avatar: &str) -> Result<PlayerId> {
        self.require_phase("join", Phase::Lobby)?;
        let id = self
            .state
            .public
            .roster
            .add_player(name, avatar)
            .ok_or(GameError::EmptyName)?;
        tracing::info!(player = %id, name = name.trim(), "player joined");
        Ok(id)
    }

    /// Add a player under an account's username.
    pub fn join_account(&mut self, account: &Account, avatar: &str) -> Result<PlayerId> {
        self.join(&account.username, avatar)
    }

    /// Replace the configuration. Lobby only.
    ///
    /// Checked at start, not here, so the host can pass through invalid
    /// intermediate settings.
    pub fn configure(&mut self, config: GameConfig) -> Result<()> {
        self.require_phase("configure", Phase::Lobby)?;
        if config.seed != self.config.seed {
            self.state.reseed(config.seed);
        }
        self.state.public.time_left = config.turn_time_limit;
        tracing::debug!(?config, "game configured");
        self.config = config;
        Ok(())
    }

    // === Inputs ===

    /// Apply a user action.
    ///
    /// Lobby and setup mistakes are errors. Clicks that are merely out of
    /// turn or out of phase during play are ignored and yield no directives.
    pub fn apply(&mut self, action: Action) -> Result<Vec<Directive>> {
        tracing::debug!(action = action.name(), phase = ?self.state.phase(), "apply");
        match action {
            Action::Start => self.start(),
            Action::RevealCard(card) => Ok(self.reveal(card, Controller::Human)),
            Action::PlaceTrap(card) => Ok(self.place_trap(card, Controller::Human)),
            Action::ConfirmTraps => Ok(self.confirm_traps()),
            Action::SubmitManualCards(items) => self.submit_manual_cards(items),
            Action::Restart => Ok(self.restart()),
        }
    }

    /// Resolve a scheduled or async completion.
    ///
    /// Tasks whose stamp no longer matches the current state are dropped.
    pub fn resolve(&mut self, task: Task) -> Vec<Directive> {
        let current = self.stamp();
        if task.stamp != current {
            tracing::trace!(scheduled = ?task.stamp, ?current, "stale task dropped");
            return Vec::new();
        }

        match task.kind {
            TaskKind::ContentReady(content) => self.on_content_ready(content),
            TaskKind::AiReveal => self.ai_reveal(),
            TaskKind::AiPlaceTrap => self.ai_place_trap(),
            TaskKind::TimerTick => self.tick(),
            TaskKind::BeginReshuffle => self.begin_reshuffle(),
            TaskKind::FinishReshuffle(cause) => self.finish_reshuffle(cause),
        }
    }

    /// Deliver a narration reply. Returns true if it was written to the log.
    pub fn narrated(&mut self, ticket: NarrationTicket, text: String) -> bool {
        if ticket.session != self.state.session() {
            return false;
        }
        self.state.narration_answered();

        let current = ticket.round == self.state.public.round
            && ticket.log_mark == self.state.local_lines()
            && ticket.seq > self.state.narration_applied();
        if current {
            self.state.apply_narration(ticket.seq, text);
        } else {
            tracing::trace!(?ticket, "narration superseded");
        }
        current
    }

    /// User actions the current phase would act on.
    ///
    /// Manual card submission is not listed; it carries free text.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        let public = &self.state.public;
        match public.phase {
            Phase::Lobby if !public.roster.is_empty() => vec![Action::Start],
            Phase::Playing => match public.current() {
                Some(p) if p.is_alive() && !p.is_ai() => self
                    .state
                    .deck
                    .unrevealed()
                    .map(Action::RevealCard)
                    .collect(),
                _ => Vec::new(),
            },
            Phase::SetupTraps => match (public.placement, self.placer()) {
                (Some(placement), _) if placement.is_complete() => vec![Action::ConfirmTraps],
                (_, Some(p)) if !p.is_ai() => self
                    .state
                    .deck
                    .cards()
                    .iter()
                    .map(|c| Action::PlaceTrap(c.id))
                    .collect(),
                _ => Vec::new(),
            },
            Phase::GameOver => vec![Action::Restart],
            _ => Vec::new(),
        }
    }

    // === Directive helpers ===

    /// Schedule `kind` against the current stamp. Call after all mutation.
    pub(super) fn schedule(&self, delay: std::time::Duration, kind: TaskKind) -> Directive {
        Directive::Schedule {
            delay,
            task: Task::new(self.stamp(), kind),
        }
    }

    pub(super) fn narrate(&mut self, event: NarrationEvent) -> Directive {
        let seq = self.state.issue_narration();
        Directive::Narrate {
            ticket: NarrationTicket {
                session: self.state.session(),
                round: self.state.public.round,
                seq,
                log_mark: self.state.local_lines(),
            },
            event,
        }
    }

    // === Start and restart ===

    fn start(&mut self) -> Result<Vec<Directive>> {
        self.require_phase("start", Phase::Lobby)?;
        if self.state.public.roster.is_empty() {
            self.state.say("Error: No lifeforms detected.");
            return Err(GameError::NoPlayers);
        }
        self.config.validate()?;

        let public = &mut self.state.public;
        if public.roster.len() == 1 {
            public.roster.add_ai_opponent();
            self.state
                .say("Single player detected. Adding AI Opponent: SYSTEM_AI.");
        }

        let public = &mut self.state.public;
        public.round = 1;
        public.current_player = 0;
        public.time_left = self.config.turn_time_limit;
        tracing::info!(
            players = public.roster.len(),
            mode = self.config.mode.label(),
            "game starting"
        );

        if self.config.source == ContentSource::ManualEntry {
            self.state
                .say("Manual Override engaged. Input your deception cards.");
            self.state.set_phase(Phase::ManualEntry);
            return Ok(Vec::new());
        }

        let line = match self.config.mode.topic() {
            Some(topic) => format!("Fabricating scenario based on: \"{}\"...", topic),
            None => "Initializing death traps...".to_string(),
        };
        self.state.say(line);
        self.state.set_phase(Phase::LoadingRound);

        let fetch = Directive::FetchRound {
            stamp: self.stamp(),
            request: self.content_request(),
        };
        Ok(vec![self.narrate(NarrationEvent::Start), fetch])
    }

    pub(super) fn content_request(&self) -> ContentRequest {
        ContentRequest {
            mode: self.config.mode.clone(),
            round: self.state.public.round,
            target_count: self.config.deck_size,
        }
    }

    fn restart(&mut self) -> Vec<Directive> {
        if self.state.phase() != Phase::GameOver {
            return Vec::new();
        }

        let public = &mut self.state.public;
        public.roster.reset_for_lobby();
        public.round = 1;
        public.current_player = 0;
        public.time_left = self.config.turn_time_limit;
        public.category.clear();
        public.placement = None;
        public.history.clear();
        self.state.deck = Deck::default();

        self.state.next_session();
        self.state.set_phase(Phase::Lobby);
        self.state.say("System reset. Ready for new victims.");
        tracing::info!(session = self.state.session(), "game reset to lobby");
        Vec::new()
    }

    // === Manual entry ===

    fn submit_manual_cards(&mut self, items: Vec<String>) -> Result<Vec<Directive>> {
        self.require_phase("submit manual cards", Phase::ManualEntry)?;

        let required = self.config.deck_size;
        let filled: Vec<String> = items
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if filled.len() != required {
            return Err(GameError::ManualEntryIncomplete {
                filled: filled.len(),
                required,
            });
        }

        self.state.public.category = self
            .config
            .mode
            .topic()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(USER_CONTENT_CATEGORY)
            .to_string();
        self.state.deck = Deck::build(DeckSource::Fresh(filled));
        assign_random(
            &mut self.state.deck,
            self.config.trap_quota,
            &mut self.state.trap_rng,
        );
        Ok(self.enter_play())
    }

    // === Play ===

    fn ai_reveal(&mut self) -> Vec<Directive> {
        if !self.state.public.current().is_some_and(Player::is_ai) {
            return Vec::new();
        }
        let available: Vec<CardId> = self.state.deck.unrevealed().collect();
        match self.state.ai_rng.choose(&available).copied() {
            Some(card) => self.reveal(card, Controller::Ai),
            None => Vec::new(),
        }
    }

    /// Flip `card` for the acting player, if `actor` controls them.
    fn reveal(&mut self, card: CardId, actor: Controller) -> Vec<Directive> {
        if self.state.phase() != Phase::Playing {
            return Vec::new();
        }
        let Some(player) = self
            .state
            .public
            .current()
            .filter(|p| p.is_alive() && p.controller == actor)
            .cloned()
        else {
            tracing::trace!(%card, ?actor, "reveal out of turn ignored");
            return Vec::new();
        };
        let Some(revealed) = self.state.deck.reveal(card) else {
            return Vec::new();
        };
        let (trap, text) = (revealed.is_trap, revealed.text.clone());

        self.state
            .public
            .record(player.id, RecordKind::Reveal { card, trap });
        tracing::debug!(player = %player.id, %card, trap, "card revealed");

        if trap {
            self.trap_revealed(&player, text)
        } else {
            self.safe_revealed(&player, text)
        }
    }

    fn trap_revealed(&mut self, player: &Player, text: String) -> Vec<Directive> {
        self.state
            .public
            .roster
            .set_status(player.id, PlayerStatus::Eliminated);
        let mut out = vec![self.narrate(NarrationEvent::Death {
            player: player.name.clone(),
            detail: text,
        })];

        let (verdict, finale) = self.settle(player.id);
        out.extend(finale);
        if verdict == Verdict::Continue {
            self.advance_turn();
            self.state.set_phase(Phase::LoadingRound);
            out.push(self.schedule(
                self.config.pacing.elimination_pause,
                TaskKind::BeginReshuffle,
            ));
        }
        out
    }

    fn safe_revealed(&mut self, player: &Player, text: String) -> Vec<Directive> {
        let mut out = Vec::new();
        if self.state.deck.safe_remaining() == 0 {
            self.state
                .say("All safe options exhausted. Reshuffling trap matrix.");
            self.state.set_phase(Phase::LoadingRound);
            out.push(self.schedule(
                self.config.pacing.reshuffle_pause,
                TaskKind::FinishReshuffle(ResetCause::Exhausted),
            ));
        } else {
            self.advance_turn();
            out.extend(self.turn_tasks());
        }

        if !player.is_ai()
            && self
                .state
                .commentary_rng
                .gen_bool(self.config.safe_commentary_odds)
        {
            out.push(self.narrate(NarrationEvent::Safe {
                player: player.name.clone(),
                detail: text,
            }));
        }
        out
    }

    /// One countdown step. At zero the acting player detonates.
    fn tick(&mut self) -> Vec<Directive> {
        if self.state.phase() != Phase::Playing || !self.config.mode.is_timed() {
            return Vec::new();
        }
        let public = &mut self.state.public;
        public.time_left = public.time_left.saturating_sub(1);
        if public.time_left > 0 {
            return vec![self.schedule(self.config.pacing.tick, TaskKind::TimerTick)];
        }
        self.detonate()
    }

    fn detonate(&mut self) -> Vec<Directive> {
        let Some(player) = self.state.public.current().filter(|p| p.is_alive()).cloned() else {
            return Vec::new();
        };

        self.state.say(format!(
            "Tick tock. Player {} ran out of time. Automatic detonation.",
            player.name
        ));
        self.state
            .public
            .roster
            .set_status(player.id, PlayerStatus::Eliminated);
        self.state.public.record(player.id, RecordKind::Detonate);
        tracing::info!(player = %player.id, "turn timed out");

        let (verdict, mut out) = self.settle(player.id);
        if verdict == Verdict::Continue {
            self.advance_turn();
            out.extend(self.turn_tasks());
        }
        out
    }

    /// Run win evaluation after `eliminated` dropped out and end the game on
    /// a terminal verdict.
    fn settle(&mut self, eliminated: PlayerId) -> (Verdict, Vec<Directive>) {
        let verdict = rules::settle(
            &mut self.state.public.roster,
            &mut self.state.deck,
            eliminated,
        );
        let out = match verdict {
            Verdict::Continue => Vec::new(),
            Verdict::Winner(id) => {
                self.state.set_phase(Phase::GameOver);
                let name = self
                    .state
                    .public
                    .roster
                    .get(id)
                    .map(|p| p.name.clone())
                    .unwrap_or_default();
                tracing::info!(winner = %id, "game over");
                vec![self.narrate(NarrationEvent::Win { player: name })]
            }
            Verdict::NoSurvivors => {
                self.state.set_phase(Phase::GameOver);
                self.state.say("Everyone died. How disappointing.");
                tracing::info!("game over, no survivors");
                Vec::new()
            }
        };
        (verdict, out)
    }

    /// Hand the turn to the next alive player.
    pub(super) fn advance_turn(&mut self) {
        let public = &mut self.state.public;
        public.current_player = rules::advance(public.current_player, &public.roster);
        public.time_left = self.config.turn_time_limit;
        self.state.bump();
    }

    /// Work that drives the acting player's turn: the countdown in timed mode
    /// and the AI's pick.
    pub(super) fn turn_tasks(&self) -> Vec<Directive> {
        if self.state.phase() != Phase::Playing {
            return Vec::new();
        }
        let mut out = Vec::new();
        if self.config.mode.is_timed() {
            out.push(self.schedule(self.config.pacing.tick, TaskKind::TimerTick));
        }
        if self.state.public.current().is_some_and(Player::is_ai) {
            out.push(self.schedule(self.config.pacing.ai_think, TaskKind::AiReveal));
        }
        out
    }

    /// The player whose placement is next, during `SetupTraps`.
    pub(super) fn placer(&self) -> Option<&Player> {
        let index = self.state.public.placer_index()?;
        self.state.public.roster.at(index)
    }
}
