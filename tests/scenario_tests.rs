//! End-to-end games driven through the engine with a synchronous host.

mod common;

use common::{config, started};
use safe_nuked::cards::CardId;
use safe_nuked::content::NarrationEvent;
use safe_nuked::core::{
    Action, ConfigError, ContentSource, GameError, GameMode, Phase, PlayerStatus, RecordKind,
    TrapPlacement, AVATARS,
};
use safe_nuked::engine::{Directive, Game, TaskKind};
use safe_nuked::session::GameView;

fn card(game: &Game, trap: bool) -> CardId {
    game.state()
        .deck
        .cards()
        .iter()
        .find(|c| !c.is_revealed && c.is_trap == trap)
        .map(|c| c.id)
        .unwrap()
}

/// Face-down card ids named anywhere in the public view.
fn hidden_cards_named(view: &GameView) -> Vec<CardId> {
    let face_down = |id: CardId| view.cards.iter().any(|c| c.id == id && !c.is_revealed);
    view.public
        .history
        .iter()
        .filter_map(|r| match r.kind {
            RecordKind::Reveal { card, .. } => Some(card),
            RecordKind::PlaceTrap | RecordKind::Detonate => None,
        })
        .filter(|&id| face_down(id))
        .collect()
}

fn status(game: &Game, index: usize) -> PlayerStatus {
    game.public().roster.at(index).unwrap().status
}

/// Two players; a safe pick hands the turn over, then a trap ends the game.
#[test]
fn test_scenario_two_players_trap_ends_game() {
    let (mut game, mut host) = started(&["Alice", "Bob"], config().with_trap_quota(3));
    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.state().deck.len(), 12);
    assert_eq!(game.state().deck.trap_count(), 3);

    let pick = card(&game, false);
    host.apply(&mut game, Action::RevealCard(pick));
    assert_eq!(game.public().current_player, 1);

    let pick = card(&game, true);
    host.apply(&mut game, Action::RevealCard(pick));
    assert_eq!(status(&game, 1), PlayerStatus::Eliminated);
    assert_eq!(status(&game, 0), PlayerStatus::Winner);
    assert_eq!(game.phase(), Phase::GameOver);
    assert!(game.state().deck.cards().iter().all(|c| c.is_revealed));
    assert_eq!(game.legal_actions(), vec![Action::Restart]);
    assert!(host
        .narrations
        .iter()
        .any(|(_, e)| *e == NarrationEvent::Win { player: "Alice".into() }));
}

/// One human plus the AI opponent placing traps in turn.
#[test]
fn test_scenario_manual_placement_with_ai() {
    let config = config()
        .with_source(ContentSource::Generated(TrapPlacement::Manual))
        .with_trap_quota(2);
    let (mut game, mut host) = started(&["Alice"], config);
    assert_eq!(game.phase(), Phase::SetupTraps);
    assert!(game.public().roster.at(1).unwrap().is_ai());
    assert_eq!(game.public().placer_index(), Some(0));

    // Human pick, then the AI's random pick runs on its own
    host.apply(&mut game, Action::PlaceTrap(CardId(7)));
    let placement = game.public().placement.unwrap();
    assert_eq!(placement.placed(), 2);
    assert!(placement.is_complete());
    assert_eq!(game.phase(), Phase::SetupTraps);

    let placers: Vec<_> = game.public().history.iter().map(|r| r.player).collect();
    assert_eq!(
        placers,
        vec![
            game.public().roster.at(0).unwrap().id,
            game.public().roster.at(1).unwrap().id
        ]
    );

    host.apply(&mut game, Action::ConfirmTraps);
    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.public().time_left, 10);
}

/// Placement stays blind: the published view never names an armed card.
#[test]
fn test_placement_is_blind() {
    let config = config()
        .with_source(ContentSource::Generated(TrapPlacement::Manual))
        .with_trap_quota(2);
    let (mut game, mut host) = started(&["Alice"], config);

    host.apply(&mut game, Action::PlaceTrap(CardId(7)));
    let view = GameView::of(&game);
    assert_eq!(game.phase(), Phase::SetupTraps);
    assert_eq!(view.public.history.len(), 2);
    assert!(view
        .public
        .history
        .iter()
        .all(|r| r.kind == RecordKind::PlaceTrap));
    assert!(view.cards.iter().all(|c| c.is_trap.is_none() && c.placed_by.is_none()));
    assert!(hidden_cards_named(&view).is_empty());

    host.apply(&mut game, Action::ConfirmTraps);
    let view = GameView::of(&game);
    assert_eq!(game.phase(), Phase::Playing);
    assert!(view.cards.iter().all(|c| c.is_trap.is_none()));
    assert!(hidden_cards_named(&view).is_empty());
}

/// Commentary odds that cannot be sampled are refused before play begins.
#[test]
fn test_invalid_commentary_odds_rejected_at_start() {
    let mut game = Game::new(config().with_safe_commentary_odds(f64::NAN));
    game.join("Alice", AVATARS[0]).unwrap();
    game.join("Bob", AVATARS[1]).unwrap();

    assert_eq!(
        game.apply(Action::Start),
        Err(GameError::Config(ConfigError::CommentaryOdds))
    );
    assert_eq!(game.phase(), Phase::Lobby);
}

/// The countdown running out eliminates the acting player as a trap would.
#[test]
fn test_scenario_timeout_detonation() {
    let (mut game, mut host) = started(&["Alice", "Bob"], config().with_mode(GameMode::Timed));
    assert_eq!(host.ticks.len(), 1);

    for remaining in (0..10).rev() {
        host.tick(&mut game);
        if remaining > 0 {
            assert_eq!(game.public().time_left, remaining);
        }
    }

    assert_eq!(status(&game, 0), PlayerStatus::Eliminated);
    assert_eq!(status(&game, 1), PlayerStatus::Winner);
    assert_eq!(game.phase(), Phase::GameOver);
    assert!(game.state().deck.cards().iter().all(|c| c.is_revealed));
    assert!(game
        .public()
        .log
        .iter()
        .any(|l| l == "Tick tock. Player Alice ran out of time. Automatic detonation."));
}

/// Clicking a face-up card changes nothing and asks for no commentary.
#[test]
fn test_reveal_is_idempotent() {
    let (mut game, mut host) = started(
        &["Alice", "Bob", "Cara"],
        config().with_safe_commentary_odds(1.0),
    );
    let safe = card(&game, false);
    host.apply(&mut game, Action::RevealCard(safe));
    let narrations = host.narrations.len();
    let before = game.public().clone();

    let directives = game.apply(Action::RevealCard(safe)).unwrap();
    assert!(directives.is_empty());
    assert_eq!(game.public(), &before);
    assert_eq!(host.narrations.len(), narrations);
}

/// A trap with two survivors left reshuffles the same texts into a new round.
#[test]
fn test_elimination_continues_with_survivors() {
    let (mut game, mut host) = started(&["Alice", "Bob", "Cara"], config());
    let texts: Vec<String> = game.state().deck.texts().map(str::to_string).collect();

    let pick = card(&game, true);
    host.apply(&mut game, Action::RevealCard(pick));
    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.public().round, 2);
    assert_eq!(game.public().current_player, 1);
    assert_eq!(status(&game, 0), PlayerStatus::Eliminated);

    let after: Vec<String> = game.state().deck.texts().map(str::to_string).collect();
    assert_eq!(texts, after);
    assert!(game.state().deck.cards().iter().all(|c| !c.is_revealed));
    assert_eq!(game.state().deck.trap_count(), 4);

    // Alice is skipped from now on
    let pick = card(&game, false);
    host.apply(&mut game, Action::RevealCard(pick));
    assert_eq!(game.public().current_player, 2);
    let pick = card(&game, false);
    host.apply(&mut game, Action::RevealCard(pick));
    assert_eq!(game.public().current_player, 1);
}

/// Revealing the last safe card starts a new round without an elimination.
#[test]
fn test_exhaustion_triggers_reset() {
    let (mut game, mut host) = started(&["Alice", "Bob"], config().with_trap_quota(8));
    let safe_count = game.state().deck.safe_remaining();
    assert_eq!(safe_count, 4);

    for _ in 0..safe_count {
        let pick = card(&game, false);
        host.apply(&mut game, Action::RevealCard(pick));
    }

    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.public().round, 2);
    assert!(game.public().roster.iter().all(|p| p.is_alive()));
    assert!(game
        .public()
        .log
        .iter()
        .any(|l| l == "All safe options exhausted. Reshuffling trap matrix."));
    // Bob flipped the last safe card; the reset hands the turn on once
    assert_eq!(game.public().current_player, 0);
}

/// A winning trap never schedules round continuation.
#[test]
fn test_no_continuation_after_game_over() {
    let (mut game, _) = started(&["Alice", "Bob"], config());
    let directives = game.apply(Action::RevealCard(card(&game, true))).unwrap();

    assert_eq!(game.phase(), Phase::GameOver);
    assert!(directives.iter().all(|d| !matches!(
        d,
        Directive::Schedule { task, .. }
            if matches!(task.kind, TaskKind::BeginReshuffle | TaskKind::FinishReshuffle(_))
    )));
}

/// Restart drops the AI, revives everyone and returns to the lobby.
#[test]
fn test_restart_back_to_lobby() {
    let (mut game, mut host) = started(&["Alice"], config());
    let pick = card(&game, true);
    host.apply(&mut game, Action::RevealCard(pick));
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(status(&game, 1), PlayerStatus::Winner);

    host.apply(&mut game, Action::Restart);
    assert_eq!(game.phase(), Phase::Lobby);
    assert_eq!(game.public().round, 1);
    assert_eq!(game.public().roster.len(), 1);
    assert_eq!(status(&game, 0), PlayerStatus::Alive);
    assert!(game.public().history.is_empty());

    // The same table can play again
    host.apply(&mut game, Action::Start);
    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.public().roster.len(), 2);
}

/// Manual entry bypasses the provider and always uses random traps.
#[test]
fn test_manual_entry_round() {
    let config = config()
        .with_source(ContentSource::ManualEntry)
        .with_mode(GameMode::Custom("Office Snacks".into()))
        .with_trap_quota(2);
    let (mut game, mut host) = started(&["Alice", "Bob"], config);
    assert_eq!(game.phase(), Phase::ManualEntry);

    let items: Vec<String> = (0..12).map(|i| format!("Snack {}", i)).collect();
    host.apply(&mut game, Action::SubmitManualCards(items));
    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.public().category, "Office Snacks");
    assert_eq!(game.state().deck.trap_count(), 2);
    assert_eq!(game.state().deck.at(11).unwrap().text, "Snack 11");
}
