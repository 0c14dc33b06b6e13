//! Synchronous host used by the integration tests.
//!
//! Resolves fetches with offline content and runs scheduled tasks right
//! away, ignoring their delays. Countdown ticks are collected instead of run
//! so a timed game does not tick itself to death.

#![allow(dead_code)]

use safe_nuked::content::{NarrationEvent, OfflineContent};
use safe_nuked::core::{Action, GameConfig, Pacing, AVATARS};
use safe_nuked::engine::{Directive, Game, NarrationTicket, Task, TaskKind};

#[derive(Default)]
pub struct Host {
    pub narrations: Vec<(NarrationTicket, NarrationEvent)>,
    pub ticks: Vec<Task>,
}

impl Host {
    pub fn drive(&mut self, game: &mut Game, mut pending: Vec<Directive>) {
        let offline = OfflineContent::new();
        while !pending.is_empty() {
            let mut next = Vec::new();
            for directive in pending {
                match directive {
                    Directive::FetchRound { stamp, request } => {
                        let content = offline.round_content(&request).normalized(&request);
                        next.extend(game.resolve(Task::new(stamp, TaskKind::ContentReady(content))));
                    }
                    Directive::Narrate { ticket, event } => self.narrations.push((ticket, event)),
                    Directive::Schedule { task, .. } if task.kind == TaskKind::TimerTick => {
                        self.ticks.push(task)
                    }
                    Directive::Schedule { task, .. } => next.extend(game.resolve(task)),
                }
            }
            pending = next;
        }
    }

    pub fn apply(&mut self, game: &mut Game, action: Action) {
        let directives = game.apply(action).unwrap();
        self.drive(game, directives);
    }

    /// Run the most recent countdown tick.
    pub fn tick(&mut self, game: &mut Game) {
        let task = self.ticks.pop().unwrap();
        let directives = game.resolve(task);
        self.drive(game, directives);
    }
}

pub fn config() -> GameConfig {
    GameConfig::default().with_pacing(Pacing::instant())
}

/// A game past the lobby with every automatic step run.
pub fn started(names: &[&str], config: GameConfig) -> (Game, Host) {
    let mut game = Game::new(config);
    for (i, name) in names.iter().enumerate() {
        game.join(name, AVATARS[i]).unwrap();
    }
    let mut host = Host::default();
    host.apply(&mut game, Action::Start);
    (game, host)
}
