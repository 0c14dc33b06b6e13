//! Session worker that owns the authoritative [`Game`].
//!
//! Receives commands from [`SessionHandle`](super::SessionHandle), carries
//! out the engine's directives on spawned tasks, and feeds their completions
//! back through its own queue. Every handled message publishes a fresh
//! [`GameView`].

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, trace};

use crate::content::{fetch_commentary, fetch_round_content, ContentProvider, Narrator};
use crate::core::{Action, GameConfig, PlayerId, Result as GameResult};
use crate::engine::{Directive, Game, NarrationTicket, Task, TaskKind};

use super::view::GameView;

/// Commands that can be sent to the session worker
pub enum Command {
    Join {
        name: String,
        avatar: String,
        reply: oneshot::Sender<GameResult<PlayerId>>,
    },
    Configure {
        config: GameConfig,
        reply: oneshot::Sender<GameResult<()>>,
    },
    Apply {
        action: Action,
        reply: oneshot::Sender<GameResult<()>>,
    },
    /// Query the current view (read-only).
    Snapshot { reply: oneshot::Sender<GameView> },
}

/// Results of directives, posted back by spawned tasks.
#[derive(Debug)]
pub(crate) enum Completion {
    Task(Task),
    Narration { ticket: NarrationTicket, text: String },
}

/// Background task that processes session commands.
pub struct SessionWorker {
    game: Game,
    content: Arc<dyn ContentProvider>,
    narrator: Arc<dyn Narrator>,
    command_rx: mpsc::Receiver<Command>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
    view_tx: watch::Sender<GameView>,
}

impl SessionWorker {
    pub(crate) fn new(
        game: Game,
        content: Arc<dyn ContentProvider>,
        narrator: Arc<dyn Narrator>,
        command_rx: mpsc::Receiver<Command>,
        view_tx: watch::Sender<GameView>,
    ) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            game,
            content,
            narrator,
            command_rx,
            completion_tx,
            completion_rx,
            view_tx,
        }
    }

    /// Main worker loop. Ends when every handle is dropped.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                Some(completion) = self.completion_rx.recv() => {
                    self.handle_completion(completion);
                }
            }
            self.publish();
        }
        debug!(target: "session::worker", "all handles dropped, worker stopping");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Join {
                name,
                avatar,
                reply,
            } => {
                let _ = reply.send(self.game.join(&name, &avatar));
            }
            Command::Configure { config, reply } => {
                let _ = reply.send(self.game.configure(config));
            }
            Command::Apply { action, reply } => {
                let result = self.game.apply(action).map(|directives| {
                    self.execute(directives);
                });
                if let Err(error) = &result {
                    debug!(target: "session::worker", %error, "command rejected");
                }
                let _ = reply.send(result);
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(GameView::of(&self.game));
            }
        }
    }

    fn handle_completion(&mut self, completion: Completion) {
        match completion {
            Completion::Task(task) => {
                let directives = self.game.resolve(task);
                self.execute(directives);
            }
            Completion::Narration { ticket, text } => {
                let applied = self.game.narrated(ticket, text);
                trace!(target: "session::worker", seq = ticket.seq, applied, "narration returned");
            }
        }
    }

    /// Carry out directives on spawned tasks.
    fn execute(&self, directives: Vec<Directive>) {
        for directive in directives {
            let tx = self.completion_tx.clone();
            match directive {
                Directive::FetchRound { stamp, request } => {
                    let content = Arc::clone(&self.content);
                    tokio::spawn(async move {
                        let round = fetch_round_content(content.as_ref(), &request).await;
                        let _ = tx.send(Completion::Task(Task::new(
                            stamp,
                            TaskKind::ContentReady(round),
                        )));
                    });
                }
                Directive::Narrate { ticket, event } => {
                    let narrator = Arc::clone(&self.narrator);
                    tokio::spawn(async move {
                        let text = fetch_commentary(narrator.as_ref(), &event).await;
                        let _ = tx.send(Completion::Narration { ticket, text });
                    });
                }
                Directive::Schedule { delay, task } => {
                    tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        let _ = tx.send(Completion::Task(task));
                    });
                }
            }
        }
    }

    fn publish(&self) {
        self.view_tx.send_replace(GameView::of(&self.game));
    }
}
