//! Async host for a [`Game`].
//!
//! One worker task owns the game; handles talk to it over channels. The
//! worker performs fetches, narration and delays on spawned tasks and feeds
//! the results back into the same queue as user commands, so the engine only
//! ever sees one input at a time.

pub mod error;
pub mod handle;
pub mod view;
pub mod worker;

use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::content::{ContentProvider, Narrator, OfflineContent};
use crate::engine::Game;

pub use error::{Result, SessionError};
pub use handle::SessionHandle;
pub use view::GameView;
pub use worker::{Command, SessionWorker};

const COMMAND_BUFFER: usize = 32;

/// Spawns session workers.
pub struct Session;

impl Session {
    /// Spawn a worker owning `game` on the current tokio runtime.
    pub fn spawn(
        game: Game,
        content: Arc<dyn ContentProvider>,
        narrator: Arc<dyn Narrator>,
    ) -> SessionHandle {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (view_tx, view_rx) = watch::channel(GameView::of(&game));

        let worker = SessionWorker::new(game, content, narrator, command_rx, view_tx);
        tokio::spawn(worker.run());
        tracing::debug!("session worker spawned");

        SessionHandle::new(command_tx, view_rx)
    }

    /// Spawn a worker backed by [`OfflineContent`].
    pub fn offline(game: Game) -> SessionHandle {
        let offline = Arc::new(OfflineContent::new());
        Self::spawn(game, offline.clone(), offline)
    }
}
