//! Cloneable façade for issuing commands to a session.
//!
//! [`SessionHandle`] hides channel plumbing and offers one async method per
//! lobby call or user action.

use tokio::sync::{mpsc, oneshot, watch};

use crate::cards::CardId;
use crate::content::Account;
use crate::core::{Action, GameConfig, PlayerId};

use super::error::{Result, SessionError};
use super::view::GameView;
use super::worker::Command;

/// Client-facing handle to a running session
#[derive(Clone)]
pub struct SessionHandle {
    command_tx: mpsc::Sender<Command>,
    view_rx: watch::Receiver<GameView>,
}

impl SessionHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, view_rx: watch::Receiver<GameView>) -> Self {
        Self {
            command_tx,
            view_rx,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| SessionError::CommandChannelClosed)?;

        reply_rx.await.map_err(SessionError::ReplyChannelClosed)
    }

    /// Add a local player in the lobby.
    pub async fn join(&self, name: &str, avatar: &str) -> Result<PlayerId> {
        let (name, avatar) = (name.to_string(), avatar.to_string());
        Ok(self
            .request(|reply| Command::Join {
                name,
                avatar,
                reply,
            })
            .await??)
    }

    /// Add a player under an account's username.
    pub async fn join_account(&self, account: &Account, avatar: &str) -> Result<PlayerId> {
        self.join(&account.username, avatar).await
    }

    pub async fn configure(&self, config: GameConfig) -> Result<()> {
        Ok(self
            .request(|reply| Command::Configure { config, reply })
            .await??)
    }

    /// Apply any user action.
    pub async fn apply(&self, action: Action) -> Result<()> {
        Ok(self
            .request(|reply| Command::Apply { action, reply })
            .await??)
    }

    pub async fn start(&self) -> Result<()> {
        self.apply(Action::Start).await
    }

    pub async fn reveal(&self, card: CardId) -> Result<()> {
        self.apply(Action::RevealCard(card)).await
    }

    pub async fn place_trap(&self, card: CardId) -> Result<()> {
        self.apply(Action::PlaceTrap(card)).await
    }

    pub async fn confirm_traps(&self) -> Result<()> {
        self.apply(Action::ConfirmTraps).await
    }

    pub async fn submit_manual_cards(&self, items: Vec<String>) -> Result<()> {
        self.apply(Action::SubmitManualCards(items)).await
    }

    pub async fn restart(&self) -> Result<()> {
        self.apply(Action::Restart).await
    }

    /// Query the current view (read-only snapshot)
    pub async fn snapshot(&self) -> Result<GameView> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Watch the view. A new value is published after every handled command
    /// and every completed task.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<GameView> {
        self.view_rx.clone()
    }
}
