//! Errors surfaced by the session handle.

use thiserror::Error;
use tokio::sync::oneshot;

use crate::core::GameError;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error(transparent)]
    Game(#[from] GameError),
}
