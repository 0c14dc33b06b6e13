//! Optional player accounts.
//!
//! A lobby join can go through an [`AccountService`] so the display name
//! comes from a registered username. Game logic never depends on it.

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;

/// A logged-in operator.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("username and password required")]
    MissingCredentials,

    #[error("username already exists")]
    UsernameTaken,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("account backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait AccountService: Send + Sync {
    async fn register(&self, username: &str, password: &str) -> Result<(), AuthError>;

    async fn login(&self, username: &str, password: &str) -> Result<Account, AuthError>;
}

/// Process-local account store.
#[derive(Debug, Default)]
pub struct InMemoryAccounts {
    users: RwLock<FxHashMap<String, String>>,
}

impl InMemoryAccounts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered accounts.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

fn require(username: &str, password: &str) -> Result<(), AuthError> {
    if username.is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    Ok(())
}

#[async_trait]
impl AccountService for InMemoryAccounts {
    async fn register(&self, username: &str, password: &str) -> Result<(), AuthError> {
        require(username, password)?;
        let mut users = self.users.write().await;
        if users.contains_key(username) {
            return Err(AuthError::UsernameTaken);
        }
        users.insert(username.to_string(), password.to_string());
        tracing::debug!(%username, "account registered");
        Ok(())
    }

    async fn login(&self, username: &str, password: &str) -> Result<Account, AuthError> {
        require(username, password)?;
        let users = self.users.read().await;
        match users.get(username) {
            Some(stored) if stored == password => Ok(Account {
                username: username.to_string(),
            }),
            _ => {
                tracing::warn!(%username, "login rejected");
                Err(AuthError::InvalidCredentials)
            }
        }
    }
}
