//! Collaborators outside the state machine.
//!
//! ## Key Types
//!
//! - `ContentProvider`: category and card texts for a round
//! - `Narrator`: flavor commentary for the game-master log
//! - `AccountService`: optional login for lobby joins
//! - `OfflineContent`: deterministic built-in provider and narrator
//!
//! The engine only sees the normalized results of `fetch_round_content` and
//! `fetch_commentary`; provider failures never reach it as errors.

pub mod account;
pub mod narrator;
pub mod offline;
pub mod provider;

pub use account::{Account, AccountService, AuthError, InMemoryAccounts};
pub use narrator::{
    fetch_commentary, NarrationEvent, Narrator, EMPTY_LINE, GAME_MASTER_PERSONA,
    UNCONFIGURED_LINE,
};
pub use offline::OfflineContent;
pub use provider::{
    fetch_round_content, ContentProvider, ContentRequest, ProviderError, RoundContent,
    OFFLINE_CATEGORY, SYSTEM_ERROR_CATEGORY, USER_CONTENT_CATEGORY,
};
