//! Round content: the category label and card texts for a deck.
//!
//! Providers may fail. [`fetch_round_content`] turns any outcome into a
//! payload with exactly the requested number of items, substituting a
//! sentinel category on failure, so the engine never sees an error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::GameMode;

/// Category shown when the provider failed.
pub const OFFLINE_CATEGORY: &str = "OFFLINE MODE";

/// Category shown when no provider is configured.
pub const SYSTEM_ERROR_CATEGORY: &str = "SYSTEM ERROR";

/// Category for manually entered decks without a custom topic.
pub const USER_CONTENT_CATEGORY: &str = "USER GENERATED CONTENT";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("content provider is not configured")]
    Unconfigured,

    #[error("provider request failed: {0}")]
    Request(String),

    #[error("provider returned a malformed payload: {0}")]
    Malformed(String),
}

/// What to generate for a round.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentRequest {
    pub mode: GameMode,
    pub round: u32,
    pub target_count: usize,
}

impl ContentRequest {
    /// The custom topic, if the mode has a non-blank one.
    #[must_use]
    pub fn topic(&self) -> Option<&str> {
        self.mode.topic().map(str::trim).filter(|t| !t.is_empty())
    }

    /// Generation prompt for a text model.
    #[must_use]
    pub fn prompt(&self) -> String {
        let n = self.target_count;
        if let Some(topic) = self.topic() {
            return format!(
                "Generate a list of {n} distinct, plausible items for the user-provided category: \"{topic}\". Make them fit the theme perfectly."
            );
        }
        match self.mode {
            GameMode::Party => format!(
                "Generate a funny, weird, or slightly edgy category (e.g., 'Bad First Date Ideas', 'Reasons to Call in Sick', 'Things Found in a Dumpster') and a list of {n} distinct, creative, short text items for that category. Make them funny."
            ),
            GameMode::Timed => format!(
                "Generate a category requiring quick thinking (e.g. 'Fast Animals', 'Short Words', 'Red Objects') and {n} simple items."
            ),
            _ => format!(
                "Generate a single random category (e.g., 'Types of Cheese', 'Nuclear Isotopes', '80s Bands') and a list of {n} distinct, plausible items belonging to that category."
            ),
        }
    }
}

/// Category and card texts for one deck.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoundContent {
    pub category: String,
    pub items: Vec<String>,
}

impl RoundContent {
    #[must_use]
    pub fn new(category: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            category: category.into(),
            items,
        }
    }

    /// Fit a provider payload to the request.
    ///
    /// Pads with `Mystery Item {i}` or truncates to `target_count`, and
    /// replaces the category with the upper-cased custom topic if one was
    /// requested.
    #[must_use]
    pub fn normalized(mut self, request: &ContentRequest) -> Self {
        let target = request.target_count;
        let deficit = target.saturating_sub(self.items.len());
        self.items
            .extend((0..deficit).map(|i| format!("Mystery Item {}", i)));
        self.items.truncate(target);
        if let Some(topic) = request.topic() {
            self.category = topic.to_uppercase();
        }
        self
    }

    /// Payload used when the provider failed.
    #[must_use]
    pub fn offline(target_count: usize) -> Self {
        Self::new(
            OFFLINE_CATEGORY,
            (0..target_count)
                .map(|i| format!("Error / Offline {}", i))
                .collect(),
        )
    }

    /// Payload used when no provider is configured.
    #[must_use]
    pub fn system_error(target_count: usize) -> Self {
        Self::new(
            SYSTEM_ERROR_CATEGORY,
            vec!["MISSING API KEY".to_string(); target_count],
        )
    }

    /// Check if this is a failure payload.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.category == OFFLINE_CATEGORY || self.category == SYSTEM_ERROR_CATEGORY
    }
}

/// Source of round content.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Generate a category and items. May return more or fewer items than
    /// requested; [`fetch_round_content`] fixes that up.
    async fn generate_round_content(
        &self,
        request: &ContentRequest,
    ) -> Result<RoundContent, ProviderError>;
}

/// Ask the provider for content. Never fails.
///
/// The result always has exactly `request.target_count` items.
pub async fn fetch_round_content<P>(provider: &P, request: &ContentRequest) -> RoundContent
where
    P: ContentProvider + ?Sized,
{
    match provider.generate_round_content(request).await {
        Ok(content) => content.normalized(request),
        Err(ProviderError::Unconfigured) => {
            tracing::warn!("content provider unconfigured, using system error deck");
            RoundContent::system_error(request.target_count)
        }
        Err(e) => {
            tracing::warn!(error = %e, round = request.round, "content generation failed, using offline deck");
            RoundContent::offline(request.target_count)
        }
    }
}
