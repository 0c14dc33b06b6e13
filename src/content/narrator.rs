//! Game-master commentary.
//!
//! The narrator is flavor only. Its lines go into the log when they are still
//! relevant; the engine never waits on them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::provider::ProviderError;

/// Persona handed to text models as the system instruction.
pub const GAME_MASTER_PERSONA: &str = "You are the \"Game Master\" of a high-stakes digital elimination game called \"Safe / Nuked\". \
Your personality is sadistic, sarcastic, slightly robotic, and witty (like a dystopian announcer). \
Keep comments short (under 20 words). Mock players when they die. \
Be vaguely encouraging but suspicious when they survive.";

/// Line used when no narrator is configured.
pub const UNCONFIGURED_LINE: &str = "Error: Logic Core Offline (Missing API Key)";

/// Line used when the narrator answered with nothing.
pub const EMPTY_LINE: &str = "Proceed.";

/// Something worth commenting on.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NarrationEvent {
    /// The first round is loading.
    Start,
    /// A human revealed a safe card. `detail` is the card text.
    Safe { player: String, detail: String },
    /// A player revealed a trap.
    Death { player: String, detail: String },
    /// The game has a winner.
    Win { player: String },
}

impl NarrationEvent {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            NarrationEvent::Start => "start",
            NarrationEvent::Safe { .. } => "safe",
            NarrationEvent::Death { .. } => "death",
            NarrationEvent::Win { .. } => "win",
        }
    }

    /// Commentary prompt for a text model.
    #[must_use]
    pub fn prompt(&self) -> String {
        match self {
            NarrationEvent::Start => {
                "The game is starting. Welcome the meatbags... I mean, players.".to_string()
            }
            NarrationEvent::Safe { player, detail } => format!(
                "Player {player} chose \"{detail}\" and survived. Give a backhanded compliment or express disappointment that nothing exploded."
            ),
            NarrationEvent::Death { player, detail } => format!(
                "Player {player} chose \"{detail}\" and triggered a NUKE. They are eliminated. Mock them ruthlessly."
            ),
            NarrationEvent::Win { player } => format!(
                "Player {player} has won the game. Congratulate them, but warn them it's not over forever."
            ),
        }
    }

    /// Line used when the narrator failed.
    #[must_use]
    pub fn fallback(&self) -> &'static str {
        match self {
            NarrationEvent::Death { .. } => "Eliminated.",
            _ => "Safe.",
        }
    }
}

/// Source of game-master commentary.
#[async_trait]
pub trait Narrator: Send + Sync {
    async fn commentary(&self, event: &NarrationEvent) -> Result<String, ProviderError>;
}

/// Ask the narrator for a line. Never fails.
pub async fn fetch_commentary<N>(narrator: &N, event: &NarrationEvent) -> String
where
    N: Narrator + ?Sized,
{
    match narrator.commentary(event).await {
        Ok(text) if text.trim().is_empty() => EMPTY_LINE.to_string(),
        Ok(text) => text,
        Err(ProviderError::Unconfigured) => UNCONFIGURED_LINE.to_string(),
        Err(e) => {
            tracing::debug!(error = %e, event = event.name(), "narrator failed");
            event.fallback().to_string()
        }
    }
}
