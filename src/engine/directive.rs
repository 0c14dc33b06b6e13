//! What the engine asks its host to do, and what comes back.
//!
//! The engine never sleeps or awaits. It returns [`Directive`]s; the host
//! performs them and feeds the results back as [`Task`]s (or narration text)
//! on the same queue as user actions. Every task carries the [`Stamp`] of the
//! state it was scheduled for, and the engine drops it if the state has since
//! moved on.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::content::{ContentRequest, NarrationEvent, RoundContent};
use crate::core::Phase;

/// Snapshot of the state a task was scheduled for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stamp {
    pub round: u32,
    pub phase: Phase,
    pub generation: u64,
}

/// Identifies a narration request.
///
/// A reply is written to the log only if it belongs to the current session
/// and round, no engine line was written after the request, and no newer
/// narration has already been applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NarrationTicket {
    pub session: u32,
    pub round: u32,
    pub seq: u64,
    /// Engine-written line count at issue time.
    pub log_mark: u64,
}

/// Why a round is being reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResetCause {
    /// A trap eliminated someone and two or more players remain.
    Elimination,
    /// Every safe card was revealed.
    Exhausted,
}

/// Deferred or async work coming back into the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskKind {
    /// The content provider answered.
    ContentReady(RoundContent),
    /// The AI acting player picks a card.
    AiReveal,
    /// The AI placer arms a card.
    AiPlaceTrap,
    /// One countdown step in timed mode.
    TimerTick,
    /// End of the elimination pause.
    BeginReshuffle,
    /// End of the reshuffle pause; the new deck appears.
    FinishReshuffle(ResetCause),
}

/// A stamped unit of deferred work.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    pub stamp: Stamp,
    pub kind: TaskKind,
}

impl Task {
    #[must_use]
    pub fn new(stamp: Stamp, kind: TaskKind) -> Self {
        Self { stamp, kind }
    }
}

/// Work the host must carry out for the engine.
#[derive(Clone, Debug, PartialEq)]
pub enum Directive {
    /// Ask the content provider for a round, then resolve
    /// `Task::new(stamp, TaskKind::ContentReady(..))`.
    FetchRound {
        stamp: Stamp,
        request: ContentRequest,
    },
    /// Ask the narrator for a line, then hand it to `Game::narrated`.
    Narrate {
        ticket: NarrationTicket,
        event: NarrationEvent,
    },
    /// Resolve `task` after `delay`.
    Schedule { delay: Duration, task: Task },
}

impl Directive {
    /// The scheduled task, if this is a `Schedule`.
    #[must_use]
    pub fn scheduled(&self) -> Option<&Task> {
        match self {
            Directive::Schedule { task, .. } => Some(task),
            _ => None,
        }
    }
}
