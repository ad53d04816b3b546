//! Notifications emitted by boards for whatever renders the game.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::mpsc::UnboundedSender;

use crate::common::MoveOutcome;
use crate::geometry::Coordinate;
use crate::stats::GameplayResult;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    /// A shot or shield placement was resolved on the board.
    MoveResolved {
        coordinate: Coordinate,
        outcome: MoveOutcome,
    },
    /// The board's fleet has been wiped out.
    GameOver { target_board_empty: bool },
    /// Final statistics for the board the human was attacking.
    StatsReady(GameplayResult),
    /// The special-ability meter moved from `old` to `new`.
    SpecialProgress { old: u8, new: u8 },
}

/// Receiver of [`GameEvent`]s.
///
/// Sinks are called from the meter ticker task as well as from the thread
/// resolving moves, sometimes while the meter lock is held, so `emit` must
/// not call back into the board.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: GameEvent);
}

impl EventSink for UnboundedSender<GameEvent> {
    fn emit(&self, event: GameEvent) {
        // a closed receiver just means nobody is watching anymore
        let _ = self.send(event);
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: GameEvent) {}
}

/// Shared in-memory record of emitted events.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub fn snapshot(&self) -> Vec<GameEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Take and clear the recorded events.
    pub fn drain(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Number of recorded events matching `pred`.
    pub fn count(&self, pred: impl Fn(&GameEvent) -> bool) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| pred(e))
            .count()
    }
}

impl EventSink for EventLog {
    fn emit(&self, event: GameEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
