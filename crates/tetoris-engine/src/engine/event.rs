use serde::Serialize;

use crate::Piece;

/// Notifications emitted while a command is applied.
///
/// Events are reported in the order they happen. A lock yields `PieceLocked`, then
/// `LinesCleared` when rows were removed, then `GameOver` if the game ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum GameEvent {
    /// The piece was written into the board at its final placement.
    PieceLocked { piece: Piece },
    /// Full rows were removed. `level` is the level the points were scored at.
    LinesCleared {
        lines: usize,
        points: usize,
        level: usize,
    },
    GameOver { score: usize },
    Restarted,
}

/// Receives [`GameEvent`]s from [`GameEngine::apply_with`](crate::GameEngine::apply_with).
///
/// Any `FnMut(&GameEvent)` closure is a sink.
pub trait EventSink {
    fn notify(&mut self, event: &GameEvent);
}

impl<F> EventSink for F
where
    F: FnMut(&GameEvent),
{
    fn notify(&mut self, event: &GameEvent) {
        self(event);
    }
}
