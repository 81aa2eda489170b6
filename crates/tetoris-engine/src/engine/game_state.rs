use serde::{Deserialize, Serialize};

use crate::{Board, DropState, GameStats, Piece, PieceKind, drop_interval};

/// Complete observable state of one game.
///
/// Owned by [`GameEngine`](crate::GameEngine); renderers read it through
/// [`GameEngine::state`](crate::GameEngine::state) and never mutate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) active: Option<Piece>,
    pub(crate) next: PieceKind,
    pub(crate) stats: GameStats,
    pub(crate) drop_state: DropState,
}

impl GameState {
    pub(crate) fn new(board: Board, active: PieceKind, next: PieceKind) -> Self {
        Self {
            board,
            active: Some(Piece::new(active)),
            next,
            stats: GameStats::new(),
            drop_state: DropState::Running,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The falling piece. `None` only after the game has ended.
    #[must_use]
    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    /// Kind of the piece that spawns after the active one locks.
    #[must_use]
    pub fn next(&self) -> PieceKind {
        self.next
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.stats.level()
    }

    #[must_use]
    pub fn lines_cleared(&self) -> usize {
        self.stats.total_cleared_lines()
    }

    #[must_use]
    pub fn drop_state(&self) -> DropState {
        self.drop_state
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.drop_state.is_paused()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.drop_state.is_game_over()
    }

    /// Serializable copy of everything a front end needs to draw a frame.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            active: self.active,
            active_cells: self
                .active
                .map(|piece| piece.occupied_positions().collect())
                .unwrap_or_default(),
            next: self.next,
            score: self.score(),
            level: self.level(),
            lines: self.lines_cleared(),
            paused: self.is_paused(),
            game_over: self.is_game_over(),
            drop_interval_ms: u64::try_from(drop_interval(self.level()).as_millis())
                .unwrap_or(u64::MAX),
        }
    }
}

/// Point-in-time view of a [`GameState`], ready for JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub active: Option<Piece>,
    /// Board coordinates `(x, y)` covered by the active piece, including hidden rows.
    pub active_cells: Vec<(i32, i32)>,
    pub next: PieceKind,
    pub score: usize,
    pub level: usize,
    pub lines: usize,
    pub paused: bool,
    pub game_over: bool,
    pub drop_interval_ms: u64,
}
