use serde::{Deserialize, Serialize};

/// Base points for clearing 1, 2, 3 or 4 lines at once, multiplied by the level.
pub const BASE_POINTS: [usize; 4] = [40, 100, 300, 1200];

/// Lines needed to advance one level.
pub const LINES_PER_LEVEL: usize = 10;

/// Points awarded for clearing `cleared_lines` rows at `level`.
///
/// Counts above four are scored as four.
///
/// # Example
///
/// ```
/// use tetoris_engine::line_clear_points;
///
/// assert_eq!(line_clear_points(0, 3), 0);
/// assert_eq!(line_clear_points(2, 1), 100);
/// assert_eq!(line_clear_points(4, 2), 2400);
/// ```
#[must_use]
pub fn line_clear_points(cleared_lines: usize, level: usize) -> usize {
    if cleared_lines == 0 {
        return 0;
    }
    let index = cleared_lines.min(BASE_POINTS.len()) - 1;
    BASE_POINTS[index].saturating_mul(level)
}

/// Level reached after clearing `total_cleared_lines` rows in total.
#[must_use]
pub const fn level_for_lines(total_cleared_lines: usize) -> usize {
    total_cleared_lines / LINES_PER_LEVEL + 1
}

/// Game statistics tracking score, level, lines cleared, and piece count.
///
/// All counters only grow within a game; [`GameStats::new`] starts a fresh one.
///
/// # Example
///
/// ```
/// use tetoris_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4);
///
/// assert_eq!(stats.score(), 1200);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    score: usize,
    level: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Current level, starting at 1 and increasing every [`LINES_PER_LEVEL`] lines.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of locks by number of lines cleared.
    ///
    /// - `[0]`: locks that cleared nothing
    /// - `[1]` to `[4]`: singles, doubles, triples and four-line clears
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Updates statistics after a piece locks and returns the points awarded.
    ///
    /// Points use the level in effect before the clear; the level is recomputed afterwards.
    /// A lock that clears nothing only bumps the piece counters.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) -> usize {
        self.completed_pieces = self.completed_pieces.saturating_add(1);
        let bucket = cleared_lines.min(self.line_cleared_counter.len() - 1);
        self.line_cleared_counter[bucket] = self.line_cleared_counter[bucket].saturating_add(1);
        if cleared_lines == 0 {
            return 0;
        }

        let points = line_clear_points(cleared_lines, self.level);
        self.score = self.score.saturating_add(points);
        self.total_cleared_lines = self.total_cleared_lines.saturating_add(cleared_lines);
        self.level = level_for_lines(self.total_cleared_lines);
        points
    }
}
