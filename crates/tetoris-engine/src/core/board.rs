use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    BOARD_HEIGHT, BOARD_WIDTH,
    piece::{Piece, PieceKind},
};

/// A single cell of the board.
///
/// A filled cell remembers which kind of piece left it there, which is also its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(PieceKind),
}

impl Cell {
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[must_use]
    pub const fn kind(self) -> Option<PieceKind> {
        match self {
            Cell::Empty => None,
            Cell::Filled(kind) => Some(kind),
        }
    }

    /// `.` for an empty cell, the piece letter otherwise.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Filled(kind) => kind.as_char(),
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Cell::Empty),
            _ => match PieceKind::from_char(c) {
                Some(kind) => Some(Cell::Filled(kind)),
                None => None,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BoardRow {
    cells: [Cell; BOARD_WIDTH],
}

impl BoardRow {
    const EMPTY: Self = Self {
        cells: [Cell::Empty; BOARD_WIDTH],
    };

    fn is_filled(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }
}

/// Error returned when a textual board cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    #[display("expected 20 rows, got {count}")]
    RowCount { count: usize },
    #[display("row {row}: expected 10 cells, got {len}")]
    RowWidth { row: usize, len: usize },
    #[display("row {row}: invalid cell {found:?}, expected '.' or one of IOTJLSZ")]
    InvalidCell { row: usize, found: char },
}

/// The playfield: a fixed 10×20 grid of cells, row 0 at the top.
///
/// Dimensions never change. Rows only move as a whole when complete rows are cleared.
///
/// # Example
///
/// ```
/// use tetoris_engine::{Board, Piece, PieceKind};
///
/// let mut board = Board::EMPTY;
/// let piece = Piece::new(PieceKind::O).simulate_drop_position(&board);
/// board.fill_piece(piece);
///
/// assert_eq!(board.occupied_count(), 4);
/// assert_eq!(board.clear_lines(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [BoardRow; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [BoardRow::EMPTY; BOARD_HEIGHT],
    };

    /// Parses a board from exactly 20 rows of 10 characters (`.` or a piece letter).
    pub fn parse_rows<I, S>(rows: I) -> Result<Self, ParseBoardError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut board = Self::EMPTY;
        let mut count = 0;
        for (y, text) in rows.into_iter().enumerate() {
            count += 1;
            if y >= BOARD_HEIGHT {
                continue;
            }
            let text = text.as_ref();
            let len = text.chars().count();
            if len != BOARD_WIDTH {
                return Err(ParseBoardError::RowWidth { row: y, len });
            }
            for (x, c) in text.chars().enumerate() {
                board.rows[y].cells[x] =
                    Cell::from_char(c).ok_or(ParseBoardError::InvalidCell { row: y, found: c })?;
            }
        }
        if count != BOARD_HEIGHT {
            return Err(ParseBoardError::RowCount { count });
        }
        Ok(board)
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; BOARD_WIDTH]> {
        self.rows.iter().map(|row| &row.cells)
    }

    /// Returns the cell at `(x, y)`, or `None` outside the board.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        let x = column(x)?;
        let y = row(y)?;
        Some(self.rows[y].cells[x])
    }

    /// Overwrites a single cell.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the board.
    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell) {
        self.rows[y].cells[x] = cell;
    }

    /// Number of filled cells on the board.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.cells)
            .filter(|c| !c.is_empty())
            .count()
    }

    /// Checks whether `piece` may occupy its current position.
    ///
    /// Every occupied cell must be within the side walls and above the floor. Cells above
    /// row 0 are allowed (pieces spawn partially hidden); visible cells must be empty.
    #[must_use]
    pub fn is_valid_placement(&self, piece: Piece) -> bool {
        piece.occupied_positions().all(|(x, y)| {
            let Some(x) = column(x) else {
                return false;
            };
            match row(y) {
                Some(y) => self.rows[y].cells[x].is_empty(),
                None => y < 0,
            }
        })
    }

    /// Writes the piece's cells into the board and returns how many were written.
    ///
    /// Cells above row 0 are discarded.
    pub fn fill_piece(&mut self, piece: Piece) -> usize {
        let mut written = 0;
        for (x, y) in piece.occupied_positions() {
            if let (Some(x), Some(y)) = (column(x), row(y)) {
                self.rows[y].cells[x] = Cell::Filled(piece.kind());
                written += 1;
            }
        }
        written
    }

    /// Clears filled lines and returns the number of lines cleared.
    ///
    /// Cleared rows are removed, the rows above shift down, and the same number of empty
    /// rows appear at the top.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        for y in (0..BOARD_HEIGHT).rev() {
            if self.rows[y].is_filled() {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill(BoardRow::EMPTY);
        count
    }
}

fn column(x: i32) -> Option<usize> {
    usize::try_from(x).ok().filter(|&x| x < BOARD_WIDTH)
}

fn row(y: i32) -> Option<usize> {
    usize::try_from(y).ok().filter(|&y| y < BOARD_HEIGHT)
}

/// One line per row, top to bottom.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows.iter().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for cell in row.cells {
                write!(f, "{}", cell.as_char())?;
            }
        }
        Ok(())
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: ["..........", ..., "IIII..OO.."] (one string per row)
        serializer.collect_seq(
            self.rows
                .iter()
                .map(|row| row.cells.iter().map(|c| c.as_char()).collect::<String>()),
        )
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let rows = Vec::<String>::deserialize(deserializer)?;
        Self::parse_rows(rows).map_err(serde::de::Error::custom)
    }
}
