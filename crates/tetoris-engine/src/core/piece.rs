use std::{fmt, str::FromStr};

use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::{BOARD_WIDTH, board::Board};

/// A falling piece (tetrimino) with position, rotation, and type.
///
/// Pieces are immutable values: movement and rotation return new `Piece` instances and
/// never check collisions. Use [`Board::is_valid_placement`] to validate a candidate.
///
/// # Coordinate System
///
/// - The position is the top-left corner of the piece's bounding matrix in board coordinates
/// - X increases rightward, Y increases downward
/// - Y may be negative while the piece is partially above the visible board
///
/// # Example
///
/// ```
/// use tetoris_engine::{Piece, PieceKind, PiecePosition};
///
/// let piece = Piece::new(PieceKind::T);
/// assert_eq!(piece.position(), PiecePosition::SPAWN);
///
/// let moved = piece.right().down();
/// assert_eq!(moved.position(), PiecePosition::new(5, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    position: PiecePosition,
    rotation: PieceRotation,
    kind: PieceKind,
}

impl Piece {
    /// Creates a piece of the given kind in spawn orientation at the spawn position.
    #[must_use]
    pub const fn new(kind: PieceKind) -> Self {
        Self {
            position: PiecePosition::SPAWN,
            rotation: PieceRotation::SPAWN,
            kind,
        }
    }

    /// Creates a piece at an arbitrary position and rotation.
    #[must_use]
    pub const fn with_placement(
        kind: PieceKind,
        rotation: PieceRotation,
        position: PiecePosition,
    ) -> Self {
        Self {
            position,
            rotation,
            kind,
        }
    }

    #[must_use]
    pub const fn position(&self) -> PiecePosition {
        self.position
    }

    #[must_use]
    pub const fn rotation(&self) -> PieceRotation {
        self.rotation
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns the board coordinates of every occupied cell of this piece.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let PiecePosition { x, y } = self.position;
        self.kind
            .occupied_offsets(self.rotation)
            .map(move |(dx, dy)| (x + dx, y + dy))
    }

    #[must_use]
    pub const fn left(&self) -> Self {
        self.shifted(-1, 0)
    }

    #[must_use]
    pub const fn right(&self) -> Self {
        self.shifted(1, 0)
    }

    #[must_use]
    pub const fn down(&self) -> Self {
        self.shifted(0, 1)
    }

    #[must_use]
    pub const fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            position: PiecePosition::new(self.position.x + dx, self.position.y + dy),
            rotation: self.rotation,
            kind: self.kind,
        }
    }

    /// Returns this piece rotated 90° clockwise around its bounding matrix.
    ///
    /// The anchor position is kept: there is no wall-kick search.
    #[must_use]
    pub const fn rotated_right(&self) -> Self {
        Self {
            position: self.position,
            rotation: self.rotation.rotated_right(),
            kind: self.kind,
        }
    }

    /// Returns the lowest position this piece can reach by moving straight down.
    ///
    /// The piece keeps descending while the next row down is a valid placement.
    #[must_use]
    pub fn simulate_drop_position(&self, board: &Board) -> Self {
        let mut dropped = *self;
        loop {
            let next = dropped.down();
            if !board.is_valid_placement(next) {
                return dropped;
            }
            dropped = next;
        }
    }
}

/// Text form `"<kind>#<rotation>@<x>,<y>"`, e.g. `"T#1@4,-1"`.
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}#{}@{},{}",
            self.kind.as_char(),
            self.rotation.0,
            self.position.x,
            self.position.y
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid piece {input:?}: {reason}")]
pub struct ParsePieceError {
    input: String,
    reason: &'static str,
}

impl FromStr for Piece {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = |reason| ParsePieceError {
            input: s.to_owned(),
            reason,
        };

        let (kind_str, rest) = s
            .split_once('#')
            .ok_or_else(|| error("missing '#' in format 'kind#rotation@x,y'"))?;
        let (rotation_str, position_str) = rest
            .split_once('@')
            .ok_or_else(|| error("missing '@' in format 'kind#rotation@x,y'"))?;
        let (x_str, y_str) = position_str
            .split_once(',')
            .ok_or_else(|| error("missing ',' in format 'kind#rotation@x,y'"))?;

        let mut kind_chars = kind_str.chars();
        let kind = match (kind_chars.next(), kind_chars.next()) {
            (Some(c), None) => PieceKind::from_char(c).ok_or_else(|| error("unknown piece kind"))?,
            _ => return Err(error("piece kind must be a single character")),
        };
        let rotation = rotation_str
            .parse::<u8>()
            .ok()
            .and_then(PieceRotation::from_index)
            .ok_or_else(|| error("rotation must be 0-3"))?;
        let x = x_str
            .parse()
            .map_err(|_| error("invalid x coordinate"))?;
        let y = y_str
            .parse()
            .map_err(|_| error("invalid y coordinate"))?;

        Ok(Self::with_placement(kind, rotation, PiecePosition::new(x, y)))
    }
}

impl Serialize for Piece {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Piece {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Anchor position of a piece on the board.
///
/// Signed so that pieces may sit partially above row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct PiecePosition {
    x: i32,
    y: i32,
}

impl PiecePosition {
    /// Where every new piece appears: `(BOARD_WIDTH / 2 - 1, 0)`.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const SPAWN: Self = Self::new((BOARD_WIDTH / 2 - 1) as i32, 0);

    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn x(self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> i32 {
        self.y
    }
}

/// Rotation state of a piece.
///
/// - `0`: spawn orientation
/// - `1`: 90° clockwise
/// - `2`: 180°
/// - `3`: 270° clockwise
///
/// Rotation wraps around modulo 4.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceRotation(u8);

impl PieceRotation {
    pub const SPAWN: Self = Self(0);

    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 4 { Some(Self(index)) } else { None }
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn rotated_right(self) -> Self {
        Self((self.0 + 1) % 4)
    }

    const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// The seven piece kinds. Each kind doubles as the color identifier of the cells it leaves
/// on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    I = 0,
    O = 1,
    T = 2,
    J = 3,
    L = 4,
    S = 5,
    Z = 6,
}

/// Every kind is equally likely; draws are independent.
impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece kinds (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Returns offsets of the occupied cells within the bounding matrix for a rotation.
    pub fn occupied_offsets(
        self,
        rotation: PieceRotation,
    ) -> impl Iterator<Item = (i32, i32)> + use<> {
        let shape: &'static ShapeMatrix = &PIECE_SHAPES[self as usize][rotation.as_usize()];
        (0..MATRIX_SIZE).flat_map(move |dy| {
            (0..MATRIX_SIZE)
                .filter(move |&dx| shape[dy][dx])
                .map(move |dx| offset(dx, dy))
        })
    }

    /// Side length of the square matrix this kind rotates in (4 for I, 2 for O, 3 otherwise).
    #[must_use]
    pub const fn matrix_size(self) -> usize {
        match self {
            PieceKind::I => 4,
            PieceKind::O => 2,
            PieceKind::T | PieceKind::J | PieceKind::L | PieceKind::S | PieceKind::Z => 3,
        }
    }

    /// Theme color of this kind, as a `#RRGGBB` string.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            PieceKind::I => "#4EA8DE",
            PieceKind::O => "#FFC857",
            PieceKind::T => "#A06CD5",
            PieceKind::J => "#57CC99",
            PieceKind::L => "#FF7B00",
            PieceKind::S => "#FF8FA3",
            PieceKind::Z => "#FF4D6D",
        }
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetoris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
        }
    }

    /// Parses a piece kind from a single uppercase character.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetoris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('I'), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            _ => None,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

const MATRIX_SIZE: usize = 4;

/// Occupancy of a piece within a 4×4 bounding matrix, indexed `[row][column]`.
type ShapeMatrix = [[bool; MATRIX_SIZE]; MATRIX_SIZE];

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const fn offset(dx: usize, dy: usize) -> (i32, i32) {
    (dx as i32, dy as i32)
}

/// Generates all 4 rotation states of a shape by rotating 90° clockwise.
///
/// Each step transposes the `size`×`size` matrix and reverses every row, i.e.
/// `new[y][x] = old[size - 1 - x][y]`.
const fn shape_rotations(size: usize, shape: &ShapeMatrix) -> [ShapeMatrix; 4] {
    let mut rotates = [*shape; 4];
    let mut i = 1;
    while i < 4 {
        let mut new_shape = [[false; MATRIX_SIZE]; MATRIX_SIZE];
        let mut y = 0;
        while y < size {
            let mut x = 0;
            while x < size {
                new_shape[y][x] = rotates[i - 1][size - 1 - x][y];
                x += 1;
            }
            y += 1;
        }
        rotates[i] = new_shape;
        i += 1;
    }
    rotates
}

static PIECE_SHAPES: [[ShapeMatrix; 4]; PieceKind::LEN] = {
    const X: bool = true;
    const E: bool = false;
    const EEEE: [bool; 4] = [E; 4];
    [
        // I-piece
        shape_rotations(
            PieceKind::I.matrix_size(),
            &[EEEE, [X, X, X, X], EEEE, EEEE],
        ),
        // O-piece
        shape_rotations(
            PieceKind::O.matrix_size(),
            &[[X, X, E, E], [X, X, E, E], EEEE, EEEE],
        ),
        // T-piece
        shape_rotations(
            PieceKind::T.matrix_size(),
            &[[E, X, E, E], [X, X, X, E], EEEE, EEEE],
        ),
        // J-piece
        shape_rotations(
            PieceKind::J.matrix_size(),
            &[[X, E, E, E], [X, X, X, E], EEEE, EEEE],
        ),
        // L-piece
        shape_rotations(
            PieceKind::L.matrix_size(),
            &[[E, E, X, E], [X, X, X, E], EEEE, EEEE],
        ),
        // S-piece
        shape_rotations(
            PieceKind::S.matrix_size(),
            &[[E, X, X, E], [X, X, E, E], EEEE, EEEE],
        ),
        // Z-piece
        shape_rotations(
            PieceKind::Z.matrix_size(),
            &[[X, X, E, E], [E, X, X, E], EEEE, EEEE],
        ),
    ]
};
