use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PieceKind;

/// Supplies the kinds of upcoming pieces.
///
/// The engine draws once per spawn; implementations decide the selection policy.
pub trait PieceSource {
    fn draw(&mut self) -> PieceKind;
}

/// Seed for deterministic piece generation.
///
/// This is a 128-bit seed for the random number generator behind [`PieceGenerator`].
/// The same seed always produces the same sequence of pieces. Its text form is 32 hex digits.
///
/// # Example
///
/// ```
/// use tetoris_engine::{PieceGenerator, PieceSeed, PieceSource as _};
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
/// let mut first = PieceGenerator::with_seed(seed);
/// let mut second = PieceGenerator::with_seed(seed);
///
/// assert_eq!(first.draw(), second.draw());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid seed {input:?}: expected 32 hex digits")]
pub struct ParseSeedError {
    input: String,
}

impl FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(error());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| error())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

/// Draws each piece uniformly and independently from the seven kinds.
///
/// There is no bag: the same kind may repeat any number of times in a row.
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: Pcg32,
    seed: PieceSeed,
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceGenerator {
    /// Creates a generator with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
            seed,
        }
    }

    /// The seed this generator was created from.
    #[must_use]
    pub const fn seed(&self) -> PieceSeed {
        self.seed
    }
}

impl PieceSource for PieceGenerator {
    fn draw(&mut self) -> PieceKind {
        self.rng.random()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece sequence must not be empty")]
pub struct EmptySequenceError;

/// Replays a fixed list of kinds, starting over after the last one.
///
/// Useful for scripted scenarios where the exact pieces matter.
#[derive(Debug, Clone)]
pub struct PieceSequence {
    pieces: Vec<PieceKind>,
    cursor: usize,
}

impl PieceSequence {
    pub fn new<I>(pieces: I) -> Result<Self, EmptySequenceError>
    where
        I: IntoIterator<Item = PieceKind>,
    {
        let pieces: Vec<_> = pieces.into_iter().collect();
        if pieces.is_empty() {
            return Err(EmptySequenceError);
        }
        Ok(Self { pieces, cursor: 0 })
    }
}

impl PieceSource for PieceSequence {
    fn draw(&mut self) -> PieceKind {
        let kind = self.pieces[self.cursor];
        self.cursor = (self.cursor + 1) % self.pieces.len();
        kind
    }
}
