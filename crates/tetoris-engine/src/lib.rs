//! Falling-block puzzle engine.
//!
//! The crate is split into two layers:
//!
//! - [`core`] - board storage and piece geometry (shapes, rotation tables, collision)
//! - [`engine`] - the command-driven [`GameEngine`] state machine, scoring and drop timing
//!
//! # Example
//!
//! ```
//! use tetoris_engine::{Command, GameEngine};
//!
//! let mut engine = GameEngine::new();
//! engine.apply(Command::MoveLeft);
//! engine.apply(Command::Rotate);
//! let report = engine.apply(Command::HardDrop);
//!
//! assert!(report.is_accepted());
//! assert_eq!(engine.state().stats().completed_pieces(), 1);
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Reason a command left the game state unchanged.
///
/// Commands never fail in the sense of corrupting state: an `Err` only reports that the
/// command was silently rejected.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum CommandError {
    #[display("piece colliding with the board or its walls")]
    Collision,
    #[display("game is paused")]
    Paused,
    #[display("game is over")]
    GameOver,
}
