//! Game engine logic and state management.
//!
//! This module drives the core data structures with discrete commands:
//!
//! - [`GameEngine`] - Command-driven state machine (movement, rotation, locking, restart)
//! - [`GameState`] - Single source of truth read by renderers, plus its [`GameSnapshot`]
//! - [`GameStats`] - Score, level and line counters
//! - [`PieceGenerator`] - Uniform random piece draws from a [`PieceSeed`]
//! - [`DropState`] and [`drop_interval`] - Drop-timing state machine for an external scheduler
//! - [`Command`] and [`GameEvent`] - Input and notification vocabulary
//!
//! # Game Flow
//!
//! 1. Create a [`GameEngine`] (two pieces are drawn: the active one and the next one)
//! 2. Feed it commands in arrival order; a scheduler sends [`Command::Tick`] every
//!    [`GameEngine::drop_interval`]
//! 3. When a piece can no longer descend it locks, full rows are cleared and scored, and the
//!    next piece spawns
//! 4. A piece locking at or above the spawn row ends the game until [`Command::Restart`]
//!
//! # Example
//!
//! ```
//! use tetoris_engine::{Command, GameEngine, GameEvent, PieceSeed};
//!
//! let seed: PieceSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
//! let mut engine = GameEngine::with_seed(seed);
//!
//! let mut cleared = 0;
//! let mut sink = |event: &GameEvent| {
//!     if let GameEvent::LinesCleared { lines, .. } = event {
//!         cleared += lines;
//!     }
//! };
//! while !engine.state().is_game_over() {
//!     engine.apply_with(Command::HardDrop, &mut sink);
//! }
//! assert_eq!(cleared, engine.state().lines_cleared());
//! ```

pub use self::{
    command::*, drop_timer::*, event::*, game_engine::*, game_state::*, game_stats::*,
    piece_generator::*,
};

mod command;
mod drop_timer;
mod event;
mod game_engine;
mod game_state;
mod game_stats;
mod piece_generator;
