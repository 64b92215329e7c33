//! Game rules on top of the core board and piece types.
//!
//! - [`GameEngine`] - Board, falling piece and counters, driven by [`Command`]s
//! - [`EngineConfig`] - Starting speed, timer floor and [`RotationPolicy`]
//! - [`GameStats`] - Lines cleared, speed scalar and tick count
//! - [`PieceGenerator`] - Uniform random piece kinds, optionally seeded by [`PieceSeed`]
//! - [`GameSnapshot`] - Read-only copy of the state for rendering
//!
//! # Game Flow
//!
//! 1. A piece spawns facing up at the spawn anchor
//! 2. The player moves and rotates it while a timer issues [`Command::Tick`]
//! 3. Each tick drops the piece one row; once it cannot fall it locks
//! 4. Full rows are removed, the speed scalar shrinks and a new piece spawns
//! 5. A piece that cannot fall from the spawn row ends the game
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{Command, CommandOutcome, EngineConfig, GameEngine};
//!
//! let mut engine = GameEngine::new(EngineConfig::default());
//! engine.apply(Command::MoveLeft);
//! engine.apply(Command::Rotate);
//!
//! let outcome = engine.apply(Command::HardDrop);
//! assert!(outcome.is_locked());
//! assert_eq!(engine.board().filled_count(), 4);
//! assert_eq!(engine.stats().locked_pieces(), 1);
//! ```

pub use self::{
    command::*, config::*, game_engine::*, game_stats::*, piece_generator::*, snapshot::*,
};

mod command;
mod config;
mod game_engine;
mod game_stats;
mod piece_generator;
mod snapshot;
