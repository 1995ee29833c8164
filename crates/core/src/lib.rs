//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the 2048 rules: the tile grid, move resolution, tile spawning and
//! win/loss detection. It has **no dependencies** on terminals, rendering, or I/O:
//!
//! - **Deterministic**: the same seed and the same moves produce the same game
//! - **Testable**: every rule is covered by unit tests next to the code
//! - **Portable**: renderers only ever see a [`GameSnapshot`]
//!
//! # Module Structure
//!
//! - [`board`]: `size x size` grid with slide/merge resolution and legality checks
//! - [`engine`]: the [`BoardEngine`] state machine (start, move, spawn, outcome)
//! - [`game_state`]: serializable import/export blob
//! - [`presentation`]: styling settings stored with a game but never interpreted by it
//! - [`rng`]: seeded generator for spawn positions and values
//! - [`snapshot`]: read-only views and per-move reports
//!
//! # Game Rules
//!
//! - **Move**: every tile slides as far as possible toward the chosen edge
//! - **Merge**: two equal tiles that meet combine into one of double value; a tile
//!   produced by a merge does not merge again during the same move
//! - **Score**: increases by the value of every tile produced by a merge
//! - **Spawn**: after each accepted move a 2 (90%) or a 4 (10%) appears on a random
//!   empty cell
//! - **Win**: a 2048 tile is on the board
//! - **Game over**: no direction can slide or merge anything
//!
//! # Example
//!
//! ```
//! use tui_2048_core::{BoardEngine, EngineConfig};
//! use tui_2048_types::{Direction, Outcome};
//!
//! let mut game = BoardEngine::new(EngineConfig::default().with_seed(12345)).unwrap();
//! assert_eq!(game.start_game().outcome, Outcome::Start);
//!
//! let report = game.apply(Direction::Left).unwrap();
//! assert!(matches!(
//!     report.outcome,
//!     Outcome::Move | Outcome::NoChange
//! ));
//! ```

pub mod board;
pub mod engine;
pub mod error;
pub mod game_state;
pub mod presentation;
pub mod rng;
pub mod snapshot;

pub use tui_2048_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Resolution};
pub use engine::{BoardEngine, EngineConfig};
pub use error::{EngineError, EngineResult};
pub use game_state::GameState;
pub use presentation::{FontSpec, Offset, Presentation};
pub use rng::SimpleRng;
pub use snapshot::{GameSnapshot, MoveEvent, MoveReport};
