//! Terminal input module.
//!
//! Maps `crossterm` key events into [`types::GameAction`]s. It is independent of
//! any UI framework and never touches game state.

pub mod map;

pub use tui_2048_types as types;

pub use map::{handle_key_event, should_quit};
