//! Core types shared across the workspace
//!
//! This crate contains pure data types with no external dependencies:
//! board constants, move directions, per-move outcomes, and front-end actions.

/// Board edge length used when no size is configured (4x4)
pub const DEFAULT_BOARD_SIZE: usize = 4;

/// Smallest playable board edge length
pub const MIN_BOARD_SIZE: usize = 2;

/// Largest accepted board edge length
pub const MAX_BOARD_SIZE: usize = 64;

/// Tile value that wins the game
pub const WIN_TILE: u32 = 2048;

/// Largest representable tile. Two of these never merge.
pub const MAX_TILE: u32 = 1 << 31;

/// Number of tiles placed on a freshly reset board
pub const INITIAL_TILES: usize = 2;

/// Chance (in percent) that a spawned tile is a 4 instead of a 2
pub const SPAWN_FOUR_PERCENT: u32 = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_rules_defaults() {
        assert_eq!(DEFAULT_BOARD_SIZE, 4);
        assert_eq!(MIN_BOARD_SIZE, 2);
        assert!(MAX_BOARD_SIZE > DEFAULT_BOARD_SIZE);
        assert_eq!(WIN_TILE, 2048);
        assert!(MAX_TILE.is_power_of_two());
        assert_eq!(MAX_TILE.checked_add(MAX_TILE), None);
        assert_eq!(INITIAL_TILES, 2);
        assert_eq!(SPAWN_FOUR_PERCENT, 10);
    }

    #[test]
    fn direction_vectors_are_unit_steps() {
        assert_eq!(Direction::Up.vector(), (0, -1));
        assert_eq!(Direction::Down.vector(), (0, 1));
        assert_eq!(Direction::Left.vector(), (-1, 0));
        assert_eq!(Direction::Right.vector(), (1, 0));
    }

    #[test]
    fn direction_tokens_roundtrip() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_str(dir.as_str()), Some(dir));
        }
        assert_eq!(Direction::from_str("LEFT"), Some(Direction::Left));
        assert_eq!(Direction::from_str("sideways"), None);
        assert_eq!(Direction::from_str(""), None);
    }

    #[test]
    fn outcome_terminality() {
        assert!(Outcome::Win.is_terminal());
        assert!(Outcome::GameOver.is_terminal());
        assert!(!Outcome::Start.is_terminal());
        assert!(!Outcome::Move.is_terminal());
        assert!(!Outcome::NoChange.is_terminal());
    }
}

/// The four move directions
///
/// Each direction maps to a unit vector `(dx, dy)` where `x` grows to the right
/// and `y` grows downward:
/// - **Up**: `(0, -1)`
/// - **Down**: `(0, 1)`
/// - **Left**: `(-1, 0)`
/// - **Right**: `(1, 0)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in the order the game-over check visits them.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector `(dx, dy)` of travel
    pub fn vector(&self) -> (i8, i8) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Parse a direction token (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("up"), Some(Direction::Up));
    /// assert_eq!(Direction::from_str("Right"), Some(Direction::Right));
    /// assert_eq!(Direction::from_str("diagonal"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Convert to lowercase token
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Classification of a single `start`/`move` call
///
/// - **Start**: the game was (re)initialized
/// - **NoChange**: the requested direction was illegal; nothing happened
/// - **Move**: tiles moved, a tile spawned, play continues
/// - **Win**: a winning tile is on the board
/// - **GameOver**: no direction is legal anymore
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Start,
    NoChange,
    Move,
    Win,
    GameOver,
}

impl Outcome {
    /// Convert to lowercase token
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::Outcome;
    ///
    /// assert_eq!(Outcome::NoChange.as_str(), "nochange");
    /// assert_eq!(Outcome::GameOver.as_str(), "gameover");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Start => "start",
            Outcome::NoChange => "nochange",
            Outcome::Move => "move",
            Outcome::Win => "win",
            Outcome::GameOver => "gameover",
        }
    }

    /// Win and GameOver end the game; callers should stop issuing moves.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Outcome::Win | Outcome::GameOver)
    }
}

/// A cell coordinate: `x` is the column, `y` is the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Actions a front-end can request from a running game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Slide all tiles in a direction
    Move(Direction),
    /// Throw the current board away and start over
    Restart,
}

/// A tile value: `0` for empty, otherwise a power of two >= 2.
pub type Tile = u32;
