//! Game state module - the full, serializable state of one game
//!
//! This is the import/export blob: grid, score, step counter, owner, and the
//! presentation settings stored alongside. Field names follow the JSON shape
//! front-ends already persist (`userId`, `tiles`, `score`, `step`, ...).

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::presentation::Presentation;
use crate::types::{Tile, DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default = "default_size")]
    pub size: usize,
    /// `None` until the first `start_game` allocates the grid.
    #[serde(default)]
    pub tiles: Option<Vec<Vec<Tile>>>,
    #[serde(default)]
    pub score: u64,
    #[serde(default)]
    pub step: u64,
    /// `None` on import means "keep the settings already configured".
    #[serde(default)]
    pub presentation: Option<Presentation>,
}

fn default_size() -> usize {
    DEFAULT_BOARD_SIZE
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            user_id: None,
            size: DEFAULT_BOARD_SIZE,
            tiles: None,
            score: 0,
            step: 0,
            presentation: None,
        }
    }
}

impl GameState {
    /// Parse an exported state blob.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let state: GameState = serde_json::from_str(json)
            .map_err(|e| EngineError::InvalidInput(format!("malformed game state: {e}")))?;
        state.validate()?;
        Ok(state)
    }

    /// Serialize to the exported JSON shape.
    pub fn to_json(&self) -> EngineResult<String> {
        serde_json::to_string(self)
            .map_err(|e| EngineError::InvalidInput(format!("unserializable game state: {e}")))
    }

    /// Structural checks for an imported state.
    ///
    /// The grid must be a `size x size` square whose values are all `0` or a power
    /// of two >= 2. Score and step are trusted as given.
    pub fn validate(&self) -> EngineResult<()> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.size) {
            return Err(EngineError::InvalidInput(format!(
                "board size must be between {MIN_BOARD_SIZE} and {MAX_BOARD_SIZE}, got {}",
                self.size
            )));
        }

        let Some(tiles) = &self.tiles else {
            return Ok(());
        };

        if tiles.len() != self.size || tiles.iter().any(|row| row.len() != self.size) {
            return Err(EngineError::InvalidInput(format!(
                "tiles must form a {0}x{0} grid",
                self.size
            )));
        }

        for (y, row) in tiles.iter().enumerate() {
            for (x, &tile) in row.iter().enumerate() {
                if !is_valid_tile(tile) {
                    return Err(EngineError::InvalidInput(format!(
                        "tile ({x}, {y}) holds {tile}, which is not 0 or a power of two >= 2"
                    )));
                }
            }
        }

        if let Some(presentation) = &self.presentation {
            presentation
                .validate()
                .map_err(|e| EngineError::InvalidInput(e.to_string()))?;
        }

        Ok(())
    }
}

/// `0` or `2^k` for `k >= 1`.
pub fn is_valid_tile(tile: Tile) -> bool {
    tile == 0 || (tile >= 2 && tile.is_power_of_two())
}
