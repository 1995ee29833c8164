//! Board engine - the 2048 state machine
//!
//! Owns the board, score, step counter and RNG. Every call to [`BoardEngine::start_game`]
//! or [`BoardEngine::apply`] produces exactly one [`Outcome`] together with a snapshot.
//!
//! Lifecycle: `Uninitialized -> Active -> {Active, Win, GameOver}`. Terminal outcomes do
//! not lock the engine; callers are expected to stop issuing moves once one is reported.

use std::collections::BTreeMap;

use log::{debug, info, warn};

use crate::board::Board;
use crate::error::{EngineError, EngineResult};
use crate::game_state::GameState;
use crate::presentation::{validate_colors, FontSpec, Offset, Presentation};
use crate::rng::SimpleRng;
use crate::snapshot::{GameSnapshot, MoveEvent, MoveReport};
use crate::types::{
    Direction, Outcome, Position, Tile, DEFAULT_BOARD_SIZE, INITIAL_TILES, MAX_BOARD_SIZE,
    MIN_BOARD_SIZE, WIN_TILE,
};

/// Construction-time settings. Every default is resolved here, once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub size: usize,
    pub user_id: Option<String>,
    pub seed: u32,
    pub presentation: Presentation,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            user_id: None,
            seed: 1,
            presentation: Presentation::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_presentation(mut self, presentation: Presentation) -> Self {
        self.presentation = presentation;
        self
    }

    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.presentation.font = Some(font);
        self
    }
}

/// Pass a validation result through, logging a rejection.
fn check_config<T>(result: EngineResult<T>) -> EngineResult<T> {
    if let Err(e) = &result {
        warn!("rejected configuration: {e}");
    }
    result
}

fn validate_size(size: usize) -> EngineResult<()> {
    if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
        return Err(EngineError::InvalidConfig(format!(
            "board size must be between {MIN_BOARD_SIZE} and {MAX_BOARD_SIZE}, got {size}"
        )));
    }
    Ok(())
}

/// Place one tile on a random empty cell.
///
/// Samples random coordinates until an empty cell comes up. Returns `None` without
/// touching the board when it is full, since the sampling would never terminate.
fn spawn_tile(board: &mut Board, rng: &mut SimpleRng) -> Option<(Position, Tile)> {
    if board.is_full() {
        return None;
    }

    let size = board.size() as u32;
    loop {
        let y = rng.next_range(size) as usize;
        let x = rng.next_range(size) as usize;
        if board.get(x, y) == Some(0) {
            let value = rng.next_spawn_value();
            board.set(x, y, value);
            return Some((Position::new(x, y), value));
        }
    }
}

/// One game of 2048.
#[derive(Debug, Clone)]
pub struct BoardEngine {
    size: usize,
    /// `None` until `start_game` allocates or adopts a grid.
    board: Option<Board>,
    score: u64,
    step: u64,
    user_id: Option<String>,
    presentation: Presentation,
    rng: SimpleRng,
    last_outcome: Option<Outcome>,
    /// Latest transition (consumed by observers).
    last_event: Option<MoveEvent>,
}

impl BoardEngine {
    /// Create an engine with no board yet. Fails with `InvalidConfig` on a size below 2
    /// or malformed presentation settings.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        check_config(validate_size(config.size))?;
        check_config(config.presentation.validate())?;

        Ok(Self {
            size: config.size,
            board: None,
            score: 0,
            step: 0,
            user_id: config.user_id,
            presentation: config.presentation,
            rng: SimpleRng::new(config.seed),
            last_outcome: None,
            last_event: None,
        })
    }

    /// Resume from an exported state. A present grid is adopted as-is by `start_game`.
    pub fn from_state(state: GameState, seed: u32) -> EngineResult<Self> {
        let mut engine = Self::new(EngineConfig::default().with_seed(seed))?;
        engine.import_state(state)?;
        Ok(engine)
    }

    /// Initialize the game.
    ///
    /// Adopts an existing grid when one was imported; otherwise allocates a zeroed
    /// `size x size` grid and seeds it with two random tiles. Score and step keep
    /// whatever values were imported (zero for a fresh engine).
    pub fn start_game(&mut self) -> MoveReport {
        if self.board.is_none() {
            self.board = Some(Board::new(self.size));
            self.reset();
        }

        info!(
            "game started: size={} score={} step={} user={:?}",
            self.size, self.score, self.step, self.user_id
        );

        self.last_event = Some(MoveEvent {
            outcome: Outcome::Start,
            direction: None,
            score_gained: 0,
            merges: 0,
            spawned: None,
        });
        self.report(Outcome::Start)
    }

    /// Throw away the current board and start a new game with zero score and step.
    ///
    /// Picks up a size changed through [`BoardEngine::set_size`].
    pub fn restart(&mut self) -> MoveReport {
        self.board = None;
        self.score = 0;
        self.step = 0;
        self.start_game()
    }

    /// Zero every cell, then spawn the initial tiles.
    pub fn reset(&mut self) {
        let board = self.board.get_or_insert_with(|| Board::new(self.size));
        board.clear();
        for _ in 0..INITIAL_TILES {
            spawn_tile(board, &mut self.rng);
        }
    }

    /// Parse a direction token and apply it.
    ///
    /// Unknown tokens fail with `InvalidInput` and leave the game untouched.
    pub fn move_token(&mut self, token: &str) -> EngineResult<MoveReport> {
        let direction = Direction::from_str(token)
            .ok_or_else(|| EngineError::InvalidInput(format!("unknown direction: {token:?}")))?;
        self.apply(direction)
    }

    /// Resolve one move.
    ///
    /// An illegal direction yields `NoChange` and mutates nothing. Otherwise tiles slide
    /// and merge, the step counter advances, one tile spawns, and the result is
    /// classified as `Win`, `GameOver` or `Move`.
    pub fn apply(&mut self, direction: Direction) -> EngineResult<MoveReport> {
        let board = self.board.as_mut().ok_or(EngineError::NotStarted)?;

        if !board.can_move(direction) {
            debug!("move {} rejected: nothing can slide or merge", direction.as_str());
            self.last_event = Some(MoveEvent {
                outcome: Outcome::NoChange,
                direction: Some(direction),
                score_gained: 0,
                merges: 0,
                spawned: None,
            });
            return Ok(self.report(Outcome::NoChange));
        }

        let resolution = board.resolve(direction);
        self.score += resolution.score_gained;
        self.step += 1;

        // A legal move always frees or keeps at least one empty cell.
        let spawned = spawn_tile(board, &mut self.rng);
        if spawned.is_none() {
            warn!(
                "move {} left no empty cell to spawn into",
                direction.as_str()
            );
        }

        let outcome = if board.contains(WIN_TILE) {
            Outcome::Win
        } else if !board.any_move() {
            Outcome::GameOver
        } else {
            Outcome::Move
        };

        debug!(
            "move {}: merges={} gained={} spawned={:?} step={}",
            direction.as_str(),
            resolution.merges,
            resolution.score_gained,
            spawned,
            self.step
        );
        if outcome.is_terminal() {
            info!(
                "game ended with {}: score={} step={} max_tile={}",
                outcome.as_str(),
                self.score,
                self.step,
                board.max_tile()
            );
        }

        self.last_event = Some(MoveEvent {
            outcome,
            direction: Some(direction),
            score_gained: resolution.score_gained,
            merges: resolution.merges,
            spawned,
        });
        Ok(self.report(outcome))
    }

    /// True if a move in `direction` would change the board. Pure.
    pub fn can_move(&self, direction: Direction) -> bool {
        self.board
            .as_ref()
            .map(|board| board.can_move(direction))
            .unwrap_or(false)
    }

    /// True once no direction is legal. An unstarted game is not over.
    pub fn is_game_over(&self) -> bool {
        self.board
            .as_ref()
            .map(|board| !board.any_move())
            .unwrap_or(false)
    }

    fn report(&mut self, outcome: Outcome) -> MoveReport {
        self.last_outcome = Some(outcome);
        MoveReport {
            outcome,
            snapshot: self.snapshot(),
        }
    }

    /// Copy of everything a renderer may read.
    pub fn snapshot(&self) -> GameSnapshot {
        let tiles = match &self.board {
            Some(board) => board.cells().to_vec(),
            None => vec![0; self.size * self.size],
        };
        GameSnapshot {
            size: self.board.as_ref().map(Board::size).unwrap_or(self.size),
            tiles,
            score: self.score,
            step: self.step,
            outcome: self.last_outcome.unwrap_or(Outcome::Start),
        }
    }

    /// Take the latest transition, leaving `None` behind.
    pub fn take_last_event(&mut self) -> Option<MoveEvent> {
        self.last_event.take()
    }

    // ---- import / export ----

    /// Full state, presentation included.
    pub fn export_state(&self) -> GameState {
        GameState {
            user_id: self.user_id.clone(),
            size: self.board.as_ref().map(Board::size).unwrap_or(self.size),
            tiles: self.board.as_ref().map(Board::rows),
            score: self.score,
            step: self.step,
            presentation: Some(self.presentation.clone()),
        }
    }

    /// Replace the game with an imported one.
    ///
    /// Fails with `InvalidInput` on a malformed state and leaves the engine untouched.
    /// An absent presentation keeps the current settings.
    pub fn import_state(&mut self, state: GameState) -> EngineResult<()> {
        if let Err(e) = state.validate() {
            warn!("rejected imported state: {e}");
            return Err(e);
        }

        let board = match &state.tiles {
            Some(rows) => Some(Board::from_rows(rows).ok_or_else(|| {
                EngineError::InvalidInput("tiles must form a square grid".to_string())
            })?),
            None => None,
        };

        self.size = state.size;
        self.board = board;
        self.score = state.score;
        self.step = state.step;
        self.user_id = state.user_id;
        if let Some(presentation) = state.presentation {
            self.presentation = presentation;
        }
        self.last_outcome = None;
        self.last_event = None;
        Ok(())
    }

    pub fn import_json(&mut self, json: &str) -> EngineResult<()> {
        self.import_state(GameState::from_json(json)?)
    }

    pub fn export_json(&self) -> EngineResult<String> {
        self.export_state().to_json()
    }

    // ---- setters ----

    /// Board size for the next `restart` (or the first `start_game`).
    pub fn set_size(&mut self, size: usize) -> EngineResult<()> {
        check_config(validate_size(size))?;
        self.size = size;
        Ok(())
    }

    pub fn set_user(&mut self, user_id: Option<String>) {
        self.user_id = user_id;
    }

    pub fn set_presentation(&mut self, presentation: Presentation) -> EngineResult<()> {
        check_config(presentation.validate())?;
        self.presentation = presentation;
        Ok(())
    }

    pub fn set_colors(&mut self, colors: BTreeMap<Tile, String>) -> EngineResult<()> {
        check_config(validate_colors(&colors))?;
        self.presentation.tile_colors = colors;
        Ok(())
    }

    pub fn set_offsets(&mut self, offsets: BTreeMap<Tile, Offset>) {
        self.presentation.offsets = offsets;
    }

    pub fn set_global_offset(&mut self, offset: Offset) {
        self.presentation.global_offset = offset;
    }

    pub fn set_line_thickness(&mut self, thickness: u32) -> EngineResult<()> {
        if thickness == 0 {
            return check_config(Err(EngineError::InvalidConfig(
                "line thickness must be positive".to_string(),
            )));
        }
        self.presentation.line_thickness = thickness;
        Ok(())
    }

    pub fn set_filled(&mut self, filled: bool) {
        self.presentation.filled = filled;
    }

    pub fn set_font(&mut self, font: FontSpec) -> EngineResult<()> {
        if font.family.trim().is_empty() {
            return check_config(Err(EngineError::InvalidConfig(
                "font family must not be empty".to_string(),
            )));
        }
        self.presentation.font = Some(font);
        Ok(())
    }

    // ---- accessors ----

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn tiles(&self) -> Option<Vec<Vec<Tile>>> {
        self.board.as_ref().map(Board::rows)
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    pub fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome
    }

    pub fn started(&self) -> bool {
        self.board.is_some()
    }
}
