use crate::types::{Direction, Outcome, Position, Tile};

/// Read-only view of a game, the entire contract a renderer needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub size: usize,
    /// Row-major tiles (`y * size + x`).
    pub tiles: Vec<Tile>,
    pub score: u64,
    pub step: u64,
    pub outcome: Outcome,
}

impl GameSnapshot {
    pub fn tile(&self, x: usize, y: usize) -> Option<Tile> {
        if x >= self.size || y >= self.size {
            return None;
        }
        self.tiles.get(y * self.size + x).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.size.max(1))
    }

    pub fn max_tile(&self) -> Tile {
        self.tiles.iter().copied().max().unwrap_or(0)
    }

    pub fn playable(&self) -> bool {
        !self.outcome.is_terminal()
    }
}

/// Tagged result of `start_game` and every move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub outcome: Outcome,
    pub snapshot: GameSnapshot,
}

/// What the most recent transition did.
///
/// Recorded on every `start_game`/move and consumed by observers through
/// `BoardEngine::take_last_event`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveEvent {
    pub outcome: Outcome,
    /// `None` for `Start`.
    pub direction: Option<Direction>,
    pub score_gained: u64,
    pub merges: u32,
    /// Tile placed after the move, if any.
    pub spawned: Option<(Position, Tile)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_lookup_is_row_major() {
        let snap = GameSnapshot {
            size: 2,
            tiles: vec![2, 4, 8, 0],
            score: 0,
            step: 0,
            outcome: Outcome::Start,
        };
        assert_eq!(snap.tile(1, 0), Some(4));
        assert_eq!(snap.tile(0, 1), Some(8));
        assert_eq!(snap.tile(2, 0), None);
        assert_eq!(snap.rows().count(), 2);
        assert_eq!(snap.max_tile(), 8);
        assert!(snap.playable());
    }
}
