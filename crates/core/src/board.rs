//! Board module - manages the tile grid
//!
//! The board is a `size x size` grid where each cell holds `0` (empty) or a power of two.
//! Uses a flat vector in row-major order for cache locality.
//! Coordinates: (x, y) where x is the column (left to right) and y is the row (top to bottom).

use arrayvec::ArrayVec;

use crate::types::{Direction, Tile, MAX_TILE};

/// Direction-dependent scan over one axis.
///
/// Visits indices from the side nearest the destination edge back toward the far edge,
/// skipping the edge itself when the axis is the axis of travel (a tile there cannot
/// move any further).
#[derive(Debug, Clone, Copy)]
struct ImportantRange {
    next: isize,
    min: isize,
    max: isize,
    step: isize,
}

impl ImportantRange {
    fn new(size: usize, component: i8) -> Self {
        let size = size as isize;
        if component < 0 {
            Self { next: 1, min: 1, max: size - 1, step: 1 }
        } else if component > 0 {
            Self { next: size - 2, min: 0, max: size - 2, step: -1 }
        } else {
            Self { next: size - 1, min: 0, max: size - 1, step: -1 }
        }
    }
}

impl Iterator for ImportantRange {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.next < self.min || self.next > self.max {
            return None;
        }
        let current = self.next;
        self.next += self.step;
        Some(current as usize)
    }
}

/// Equal tiles merge unless the sum would not fit in a [`Tile`].
#[inline]
fn can_merge(tile: Tile, other: Tile) -> bool {
    tile == other && tile < MAX_TILE
}

/// Summary of a single slide-and-merge pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Sum of the values of all tiles created by merges.
    pub score_gained: u64,
    /// Number of merges performed.
    pub merges: u32,
    /// Whether any tile changed position or value.
    pub moved: bool,
}

/// The game board - `size` columns x `size` rows using flat storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    /// Flat vector of tiles, row-major order (y * size + x)
    cells: Vec<Tile>,
}

impl Board {
    /// Create a new empty board
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    /// Build a board from rows. Returns `None` unless the rows form a non-empty square.
    pub fn from_rows(rows: &[Vec<Tile>]) -> Option<Self> {
        let size = rows.len();
        if size == 0 || rows.iter().any(|row| row.len() != size) {
            return None;
        }
        Some(Self {
            size,
            cells: rows.iter().flatten().copied().collect(),
        })
    }

    /// Calculate flat index from signed coordinates
    #[inline(always)]
    fn index(&self, x: isize, y: isize) -> Option<usize> {
        let size = self.size as isize;
        if x < 0 || x >= size || y < 0 || y >= size {
            return None;
        }
        Some((y as usize) * self.size + (x as usize))
    }

    /// Edge length of the board
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get tile at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: usize, y: usize) -> Option<Tile> {
        if x >= self.size || y >= self.size {
            return None;
        }
        Some(self.cells[y * self.size + x])
    }

    /// Set tile at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: usize, y: usize, tile: Tile) -> bool {
        if x >= self.size || y >= self.size {
            return false;
        }
        self.cells[y * self.size + x] = tile;
        true
    }

    /// Get a reference to the internal flat cells
    pub fn cells(&self) -> &[Tile] {
        &self.cells
    }

    /// Convert to nested rows (the export shape)
    pub fn rows(&self) -> Vec<Vec<Tile>> {
        self.cells
            .chunks(self.size)
            .map(|row| row.to_vec())
            .collect()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&tile| tile == 0).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&tile| tile != 0)
    }

    pub fn max_tile(&self) -> Tile {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    pub fn contains(&self, value: Tile) -> bool {
        self.cells.contains(&value)
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Check whether a move in `direction` would change anything.
    ///
    /// Only the immediate neighbor of each tile in the direction of travel is inspected.
    /// Because cells are scanned in the same order [`Board::resolve`] uses, a one-step
    /// lookahead is enough: any tile that can travel has an empty or equal neighbor.
    pub fn can_move(&self, direction: Direction) -> bool {
        let (dx, dy) = direction.vector();

        for y in ImportantRange::new(self.size, dy) {
            for x in ImportantRange::new(self.size, dx) {
                let tile = self.cells[y * self.size + x];
                if tile == 0 {
                    continue;
                }

                let neighbor = self
                    .index(x as isize + dx as isize, y as isize + dy as isize)
                    .map(|idx| self.cells[idx]);
                if neighbor == Some(0) || neighbor.is_some_and(|n| can_merge(tile, n)) {
                    return true;
                }
            }
        }
        false
    }

    /// True if at least one direction is legal.
    pub fn any_move(&self) -> bool {
        Direction::ALL.iter().any(|&dir| self.can_move(dir))
    }

    /// Directions that would change the board, in [`Direction::ALL`] order.
    pub fn legal_directions(&self) -> ArrayVec<Direction, 4> {
        Direction::ALL
            .iter()
            .copied()
            .filter(|&dir| self.can_move(dir))
            .collect()
    }

    /// Slide and merge every tile toward `direction`.
    ///
    /// Tiles nearest the destination edge settle first. Each tile slides as far as the
    /// empty cells allow, then merges into the next cell if it holds the same value and
    /// that cell has not already received a merge during this pass.
    pub fn resolve(&mut self, direction: Direction) -> Resolution {
        let (vx, vy) = direction.vector();
        let (dx, dy) = (vx as isize, vy as isize);
        let mut merged_into = vec![false; self.cells.len()];
        let mut result = Resolution::default();

        for y in ImportantRange::new(self.size, vy) {
            for x in ImportantRange::new(self.size, vx) {
                let src = y * self.size + x;
                let tile = self.cells[src];
                if tile == 0 {
                    continue;
                }

                let (mut adj_x, mut adj_y) = (x as isize, y as isize);
                while let Some(next) = self.index(adj_x + dx, adj_y + dy) {
                    if self.cells[next] != 0 {
                        break;
                    }
                    adj_x += dx;
                    adj_y += dy;
                }

                // Both coordinates stay in bounds while sliding.
                let landed = (adj_y as usize) * self.size + (adj_x as usize);
                if landed != src {
                    self.cells[landed] = tile;
                    self.cells[src] = 0;
                    result.moved = true;
                }

                if let Some(dest) = self.index(adj_x + dx, adj_y + dy) {
                    if can_merge(tile, self.cells[dest]) && !merged_into[dest] {
                        self.cells[dest] += tile;
                        self.cells[landed] = 0;
                        merged_into[dest] = true;
                        result.score_gained += self.cells[dest] as u64;
                        result.merges += 1;
                        result.moved = true;
                    }
                }
            }
        }

        result
    }

    /// Positions of all empty cells, row-major
    pub fn empty_positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &tile)| tile == 0)
            .map(move |(idx, _)| (idx % self.size, idx / self.size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[&[Tile]]) -> Board {
        let rows: Vec<Vec<Tile>> = rows.iter().map(|r| r.to_vec()).collect();
        Board::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_important_range_orders() {
        let neg: Vec<usize> = ImportantRange::new(4, -1).collect();
        let pos: Vec<usize> = ImportantRange::new(4, 1).collect();
        let zero: Vec<usize> = ImportantRange::new(4, 0).collect();

        assert_eq!(neg, vec![1, 2, 3]);
        assert_eq!(pos, vec![2, 1, 0]);
        assert_eq!(zero, vec![3, 2, 1, 0]);
    }

    #[test]
    fn test_board_index_calculation() {
        let b = Board::new(4);
        assert_eq!(b.index(0, 0), Some(0));
        assert_eq!(b.index(3, 0), Some(3));
        assert_eq!(b.index(0, 1), Some(4));
        assert_eq!(b.index(3, 3), Some(15));
        assert_eq!(b.index(-1, 0), None);
        assert_eq!(b.index(4, 0), None);
        assert_eq!(b.index(0, 4), None);
    }

    #[test]
    fn test_slide_left_merges_pair() {
        let mut b = board(&[&[2, 2, 0, 0], &[0; 4], &[0; 4], &[0; 4]]);
        let res = b.resolve(Direction::Left);

        assert_eq!(b.rows()[0], vec![4, 0, 0, 0]);
        assert_eq!(res.score_gained, 4);
        assert_eq!(res.merges, 1);
        assert!(res.moved);
    }

    #[test]
    fn test_merge_once_per_destination() {
        let mut b = board(&[&[2, 2, 2, 2], &[0; 4], &[0; 4], &[0; 4]]);
        let res = b.resolve(Direction::Left);

        assert_eq!(b.rows()[0], vec![4, 4, 0, 0]);
        assert_eq!(res.score_gained, 8);
        assert_eq!(res.merges, 2);
    }

    #[test]
    fn test_no_chain_tripling() {
        let mut b = board(&[&[4, 2, 2, 0], &[0; 4], &[0; 4], &[0; 4]]);
        b.resolve(Direction::Left);
        assert_eq!(b.rows()[0], vec![4, 4, 0, 0]);

        let mut b = board(&[&[2, 2, 4, 0], &[0; 4], &[0; 4], &[0; 4]]);
        b.resolve(Direction::Left);
        assert_eq!(b.rows()[0], vec![4, 4, 0, 0]);
    }

    #[test]
    fn test_three_equal_merges_nearest_pair() {
        let mut b = board(&[&[0, 2, 2, 2], &[0; 4], &[0; 4], &[0; 4]]);
        b.resolve(Direction::Right);
        assert_eq!(b.rows()[0], vec![0, 0, 2, 4]);
    }

    #[test]
    fn test_slide_down_column() {
        let mut b = board(&[&[2, 0, 0, 0], &[0; 4], &[2, 0, 0, 0], &[4, 0, 0, 0]]);
        let res = b.resolve(Direction::Down);

        let col: Vec<Tile> = b.rows().iter().map(|r| r[0]).collect();
        assert_eq!(col, vec![0, 0, 4, 4]);
        assert_eq!(res.score_gained, 4);
    }

    #[test]
    fn test_slide_up_without_merge() {
        let mut b = board(&[&[0, 0, 0, 0], &[0, 8, 0, 0], &[0, 0, 0, 0], &[0, 2, 0, 0]]);
        let res = b.resolve(Direction::Up);

        assert_eq!(b.get(1, 0), Some(8));
        assert_eq!(b.get(1, 1), Some(2));
        assert_eq!(res.merges, 0);
        assert!(res.moved);
    }

    #[test]
    fn test_can_move_matches_resolution() {
        let stuck_left = board(&[&[2, 4, 8, 16], &[0; 4], &[0; 4], &[0; 4]]);
        assert!(!stuck_left.can_move(Direction::Left));
        assert!(!stuck_left.can_move(Direction::Right));
        assert!(!stuck_left.can_move(Direction::Up));
        assert!(stuck_left.can_move(Direction::Down));

        for dir in Direction::ALL {
            let mut copy = stuck_left.clone();
            let moved = copy.resolve(dir).moved;
            assert_eq!(moved, stuck_left.can_move(dir), "{:?}", dir);
        }
    }

    #[test]
    fn test_full_board_without_pairs_is_stuck() {
        let b = board(&[&[2, 4, 2, 4], &[4, 2, 4, 2], &[2, 4, 2, 4], &[4, 2, 4, 2]]);
        assert!(b.is_full());
        assert!(!b.any_move());
        assert!(b.legal_directions().is_empty());
    }

    #[test]
    fn test_full_board_with_vertical_pair() {
        let b = board(&[&[2, 4, 2, 4], &[2, 8, 4, 2], &[4, 2, 8, 4], &[8, 4, 2, 8]]);
        assert!(b.can_move(Direction::Up));
        assert!(b.can_move(Direction::Down));
        assert!(!b.can_move(Direction::Left));
        assert!(!b.can_move(Direction::Right));
        assert_eq!(
            b.legal_directions().as_slice(),
            &[Direction::Up, Direction::Down]
        );
    }

    #[test]
    fn test_largest_tiles_do_not_merge() {
        let mut b = board(&[&[MAX_TILE, MAX_TILE], &[0, 0]]);
        assert!(!b.can_move(Direction::Left));
        assert!(!b.can_move(Direction::Right));
        assert!(b.can_move(Direction::Down));

        let res = b.resolve(Direction::Left);
        assert_eq!(res, Resolution::default());
        assert_eq!(b.rows()[0], vec![MAX_TILE, MAX_TILE]);

        let mut b = board(&[&[MAX_TILE / 2, MAX_TILE / 2], &[0, 0]]);
        let res = b.resolve(Direction::Left);
        assert_eq!(b.rows()[0], vec![MAX_TILE, 0]);
        assert_eq!(res.score_gained, MAX_TILE as u64);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        assert!(Board::from_rows(&[vec![0, 0], vec![0]]).is_none());
        assert!(Board::from_rows(&[vec![0, 0, 0], vec![0, 0, 0]]).is_none());
        assert!(Board::from_rows(&[]).is_none());
    }

    #[test]
    fn test_empty_positions() {
        let b = board(&[&[2, 0], &[0, 4]]);
        let empty: Vec<(usize, usize)> = b.empty_positions().collect();
        assert_eq!(empty, vec![(1, 0), (0, 1)]);
        assert_eq!(b.empty_count(), 2);
        assert_eq!(b.max_tile(), 4);
    }
}
