//! Wall storage and read-only queries.
//!
//! Walls live on the edges between orthogonally adjacent cells and are
//! stored as two boolean matrices, flattened row-major:
//!
//! - `vertical`: `size × (size - 1)`, entry `[r][c]` separates `(r, c)` and `(r, c + 1)`
//! - `horizontal`: `(size - 1) × size`, entry `[r][c]` separates `(r, c)` and `(r + 1, c)`
//!
//! Nothing is stored for diagonals. Whether a diagonal step is open is
//! derived from the four orthogonal walls around it by the movement oracle.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{Cell, ConfigError, Direction};

/// Location of a single wall in the flattened matrices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WallSlot {
    Vertical(usize),
    Horizontal(usize),
}

/// Orthogonal wall layout of a square board.
///
/// Immutable once an arena is built; share it by reference.
///
/// ```
/// use maze_brawl::core::Cell;
/// use maze_brawl::walls::WallGrid;
///
/// let mut grid = WallGrid::open(3);
/// grid.set_wall(Cell::new(1, 1), Cell::new(1, 2), true);
///
/// assert!(grid.wall_between(Cell::new(1, 2), Cell::new(1, 1)));
/// assert!(!grid.wall_between(Cell::new(1, 1), Cell::new(0, 1)));
/// assert!(grid.is_connected());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWallGrid")]
pub struct WallGrid {
    pub(super) size: usize,
    pub(super) vertical: Vec<bool>,
    pub(super) horizontal: Vec<bool>,
}

/// Unchecked wire form of a `WallGrid`.
#[derive(Deserialize)]
struct RawWallGrid {
    size: usize,
    vertical: Vec<bool>,
    horizontal: Vec<bool>,
}

impl TryFrom<RawWallGrid> for WallGrid {
    type Error = ConfigError;

    fn try_from(raw: RawWallGrid) -> Result<Self, Self::Error> {
        if raw.size == 0 || raw.size > i32::MAX as usize {
            return Err(ConfigError::InvalidBoardSize(raw.size));
        }
        let edges = raw.size * (raw.size - 1);
        if raw.vertical.len() != edges || raw.horizontal.len() != edges {
            return Err(ConfigError::MalformedWallGrid {
                size: raw.size,
                vertical: raw.vertical.len(),
                horizontal: raw.horizontal.len(),
            });
        }
        Ok(Self {
            size: raw.size,
            vertical: raw.vertical,
            horizontal: raw.horizontal,
        })
    }
}

impl WallGrid {
    fn filled(size: usize, present: bool) -> Self {
        assert!(size > 0, "Board size must be positive");
        let edges = size * (size - 1);
        Self {
            size,
            vertical: vec![present; edges],
            horizontal: vec![present; edges],
        }
    }

    /// A board with no interior walls.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    #[must_use]
    pub fn open(size: usize) -> Self {
        Self::filled(size, false)
    }

    /// A board with every interior wall present.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    #[must_use]
    pub fn walled(size: usize) -> Self {
        Self::filled(size, true)
    }

    /// Side length of the board.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Check whether a cell lies on the board.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        let size = self.size as i64;
        (0..size).contains(&i64::from(cell.row)) && (0..size).contains(&i64::from(cell.col))
    }

    /// Iterate over every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let size = self.size as i32;
        (0..size).flat_map(move |row| (0..size).map(move |col| Cell::new(row, col)))
    }

    fn slot(&self, a: Cell, b: Cell) -> Option<WallSlot> {
        if !self.contains(a) || !self.contains(b) || a.manhattan_distance(b) != 1 {
            return None;
        }
        let row = a.row.min(b.row) as usize;
        let col = a.col.min(b.col) as usize;
        if a.row == b.row {
            Some(WallSlot::Vertical(row * (self.size - 1) + col))
        } else {
            Some(WallSlot::Horizontal(row * self.size + col))
        }
    }

    fn expect_slot(&self, a: Cell, b: Cell) -> WallSlot {
        match self.slot(a, b) {
            Some(slot) => slot,
            None => panic!(
                "wall query requires orthogonally adjacent cells on a {}x{} board, got {} and {}",
                self.size, self.size, a, b
            ),
        }
    }

    /// Check whether a wall blocks direct travel between two cells.
    ///
    /// Order of the two cells does not matter.
    ///
    /// # Panics
    ///
    /// Only defined for orthogonally adjacent on-board cells. Diagonal or
    /// distant pairs panic; diagonals are decided by the movement oracle
    /// from two straight checks.
    #[must_use]
    pub fn wall_between(&self, a: Cell, b: Cell) -> bool {
        match self.expect_slot(a, b) {
            WallSlot::Vertical(i) => self.vertical[i],
            WallSlot::Horizontal(i) => self.horizontal[i],
        }
    }

    /// Place or remove the wall between two adjacent cells.
    ///
    /// # Panics
    ///
    /// Same contract as [`WallGrid::wall_between`].
    pub fn set_wall(&mut self, a: Cell, b: Cell, present: bool) {
        match self.expect_slot(a, b) {
            WallSlot::Vertical(i) => self.vertical[i] = present,
            WallSlot::Horizontal(i) => self.horizontal[i] = present,
        }
    }

    /// Wall between `(row, col)` and `(row, col + 1)`.
    #[must_use]
    pub fn vertical_wall(&self, row: usize, col: usize) -> bool {
        assert!(row < self.size && col + 1 < self.size, "vertical wall index out of range");
        self.vertical[row * (self.size - 1) + col]
    }

    /// Wall between `(row, col)` and `(row + 1, col)`.
    #[must_use]
    pub fn horizontal_wall(&self, row: usize, col: usize) -> bool {
        assert!(row + 1 < self.size && col < self.size, "horizontal wall index out of range");
        self.horizontal[row * self.size + col]
    }

    /// Number of interior walls present.
    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.vertical.iter().chain(&self.horizontal).filter(|&&w| w).count()
    }

    /// Orthogonal neighbours reachable from `cell` without crossing a wall.
    pub fn open_neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        Direction::ORTHOGONAL
            .into_iter()
            .map(move |d| cell.offset(d.offset()))
            .filter(move |&next| self.contains(next) && !self.wall_between(cell, next))
    }

    /// Every cell reachable from `start` by wall-free orthogonal steps.
    ///
    /// Occupancy is ignored; this is pure maze topology.
    #[must_use]
    pub fn reachable_from(&self, start: Cell) -> FxHashSet<Cell> {
        let mut seen = FxHashSet::default();
        if !self.contains(start) {
            return seen;
        }

        let mut queue = VecDeque::from([start]);
        seen.insert(start);
        while let Some(cell) = queue.pop_front() {
            for next in self.open_neighbors(cell) {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    /// True when every cell can reach every other cell.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.reachable_from(Cell::new(0, 0)).len() == self.size * self.size
    }
}
