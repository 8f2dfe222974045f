//! Single-step movement legality.
//!
//! A move from `from` to `to` is legal when:
//! 1. `from` and `to` are both on the board,
//! 2. no alive combatant stands on `to`,
//! 3. the step is one cell long and not walled off.
//!
//! Straight steps are walled off by the wall between the two cells.
//! A diagonal step is walled off only when *both* corner paths are:
//!
//! ```text
//!   from ── c1        path 1: from → c1 → to   (c1 shares from's row)
//!    │       │        path 2: from → c2 → to   (c2 shares from's column)
//!   c2 ──── to
//! ```
//!
//! Occupancy of the corner cells is irrelevant.

use rustc_hash::FxHashSet;

use crate::core::Cell;
use crate::walls::WallGrid;

/// Source of "is anyone alive standing here?" answers.
pub trait Occupancy {
    /// True when an alive combatant occupies `cell`.
    fn is_occupied(&self, cell: Cell) -> bool;
}

impl Occupancy for FxHashSet<Cell> {
    fn is_occupied(&self, cell: Cell) -> bool {
        self.contains(&cell)
    }
}

impl Occupancy for [Cell] {
    fn is_occupied(&self, cell: Cell) -> bool {
        self.contains(&cell)
    }
}

impl<T: Occupancy + ?Sized> Occupancy for &T {
    fn is_occupied(&self, cell: Cell) -> bool {
        (**self).is_occupied(cell)
    }
}

/// Geometric classification of a requested move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveShape {
    /// Source and destination coincide.
    Stationary,
    /// One straight step.
    Orthogonal,
    /// One diagonal step.
    Diagonal,
    /// More than one cell away on some axis.
    OutOfReach,
}

impl MoveShape {
    /// Classify the move `from → to`.
    #[must_use]
    pub fn classify(from: Cell, to: Cell) -> Self {
        let delta = from.delta_to(to);
        if delta.is_zero() {
            MoveShape::Stationary
        } else if delta.is_orthogonal() {
            MoveShape::Orthogonal
        } else if delta.is_diagonal() {
            MoveShape::Diagonal
        } else {
            MoveShape::OutOfReach
        }
    }
}

/// Decides whether single-step moves are legal against a wall layout.
///
/// Pure queries: nothing here mutates state.
#[derive(Clone, Copy, Debug)]
pub struct MovementOracle<'a> {
    walls: &'a WallGrid,
}

impl<'a> MovementOracle<'a> {
    /// Create an oracle over a wall layout.
    #[must_use]
    pub fn new(walls: &'a WallGrid) -> Self {
        Self { walls }
    }

    /// The wall layout this oracle consults.
    #[must_use]
    pub fn walls(&self) -> &'a WallGrid {
        self.walls
    }

    /// The two corner cells of a diagonal step.
    ///
    /// The first shares `from`'s row, the second shares `from`'s column.
    #[must_use]
    pub fn corner_cells(from: Cell, to: Cell) -> [Cell; 2] {
        [Cell::new(from.row, to.col), Cell::new(to.row, from.col)]
    }

    fn corner_path_clear(&self, from: Cell, corner: Cell, to: Cell) -> bool {
        !self.walls.wall_between(from, corner) && !self.walls.wall_between(corner, to)
    }

    /// Check whether walls alone permit travel between two cells.
    ///
    /// Straight steps need the connecting wall absent. Diagonal steps need
    /// either corner path clear. A cell is always clear to itself. Anything
    /// off the board or further than one step is not clear.
    #[must_use]
    pub fn is_path_clear(&self, from: Cell, to: Cell) -> bool {
        if !self.walls.contains(from) || !self.walls.contains(to) {
            return false;
        }
        match MoveShape::classify(from, to) {
            MoveShape::Stationary => true,
            MoveShape::Orthogonal => !self.walls.wall_between(from, to),
            MoveShape::Diagonal => Self::corner_cells(from, to)
                .into_iter()
                .any(|corner| self.corner_path_clear(from, corner, to)),
            MoveShape::OutOfReach => false,
        }
    }

    /// Check whether a combatant standing on `from` may step onto `to`.
    ///
    /// ```
    /// use maze_brawl::core::Cell;
    /// use maze_brawl::movement::MovementOracle;
    /// use maze_brawl::walls::WallGrid;
    ///
    /// let mut walls = WallGrid::open(3);
    /// walls.set_wall(Cell::new(0, 0), Cell::new(0, 1), true);
    /// let oracle = MovementOracle::new(&walls);
    /// let nobody: &[Cell] = &[];
    ///
    /// assert!(!oracle.is_legal_move(Cell::new(0, 0), Cell::new(0, 1), nobody));
    /// // Still reachable diagonally through (1, 0).
    /// assert!(oracle.is_legal_move(Cell::new(0, 0), Cell::new(1, 1), nobody));
    /// ```
    #[must_use]
    pub fn is_legal_move<O>(&self, from: Cell, to: Cell, occupied: &O) -> bool
    where
        O: Occupancy + ?Sized,
    {
        if !self.walls.contains(from) || !self.walls.contains(to) || occupied.is_occupied(to) {
            return false;
        }
        match MoveShape::classify(from, to) {
            MoveShape::Orthogonal | MoveShape::Diagonal => self.is_path_clear(from, to),
            MoveShape::Stationary | MoveShape::OutOfReach => false,
        }
    }
}
