//! Grid coordinates, step offsets, and the eight compass directions.
//!
//! ## Cell
//!
//! A `(row, col)` coordinate, 0-indexed from the top-left corner.
//! Coordinates are signed so that a step off the edge of the board is
//! representable and can be rejected by a bounds check.
//!
//! ## Direction
//!
//! The eight single-step moves a combatant may choose. Keyboard layout
//! translation lives here too:
//!
//! ```
//! use maze_brawl::core::{Direction, Offset};
//!
//! let dir = Direction::from_key('q').unwrap();
//! assert_eq!(dir, Direction::UpLeft);
//! assert_eq!(dir.offset(), Offset::new(-1, -1));
//! assert!(dir.is_diagonal());
//! ```

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// A grid coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    /// Row index, growing downwards.
    pub row: i32,
    /// Column index, growing rightwards.
    pub col: i32,
}

impl Cell {
    /// Create a new cell.
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The cell reached by applying `offset` to this one.
    #[must_use]
    pub const fn offset(self, offset: Offset) -> Self {
        Self {
            row: self.row + offset.d_row,
            col: self.col + offset.d_col,
        }
    }

    /// The offset that takes this cell to `other`.
    #[must_use]
    pub const fn delta_to(self, other: Cell) -> Offset {
        Offset::new(other.row - self.row, other.col - self.col)
    }

    /// King-move distance: the larger of the row and column differences.
    #[must_use]
    pub fn chebyshev_distance(self, other: Cell) -> u32 {
        let delta = self.delta_to(other);
        delta.d_row.unsigned_abs().max(delta.d_col.unsigned_abs())
    }

    /// Taxicab distance: the sum of the row and column differences.
    #[must_use]
    pub fn manhattan_distance(self, other: Cell) -> u32 {
        let delta = self.delta_to(other);
        delta.d_row.unsigned_abs() + delta.d_col.unsigned_abs()
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A displacement between two cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Offset {
    /// Row displacement.
    pub d_row: i32,
    /// Column displacement.
    pub d_col: i32,
}

impl Offset {
    /// Create a new offset.
    #[must_use]
    pub const fn new(d_row: i32, d_col: i32) -> Self {
        Self { d_row, d_col }
    }

    /// Reduce to a unit step: each component becomes -1, 0 or 1.
    ///
    /// ```
    /// use maze_brawl::core::Offset;
    ///
    /// assert_eq!(Offset::new(3, -2).signum(), Offset::new(1, -1));
    /// assert_eq!(Offset::new(0, 5).signum(), Offset::new(0, 1));
    /// ```
    #[must_use]
    pub const fn signum(self) -> Self {
        Self {
            d_row: self.d_row.signum(),
            d_col: self.d_col.signum(),
        }
    }

    /// True when both components are zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.d_row == 0 && self.d_col == 0
    }

    /// True for a single orthogonal step (Manhattan length 1).
    #[must_use]
    pub const fn is_orthogonal(self) -> bool {
        self.d_row.abs() + self.d_col.abs() == 1
    }

    /// True for a single diagonal step.
    #[must_use]
    pub const fn is_diagonal(self) -> bool {
        self.d_row.abs() == 1 && self.d_col.abs() == 1
    }

    /// The row-only component of this offset.
    #[must_use]
    pub const fn row_part(self) -> Self {
        Self::new(self.d_row, 0)
    }

    /// The column-only component of this offset.
    #[must_use]
    pub const fn col_part(self) -> Self {
        Self::new(0, self.d_col)
    }
}

/// One of the eight single-step moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// All eight directions, orthogonal first.
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    /// The four orthogonal directions.
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The `(row, col)` displacement of this direction.
    #[must_use]
    pub const fn offset(self) -> Offset {
        match self {
            Direction::Up => Offset::new(-1, 0),
            Direction::Down => Offset::new(1, 0),
            Direction::Left => Offset::new(0, -1),
            Direction::Right => Offset::new(0, 1),
            Direction::UpLeft => Offset::new(-1, -1),
            Direction::UpRight => Offset::new(-1, 1),
            Direction::DownLeft => Offset::new(1, -1),
            Direction::DownRight => Offset::new(1, 1),
        }
    }

    /// True for the four corner-cutting directions.
    #[must_use]
    pub const fn is_diagonal(self) -> bool {
        self.offset().is_diagonal()
    }

    /// Find the direction matching a unit offset.
    ///
    /// Returns `None` for the zero offset or anything longer than one step.
    #[must_use]
    pub fn from_offset(offset: Offset) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.offset() == offset)
    }

    /// Translate a movement key (`w a s d` straight, `q e z c` diagonal).
    ///
    /// Keys are case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownDirectionKey`] for any other key.
    pub fn from_key(key: char) -> Result<Self, ConfigError> {
        match key.to_ascii_lowercase() {
            'w' => Ok(Direction::Up),
            's' => Ok(Direction::Down),
            'a' => Ok(Direction::Left),
            'd' => Ok(Direction::Right),
            'q' => Ok(Direction::UpLeft),
            'e' => Ok(Direction::UpRight),
            'z' => Ok(Direction::DownLeft),
            'c' => Ok(Direction::DownRight),
            _ => Err(ConfigError::UnknownDirectionKey(key)),
        }
    }
}
