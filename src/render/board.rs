//! Text rendering of an arena.
//!
//! ```text
//! +---+---+---+
//! | R   . | . |
//! +   +---+   +
//! | .   .   b |
//! +---+---+---+
//! ```
//!
//! The active combatant is drawn upper-case, everyone else lower-case.
//! Dead combatants are not drawn.

use std::fmt;

use crate::arena::Arena;
use crate::core::{Cell, CombatantId};

const WALL_H: &str = "---";
const GAP_H: &str = "   ";
const EMPTY: char = '.';

/// Display adapter that draws the board.
#[derive(Clone, Copy, Debug)]
pub struct BoardView<'a> {
    arena: &'a Arena,
    active: Option<CombatantId>,
}

impl<'a> BoardView<'a> {
    /// View the board with no highlighted combatant.
    #[must_use]
    pub fn new(arena: &'a Arena) -> Self {
        Self { arena, active: None }
    }

    /// Highlight the combatant whose turn it is.
    #[must_use]
    pub fn with_active(mut self, active: CombatantId) -> Self {
        self.active = Some(active);
        self
    }

    fn glyph_at(&self, cell: Cell) -> char {
        match self.arena.combatant_at(cell) {
            Some(c) if Some(c.id) == self.active => c.glyph.to_ascii_uppercase(),
            Some(c) => c.glyph.to_ascii_lowercase(),
            None => EMPTY,
        }
    }

    fn write_horizontal(&self, f: &mut fmt::Formatter<'_>, row: usize) -> fmt::Result {
        let size = self.arena.board_size();
        let walls = self.arena.walls();
        for col in 0..size {
            let border = row == 0 || row == size;
            let wall = border || walls.horizontal_wall(row - 1, col);
            write!(f, "+{}", if wall { WALL_H } else { GAP_H })?;
        }
        writeln!(f, "+")
    }

    fn write_cells(&self, f: &mut fmt::Formatter<'_>, row: usize) -> fmt::Result {
        let size = self.arena.board_size();
        let walls = self.arena.walls();
        for col in 0..size {
            let wall = col == 0 || walls.vertical_wall(row, col - 1);
            let glyph = self.glyph_at(Cell::new(row as i32, col as i32));
            write!(f, "{} {glyph} ", if wall { '|' } else { ' ' })?;
        }
        writeln!(f, "|")
    }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.arena.board_size();
        for row in 0..size {
            self.write_horizontal(f, row)?;
            self.write_cells(f, row)?;
        }
        self.write_horizontal(f, size)
    }
}

/// One `"<name>: <health> HP at (r, c)"` line per combatant, dead included.
#[must_use]
pub fn status_lines(arena: &Arena) -> Vec<String> {
    arena
        .combatants()
        .iter()
        .map(|c| format!("{}: {} HP at {}", c.name, c.health, c.position))
        .collect()
}
