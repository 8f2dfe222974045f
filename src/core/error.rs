//! Error types.
//!
//! Two families:
//! - `ConfigError`: malformed construction parameters or input keys.
//!   Fatal to the call; values are rejected, never clamped.
//! - `ArenaError`: requests naming combatants or cells the arena cannot
//!   honour (unknown id, occupied start cell, ...).
//!
//! An illegal move is *not* an error. It is reported as
//! `MoveOutcome::Blocked` and the caller branches on it.

use super::cell::Cell;
use super::combatant::CombatantId;

/// Invalid configuration or input translation.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Board size must be at least 1.
    #[error("board size must be positive, got {0}")]
    InvalidBoardSize(usize),

    /// Wall-break probability must lie in `[0, 1]`.
    #[error("extra wall break probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),

    /// Stay-attack damage multiplier must be at least 1.
    #[error("stay damage multiplier must be at least 1, got {0}")]
    InvalidMultiplier(i32),

    /// Wall matrices whose lengths do not fit the board size.
    #[error("wall grid for a {size}x{size} board has {vertical} vertical and {horizontal} horizontal walls")]
    MalformedWallGrid {
        size: usize,
        vertical: usize,
        horizontal: usize,
    },

    /// Key with no direction bound to it.
    #[error("no direction bound to key {0:?}")]
    UnknownDirectionKey(char),
}

/// Rejected arena request.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ArenaError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("combatant {0} does not exist")]
    UnknownCombatant(CombatantId),

    #[error("combatant {0} is dead")]
    CombatantDead(CombatantId),

    #[error("cell {0} is outside the board")]
    CellOutOfBounds(Cell),

    #[error("cell {0} is already occupied")]
    CellOccupied(Cell),

    #[error("wall grid is {actual}x{actual} but the board is {expected}x{expected}")]
    WallGridSizeMismatch { expected: usize, actual: usize },

    #[error("arena already holds the maximum of 255 combatants")]
    RosterFull,

    #[error("stay-in-place attacks are disabled")]
    StayDisabled,
}
