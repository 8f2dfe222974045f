//! # maze-brawl
//!
//! A turn-based grid combat engine: combatants fight on a square board
//! whose cells are separated by maze walls.
//!
//! ## Design Principles
//!
//! 1. **Walls Are Always Connected**: Every generated board is a spanning
//!    tree plus random extra openings, so every cell can reach every other.
//!
//! 2. **One Owner**: `Arena` owns walls, roster, and RNG. There is no
//!    global board state; turn loops hold an `Arena` by value.
//!
//! 3. **Deterministic**: All randomness flows from one seed through
//!    named ChaCha8 streams. Same seed, same inputs, same game.
//!
//! ## Modules
//!
//! - `core`: Cells, directions, combatants, configuration, errors, RNG
//! - `walls`: Wall grid and maze generation
//! - `movement`: Movement legality (walls, corners, occupancy)
//! - `combat`: Attacks and knockback resolution
//! - `arena`: Composition root and turn actions
//! - `render`: Text rendering of the board
//! - `games`: Playable turn loops (`Duel`)

pub mod core;
pub mod walls;
pub mod movement;
pub mod combat;
pub mod arena;
pub mod render;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    Cell, Direction, Offset,
    CombatAttributes, Combatant, CombatantId,
    ArenaConfig, MovementMode,
    ArenaError, ConfigError,
    GameRng,
};

pub use crate::walls::WallGrid;

pub use crate::movement::{MovementOracle, Occupancy};

pub use crate::combat::{AttackOutcome, KnockbackResolver};

pub use crate::arena::{Arena, ActionReport, MoveOutcome, MovementResult, TurnAction};

pub use crate::render::BoardView;

pub use crate::games::duel::{BlockedPolicy, Duel, DuelBuilder, GameResult};
