//! Core engine types: cells, directions, combatants, configuration, RNG, errors.
//!
//! These are the building blocks every other module speaks in. Rule
//! variants are expressed through `ArenaConfig` rather than by modifying
//! the core.

pub mod cell;
pub mod combatant;
pub mod config;
pub mod error;
pub mod rng;

pub use cell::{Cell, Direction, Offset};
pub use combatant::{CombatAttributes, Combatant, CombatantId};
pub use config::{ArenaConfig, MovementMode};
pub use error::{ArenaError, ConfigError};
pub use rng::GameRng;
