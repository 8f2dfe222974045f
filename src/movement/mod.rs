//! Movement legality.
//!
//! `MovementOracle` answers "may a combatant step from here to there?"
//! against a `WallGrid` and the current occupancy. It is shared by
//! voluntary moves, knockback pushes, and attack line checks.

pub mod oracle;

pub use oracle::{MoveShape, MovementOracle, Occupancy};
