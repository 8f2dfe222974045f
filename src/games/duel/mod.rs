//! Hot-seat "Duel" game built on the arena.
//!
//! - 2-4 combatants start on the board's corners
//! - Each turn the active combatant moves or stays, then attacks
//! - A combatant with no legal move is forced to stay
//! - Last one standing wins; if everyone falls it is a draw

mod game;

pub use game::{BlockedPolicy, Duel, DuelBuilder, GameResult, TurnOutcome, TurnRecord};
