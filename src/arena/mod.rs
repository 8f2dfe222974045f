//! The arena: the single owned value a turn loop drives.
//!
//! `Arena` holds the wall layout, the roster, and the RNG, and exposes
//! move/attack as one atomic `act`. It is passed around by reference;
//! there is no process-wide board state.

pub mod action;
pub mod state;

pub use action::{ActionReport, MoveOutcome, MovementResult, TurnAction, STAY_KEY};
pub use state::Arena;
