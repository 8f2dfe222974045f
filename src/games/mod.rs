//! Playable games built on the arena.

pub mod duel;
