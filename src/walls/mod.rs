//! Wall layout: storage, queries, and maze generation.
//!
//! The `WallGrid` is generated once when an arena is built and never
//! changes afterwards. Every other module only reads it.

pub mod generator;
pub mod grid;

pub use generator::{break_extra_walls, carve_spanning_tree};
pub use grid::WallGrid;
