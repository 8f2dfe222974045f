//! Plain-text board and status rendering for terminal front ends.

pub mod board;

pub use board::{status_lines, BoardView};
