//! Maze generation: random spanning tree plus noise.
//!
//! 1. Start with every wall present.
//! 2. Carve a spanning tree with a randomized depth-first walk from
//!    `(0, 0)`. Each cell shuffles its four directions on entry and clears
//!    the wall to every unvisited neighbour before descending into it.
//!    The walk keeps an explicit stack of frames so board size is not
//!    bounded by the call stack.
//! 3. Knock down each surviving wall (vertical first, then horizontal,
//!    row-major) with a fixed probability.
//!
//! Step 3 only removes walls, so the connectivity guaranteed by step 2
//! survives it.

use tracing::debug;

use crate::core::config::validate_probability;
use crate::core::{Cell, ConfigError, Direction, GameRng};

use super::WallGrid;

/// One pending cell in the depth-first walk.
struct Frame {
    cell: Cell,
    directions: [Direction; 4],
    next: usize,
}

impl Frame {
    fn enter(cell: Cell, rng: &mut GameRng) -> Self {
        let mut directions = Direction::ORTHOGONAL;
        rng.shuffle(&mut directions);
        Self {
            cell,
            directions,
            next: 0,
        }
    }
}

impl WallGrid {
    /// Generate a fully connected maze with some extra openings.
    ///
    /// ```
    /// use maze_brawl::core::GameRng;
    /// use maze_brawl::walls::WallGrid;
    ///
    /// let mut rng = GameRng::new(7);
    /// let grid = WallGrid::generate(6, 0.25, &mut rng).unwrap();
    /// assert!(grid.is_connected());
    /// ```
    ///
    /// # Errors
    ///
    /// Rejects a zero `size` and probabilities outside `[0, 1]`.
    pub fn generate(
        size: usize,
        extra_break_probability: f64,
        rng: &mut GameRng,
    ) -> Result<Self, ConfigError> {
        if size == 0 || size > i32::MAX as usize {
            return Err(ConfigError::InvalidBoardSize(size));
        }
        validate_probability(extra_break_probability)?;

        let mut grid = WallGrid::walled(size);
        carve_spanning_tree(&mut grid, rng);
        let tree_walls = grid.wall_count();
        let broken = break_extra_walls(&mut grid, extra_break_probability, rng);

        debug!(
            size,
            tree_walls,
            broken,
            remaining = grid.wall_count(),
            "generated maze"
        );
        Ok(grid)
    }
}

/// Clear walls along a randomized depth-first spanning tree from `(0, 0)`.
///
/// Visits every cell exactly once; the cleared walls form a spanning tree
/// of the board so every cell becomes reachable from every other.
pub fn carve_spanning_tree(grid: &mut WallGrid, rng: &mut GameRng) {
    let size = grid.size();
    let mut visited = vec![false; size * size];
    let index = |cell: Cell| cell.row as usize * size + cell.col as usize;

    let origin = Cell::new(0, 0);
    visited[index(origin)] = true;
    let mut stack = vec![Frame::enter(origin, rng)];

    while let Some(frame) = stack.last_mut() {
        if frame.next == frame.directions.len() {
            stack.pop();
            continue;
        }
        let direction = frame.directions[frame.next];
        frame.next += 1;

        let current = frame.cell;
        let next = current.offset(direction.offset());
        if grid.contains(next) && !visited[index(next)] {
            grid.set_wall(current, next, false);
            visited[index(next)] = true;
            stack.push(Frame::enter(next, rng));
        }
    }
}

/// Knock down each remaining wall with probability `probability`.
///
/// The RNG is only consulted for walls that are still standing. Returns the
/// number of walls removed.
///
/// # Panics
///
/// Panics if `probability` is outside `[0, 1]`.
pub fn break_extra_walls(grid: &mut WallGrid, probability: f64, rng: &mut GameRng) -> usize {
    let mut broken = 0;
    for wall in grid.vertical.iter_mut().chain(grid.horizontal.iter_mut()) {
        if *wall && rng.gen_bool(probability) {
            *wall = false;
            broken += 1;
        }
    }
    broken
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spanning_tree_is_connected() {
        for seed in 0..20 {
            let mut grid = WallGrid::walled(7);
            carve_spanning_tree(&mut grid, &mut GameRng::new(seed));
            assert!(grid.is_connected(), "seed {seed} left the maze disconnected");
        }
    }

    #[test]
    fn test_spanning_tree_is_a_tree() {
        // A spanning tree over n*n cells has n*n - 1 edges, so exactly
        // that many walls are cleared out of the 2n(n-1) interior walls.
        let size = 6;
        let mut grid = WallGrid::walled(size);
        carve_spanning_tree(&mut grid, &mut GameRng::new(11));

        let total = 2 * size * (size - 1);
        let cleared = total - grid.wall_count();
        assert_eq!(cleared, size * size - 1);
    }

    #[test]
    fn test_noise_only_removes_walls() {
        let mut grid = WallGrid::walled(6);
        let mut rng = GameRng::new(5);
        carve_spanning_tree(&mut grid, &mut rng);
        let before = grid.clone();

        let broken = break_extra_walls(&mut grid, 0.5, &mut rng);

        assert_eq!(grid.wall_count() + broken, before.wall_count());
        for cell in grid.cells() {
            for next in before.open_neighbors(cell) {
                assert!(!grid.wall_between(cell, next));
            }
        }
    }

    #[test]
    fn test_zero_probability_keeps_the_tree() {
        let mut grid = WallGrid::walled(5);
        let mut rng = GameRng::new(9);
        carve_spanning_tree(&mut grid, &mut rng);
        let before = grid.clone();

        assert_eq!(break_extra_walls(&mut grid, 0.0, &mut rng), 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_full_probability_opens_everything() {
        let grid = WallGrid::generate(5, 1.0, &mut GameRng::new(1)).unwrap();
        assert_eq!(grid.wall_count(), 0);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = WallGrid::generate(8, 0.2, &mut GameRng::new(99)).unwrap();
        let b = WallGrid::generate(8, 0.2, &mut GameRng::new(99)).unwrap();
        assert_eq!(a, b);

        let c = WallGrid::generate(8, 0.2, &mut GameRng::new(100)).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_large_board_does_not_recurse() {
        let grid = WallGrid::generate(200, 0.0, &mut GameRng::new(3)).unwrap();
        assert!(grid.is_connected());
    }

    #[test]
    fn test_single_cell() {
        let grid = WallGrid::generate(1, 0.3, &mut GameRng::new(0)).unwrap();
        assert_eq!(grid.size(), 1);
        assert!(grid.is_connected());
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let mut rng = GameRng::new(0);
        assert_eq!(
            WallGrid::generate(0, 0.2, &mut rng),
            Err(ConfigError::InvalidBoardSize(0))
        );
        assert!(matches!(
            WallGrid::generate(4, 1.5, &mut rng),
            Err(ConfigError::InvalidProbability(_))
        ));
    }
}
