//! Arena behaviour: movement legality through the public API, boxed-in
//! combatants, and occupancy under random play.

use maze_brawl::arena::{Arena, MoveOutcome, MovementResult, TurnAction};
use maze_brawl::core::{
    ArenaConfig, ArenaError, Cell, CombatAttributes, CombatantId, Direction, MovementMode,
};
use maze_brawl::movement::MovementOracle;
use maze_brawl::walls::WallGrid;
use proptest::prelude::*;
use rustc_hash::FxHashSet;

fn arena_on(walls: WallGrid) -> Arena {
    let config = ArenaConfig::default().with_board_size(walls.size());
    Arena::with_walls(config, walls, 1).unwrap()
}

fn place(arena: &mut Arena, row: i32, col: i32) -> CombatantId {
    arena
        .add_combatant("C", 'c', Cell::new(row, col), 5, CombatAttributes::default())
        .unwrap()
}

/// A combatant fenced in on all four sides cannot move in any direction.
#[test]
fn test_boxed_in_combatant() {
    let mut walls = WallGrid::open(3);
    let center = Cell::new(1, 1);
    for d in Direction::ORTHOGONAL {
        walls.set_wall(center, center.offset(d.offset()), true);
    }
    let mut arena = arena_on(walls);
    let boxed = place(&mut arena, 1, 1);

    assert!(!arena.has_any_legal_move(boxed));
    for direction in Direction::ALL {
        assert_eq!(
            arena.attempt_move(boxed, direction),
            Ok(MoveOutcome::Blocked),
            "{direction:?}"
        );
    }
    assert_eq!(arena.combatant(boxed).unwrap().position, center);

    // Staying is still allowed.
    let report = arena.act(boxed, TurnAction::Stay).unwrap();
    assert_eq!(report.movement, MovementResult::Stayed);
}

/// Surrounded by other combatants instead of walls.
#[test]
fn test_surrounded_by_crowd() {
    let mut arena = arena_on(WallGrid::open(3));
    let center = place(&mut arena, 1, 1);
    let cells: Vec<Cell> = arena.walls().cells().collect();
    for cell in cells {
        if cell != Cell::new(1, 1) {
            place(&mut arena, cell.row, cell.col);
        }
    }

    assert!(!arena.has_any_legal_move(center));
    assert_eq!(arena.alive_count(), 9);
}

/// Diagonal legality ignores who stands on the corner cells.
#[test]
fn test_diagonal_past_occupied_corners() {
    let mut arena = arena_on(WallGrid::open(3));
    let mover = place(&mut arena, 0, 0);
    place(&mut arena, 0, 1);
    place(&mut arena, 1, 0);

    assert_eq!(
        arena.attempt_move(mover, Direction::DownRight),
        Ok(MoveOutcome::Moved)
    );
    assert_eq!(arena.combatant(mover).unwrap().position, Cell::new(1, 1));
}

/// The diagonal needs only one of its two corner paths.
#[test]
fn test_diagonal_corner_paths() {
    let mut walls = WallGrid::open(2);
    walls.set_wall(Cell::new(0, 0), Cell::new(0, 1), true);
    let oracle_walls = walls.clone();
    let oracle = MovementOracle::new(&oracle_walls);
    let nobody: &[Cell] = &[];
    assert!(oracle.is_legal_move(Cell::new(0, 0), Cell::new(1, 1), nobody));

    walls.set_wall(Cell::new(1, 0), Cell::new(1, 1), true);
    let oracle = MovementOracle::new(&walls);
    assert!(!oracle.is_legal_move(Cell::new(0, 0), Cell::new(1, 1), nobody));
    // Symmetric in the reverse direction.
    assert!(!oracle.is_legal_move(Cell::new(1, 1), Cell::new(0, 0), nobody));
}

#[test]
fn test_moves_off_board_blocked() {
    let mut arena = arena_on(WallGrid::open(2));
    let a = place(&mut arena, 0, 0);
    for direction in [Direction::Up, Direction::Left, Direction::UpLeft, Direction::DownLeft] {
        assert_eq!(arena.attempt_move(a, direction), Ok(MoveOutcome::Blocked));
    }
}

#[test]
fn test_four_way_mode() {
    let config = ArenaConfig::default()
        .with_board_size(3)
        .with_movement(MovementMode::FourWay);
    let mut arena = Arena::with_walls(config, WallGrid::open(3), 0).unwrap();
    let a = place(&mut arena, 0, 0);

    assert_eq!(
        arena.legal_directions(a).as_slice(),
        &[Direction::Down, Direction::Right]
    );
    let report = arena.act(a, TurnAction::Move(Direction::DownRight)).unwrap();
    assert_eq!(report.movement, MovementResult::Blocked);
}

#[test]
fn test_input_keys_drive_actions() {
    let mut arena = arena_on(WallGrid::open(3));
    let a = place(&mut arena, 1, 1);

    for (key, expected) in [
        ('d', Cell::new(1, 2)),
        ('z', Cell::new(2, 1)),
        ('W', Cell::new(1, 1)),
        ('q', Cell::new(0, 0)),
    ] {
        let action = TurnAction::from_key(key).unwrap();
        arena.act(a, action).unwrap();
        assert_eq!(arena.combatant(a).unwrap().position, expected, "key {key}");
    }
}

#[test]
fn test_errors_for_bad_ids() {
    let mut arena = arena_on(WallGrid::open(3));
    let ghost = CombatantId::new(3);

    assert_eq!(
        arena.act(ghost, TurnAction::Stay),
        Err(ArenaError::UnknownCombatant(ghost))
    );
    assert!(!arena.has_any_legal_move(ghost));
    assert!(arena.legal_directions(ghost).is_empty());
}

#[test]
fn test_generated_arena_has_open_moves() {
    // A connected maze always leaves at least one open side.
    for seed in 0..20 {
        let mut arena = Arena::new(ArenaConfig::default().with_board_size(6), seed).unwrap();
        let a = arena
            .add_combatant("Solo", 's', Cell::new(3, 3), 5, CombatAttributes::default())
            .unwrap();
        assert!(arena.has_any_legal_move(a), "seed {seed}");
    }
}

fn check_exclusive(arena: &Arena) -> Result<(), TestCaseError> {
    let mut seen = FxHashSet::default();
    for c in arena.alive() {
        prop_assert!(arena.walls().contains(c.position));
        prop_assert!(seen.insert(c.position), "two combatants on {}", c.position);
    }
    Ok(())
}

proptest! {
    /// Random play never puts two alive combatants on one cell.
    #[test]
    fn prop_random_play_keeps_cells_exclusive(
        seed in any::<u64>(),
        size in 2usize..7,
        movers in 2usize..5,
        knockback in 0u32..4,
        moves in prop::collection::vec((0usize..5, 0usize..9), 1..60),
    ) {
        let config = ArenaConfig::default().with_board_size(size);
        let mut arena = Arena::new(config, seed).unwrap();
        let attrs = CombatAttributes::with_damage(1).knockback(knockback);

        let cells: Vec<Cell> = arena.walls().cells().collect();
        let count = movers.min(cells.len());
        for (i, &cell) in cells.iter().rev().step_by(2).take(count).enumerate() {
            arena.add_combatant(format!("C{i}"), 'c', cell, 1000, attrs).unwrap();
        }
        let roster = arena.combatants().len();

        for (who, what) in moves {
            let id = CombatantId::new((who % roster) as u8);
            let action = match Direction::ALL.get(what) {
                Some(&d) => TurnAction::Move(d),
                None => TurnAction::Stay,
            };
            let before = arena.combatant(id).unwrap().position;
            let report = arena.act(id, action).unwrap();

            if report.movement == MovementResult::Blocked {
                prop_assert_eq!(arena.combatant(id).unwrap().position, before);
                prop_assert!(report.attacks.is_empty());
            }
            check_exclusive(&arena)?;
        }
    }
}
