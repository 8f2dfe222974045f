//! The arena: walls, roster, and RNG in one owned value.
//!
//! ## Ownership
//!
//! - `WallGrid`: generated at construction, read-only afterwards
//! - roster: `Vec<Combatant>` indexed by `CombatantId`; never shrinks
//! - RNG: the `"knockback"` stream of the arena seed
//!
//! ## Invariant
//!
//! At most one alive combatant occupies any cell. It is asserted after
//! every mutation; a violation is an engine bug and panics.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::trace;

use super::action::{ActionReport, MoveOutcome, MovementResult, TurnAction};
use crate::combat::{AttackOutcome, KnockbackResolver};
use crate::core::{
    ArenaConfig, ArenaError, Cell, CombatAttributes, Combatant, CombatantId, Direction, GameRng,
};
use crate::movement::MovementOracle;
use crate::walls::WallGrid;

/// Maximum roster size; ids are `u8` and allocated densely.
const MAX_COMBATANTS: usize = 255;

/// Composition root for walls, combatants, movement, and combat.
///
/// ## Example
///
/// ```
/// use maze_brawl::arena::{Arena, MoveOutcome};
/// use maze_brawl::core::{ArenaConfig, Cell, CombatAttributes, Direction};
/// use maze_brawl::walls::WallGrid;
///
/// let config = ArenaConfig::default().with_board_size(3);
/// let mut arena = Arena::with_walls(config, WallGrid::open(3), 42).unwrap();
/// let red = arena
///     .add_combatant("Red", 'R', Cell::new(0, 0), 5, CombatAttributes::default())
///     .unwrap();
///
/// assert!(arena.has_any_legal_move(red));
/// assert_eq!(arena.attempt_move(red, Direction::Right), Ok(MoveOutcome::Moved));
/// assert_eq!(arena.combatant(red).unwrap().position, Cell::new(0, 1));
/// ```
#[derive(Clone, Debug)]
pub struct Arena {
    config: ArenaConfig,
    walls: WallGrid,
    roster: Vec<Combatant>,
    rng: GameRng,
}

impl Arena {
    /// Build an arena with a freshly generated maze.
    ///
    /// The maze comes from the `"walls"` stream of `seed` and knockback
    /// tie-breaks from its `"knockback"` stream, so the same seed always
    /// yields the same board.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::Config`] if `config` is invalid.
    pub fn new(config: ArenaConfig, seed: u64) -> Result<Self, ArenaError> {
        config.validate()?;
        let root = GameRng::new(seed);
        let walls = WallGrid::generate(
            config.board_size,
            config.extra_break_probability,
            &mut root.for_context("walls"),
        )?;
        Ok(Self::assemble(config, walls, &root))
    }

    /// Build an arena around a prepared wall layout.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::Config`] if `config` is invalid, or
    /// [`ArenaError::WallGridSizeMismatch`] if the grid is the wrong size.
    pub fn with_walls(config: ArenaConfig, walls: WallGrid, seed: u64) -> Result<Self, ArenaError> {
        config.validate()?;
        if walls.size() != config.board_size {
            return Err(ArenaError::WallGridSizeMismatch {
                expected: config.board_size,
                actual: walls.size(),
            });
        }
        Ok(Self::assemble(config, walls, &GameRng::new(seed)))
    }

    fn assemble(config: ArenaConfig, walls: WallGrid, root: &GameRng) -> Self {
        Self {
            config,
            walls,
            roster: Vec::new(),
            rng: root.for_context("knockback"),
        }
    }

    // === Read Access ===

    /// The configuration this arena was built with.
    #[must_use]
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// The wall layout.
    #[must_use]
    pub fn walls(&self) -> &WallGrid {
        &self.walls
    }

    /// Side length of the board.
    #[must_use]
    pub fn board_size(&self) -> usize {
        self.walls.size()
    }

    /// A movement oracle over this arena's walls.
    #[must_use]
    pub fn oracle(&self) -> MovementOracle<'_> {
        MovementOracle::new(&self.walls)
    }

    /// Every combatant ever added, dead or alive, in id order.
    #[must_use]
    pub fn combatants(&self) -> &[Combatant] {
        &self.roster
    }

    /// Look up a combatant.
    #[must_use]
    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.roster.get(id.index())
    }

    /// Mutable access for the stats layer (health, attributes).
    ///
    /// Moving a combatant through this handle bypasses legality checks;
    /// use [`Arena::attempt_move`] for that.
    pub fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.roster.get_mut(id.index())
    }

    /// Iterate over alive combatants.
    pub fn alive(&self) -> impl Iterator<Item = &Combatant> {
        self.roster.iter().filter(|c| c.is_alive())
    }

    /// Number of alive combatants.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    /// The alive combatant standing on `cell`, if any.
    #[must_use]
    pub fn combatant_at(&self, cell: Cell) -> Option<&Combatant> {
        self.alive().find(|c| c.position == cell)
    }

    /// Cells currently occupied by alive combatants.
    #[must_use]
    pub fn occupancy(&self) -> FxHashSet<Cell> {
        self.alive().map(|c| c.position).collect()
    }

    // === Roster ===

    /// Place a new combatant on the board.
    ///
    /// # Errors
    ///
    /// Rejects cells off the board or already occupied by an alive
    /// combatant, and rosters that are already full.
    pub fn add_combatant(
        &mut self,
        name: impl Into<String>,
        glyph: char,
        position: Cell,
        health: i32,
        attributes: CombatAttributes,
    ) -> Result<CombatantId, ArenaError> {
        if self.roster.len() >= MAX_COMBATANTS {
            return Err(ArenaError::RosterFull);
        }
        if !self.walls.contains(position) {
            return Err(ArenaError::CellOutOfBounds(position));
        }
        if self.combatant_at(position).is_some() {
            return Err(ArenaError::CellOccupied(position));
        }

        let id = CombatantId::new(self.roster.len() as u8);
        self.roster
            .push(Combatant::new(id, name, glyph, position, health, attributes));
        Ok(id)
    }

    fn living(&self, id: CombatantId) -> Result<&Combatant, ArenaError> {
        let combatant = self.combatant(id).ok_or(ArenaError::UnknownCombatant(id))?;
        if combatant.is_alive() {
            Ok(combatant)
        } else {
            Err(ArenaError::CombatantDead(id))
        }
    }

    // === Movement ===

    /// Directions `id` could legally move in right now, respecting the
    /// configured movement mode.
    ///
    /// Empty for unknown or dead combatants.
    #[must_use]
    pub fn legal_directions(&self, id: CombatantId) -> SmallVec<[Direction; 8]> {
        let Ok(combatant) = self.living(id) else {
            return SmallVec::new();
        };
        let from = combatant.position;
        let occupied = self.occupancy();
        let oracle = self.oracle();

        self.config
            .movement
            .directions()
            .iter()
            .copied()
            .filter(|d| oracle.is_legal_move(from, from.offset(d.offset()), &occupied))
            .collect()
    }

    /// True if `id` has at least one legal move.
    ///
    /// Turn loops use this to force a stationary turn.
    #[must_use]
    pub fn has_any_legal_move(&self, id: CombatantId) -> bool {
        !self.legal_directions(id).is_empty()
    }

    /// Try to move `id` one step.
    ///
    /// On `Moved` the new position is committed immediately. On `Blocked`
    /// nothing changes. Diagonal directions are blocked under
    /// four-way movement.
    ///
    /// # Errors
    ///
    /// Fails for unknown or dead combatants.
    pub fn attempt_move(
        &mut self,
        id: CombatantId,
        direction: Direction,
    ) -> Result<MoveOutcome, ArenaError> {
        let from = self.living(id)?.position;
        let to = from.offset(direction.offset());

        let legal = self.config.movement.allows(direction)
            && self.oracle().is_legal_move(from, to, &self.occupancy());
        if !legal {
            trace!(combatant = %id, ?direction, ?from, "move blocked");
            return Ok(MoveOutcome::Blocked);
        }

        self.roster[id.index()].position = to;
        trace!(combatant = %id, ?from, ?to, "moved");
        self.assert_exclusive_occupancy();
        Ok(MoveOutcome::Moved)
    }

    // === Combat ===

    /// Resolve an attack by `id` against every alive combatant in range.
    ///
    /// # Errors
    ///
    /// Fails for unknown or dead attackers, and for stationary attacks
    /// when they are disabled.
    pub fn resolve_attack(
        &mut self,
        id: CombatantId,
        stays_in_place: bool,
    ) -> Result<Vec<AttackOutcome>, ArenaError> {
        if stays_in_place && !self.config.stay_attack_enabled {
            return Err(ArenaError::StayDisabled);
        }
        let resolver = KnockbackResolver::new(&self.walls, self.config.stay_damage_multiplier);
        let outcomes = resolver.resolve_attack(&mut self.roster, id, stays_in_place, &mut self.rng)?;
        self.assert_exclusive_occupancy();
        Ok(outcomes)
    }

    /// Perform one complete action: move (or stay), then attack.
    ///
    /// The move is committed before the attack is resolved, so range and
    /// line checks see the new position. A blocked move attacks nobody.
    ///
    /// # Errors
    ///
    /// Fails for unknown or dead combatants, and for `Stay` when stationary
    /// attacks are disabled.
    pub fn act(&mut self, id: CombatantId, action: TurnAction) -> Result<ActionReport, ArenaError> {
        let (movement, attacks) = match action {
            TurnAction::Move(direction) => {
                let from = self.living(id)?.position;
                match self.attempt_move(id, direction)? {
                    MoveOutcome::Moved => {
                        let to = self.roster[id.index()].position;
                        let attacks = self.resolve_attack(id, false)?;
                        (MovementResult::Moved { from, to }, attacks)
                    }
                    MoveOutcome::Blocked => (MovementResult::Blocked, Vec::new()),
                }
            }
            TurnAction::Stay => (MovementResult::Stayed, self.resolve_attack(id, true)?),
        };

        Ok(ActionReport {
            actor: id,
            action,
            movement,
            attacks,
        })
    }

    /// Panic if two alive combatants share a cell or one is off the board.
    fn assert_exclusive_occupancy(&self) {
        let mut seen = FxHashSet::default();
        for combatant in self.alive() {
            assert!(
                self.walls.contains(combatant.position),
                "combatant {} is off the board at {}",
                combatant.id,
                combatant.position
            );
            assert!(
                seen.insert(combatant.position),
                "two alive combatants share cell {}",
                combatant.position
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MovementMode;

    fn open_arena(size: usize) -> Arena {
        let config = ArenaConfig::default().with_board_size(size);
        Arena::with_walls(config, WallGrid::open(size), 7).unwrap()
    }

    fn add(arena: &mut Arena, row: i32, col: i32, attributes: CombatAttributes) -> CombatantId {
        arena
            .add_combatant("C", 'c', Cell::new(row, col), 5, attributes)
            .unwrap()
    }

    #[test]
    fn test_new_generates_connected_walls() {
        let arena = Arena::new(ArenaConfig::default().with_board_size(8), 3).unwrap();
        assert_eq!(arena.board_size(), 8);
        assert!(arena.walls().is_connected());
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = Arena::new(ArenaConfig::default(), 11).unwrap();
        let b = Arena::new(ArenaConfig::default(), 11).unwrap();
        assert_eq!(a.walls(), b.walls());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ArenaConfig::default().with_board_size(0);
        assert!(matches!(
            Arena::new(config, 0),
            Err(ArenaError::Config(crate::core::ConfigError::InvalidBoardSize(0)))
        ));
    }

    #[test]
    fn test_wall_size_mismatch() {
        let config = ArenaConfig::default().with_board_size(4);
        let err = Arena::with_walls(config, WallGrid::open(3), 0).unwrap_err();
        assert_eq!(
            err,
            ArenaError::WallGridSizeMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_add_combatant_validation() {
        let mut arena = open_arena(3);
        let a = add(&mut arena, 0, 0, CombatAttributes::default());
        assert_eq!(a, CombatantId::new(0));

        let err = arena
            .add_combatant("B", 'b', Cell::new(0, 0), 5, CombatAttributes::default())
            .unwrap_err();
        assert_eq!(err, ArenaError::CellOccupied(Cell::new(0, 0)));

        let err = arena
            .add_combatant("B", 'b', Cell::new(3, 0), 5, CombatAttributes::default())
            .unwrap_err();
        assert_eq!(err, ArenaError::CellOutOfBounds(Cell::new(3, 0)));
    }

    #[test]
    fn test_dead_combatant_frees_its_cell() {
        let mut arena = open_arena(3);
        let a = add(&mut arena, 0, 0, CombatAttributes::default());
        let b = add(&mut arena, 0, 1, CombatAttributes::default());

        assert_eq!(arena.attempt_move(a, Direction::Right), Ok(MoveOutcome::Blocked));

        arena.combatant_mut(b).unwrap().health = 0;
        assert_eq!(arena.attempt_move(a, Direction::Right), Ok(MoveOutcome::Moved));
        assert_eq!(arena.combatant(b).unwrap().position, Cell::new(0, 1));
        assert_eq!(arena.alive_count(), 1);
    }

    #[test]
    fn test_dead_and_unknown_cannot_move() {
        let mut arena = open_arena(3);
        let a = add(&mut arena, 0, 0, CombatAttributes::default());
        arena.combatant_mut(a).unwrap().health = 0;

        assert_eq!(
            arena.attempt_move(a, Direction::Down),
            Err(ArenaError::CombatantDead(a))
        );
        assert_eq!(
            arena.attempt_move(CombatantId::new(9), Direction::Down),
            Err(ArenaError::UnknownCombatant(CombatantId::new(9)))
        );
        assert!(!arena.has_any_legal_move(a));
    }

    #[test]
    fn test_four_way_blocks_diagonals() {
        let config = ArenaConfig::default()
            .with_board_size(3)
            .with_movement(MovementMode::FourWay);
        let mut arena = Arena::with_walls(config, WallGrid::open(3), 0).unwrap();
        let a = add(&mut arena, 1, 1, CombatAttributes::default());

        assert_eq!(arena.legal_directions(a).len(), 4);
        assert_eq!(arena.attempt_move(a, Direction::UpLeft), Ok(MoveOutcome::Blocked));
        assert_eq!(arena.combatant(a).unwrap().position, Cell::new(1, 1));
    }

    #[test]
    fn test_corner_legal_directions() {
        let mut arena = open_arena(3);
        let a = add(&mut arena, 0, 0, CombatAttributes::default());
        let dirs = arena.legal_directions(a);
        assert_eq!(
            dirs.as_slice(),
            &[Direction::Down, Direction::Right, Direction::DownRight]
        );
    }

    #[test]
    fn test_act_move_then_attack() {
        let mut arena = open_arena(4);
        let a = add(&mut arena, 1, 0, CombatAttributes::with_damage(2).knockback(1));
        let b = add(&mut arena, 1, 2, CombatAttributes::default());

        let report = arena.act(a, TurnAction::Move(Direction::Right)).unwrap();

        assert_eq!(
            report.movement,
            MovementResult::Moved {
                from: Cell::new(1, 0),
                to: Cell::new(1, 1)
            }
        );
        assert_eq!(report.attacks.len(), 1);
        assert_eq!(report.attacks[0].defender, b);
        assert_eq!(report.attacks[0].damage_dealt, 2);
        assert_eq!(arena.combatant(b).unwrap().position, Cell::new(1, 3));
        assert_eq!(arena.combatant(b).unwrap().health, 3);
    }

    #[test]
    fn test_act_blocked_changes_nothing() {
        let mut arena = open_arena(3);
        let a = add(&mut arena, 0, 0, CombatAttributes::default());
        let b = add(&mut arena, 0, 1, CombatAttributes::default());

        let report = arena.act(a, TurnAction::Move(Direction::Up)).unwrap();
        assert_eq!(report.movement, MovementResult::Blocked);
        assert!(report.attacks.is_empty());
        assert!(!report.completed());
        assert_eq!(arena.combatant(b).unwrap().health, 5);
    }

    #[test]
    fn test_act_stay_doubles_damage() {
        let mut arena = open_arena(3);
        let a = add(&mut arena, 0, 0, CombatAttributes::with_damage(1));
        let b = add(&mut arena, 1, 1, CombatAttributes::default());

        let report = arena.act(a, TurnAction::Stay).unwrap();
        assert_eq!(report.movement, MovementResult::Stayed);
        assert_eq!(report.total_damage(), 2);
        assert_eq!(arena.combatant(b).unwrap().health, 3);
    }

    #[test]
    fn test_stay_disabled() {
        let config = ArenaConfig::default()
            .with_board_size(3)
            .with_stay_attack(false);
        let mut arena = Arena::with_walls(config, WallGrid::open(3), 0).unwrap();
        let a = add(&mut arena, 0, 0, CombatAttributes::default());

        assert_eq!(arena.act(a, TurnAction::Stay), Err(ArenaError::StayDisabled));
    }

    #[test]
    fn test_occupancy_and_lookup() {
        let mut arena = open_arena(3);
        let a = add(&mut arena, 2, 2, CombatAttributes::default());
        assert!(arena.occupancy().contains(&Cell::new(2, 2)));
        assert_eq!(arena.combatant_at(Cell::new(2, 2)).map(|c| c.id), Some(a));
        assert!(arena.combatant_at(Cell::new(0, 0)).is_none());
    }
}
