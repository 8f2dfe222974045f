//! Attack resolution: damage and knockback.
//!
//! After a combatant acts, every other alive combatant within one king
//! step of it is a target. For each target, in roster order:
//!
//! 1. **Line of attack**: if walls block travel from attacker to target
//!    (same rule as movement), the attack is nullified for that target.
//! 2. **Damage**: the attacker's damage, times the stay multiplier when the
//!    attacker did not move.
//! 3. **Knockback**: `max(0, strength - resistance)` pushes. Each push aims
//!    along the unit vector from the attacker to the target's current
//!    cell. A blocked diagonal push deflects to whichever of its two
//!    straight components is legal, picking uniformly at random when both
//!    are; the deflected direction then governs the remaining pushes. A
//!    blocked straight push, or a diagonal with no legal deflection, ends
//!    the knockback early.
//!
//! Every push is committed to the roster as soon as it is computed.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::{ArenaError, Cell, Combatant, CombatantId, GameRng, Offset};
use crate::movement::MovementOracle;
use crate::walls::WallGrid;

/// What happened to one target of an attack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    /// The combatant that was attacked.
    pub defender: CombatantId,

    /// Health removed from the defender (0 when obstructed).
    pub damage_dealt: i32,

    /// Where the defender stood when the attack landed.
    pub start_position: Cell,

    /// Where the defender ended up after knockback.
    pub final_position: Cell,

    /// Number of cells the defender was actually pushed.
    pub knockback_steps: u32,

    /// True when a wall between attacker and defender nullified the attack.
    pub obstructed: bool,
}

/// One successful knockback push.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Push {
    /// Moved along the requested direction.
    Straight(Cell),
    /// Requested diagonal was blocked; moved along one of its components.
    Deflected(Cell),
}

/// Resolves attacks against a roster.
#[derive(Clone, Copy, Debug)]
pub struct KnockbackResolver<'a> {
    oracle: MovementOracle<'a>,
    stay_damage_multiplier: i32,
}

impl<'a> KnockbackResolver<'a> {
    /// Create a resolver over a wall layout.
    ///
    /// `stay_damage_multiplier` scales damage for attacks made without moving.
    #[must_use]
    pub fn new(walls: &'a WallGrid, stay_damage_multiplier: i32) -> Self {
        Self {
            oracle: MovementOracle::new(walls),
            stay_damage_multiplier,
        }
    }

    fn in_range(candidate: &Combatant, attacker: &Combatant) -> bool {
        candidate.id != attacker.id
            && candidate.is_alive()
            && candidate.position.chebyshev_distance(attacker.position) <= 1
    }

    /// Alive combatants in range of `attacker`, in roster order.
    ///
    /// Range is Chebyshev distance 1: the eight neighbours and the
    /// attacker's own cell.
    #[must_use]
    pub fn targets(roster: &[Combatant], attacker: &Combatant) -> SmallVec<[CombatantId; 8]> {
        roster
            .iter()
            .filter(|c| Self::in_range(c, attacker))
            .map(|c| c.id)
            .collect()
    }

    /// Resolve an attack by `attacker` against everyone in range.
    ///
    /// Combatants are matched by `id`, not by their slot in `roster`. The
    /// returned outcomes are complete: every push has already been applied
    /// to `roster`.
    ///
    /// # Errors
    ///
    /// Fails if `attacker` is not in the roster or is dead.
    pub fn resolve_attack(
        &self,
        roster: &mut [Combatant],
        attacker: CombatantId,
        stays_in_place: bool,
        rng: &mut GameRng,
    ) -> Result<Vec<AttackOutcome>, ArenaError> {
        let attacker = roster
            .iter()
            .find(|c| c.id == attacker)
            .ok_or(ArenaError::UnknownCombatant(attacker))?;
        if !attacker.is_alive() {
            return Err(ArenaError::CombatantDead(attacker.id));
        }

        let attacker_id = attacker.id;
        let origin = attacker.position;
        let attributes = attacker.attributes;
        let damage = if stays_in_place {
            attributes.damage.saturating_mul(self.stay_damage_multiplier)
        } else {
            attributes.damage
        };

        let targets: SmallVec<[usize; 8]> = roster
            .iter()
            .enumerate()
            .filter(|(_, c)| Self::in_range(c, attacker))
            .map(|(slot, _)| slot)
            .collect();
        let mut occupied: FxHashSet<Cell> = roster
            .iter()
            .filter(|c| c.is_alive())
            .map(|c| c.position)
            .collect();

        let mut outcomes = Vec::with_capacity(targets.len());
        for slot in targets {
            let defender = &mut roster[slot];
            let target = defender.id;
            let start = defender.position;

            if !self.oracle.is_path_clear(origin, start) {
                debug!(attacker = %attacker_id, defender = %target, "attack blocked by wall");
                outcomes.push(AttackOutcome {
                    defender: target,
                    damage_dealt: 0,
                    start_position: start,
                    final_position: start,
                    knockback_steps: 0,
                    obstructed: true,
                });
                continue;
            }

            defender.health = defender.health.saturating_sub(damage);
            let distance = attributes.push_distance(&defender.attributes);
            let steps = self.knock_back(defender, origin, distance, &mut occupied, rng);

            debug!(
                attacker = %attacker_id,
                defender = %target,
                damage,
                steps,
                health = defender.health,
                "attack resolved"
            );
            outcomes.push(AttackOutcome {
                defender: target,
                damage_dealt: damage,
                start_position: start,
                final_position: defender.position,
                knockback_steps: steps,
                obstructed: false,
            });
        }

        Ok(outcomes)
    }

    /// Push `defender` away from `origin` up to `distance` times.
    ///
    /// Returns the number of pushes that happened.
    fn knock_back(
        &self,
        defender: &mut Combatant,
        origin: Cell,
        distance: u32,
        occupied: &mut FxHashSet<Cell>,
        rng: &mut GameRng,
    ) -> u32 {
        let mut deflected: Option<Offset> = None;
        let mut steps = 0;

        for _ in 0..distance {
            let from = defender.position;
            let direction = deflected.unwrap_or_else(|| origin.delta_to(from).signum());

            let next = match self.push_step(from, direction, occupied, rng) {
                Some(Push::Straight(next)) => next,
                Some(Push::Deflected(next)) => {
                    debug!(defender = %defender.id, ?from, ?next, "knockback deflected");
                    deflected = Some(from.delta_to(next));
                    next
                }
                None => {
                    trace!(defender = %defender.id, ?from, "knockback stopped");
                    break;
                }
            };

            assert!(
                self.oracle.walls().contains(next),
                "knockback computed an off-board cell {next}"
            );
            occupied.remove(&from);
            let fresh = occupied.insert(next);
            assert!(fresh, "knockback moved {} onto occupied cell {next}", defender.id);
            defender.position = next;
            steps += 1;
            trace!(defender = %defender.id, ?from, ?next, "knockback step");
        }

        steps
    }

    /// Try one push from `from` along `direction`.
    fn push_step(
        &self,
        from: Cell,
        direction: Offset,
        occupied: &FxHashSet<Cell>,
        rng: &mut GameRng,
    ) -> Option<Push> {
        let straight = from.offset(direction);
        if self.oracle.is_legal_move(from, straight, occupied) {
            return Some(Push::Straight(straight));
        }
        if !direction.is_diagonal() {
            return None;
        }

        // Same row + target column, then same column + target row.
        let fallbacks: SmallVec<[Cell; 2]> = [
            from.offset(direction.col_part()),
            from.offset(direction.row_part()),
        ]
        .into_iter()
        .filter(|&cell| self.oracle.is_legal_move(from, cell, occupied))
        .collect();

        rng.choose(&fallbacks).copied().map(Push::Deflected)
    }
}
