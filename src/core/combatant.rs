//! Combatant identity, position, health, and combat attributes.
//!
//! ## CombatantId
//!
//! Type-safe identifier supporting up to 255 combatants. Ids are
//! allocated densely from 0 in roster order, so the id doubles as the
//! roster index.
//!
//! ## CombatAttributes
//!
//! The three numbers the engine reads while resolving an attack. They are
//! owned by whatever stats/upgrade layer sits above the engine; the engine
//! itself only ever writes `health` and `position`.

use serde::{Deserialize, Serialize};

use super::cell::Cell;

/// Combatant identifier.
///
/// Ids are 0-based: the first combatant added to an arena is `CombatantId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CombatantId(pub u8);

impl CombatantId {
    /// Create a new combatant ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw roster index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CombatantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Attributes consulted during attack resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombatAttributes {
    /// Health removed from each defender hit by a moving attack.
    pub damage: i32,

    /// Cells a defender is pushed before resistance is subtracted.
    pub knockback_strength: u32,

    /// Subtracted from an attacker's knockback strength.
    pub knockback_resistance: u32,
}

impl Default for CombatAttributes {
    fn default() -> Self {
        Self {
            damage: 1,
            knockback_strength: 0,
            knockback_resistance: 0,
        }
    }
}

impl CombatAttributes {
    /// Attributes with the given damage and no knockback.
    #[must_use]
    pub const fn with_damage(damage: i32) -> Self {
        Self {
            damage,
            knockback_strength: 0,
            knockback_resistance: 0,
        }
    }

    /// Set knockback strength.
    #[must_use]
    pub const fn knockback(mut self, strength: u32) -> Self {
        self.knockback_strength = strength;
        self
    }

    /// Set knockback resistance.
    #[must_use]
    pub const fn resistance(mut self, resistance: u32) -> Self {
        self.knockback_resistance = resistance;
        self
    }

    /// Number of cells these attributes push `defender`.
    ///
    /// ```
    /// use maze_brawl::core::CombatAttributes;
    ///
    /// let attacker = CombatAttributes::with_damage(1).knockback(3);
    /// let defender = CombatAttributes::with_damage(1).resistance(1);
    /// assert_eq!(attacker.push_distance(&defender), 2);
    /// assert_eq!(defender.push_distance(&attacker), 0);
    /// ```
    #[must_use]
    pub const fn push_distance(&self, defender: &CombatAttributes) -> u32 {
        self.knockback_strength
            .saturating_sub(defender.knockback_resistance)
    }
}

/// A participant on the board.
///
/// Combatants are never removed from a roster. A combatant whose health
/// drops to zero or below is dead: it stops blocking cells and stops being
/// a valid target, but keeps its last position for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    /// Stable identifier.
    pub id: CombatantId,

    /// Display name.
    pub name: String,

    /// Board glyph.
    pub glyph: char,

    /// Current cell.
    pub position: Cell,

    /// Remaining health.
    pub health: i32,

    /// Combat attributes.
    pub attributes: CombatAttributes,
}

impl Combatant {
    /// Create a new combatant.
    pub fn new(
        id: CombatantId,
        name: impl Into<String>,
        glyph: char,
        position: Cell,
        health: i32,
        attributes: CombatAttributes,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            glyph,
            position,
            health,
            attributes,
        }
    }

    /// True while health is above zero.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.health > 0
    }
}
