//! Turn actions and their reports.
//!
//! A combatant's turn is one of:
//! - `Move(direction)`: step one cell, then attack everything in range
//! - `Stay`: attack everything in range without moving (damage multiplied)
//!
//! A blocked move changes nothing and triggers no attack. Whether it still
//! uses up the turn is decided by the turn loop, not the arena.

use serde::{Deserialize, Serialize};

use crate::combat::AttackOutcome;
use crate::core::{Cell, CombatantId, ConfigError, Direction};

/// Key bound to the stay-and-attack action.
pub const STAY_KEY: char = 'x';

/// Result of a movement request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The combatant now stands on the destination.
    Moved,
    /// The move was illegal; nothing changed.
    Blocked,
}

/// What a combatant chose to do with its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnAction {
    /// Step one cell in a direction, then attack.
    Move(Direction),
    /// Attack without moving.
    Stay,
}

impl TurnAction {
    /// Translate an input key: movement keys map to `Move`, [`STAY_KEY`]
    /// to `Stay`.
    ///
    /// ```
    /// use maze_brawl::arena::TurnAction;
    /// use maze_brawl::core::Direction;
    ///
    /// assert_eq!(TurnAction::from_key('E'), Ok(TurnAction::Move(Direction::UpRight)));
    /// assert_eq!(TurnAction::from_key('x'), Ok(TurnAction::Stay));
    /// assert!(TurnAction::from_key('p').is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownDirectionKey`] for unbound keys.
    pub fn from_key(key: char) -> Result<Self, ConfigError> {
        if key.eq_ignore_ascii_case(&STAY_KEY) {
            Ok(TurnAction::Stay)
        } else {
            Direction::from_key(key).map(TurnAction::Move)
        }
    }
}

/// How the movement part of an action went.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementResult {
    /// Stepped from one cell to another.
    Moved { from: Cell, to: Cell },
    /// Requested step was illegal.
    Blocked,
    /// Chose not to move.
    Stayed,
}

/// Complete report of one action, ready for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionReport {
    /// Who acted.
    pub actor: CombatantId,

    /// What they asked to do.
    pub action: TurnAction,

    /// What happened to their position.
    pub movement: MovementResult,

    /// Per-target attack results, in roster order. Empty when blocked.
    pub attacks: Vec<AttackOutcome>,
}

impl ActionReport {
    /// True unless the requested move was blocked.
    #[must_use]
    pub fn completed(&self) -> bool {
        self.movement != MovementResult::Blocked
    }

    /// Sum of damage dealt to all targets.
    #[must_use]
    pub fn total_damage(&self) -> i32 {
        self.attacks.iter().map(|a| a.damage_dealt).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key() {
        assert_eq!(TurnAction::from_key('w'), Ok(TurnAction::Move(Direction::Up)));
        assert_eq!(TurnAction::from_key('X'), Ok(TurnAction::Stay));
        assert_eq!(
            TurnAction::from_key('?'),
            Err(ConfigError::UnknownDirectionKey('?'))
        );
    }

    #[test]
    fn test_report_helpers() {
        let report = ActionReport {
            actor: CombatantId::new(0),
            action: TurnAction::Stay,
            movement: MovementResult::Stayed,
            attacks: vec![
                AttackOutcome {
                    defender: CombatantId::new(1),
                    damage_dealt: 2,
                    start_position: Cell::new(0, 1),
                    final_position: Cell::new(0, 2),
                    knockback_steps: 1,
                    obstructed: false,
                },
                AttackOutcome {
                    defender: CombatantId::new(2),
                    damage_dealt: 0,
                    start_position: Cell::new(1, 0),
                    final_position: Cell::new(1, 0),
                    knockback_steps: 0,
                    obstructed: true,
                },
            ],
        };
        assert!(report.completed());
        assert_eq!(report.total_damage(), 2);

        let blocked = ActionReport {
            movement: MovementResult::Blocked,
            attacks: Vec::new(),
            ..report
        };
        assert!(!blocked.completed());
    }

    #[test]
    fn test_serialization() {
        let action = TurnAction::Move(Direction::DownLeft);
        let json = serde_json::to_string(&action).unwrap();
        let deserialized: TurnAction = serde_json::from_str(&json).unwrap();
        assert_eq!(action, deserialized);
    }
}
