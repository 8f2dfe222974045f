//! Arena configuration.
//!
//! The engine is one configurable implementation covering every rule
//! variant: board size, how open the maze is, whether diagonal moves are
//! allowed, and whether a combatant may attack without moving.
//!
//! ```
//! use maze_brawl::core::{ArenaConfig, MovementMode};
//!
//! let config = ArenaConfig::default()
//!     .with_board_size(7)
//!     .with_extra_break_probability(0.35)
//!     .with_movement(MovementMode::FourWay);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use super::cell::Direction;
use super::error::ConfigError;

/// Which directions a combatant may choose on its turn.
///
/// Knockback always considers diagonal pushes regardless of this setting;
/// the mode only restricts voluntary moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementMode {
    /// Straight and diagonal steps.
    #[default]
    EightWay,
    /// Straight steps only.
    FourWay,
}

impl MovementMode {
    /// Directions available under this mode.
    #[must_use]
    pub fn directions(self) -> &'static [Direction] {
        match self {
            MovementMode::EightWay => &Direction::ALL,
            MovementMode::FourWay => &Direction::ORTHOGONAL,
        }
    }

    /// Check whether a direction may be chosen under this mode.
    #[must_use]
    pub fn allows(self, direction: Direction) -> bool {
        match self {
            MovementMode::EightWay => true,
            MovementMode::FourWay => !direction.is_diagonal(),
        }
    }
}

/// Complete arena configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Side length of the square board.
    pub board_size: usize,

    /// Chance that each wall surviving maze carving is knocked down.
    /// 0 leaves a perfect maze; higher values open the board up.
    pub extra_break_probability: f64,

    /// Which directions combatants may choose.
    pub movement: MovementMode,

    /// Whether a combatant may attack without moving.
    pub stay_attack_enabled: bool,

    /// Damage multiplier applied when attacking without moving.
    pub stay_damage_multiplier: i32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            board_size: 5,
            extra_break_probability: 0.25,
            movement: MovementMode::EightWay,
            stay_attack_enabled: true,
            stay_damage_multiplier: 2,
        }
    }
}

impl ArenaConfig {
    /// Set the board size.
    #[must_use]
    pub fn with_board_size(mut self, size: usize) -> Self {
        self.board_size = size;
        self
    }

    /// Set the extra wall break probability.
    #[must_use]
    pub fn with_extra_break_probability(mut self, probability: f64) -> Self {
        self.extra_break_probability = probability;
        self
    }

    /// Set the movement mode.
    #[must_use]
    pub fn with_movement(mut self, movement: MovementMode) -> Self {
        self.movement = movement;
        self
    }

    /// Enable or disable stay-in-place attacks.
    #[must_use]
    pub fn with_stay_attack(mut self, enabled: bool) -> Self {
        self.stay_attack_enabled = enabled;
        self
    }

    /// Set the stay-in-place damage multiplier.
    #[must_use]
    pub fn with_stay_damage_multiplier(mut self, multiplier: i32) -> Self {
        self.stay_damage_multiplier = multiplier;
        self
    }

    /// Check every field.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size == 0 || self.board_size > i32::MAX as usize {
            return Err(ConfigError::InvalidBoardSize(self.board_size));
        }
        validate_probability(self.extra_break_probability)?;
        if self.stay_damage_multiplier < 1 {
            return Err(ConfigError::InvalidMultiplier(self.stay_damage_multiplier));
        }
        Ok(())
    }
}

/// Reject probabilities outside `[0, 1]`, including NaN.
pub(crate) fn validate_probability(probability: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&probability) {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability(probability))
    }
}
