//! Duel game implementation.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::arena::{ActionReport, Arena, TurnAction};
use crate::core::{ArenaConfig, ArenaError, Cell, CombatAttributes, CombatantId, MovementMode};

/// Names and glyphs handed out in seating order.
const SEATS: [(&str, char); 4] = [("Red", 'R'), ("Blue", 'B'), ("Green", 'G'), ("Yellow", 'Y')];

/// Result of a completed duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single survivor.
    Winner(CombatantId),
    /// Nobody survived.
    Draw,
}

impl GameResult {
    /// Check if a combatant won.
    #[must_use]
    pub fn is_winner(&self, id: CombatantId) -> bool {
        matches!(self, GameResult::Winner(w) if *w == id)
    }
}

/// What a blocked move costs the mover.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockedPolicy {
    /// The same combatant chooses again.
    #[default]
    Retry,
    /// The turn passes to the next combatant.
    ForfeitTurn,
}

/// How a call to [`Duel::take_turn`] played out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// The requested action happened; the turn passed on.
    Acted(ActionReport),
    /// The active combatant was boxed in, so it attacked in place instead
    /// of doing what was requested.
    ForcedStay(ActionReport),
    /// The move was blocked and the same combatant must choose again.
    Retry(ActionReport),
    /// The move was blocked and the turn passed on anyway.
    Forfeited(ActionReport),
    /// The active combatant was boxed in and could not stay; the turn
    /// passed on.
    Skipped(CombatantId),
    /// The duel was already over; nothing happened.
    GameOver(GameResult),
}

/// One entry of the duel's history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Turn number (starts at 1; unchanged across retries).
    pub turn: u32,
    /// Who was active.
    pub actor: CombatantId,
    /// What happened.
    pub outcome: TurnOutcome,
}

/// A running duel.
#[derive(Clone, Debug)]
pub struct Duel {
    arena: Arena,
    active: CombatantId,
    turn_number: u32,
    blocked_policy: BlockedPolicy,
    history: Vector<TurnRecord>,
}

/// Builder for creating a Duel.
#[derive(Clone, Debug)]
pub struct DuelBuilder {
    player_count: usize,
    config: ArenaConfig,
    max_health: i32,
    attributes: CombatAttributes,
    blocked_policy: BlockedPolicy,
}

impl Default for DuelBuilder {
    fn default() -> Self {
        Self {
            player_count: 2,
            config: ArenaConfig::default(),
            max_health: 5,
            attributes: CombatAttributes::with_damage(1).knockback(1),
            blocked_policy: BlockedPolicy::Retry,
        }
    }
}

impl DuelBuilder {
    /// Start from the defaults: two players on a 5x5 board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of players, 2-4.
    pub fn player_count(mut self, count: usize) -> Self {
        assert!((2..=SEATS.len()).contains(&count), "Player count must be 2-4");
        self.player_count = count;
        self
    }

    /// Replace the whole arena configuration.
    pub fn config(mut self, config: ArenaConfig) -> Self {
        self.config = config;
        self
    }

    /// Side length of the board.
    pub fn board_size(mut self, size: usize) -> Self {
        self.config.board_size = size;
        self
    }

    /// Chance of knocking down each wall left after maze carving.
    pub fn extra_break_probability(mut self, probability: f64) -> Self {
        self.config.extra_break_probability = probability;
        self
    }

    /// Which directions players may choose.
    pub fn movement(mut self, movement: MovementMode) -> Self {
        self.config.movement = movement;
        self
    }

    /// Starting health of every player.
    pub fn max_health(mut self, health: i32) -> Self {
        self.max_health = health;
        self
    }

    /// Combat attributes shared by every player.
    pub fn attributes(mut self, attributes: CombatAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// What a blocked move costs.
    pub fn blocked_policy(mut self, policy: BlockedPolicy) -> Self {
        self.blocked_policy = policy;
        self
    }

    /// Build the arena and seat every player on a corner.
    ///
    /// Corners are filled top-left, bottom-right, top-right, bottom-left.
    ///
    /// # Errors
    ///
    /// Fails on an invalid configuration, or when the board is too small
    /// for every player to get a distinct corner.
    pub fn build(self, seed: u64) -> Result<Duel, ArenaError> {
        let mut arena = Arena::new(self.config, seed)?;
        let last = arena.board_size() as i32 - 1;
        let corners = [
            Cell::new(0, 0),
            Cell::new(last, last),
            Cell::new(0, last),
            Cell::new(last, 0),
        ];

        for (&(name, glyph), &corner) in SEATS.iter().zip(&corners).take(self.player_count) {
            arena.add_combatant(name, glyph, corner, self.max_health, self.attributes)?;
        }

        info!(
            players = self.player_count,
            board = arena.board_size(),
            seed,
            "duel started"
        );
        Ok(Duel {
            arena,
            active: CombatantId::new(0),
            turn_number: 1,
            blocked_policy: self.blocked_policy,
            history: Vector::new(),
        })
    }
}

impl Duel {
    /// The arena being fought in.
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Mutable arena access for the stats/upgrade layer.
    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    /// Whose turn it is.
    pub fn active(&self) -> CombatantId {
        self.active
    }

    /// Current turn number (starts at 1).
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Everything that has happened so far.
    pub fn history(&self) -> &Vector<TurnRecord> {
        &self.history
    }

    /// The result, once at most one combatant is alive.
    pub fn result(&self) -> Option<GameResult> {
        let mut alive = self.arena.alive();
        match (alive.next(), alive.next()) {
            (None, _) => Some(GameResult::Draw),
            (Some(winner), None) => Some(GameResult::Winner(winner.id)),
            _ => None,
        }
    }

    /// Play the active combatant's turn.
    ///
    /// A boxed-in combatant attacks in place regardless of `action` (or is
    /// skipped when stationary attacks are disabled). A blocked move is
    /// retried or forfeited per the blocked policy.
    ///
    /// # Errors
    ///
    /// Propagates arena errors, e.g. a `Stay` request while stationary
    /// attacks are disabled. The turn does not advance on error.
    pub fn take_turn(&mut self, action: TurnAction) -> Result<TurnOutcome, ArenaError> {
        if let Some(result) = self.result() {
            return Ok(TurnOutcome::GameOver(result));
        }

        if !self.is_alive(self.active) {
            if let Some(next) = self.next_alive() {
                self.active = next;
            }
        }

        let actor = self.active;
        let outcome = if !self.arena.has_any_legal_move(actor) {
            if self.arena.config().stay_attack_enabled {
                debug!(combatant = %actor, "no legal moves, forcing stay");
                TurnOutcome::ForcedStay(self.arena.act(actor, TurnAction::Stay)?)
            } else {
                debug!(combatant = %actor, "no legal moves, skipping turn");
                TurnOutcome::Skipped(actor)
            }
        } else {
            let report = self.arena.act(actor, action)?;
            match (report.completed(), self.blocked_policy) {
                (true, _) => TurnOutcome::Acted(report),
                (false, BlockedPolicy::Retry) => TurnOutcome::Retry(report),
                (false, BlockedPolicy::ForfeitTurn) => TurnOutcome::Forfeited(report),
            }
        };

        self.history.push_back(TurnRecord {
            turn: self.turn_number,
            actor,
            outcome: outcome.clone(),
        });
        if !matches!(outcome, TurnOutcome::Retry(_)) {
            self.advance();
        }
        if let Some(result) = self.result() {
            info!(?result, turns = self.turn_number, "duel over");
        }
        Ok(outcome)
    }

    fn is_alive(&self, id: CombatantId) -> bool {
        self.arena.combatant(id).is_some_and(|c| c.is_alive())
    }

    /// The next alive combatant after the active one, in seating order.
    fn next_alive(&self) -> Option<CombatantId> {
        let seats = self.arena.combatants().len();
        (1..=seats)
            .map(|step| CombatantId::new(((self.active.index() + step) % seats) as u8))
            .find(|&id| self.is_alive(id))
    }

    fn advance(&mut self) {
        if let Some(next) = self.next_alive() {
            self.active = next;
        }
        self.turn_number += 1;
    }
}
