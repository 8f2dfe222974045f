//! Combat resolution.
//!
//! The `KnockbackResolver` applies damage and knockback to every target in
//! range of an acting combatant, re-validating each push with the
//! movement oracle.

pub mod knockback;

pub use knockback::{AttackOutcome, KnockbackResolver};
