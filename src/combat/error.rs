//! Combat contract errors
//!
//! These signal caller bugs (wrong state, bad arguments), never
//! expected negative outcomes — a failed grid placement or a spent
//! reaction is a `bool`, not an error.

use thiserror::Error;

use super::encounter::EncounterState;
use crate::entities::EntityId;

/// Errors raised when a caller violates the combat core's contracts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombatError {
    /// An operation that requires a specific encounter state was called
    /// in a different one
    #[error("invalid encounter state: expected {expected:?}, was {actual:?}")]
    InvalidState {
        expected: EncounterState,
        actual: EncounterState,
    },

    /// `start` was called on an encounter with no combatants
    #[error("cannot start an encounter with no combatants")]
    NoCombatants,

    /// Grid dimensions outside the supported range
    #[error("grid dimensions {width}x{height} outside supported range {min}..={max}")]
    InvalidGridSize {
        width: i32,
        height: i32,
        min: i32,
        max: i32,
    },

    /// A monster-only operation was given a player combatant
    #[error("combatant '{name}' is a player, not a monster")]
    NotAMonster { name: String },

    /// No combatant in this encounter carries the given id
    #[error("no combatant with id {id}")]
    UnknownCombatant { id: EntityId },
}
