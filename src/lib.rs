//! Barrowfell - tactical combat core for a grimdark turn-based RPG
//!
//! Manages the lifecycle of a single combat encounter: turn order and
//! round progression, participant positions on a bounded battle grid,
//! and the append-only combat log. Ability resolution, damage formulas,
//! and AI live in the layers above and drive this core one call at a
//! time.

pub mod combat;
pub mod entities;

// Re-export commonly used types
pub use combat::{
    CombatEncounter, CombatError, CombatGrid, CombatLogEntry, Combatant, EncounterState, Fighter,
    LogEntryKind, Position, RoomId,
};
pub use entities::{AiBehavior, EntityId, Monster, Player, Stats};
