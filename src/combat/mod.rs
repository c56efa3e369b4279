//! Combat system
//!
//! Encounter lifecycle, turn order, and the battle grid. Damage math,
//! AI decisions, and ability effects are layered on top by the driving
//! loop; this module only answers whose turn it is, who can be
//! targeted, where everyone stands, and when the fight is over.

pub mod combatant;
pub mod encounter;
pub mod error;
pub mod grid;
pub mod initiative;
pub mod log;

/// Identity of the room an encounter takes place in
pub type RoomId = u64;

pub use combatant::{Combatant, Fighter};
pub use encounter::{CombatEncounter, EncounterId, EncounterState};
pub use error::CombatError;
pub use grid::{CombatGrid, GridCell, Occupant, Position, MAX_GRID_SIZE, MIN_GRID_SIZE};
pub use initiative::roll_initiative;
pub use log::{CombatLogEntry, LogEntryKind};
