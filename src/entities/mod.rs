//! Combat collaborators
//!
//! The player and monster aggregates as the combat core sees them:
//! health, damage application, and the tie-break values the encounter
//! reads once at setup. Progression, inventory, and content generation
//! live elsewhere.

pub mod monster;
pub mod player;

pub use monster::{AiBehavior, Monster};
pub use player::Player;

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Unique identity shared by players, monsters, and grid occupants
pub type EntityId = u64;

/// Counter for generating unique entity IDs
static NEXT_ENTITY_ID: AtomicU64 = AtomicU64::new(1);

/// Get next unique entity ID
pub fn next_entity_id() -> EntityId {
    NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed)
}

/// Core combat statistics shared by players and monsters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub max_health: i32,
    pub attack: i32,
    pub defense: i32,
}

impl Stats {
    pub fn new(max_health: i32, attack: i32, defense: i32) -> Self {
        Self {
            max_health,
            attack,
            defense,
        }
    }
}
