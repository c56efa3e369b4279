//! Player combat surface
//!
//! The slice of the player aggregate the combat core consumes: current
//! health, defense-reduced damage application, and the finesse
//! attribute used to break initiative ties.

use serde::{Deserialize, Serialize};

use super::{next_entity_id, EntityId, Stats};

/// A player character as seen by the combat core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    id: EntityId,
    name: String,
    health: i32,
    stats: Stats,
    finesse: i32,
}

impl Player {
    /// Create a player at full health
    pub fn new(name: impl Into<String>, stats: Stats, finesse: i32) -> Self {
        Self {
            id: next_entity_id(),
            name: name.into(),
            health: stats.max_health,
            stats,
            finesse,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.stats.max_health
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Finesse attribute, read once per encounter as the initiative tie-break
    pub fn finesse(&self) -> i32 {
        self.finesse
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Apply raw damage, reduced by defense (minimum 0 taken).
    /// Health never drops below zero. Returns the damage actually dealt.
    pub fn take_damage(&mut self, damage: i32) -> i32 {
        let actual = (damage.max(0) - self.stats.defense).max(0);
        self.health = (self.health - actual).max(0);
        actual
    }

    /// Restore health, capped at max. Returns the amount actually healed.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let actual = amount.max(0).min(self.stats.max_health - self.health);
        self.health += actual;
        actual
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_reduced_by_defense() {
        let mut player = Player::new("Hero", Stats::new(30, 8, 3), 4);

        let dealt = player.take_damage(10);
        assert_eq!(dealt, 7); // 10 - 3 defense
        assert_eq!(player.health(), 23);
    }

    #[test]
    fn test_damage_never_negative() {
        let mut player = Player::new("Hero", Stats::new(30, 8, 5), 4);

        assert_eq!(player.take_damage(2), 0);
        assert_eq!(player.health(), 30);
    }

    #[test]
    fn test_health_clamped_at_zero() {
        let mut player = Player::new("Hero", Stats::new(20, 8, 0), 4);

        let dealt = player.take_damage(100);
        assert_eq!(dealt, 100);
        assert_eq!(player.health(), 0);
        assert!(player.is_dead());
    }

    #[test]
    fn test_heal_capped_at_max() {
        let mut player = Player::new("Hero", Stats::new(30, 8, 0), 4);
        player.take_damage(10);

        assert_eq!(player.heal(25), 10);
        assert_eq!(player.health(), 30);
    }
}
