//! Monster combat surface
//!
//! Monsters carry the same health/damage surface as players plus the
//! hints the AI layer reads: a behavior tag, optional healing
//! capability, and an initiative modifier that doubles as the tie-break.

use serde::{Deserialize, Serialize};

use super::{next_entity_id, EntityId, Stats};

/// Behavior pattern the AI layer uses to pick a monster's actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiBehavior {
    /// Attack the nearest enemy every turn
    Aggressive,
    /// Prefer defending and positioning over attacking
    Defensive,
    /// Keep distance and flee when badly hurt
    Cowardly,
    /// Heal and assist allies before attacking
    Support,
    /// Act unpredictably
    Chaotic,
}

/// A monster as seen by the combat core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monster {
    id: EntityId,
    name: String,
    health: i32,
    stats: Stats,
    initiative_modifier: i32,
    behavior: AiBehavior,
    can_heal: bool,
    heal_amount: Option<i32>,
    experience_value: i32,
}

impl Monster {
    /// Create a monster at full health with Aggressive behavior
    pub fn new(
        name: impl Into<String>,
        stats: Stats,
        initiative_modifier: i32,
        experience_value: i32,
    ) -> Self {
        Self {
            id: next_entity_id(),
            name: name.into(),
            health: stats.max_health,
            stats,
            initiative_modifier,
            behavior: AiBehavior::Aggressive,
            can_heal: false,
            heal_amount: None,
            experience_value,
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

    /// Initiative modifier, also the tie-break when initiative rolls are equal
    pub fn initiative_modifier(&self) -> i32 {
        self.initiative_modifier
    }

    pub fn behavior(&self) -> AiBehavior {
        self.behavior
    }

    pub fn set_behavior(&mut self, behavior: AiBehavior) {
        self.behavior = behavior;
    }

    pub fn can_heal(&self) -> bool {
        self.can_heal
    }

    pub fn heal_amount(&self) -> Option<i32> {
        self.heal_amount
    }

    /// Grant this monster a per-action heal (used by Support behavior)
    pub fn enable_healing(&mut self, heal_amount: i32) {
        self.can_heal = true;
        self.heal_amount = Some(heal_amount);
    }

    pub fn experience_value(&self) -> i32 {
        self.experience_value
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
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

// =============================================================================
// Templates
// =============================================================================

impl Monster {
    /// A small cowardly melee enemy
    pub fn goblin() -> Self {
        let mut m = Monster::new("Goblin", Stats::new(30, 8, 2), 1, 25);
        m.set_behavior(AiBehavior::Cowardly);
        m
    }

    /// An animated pile of bones, attacks relentlessly
    pub fn skeleton() -> Self {
        Monster::new("Skeleton", Stats::new(25, 6, 3), 0, 20)
    }

    /// A large brute, slow but hard-hitting
    pub fn orc() -> Self {
        Monster::new("Orc", Stats::new(45, 12, 4), -1, 40)
    }

    /// A support caster that heals its allies
    pub fn goblin_shaman() -> Self {
        let mut m = Monster::new("Goblin Shaman", Stats::new(25, 6, 1), 2, 30);
        m.set_behavior(AiBehavior::Support);
        m.enable_healing(10);
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_and_defeat() {
        let mut goblin = Monster::goblin();

        let dealt = goblin.take_damage(12);
        assert_eq!(dealt, 10); // 12 - 2 defense
        assert_eq!(goblin.health(), 20);
        assert!(!goblin.is_defeated());

        goblin.take_damage(100);
        assert!(goblin.is_defeated());
        assert_eq!(goblin.health(), 0);
    }

    #[test]
    fn test_enable_healing() {
        let mut shaman = Monster::goblin_shaman();
        assert!(shaman.can_heal());
        assert_eq!(shaman.heal_amount(), Some(10));

        shaman.take_damage(20);
        let healed = shaman.heal(10);
        assert_eq!(healed, 10);
    }

    #[test]
    fn test_unique_ids() {
        let a = Monster::goblin();
        let b = Monster::goblin();
        assert_ne!(a.id(), b.id());
    }
}
