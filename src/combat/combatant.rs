//! Combatants
//!
//! A combatant wraps exactly one player or monster for the duration of
//! one encounter, together with the transient combat state the entity
//! itself never carries: initiative, tie-break, and the turn-scoped
//! acted/reaction/defending flags.

use serde::{Deserialize, Serialize};

use crate::entities::{EntityId, Monster, Player};

/// The wrapped participant. Exactly one side is ever present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Fighter {
    Player(Player),
    Monster(Monster),
}

/// A participant in one combat encounter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    fighter: Fighter,
    initiative: i32,
    finesse: i32,
    display_name: String,
    display_number: u32,
    has_acted_this_round: bool,
    has_reaction: bool,
    is_defending: bool,
}

impl Combatant {
    /// Wrap a player. Finesse is read from the player once, here.
    pub fn for_player(player: Player, initiative: i32) -> Self {
        let finesse = player.finesse();
        let display_name = player.name().to_string();
        Self {
            fighter: Fighter::Player(player),
            initiative,
            finesse,
            display_name,
            display_number: 0,
            has_acted_this_round: false,
            has_reaction: true,
            is_defending: false,
        }
    }

    /// Wrap a monster. A non-zero `display_number` appends a numeric
    /// suffix to disambiguate duplicate monster names ("Goblin 2");
    /// zero means the name is unique and stays bare.
    pub fn for_monster(monster: Monster, initiative: i32, display_number: u32) -> Self {
        let finesse = monster.initiative_modifier();
        let display_name = if display_number > 0 {
            format!("{} {}", monster.name(), display_number)
        } else {
            monster.name().to_string()
        };
        Self {
            fighter: Fighter::Monster(monster),
            initiative,
            finesse,
            display_name,
            display_number,
            has_acted_this_round: false,
            has_reaction: true,
            is_defending: false,
        }
    }

    /// Identity of the wrapped entity, shared with the grid
    pub fn id(&self) -> EntityId {
        match &self.fighter {
            Fighter::Player(p) => p.id(),
            Fighter::Monster(m) => m.id(),
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self.fighter, Fighter::Player(_))
    }

    pub fn is_monster(&self) -> bool {
        matches!(self.fighter, Fighter::Monster(_))
    }

    pub fn fighter(&self) -> &Fighter {
        &self.fighter
    }

    pub fn player(&self) -> Option<&Player> {
        match &self.fighter {
            Fighter::Player(p) => Some(p),
            Fighter::Monster(_) => None,
        }
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        match &mut self.fighter {
            Fighter::Player(p) => Some(p),
            Fighter::Monster(_) => None,
        }
    }

    pub fn monster(&self) -> Option<&Monster> {
        match &self.fighter {
            Fighter::Monster(m) => Some(m),
            Fighter::Player(_) => None,
        }
    }

    pub fn monster_mut(&mut self) -> Option<&mut Monster> {
        match &mut self.fighter {
            Fighter::Monster(m) => Some(m),
            Fighter::Player(_) => None,
        }
    }

    pub fn initiative(&self) -> i32 {
        self.initiative
    }

    /// Tie-break when initiative values are equal
    pub fn finesse(&self) -> i32 {
        self.finesse
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn display_number(&self) -> u32 {
        self.display_number
    }

    /// Still able to take turns: a living player or an undefeated monster
    pub fn is_active(&self) -> bool {
        match &self.fighter {
            Fighter::Player(p) => !p.is_dead(),
            Fighter::Monster(m) => !m.is_defeated(),
        }
    }

    pub fn current_health(&self) -> i32 {
        match &self.fighter {
            Fighter::Player(p) => p.health(),
            Fighter::Monster(m) => m.health(),
        }
    }

    pub fn max_health(&self) -> i32 {
        match &self.fighter {
            Fighter::Player(p) => p.max_health(),
            Fighter::Monster(m) => m.max_health(),
        }
    }

    // =========================================================================
    // Turn-scoped flags
    // =========================================================================

    pub fn has_acted_this_round(&self) -> bool {
        self.has_acted_this_round
    }

    /// Round bookkeeping, driven by the encounter on turn advance
    pub fn mark_acted(&mut self) {
        self.has_acted_this_round = true;
    }

    /// Round bookkeeping, driven by the encounter on round wrap
    pub fn reset_acted(&mut self) {
        self.has_acted_this_round = false;
    }

    pub fn is_defending(&self) -> bool {
        self.is_defending
    }

    /// Toggle the half-incoming-damage stance. Cleared by
    /// [`reset_turn_state`](Self::reset_turn_state).
    pub fn set_defending(&mut self, defending: bool) {
        self.is_defending = defending;
    }

    pub fn has_reaction(&self) -> bool {
        self.has_reaction
    }

    /// Spend the one-per-turn reaction token (dodge, parry).
    /// Returns false if the reaction was already spent this turn.
    pub fn use_reaction(&mut self) -> bool {
        if !self.has_reaction {
            return false;
        }
        self.has_reaction = false;
        true
    }

    pub fn reset_reaction(&mut self) {
        self.has_reaction = true;
    }

    /// Restore the per-turn state: reaction back, defending stance off.
    /// The action-resolution layer calls this exactly once at the start
    /// of this combatant's own turn; the encounter never does it
    /// automatically. The acted flag is round bookkeeping and is left
    /// alone here.
    pub fn reset_turn_state(&mut self) {
        self.has_reaction = true;
        self.is_defending = false;
    }
}
