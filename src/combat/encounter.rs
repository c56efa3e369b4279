//! Combat encounters
//!
//! The aggregate root of the combat core: owns the turn-ordered
//! combatant list, the round and turn pointers, the encounter state
//! machine, and the append-only combat log. The driving loop reads the
//! current combatant, resolves actions externally, then calls
//! [`CombatEncounter::check_for_resolution`] and
//! [`CombatEncounter::advance_turn`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use super::combatant::Combatant;
use super::error::CombatError;
use super::log::CombatLogEntry;
use super::RoomId;
use crate::entities::EntityId;

/// Opaque encounter identity
pub type EncounterId = u64;

static NEXT_ENCOUNTER_ID: AtomicU64 = AtomicU64::new(1);

/// Lifecycle states of an encounter.
/// `Victory`, `PlayerDefeated`, and `Fled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterState {
    NotStarted,
    Active,
    Victory,
    PlayerDefeated,
    Fled,
}

impl EncounterState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            EncounterState::Victory | EncounterState::PlayerDefeated | EncounterState::Fled
        )
    }
}

/// Outcome of scanning the turn order for the next active combatant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TurnScan {
    /// Next active combatant found; `wrapped` is set when the scan
    /// passed the end of the order back to index 0
    Next { index: usize, wrapped: bool },
    /// A full lap found no active combatant
    Exhausted,
}

/// Scan forward from `from` (exclusive), wrapping past the end, until an
/// active combatant is found or a full lap completes. The only active
/// combatant being `from` itself still counts as a wrap: one lap, one
/// round.
fn scan_next_active(combatants: &[Combatant], from: usize) -> TurnScan {
    let len = combatants.len();
    for step in 1..=len {
        let index = (from + step) % len;
        if combatants[index].is_active() {
            let wrapped = from + step >= len;
            return TurnScan::Next { index, wrapped };
        }
    }
    TurnScan::Exhausted
}

/// One combat encounter, from setup to a terminal outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatEncounter {
    id: EncounterId,
    room_id: RoomId,
    previous_room_id: Option<RoomId>,
    state: EncounterState,
    round_number: u32,
    current_turn_index: usize,
    combatants: Vec<Combatant>,
    log: Vec<CombatLogEntry>,
    started_at: Option<SystemTime>,
    ended_at: Option<SystemTime>,
}

impl CombatEncounter {
    /// Create an encounter for a room. `previous_room_id` is the flee
    /// destination, when there is one.
    pub fn new(room_id: RoomId, previous_room_id: Option<RoomId>) -> Self {
        let id = NEXT_ENCOUNTER_ID.fetch_add(1, Ordering::Relaxed);
        log::debug!("encounter {} created for room {}", id, room_id);
        Self {
            id,
            room_id,
            previous_room_id,
            state: EncounterState::NotStarted,
            round_number: 0,
            current_turn_index: 0,
            combatants: Vec::new(),
            log: Vec::new(),
            started_at: None,
            ended_at: None,
        }
    }

    pub fn id(&self) -> EncounterId {
        self.id
    }

    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    pub fn previous_room_id(&self) -> Option<RoomId> {
        self.previous_room_id
    }

    pub fn state(&self) -> EncounterState {
        self.state
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn started_at(&self) -> Option<SystemTime> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<SystemTime> {
        self.ended_at
    }

    /// All combatants, in turn order once the encounter has started
    pub fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Add a combatant. Only legal before [`start`](Self::start);
    /// duplicate-id checks are the caller's responsibility.
    pub fn add_combatant(&mut self, combatant: Combatant) -> Result<(), CombatError> {
        if self.state != EncounterState::NotStarted {
            log::warn!(
                "encounter {}: rejected add_combatant in state {:?}",
                self.id,
                self.state
            );
            return Err(CombatError::InvalidState {
                expected: EncounterState::NotStarted,
                actual: self.state,
            });
        }
        self.combatants.push(combatant);
        Ok(())
    }

    /// Sort combatants into turn order and begin round 1.
    /// Order: initiative descending, ties broken by finesse descending,
    /// further ties keep insertion order (stable sort).
    pub fn start(&mut self) -> Result<(), CombatError> {
        if self.state != EncounterState::NotStarted {
            return Err(CombatError::InvalidState {
                expected: EncounterState::NotStarted,
                actual: self.state,
            });
        }
        if self.combatants.is_empty() {
            return Err(CombatError::NoCombatants);
        }

        self.combatants.sort_by(|a, b| {
            b.initiative()
                .cmp(&a.initiative())
                .then(b.finesse().cmp(&a.finesse()))
        });
        self.state = EncounterState::Active;
        self.round_number = 1;
        self.current_turn_index = 0;
        self.started_at = Some(SystemTime::now());

        log::info!(
            "encounter {}: combat started with {} combatants, {} goes first",
            self.id,
            self.combatants.len(),
            self.combatants[0].display_name()
        );
        Ok(())
    }

    /// The combatant whose turn it is. None unless the encounter is
    /// Active — after a terminal transition, check
    /// [`state`](Self::state) for the outcome.
    pub fn current_combatant(&self) -> Option<&Combatant> {
        if self.state != EncounterState::Active {
            return None;
        }
        self.combatants.get(self.current_turn_index)
    }

    /// Mutable access to the combatant whose turn it is
    pub fn current_combatant_mut(&mut self) -> Option<&mut Combatant> {
        if self.state != EncounterState::Active {
            return None;
        }
        self.combatants.get_mut(self.current_turn_index)
    }

    /// Mark the current combatant as having acted and hand the turn to
    /// the next active combatant, wrapping past the end of the order
    /// (which increments the round and resets every active combatant's
    /// acted flag, exactly once per wrap).
    ///
    /// Returns the new current combatant, or None when the encounter
    /// is not Active or a full lap found nobody able to act — in the
    /// latter case resolution has been checked and callers should read
    /// [`state`](Self::state) for the terminal reason. The caller is
    /// expected to invoke the returned combatant's
    /// [`reset_turn_state`](Combatant::reset_turn_state) as its turn
    /// begins; the encounter never does so itself.
    pub fn advance_turn(&mut self) -> Option<&Combatant> {
        if self.state != EncounterState::Active {
            return None;
        }

        if let Some(current) = self.combatants.get_mut(self.current_turn_index) {
            current.mark_acted();
        }

        match scan_next_active(&self.combatants, self.current_turn_index) {
            TurnScan::Next { index, wrapped } => {
                if wrapped {
                    self.round_number += 1;
                    log::debug!(
                        "encounter {}: round {} begins",
                        self.id,
                        self.round_number
                    );
                    for combatant in self.combatants.iter_mut().filter(|c| c.is_active()) {
                        combatant.reset_acted();
                    }
                }
                self.current_turn_index = index;
                self.combatants.get(index)
            }
            TurnScan::Exhausted => {
                self.check_for_resolution();
                self.current_combatant()
            }
        }
    }

    /// Resolve the encounter if one side has no active combatant left:
    /// no active player-side combatant means `PlayerDefeated`, otherwise
    /// no active monster means `Victory`. No-op unless Active. The
    /// driver calls this after any potentially lethal effect; the
    /// encounter never polls it.
    pub fn check_for_resolution(&mut self) {
        if self.state != EncounterState::Active {
            return;
        }

        let players_active = self
            .combatants
            .iter()
            .any(|c| c.is_player() && c.is_active());
        let monsters_active = self
            .combatants
            .iter()
            .any(|c| c.is_monster() && c.is_active());

        if !players_active {
            self.end_with(EncounterState::PlayerDefeated);
        } else if !monsters_active {
            self.end_with(EncounterState::Victory);
        }
    }

    /// End the encounter because the player escaped. No-op unless Active.
    pub fn end_by_flee(&mut self) {
        if self.state != EncounterState::Active {
            return;
        }
        self.end_with(EncounterState::Fled);
    }

    fn end_with(&mut self, outcome: EncounterState) {
        self.state = outcome;
        self.ended_at = Some(SystemTime::now());
        log::info!(
            "encounter {}: ended in round {} ({:?})",
            self.id,
            self.round_number,
            outcome
        );
    }

    /// Take a monster out of the fight by forcing its health to zero.
    /// It stays in the turn order but drops out of every
    /// `is_active`-filtered view. Player combatants are rejected.
    pub fn remove_monster(&mut self, id: EntityId) -> Result<(), CombatError> {
        let combatant = self
            .combatants
            .iter_mut()
            .find(|c| c.id() == id)
            .ok_or(CombatError::UnknownCombatant { id })?;

        if combatant.is_player() {
            return Err(CombatError::NotAMonster {
                name: combatant.display_name().to_string(),
            });
        }
        if let Some(monster) = combatant.monster_mut() {
            // Defense would soak a plain health-sized hit
            let overkill = monster.health() + monster.stats().defense;
            monster.take_damage(overkill);
        }
        Ok(())
    }

    // =========================================================================
    // Targeting queries
    // =========================================================================

    /// Combatant with the given entity id
    pub fn combatant_by_id(&self, id: EntityId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.id() == id)
    }

    /// Mutable combatant lookup, for applying damage and flag changes
    pub fn combatant_by_id_mut(&mut self, id: EntityId) -> Option<&mut Combatant> {
        self.combatants.iter_mut().find(|c| c.id() == id)
    }

    /// Active monsters in turn order
    pub fn active_monsters(&self) -> impl Iterator<Item = &Combatant> + '_ {
        self.combatants
            .iter()
            .filter(|c| c.is_monster() && c.is_active())
    }

    /// 1-based lookup over the current active-monster enumeration.
    /// The numbering shifts as monsters fall; it is not a stored index.
    pub fn monster_by_number(&self, number: usize) -> Option<&Combatant> {
        if number == 0 {
            return None;
        }
        self.active_monsters().nth(number - 1)
    }

    /// First active combatant whose display name contains the fragment,
    /// case-insensitively
    pub fn find_by_name(&self, fragment: &str) -> Option<&Combatant> {
        let needle = fragment.to_lowercase();
        self.combatants
            .iter()
            .filter(|c| c.is_active())
            .find(|c| c.display_name().to_lowercase().contains(&needle))
    }

    /// The player-side combatant, if any
    pub fn player_combatant(&self) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.is_player())
    }

    /// Active monster allies of the given monster, excluding itself
    pub fn allies_of(&self, id: EntityId) -> impl Iterator<Item = &Combatant> + '_ {
        self.combatants
            .iter()
            .filter(move |c| c.is_monster() && c.is_active() && c.id() != id)
    }

    /// Active player-side enemies of the given monster
    pub fn enemies_of(&self, id: EntityId) -> impl Iterator<Item = &Combatant> + '_ {
        self.combatants
            .iter()
            .filter(move |c| c.is_player() && c.is_active() && c.id() != id)
    }

    /// How many combatants can still act
    pub fn active_count(&self) -> usize {
        self.combatants.iter().filter(|c| c.is_active()).count()
    }

    /// How many combatants are down
    pub fn defeated_count(&self) -> usize {
        self.combatants.iter().filter(|c| !c.is_active()).count()
    }

    // =========================================================================
    // Combat log
    // =========================================================================

    /// Append an event to the combat log
    pub fn add_log_entry(&mut self, entry: CombatLogEntry) {
        self.log.push(entry);
    }

    /// The full log, in occurrence order
    pub fn log(&self) -> &[CombatLogEntry] {
        &self.log
    }

    /// The most recent `n` entries, oldest first
    pub fn recent_log_entries(&self, n: usize) -> &[CombatLogEntry] {
        let start = self.log.len().saturating_sub(n);
        &self.log[start..]
    }

    /// Every entry recorded during the given round
    pub fn log_entries_for_round(&self, round: u32) -> impl Iterator<Item = &CombatLogEntry> + '_ {
        self.log.iter().filter(move |e| e.round == round)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Monster, Player, Stats};

    fn hero(initiative: i32) -> Combatant {
        Combatant::for_player(Player::new("Hero", Stats::new(30, 8, 2), 5), initiative)
    }

    fn goblin(initiative: i32, number: u32) -> Combatant {
        Combatant::for_monster(Monster::goblin(), initiative, number)
    }

    /// Player vs two goblins, started
    fn skirmish() -> CombatEncounter {
        let mut enc = CombatEncounter::new(1, Some(2));
        enc.add_combatant(hero(15)).unwrap();
        enc.add_combatant(goblin(10, 1)).unwrap();
        enc.add_combatant(goblin(12, 2)).unwrap();
        enc.start().unwrap();
        enc
    }

    fn kill(enc: &mut CombatEncounter, id: crate::entities::EntityId) {
        let m = enc.combatant_by_id_mut(id).unwrap().monster_mut().unwrap();
        let overkill = m.health() + m.stats().defense;
        m.take_damage(overkill);
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    #[test]
    fn test_start_sorts_by_initiative_then_finesse() {
        let mut enc = CombatEncounter::new(1, None);
        enc.add_combatant(goblin(12, 1)).unwrap(); // finesse 1
        enc.add_combatant(hero(12)).unwrap(); // finesse 5, same initiative
        enc.add_combatant(Combatant::for_monster(Monster::orc(), 18, 0))
            .unwrap();
        enc.add_combatant(Combatant::for_monster(Monster::skeleton(), 3, 0))
            .unwrap();
        enc.start().unwrap();

        let order = enc.combatants();
        for pair in order.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(
                a.initiative() > b.initiative()
                    || (a.initiative() == b.initiative() && a.finesse() >= b.finesse())
            );
        }
        assert_eq!(order[0].display_name(), "Orc");
        assert_eq!(order[1].display_name(), "Hero"); // finesse beats the goblin
        assert_eq!(order[2].display_name(), "Goblin 1");
    }

    #[test]
    fn test_display_numbers_follow_creation_order_not_sort_order() {
        let enc = skirmish();

        // Goblin created second (initiative 12) sorts ahead of the first
        let order = enc.combatants();
        assert_eq!(order[0].display_name(), "Hero");
        assert_eq!(order[1].display_name(), "Goblin 2");
        assert_eq!(order[1].initiative(), 12);
        assert_eq!(order[2].display_name(), "Goblin 1");
        assert_eq!(order[2].initiative(), 10);
    }

    #[test]
    fn test_start_requires_combatants() {
        let mut enc = CombatEncounter::new(1, None);
        assert_eq!(enc.start().unwrap_err(), CombatError::NoCombatants);
        assert_eq!(enc.state(), EncounterState::NotStarted);
    }

    #[test]
    fn test_start_twice_is_invalid_state() {
        let mut enc = skirmish();
        let err = enc.start().unwrap_err();
        assert!(matches!(
            err,
            CombatError::InvalidState {
                expected: EncounterState::NotStarted,
                actual: EncounterState::Active,
            }
        ));
    }

    #[test]
    fn test_add_combatant_after_start_rejected() {
        let mut enc = skirmish();
        let err = enc.add_combatant(goblin(5, 3)).unwrap_err();
        assert!(matches!(err, CombatError::InvalidState { .. }));
        assert_eq!(enc.combatants().len(), 3);
    }

    #[test]
    fn test_round_starts_at_zero_then_one() {
        let mut enc = CombatEncounter::new(1, None);
        assert_eq!(enc.round_number(), 0);
        assert!(enc.current_combatant().is_none());
        assert!(enc.started_at().is_none());

        enc.add_combatant(hero(15)).unwrap();
        enc.start().unwrap();
        assert_eq!(enc.round_number(), 1);
        assert!(enc.started_at().is_some());
        assert_eq!(enc.current_combatant().unwrap().display_name(), "Hero");
    }

    // =========================================================================
    // Turn advance
    // =========================================================================

    #[test]
    fn test_full_lap_increments_round_and_resets_acted() {
        let mut enc = skirmish();

        let second = enc.advance_turn().unwrap().display_name().to_string();
        assert_eq!(second, "Goblin 2");
        assert_eq!(enc.round_number(), 1);
        assert!(enc.combatants()[0].has_acted_this_round());

        enc.advance_turn().unwrap();
        let first_again = enc.advance_turn().unwrap();
        assert_eq!(first_again.display_name(), "Hero");
        assert_eq!(enc.round_number(), 2);
        for c in enc.combatants() {
            assert!(!c.has_acted_this_round());
        }
    }

    #[test]
    fn test_advance_skips_defeated() {
        let mut enc = skirmish();
        let fast_goblin = enc.combatants()[1].id();
        kill(&mut enc, fast_goblin);

        let next = enc.advance_turn().unwrap();
        assert_eq!(next.display_name(), "Goblin 1");
        assert!(next.is_active());
    }

    #[test]
    fn test_advance_never_returns_inactive() {
        let mut enc = skirmish();
        let slow_goblin = enc.combatants()[2].id();
        kill(&mut enc, slow_goblin);

        for _ in 0..10 {
            if let Some(next) = enc.advance_turn() {
                assert!(next.is_active());
            }
        }
    }

    #[test]
    fn test_single_active_combatant_wraps_every_advance() {
        let mut enc = skirmish();
        let ids: Vec<_> = enc.active_monsters().map(|c| c.id()).collect();
        for id in ids {
            kill(&mut enc, id);
        }

        // Only the hero remains active; each advance is a full lap
        let next = enc.advance_turn().unwrap();
        assert_eq!(next.display_name(), "Hero");
        assert_eq!(enc.round_number(), 2);
    }

    #[test]
    fn test_exhausted_lap_triggers_resolution() {
        let mut enc = skirmish();
        let ids: Vec<_> = enc.combatants().iter().map(|c| c.id()).collect();
        // Down everyone, monsters and player alike
        for id in &ids {
            if enc.combatant_by_id(*id).unwrap().is_monster() {
                kill(&mut enc, *id);
            }
        }
        let hero_id = enc.player_combatant().unwrap().id();
        let p = enc.combatant_by_id_mut(hero_id).unwrap().player_mut().unwrap();
        p.take_damage(1000);

        assert!(enc.advance_turn().is_none());
        // No active player side: defeat wins the tie
        assert_eq!(enc.state(), EncounterState::PlayerDefeated);
        assert!(enc.ended_at().is_some());
        assert!(enc.current_combatant().is_none());
    }

    #[test]
    fn test_advance_is_noop_unless_active() {
        let mut enc = CombatEncounter::new(1, None);
        assert!(enc.advance_turn().is_none());

        enc.add_combatant(hero(15)).unwrap();
        enc.start().unwrap();
        enc.end_by_flee();
        assert!(enc.advance_turn().is_none());
        assert_eq!(enc.round_number(), 1);
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    #[test]
    fn test_victory_when_last_monster_falls() {
        let mut enc = skirmish();
        let ids: Vec<_> = enc.active_monsters().map(|c| c.id()).collect();
        for id in ids {
            kill(&mut enc, id);
        }

        enc.check_for_resolution();
        assert_eq!(enc.state(), EncounterState::Victory);
        assert!(enc.ended_at().is_some());
    }

    #[test]
    fn test_player_defeated_when_player_falls() {
        let mut enc = skirmish();
        let hero_id = enc.player_combatant().unwrap().id();
        enc.combatant_by_id_mut(hero_id)
            .unwrap()
            .player_mut()
            .unwrap()
            .take_damage(1000);

        enc.check_for_resolution();
        assert_eq!(enc.state(), EncounterState::PlayerDefeated);
    }

    #[test]
    fn test_resolution_noop_while_both_sides_stand() {
        let mut enc = skirmish();
        enc.check_for_resolution();
        assert_eq!(enc.state(), EncounterState::Active);
        assert!(enc.ended_at().is_none());
    }

    #[test]
    fn test_flee_then_flee_again_is_noop() {
        let mut enc = skirmish();
        enc.end_by_flee();
        assert_eq!(enc.state(), EncounterState::Fled);
        assert!(enc.state().is_terminal());
        let ended = enc.ended_at();

        enc.end_by_flee();
        assert_eq!(enc.state(), EncounterState::Fled);
        assert_eq!(enc.ended_at(), ended);
    }

    // =========================================================================
    // Targeting
    // =========================================================================

    #[test]
    fn test_remove_monster_forces_defeat() {
        let mut enc = skirmish();
        let id = enc.active_monsters().next().unwrap().id();

        enc.remove_monster(id).unwrap();
        let removed = enc.combatant_by_id(id).unwrap();
        assert!(!removed.is_active());
        assert_eq!(removed.current_health(), 0);
        // Still in the turn-order list
        assert_eq!(enc.combatants().len(), 3);
        assert_eq!(enc.active_monsters().count(), 1);
    }

    #[test]
    fn test_remove_monster_rejects_players_and_unknown_ids() {
        let mut enc = skirmish();
        let hero_id = enc.player_combatant().unwrap().id();

        let err = enc.remove_monster(hero_id).unwrap_err();
        assert!(matches!(err, CombatError::NotAMonster { .. }));
        assert!(enc.player_combatant().unwrap().is_active());

        let err = enc.remove_monster(999_999).unwrap_err();
        assert!(matches!(err, CombatError::UnknownCombatant { id: 999_999 }));
    }

    #[test]
    fn test_monster_numbering_follows_active_enumeration() {
        let mut enc = skirmish();
        assert_eq!(enc.monster_by_number(1).unwrap().display_name(), "Goblin 2");
        assert_eq!(enc.monster_by_number(2).unwrap().display_name(), "Goblin 1");
        assert!(enc.monster_by_number(0).is_none());
        assert!(enc.monster_by_number(3).is_none());

        // When the first active monster falls, numbering shifts
        let id = enc.monster_by_number(1).unwrap().id();
        kill(&mut enc, id);
        assert_eq!(enc.monster_by_number(1).unwrap().display_name(), "Goblin 1");
        assert!(enc.monster_by_number(2).is_none());
    }

    #[test]
    fn test_find_by_name_is_case_insensitive_substring() {
        let mut enc = skirmish();
        assert_eq!(enc.find_by_name("gob").unwrap().display_name(), "Goblin 2");
        assert_eq!(enc.find_by_name("HERO").unwrap().display_name(), "Hero");
        assert!(enc.find_by_name("dragon").is_none());

        // Defeated combatants are not valid targets
        let id = enc.find_by_name("goblin 2").unwrap().id();
        kill(&mut enc, id);
        assert_eq!(
            enc.find_by_name("goblin").unwrap().display_name(),
            "Goblin 1"
        );
    }

    #[test]
    fn test_allies_and_enemies_exclude_self() {
        let enc = skirmish();
        let goblin_two = enc.find_by_name("Goblin 2").unwrap().id();

        let allies: Vec<_> = enc.allies_of(goblin_two).map(|c| c.display_name()).collect();
        assert_eq!(allies, vec!["Goblin 1"]);

        let enemies: Vec<_> = enc
            .enemies_of(goblin_two)
            .map(|c| c.display_name())
            .collect();
        assert_eq!(enemies, vec!["Hero"]);
    }

    #[test]
    fn test_active_and_defeated_counts() {
        let mut enc = skirmish();
        assert_eq!(enc.active_count(), 3);
        assert_eq!(enc.defeated_count(), 0);

        let id = enc.active_monsters().next().unwrap().id();
        kill(&mut enc, id);
        assert_eq!(enc.active_count(), 2);
        assert_eq!(enc.defeated_count(), 1);
    }

    // =========================================================================
    // Log
    // =========================================================================

    #[test]
    fn test_log_slices() {
        let mut enc = skirmish();
        enc.add_log_entry(CombatLogEntry::system(1, "Combat begins"));
        enc.add_log_entry(CombatLogEntry::attack(
            1,
            "Hero",
            "Goblin 2",
            Some(7),
            false,
            "Hero hits Goblin 2 for 7",
        ));
        enc.add_log_entry(CombatLogEntry::attack(
            2,
            "Goblin 1",
            "Hero",
            None,
            false,
            "Goblin 1 misses",
        ));

        let recent = enc.recent_log_entries(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].message, "Hero hits Goblin 2 for 7");
        assert_eq!(recent[1].message, "Goblin 1 misses");

        // Asking for more than exists yields the whole log, in order
        assert_eq!(enc.recent_log_entries(10).len(), 3);

        let round_one: Vec<_> = enc.log_entries_for_round(1).collect();
        assert_eq!(round_one.len(), 2);
        assert!(enc.log_entries_for_round(3).next().is_none());
    }

    // =========================================================================
    // Turn scan unit tests
    // =========================================================================

    #[test]
    fn test_scan_finds_next_without_wrap() {
        let enc = skirmish();
        assert_eq!(
            scan_next_active(enc.combatants(), 0),
            TurnScan::Next {
                index: 1,
                wrapped: false
            }
        );
    }

    #[test]
    fn test_scan_wraps_to_front() {
        let enc = skirmish();
        assert_eq!(
            scan_next_active(enc.combatants(), 2),
            TurnScan::Next {
                index: 0,
                wrapped: true
            }
        );
    }

    #[test]
    fn test_scan_skips_inactive_across_wrap() {
        let mut enc = skirmish();
        let hero_id = enc.player_combatant().unwrap().id();
        enc.combatant_by_id_mut(hero_id)
            .unwrap()
            .player_mut()
            .unwrap()
            .take_damage(1000);

        // From the last slot, index 0 (hero) is skipped, lands on 1
        assert_eq!(
            scan_next_active(enc.combatants(), 2),
            TurnScan::Next {
                index: 1,
                wrapped: true
            }
        );
    }

    #[test]
    fn test_scan_exhausted_when_nobody_active() {
        let mut enc = skirmish();
        let ids: Vec<_> = enc.combatants().iter().map(|c| c.id()).collect();
        for id in ids {
            if enc.combatant_by_id(id).unwrap().is_monster() {
                kill(&mut enc, id);
            } else {
                enc.combatant_by_id_mut(id)
                    .unwrap()
                    .player_mut()
                    .unwrap()
                    .take_damage(1000);
            }
        }
        assert_eq!(scan_next_active(enc.combatants(), 0), TurnScan::Exhausted);
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    #[test]
    fn test_encounter_survives_save_and_restore() {
        let mut enc = skirmish();
        enc.advance_turn();
        enc.add_log_entry(CombatLogEntry::system(1, "Combat begins"));

        let json = serde_json::to_string(&enc).unwrap();
        let restored: CombatEncounter = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.state(), EncounterState::Active);
        assert_eq!(restored.round_number(), enc.round_number());
        assert_eq!(
            restored.current_combatant().unwrap().display_name(),
            enc.current_combatant().unwrap().display_name()
        );
        assert_eq!(restored.log().len(), 1);
    }
}
