//! Combat log entries
//!
//! Immutable records of combat events, appended to the encounter's log
//! in occurrence order and never mutated afterwards.

use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// What kind of event a log entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogEntryKind {
    Attack,
    Heal,
    Status,
    System,
    Flee,
}

/// One immutable combat event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatLogEntry {
    pub timestamp: SystemTime,
    pub round: u32,
    pub kind: LogEntryKind,
    pub message: String,
    pub actor: Option<String>,
    pub target: Option<String>,
    pub damage: Option<i32>,
    pub healing: Option<i32>,
    pub is_critical: bool,
    pub is_miss: bool,
}

impl CombatLogEntry {
    fn base(round: u32, kind: LogEntryKind, message: impl Into<String>) -> Self {
        Self {
            timestamp: SystemTime::now(),
            round,
            kind,
            message: message.into(),
            actor: None,
            target: None,
            damage: None,
            healing: None,
            is_critical: false,
            is_miss: false,
        }
    }

    /// An attack from `actor` against `target`; `damage` is `None` on a miss
    pub fn attack(
        round: u32,
        actor: impl Into<String>,
        target: impl Into<String>,
        damage: Option<i32>,
        is_critical: bool,
        message: impl Into<String>,
    ) -> Self {
        Self {
            actor: Some(actor.into()),
            target: Some(target.into()),
            damage,
            is_critical,
            is_miss: damage.is_none(),
            ..Self::base(round, LogEntryKind::Attack, message)
        }
    }

    /// A heal applied by `actor` to `target`
    pub fn heal(
        round: u32,
        actor: impl Into<String>,
        target: impl Into<String>,
        healing: i32,
        message: impl Into<String>,
    ) -> Self {
        Self {
            actor: Some(actor.into()),
            target: Some(target.into()),
            healing: Some(healing),
            ..Self::base(round, LogEntryKind::Heal, message)
        }
    }

    /// A status change on `target` (defending, stunned, and so on)
    pub fn status(round: u32, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            target: Some(target.into()),
            ..Self::base(round, LogEntryKind::Status, message)
        }
    }

    /// A system message (combat started, victory, and so on)
    pub fn system(round: u32, message: impl Into<String>) -> Self {
        Self::base(round, LogEntryKind::System, message)
    }

    /// The player escaped combat
    pub fn flee(round: u32, actor: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            actor: Some(actor.into()),
            ..Self::base(round, LogEntryKind::Flee, message)
        }
    }
}
