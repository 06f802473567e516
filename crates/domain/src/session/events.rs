//! Combat log events.
//!
//! The log is append-only and ordered by a per-session sequence starting at
//! 1. The storage layer enforces sequence uniqueness; the constructors here
//! enforce the lower bound.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::combat::HitZone;
use crate::common::ValidationError;
use crate::enemy::EnemyTypeId;

use super::identifier::CombatId;
use super::status::CombatOutcome;

// =============================================================================
// LogActor
// =============================================================================

/// Which side of the fight an event is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogActor {
    Player,

    Enemy,
}

impl LogActor {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Enemy => "enemy",
        }
    }
}

// =============================================================================
// CombatLogEventKind
// =============================================================================

/// Payload of a combat log event.
///
/// Serialized with an internal `type` tag so the storage layer can index the
/// event type column without unpacking the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CombatLogEventKind {
    /// The session opened against the selected enemy.
    SessionStarted {
        enemy_type: EnemyTypeId,
        combat_level: u32,
    },

    /// A tap resolved, including any counterattack or self-injury damage.
    AttackResolved {
        zone: HitZone,
        damage_to_enemy: u32,
        damage_to_player: u32,
    },

    /// The session reached its terminal outcome.
    SessionClosed {
        outcome: CombatOutcome,
    },
}

impl CombatLogEventKind {
    /// Stable name of the event kind, used as the storage type column.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SessionStarted { .. } => "session_started",
            Self::AttackResolved { .. } => "attack_resolved",
            Self::SessionClosed { .. } => "session_closed",
        }
    }
}

// =============================================================================
// CombatLogEvent
// =============================================================================

/// One entry of a session's append-only combat log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatLogEvent {
    combat_id: CombatId,
    sequence: u64,
    occurred_at: DateTime<Utc>,
    actor: LogActor,
    kind: CombatLogEventKind,
    amount: i64,
}

impl CombatLogEvent {
    /// Creates a log event.
    ///
    /// Returns an error for sequence 0; sequences start at 1.
    pub fn new(
        combat_id: CombatId,
        sequence: u64,
        occurred_at: DateTime<Utc>,
        actor: LogActor,
        kind: CombatLogEventKind,
        amount: i64,
    ) -> Result<Self, ValidationError> {
        if sequence == 0 {
            return Err(ValidationError::out_of_range(
                "sequence",
                1,
                u64::MAX,
                sequence,
            ));
        }
        Ok(Self {
            combat_id,
            sequence,
            occurred_at,
            actor,
            kind,
            amount,
        })
    }

    /// The opening event of a session.
    pub fn session_started(
        combat_id: CombatId,
        sequence: u64,
        occurred_at: DateTime<Utc>,
        enemy_type: EnemyTypeId,
        combat_level: u32,
    ) -> Result<Self, ValidationError> {
        Self::new(
            combat_id,
            sequence,
            occurred_at,
            LogActor::Player,
            CombatLogEventKind::SessionStarted {
                enemy_type,
                combat_level,
            },
            0,
        )
    }

    /// A resolved tap. The amount column carries the damage dealt to the
    /// enemy.
    pub fn attack_resolved(
        combat_id: CombatId,
        sequence: u64,
        occurred_at: DateTime<Utc>,
        zone: HitZone,
        damage_to_enemy: u32,
        damage_to_player: u32,
    ) -> Result<Self, ValidationError> {
        Self::new(
            combat_id,
            sequence,
            occurred_at,
            LogActor::Player,
            CombatLogEventKind::AttackResolved {
                zone,
                damage_to_enemy,
                damage_to_player,
            },
            i64::from(damage_to_enemy),
        )
    }

    /// The closing event of a session. Defeats are attributed to the enemy,
    /// every other outcome to the player.
    pub fn session_closed(
        combat_id: CombatId,
        sequence: u64,
        occurred_at: DateTime<Utc>,
        outcome: CombatOutcome,
    ) -> Result<Self, ValidationError> {
        let actor = match outcome {
            CombatOutcome::Defeat => LogActor::Enemy,
            _ => LogActor::Player,
        };
        Self::new(
            combat_id,
            sequence,
            occurred_at,
            actor,
            CombatLogEventKind::SessionClosed { outcome },
            0,
        )
    }

    #[must_use]
    pub const fn combat_id(&self) -> &CombatId {
        &self.combat_id
    }

    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    #[must_use]
    pub const fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    #[must_use]
    pub const fn actor(&self) -> LogActor {
        self.actor
    }

    #[must_use]
    pub const fn kind(&self) -> &CombatLogEventKind {
        &self.kind
    }

    #[must_use]
    pub const fn amount(&self) -> i64 {
        self.amount
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn sequence_zero_is_rejected() {
        let result = CombatLogEvent::session_started(
            CombatId::new(),
            0,
            Utc::now(),
            EnemyTypeId::new(),
            1,
        );
        assert!(result.is_err());
    }

    #[rstest]
    fn attack_resolved_carries_enemy_damage_as_amount() {
        let event = CombatLogEvent::attack_resolved(
            CombatId::new(),
            2,
            Utc::now(),
            HitZone::Normal,
            17,
            4,
        )
        .unwrap();
        assert_eq!(event.amount(), 17);
        assert_eq!(event.actor(), LogActor::Player);
        assert_eq!(event.kind().name(), "attack_resolved");
    }

    #[rstest]
    fn defeat_closure_is_attributed_to_the_enemy() {
        let event = CombatLogEvent::session_closed(
            CombatId::new(),
            3,
            Utc::now(),
            CombatOutcome::Defeat,
        )
        .unwrap();
        assert_eq!(event.actor(), LogActor::Enemy);
    }

    #[rstest]
    #[case(CombatOutcome::Victory)]
    #[case(CombatOutcome::Escape)]
    #[case(CombatOutcome::Abandoned)]
    fn non_defeat_closures_are_attributed_to_the_player(#[case] outcome: CombatOutcome) {
        let event =
            CombatLogEvent::session_closed(CombatId::new(), 3, Utc::now(), outcome).unwrap();
        assert_eq!(event.actor(), LogActor::Player);
    }

    #[rstest]
    fn kind_serializes_with_internal_type_tag() {
        let kind = CombatLogEventKind::AttackResolved {
            zone: HitZone::Crit,
            damage_to_enemy: 40,
            damage_to_player: 3,
        };
        let json = serde_json::to_value(&kind).unwrap();
        assert_eq!(json["type"], "attack_resolved");
        assert_eq!(json["zone"], "crit");
        assert_eq!(json["damage_to_enemy"], 40);
    }
}
