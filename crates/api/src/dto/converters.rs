//! Domain-to-DTO conversions.

use skirmish_domain::history::PlayerCombatHistory;
use skirmish_domain::loot::LootDrop;
use skirmish_domain::session::CombatSession;
use skirmish_workflow::{AttackReport, CompletionReport};

use super::response::{
    AttackResponse, CombatSessionResponse, CompletionResponse, HistoryResponse, LootDropResponse,
};

impl From<&CombatSession> for CombatSessionResponse {
    fn from(session: &CombatSession) -> Self {
        Self {
            combat_id: session.id().to_string(),
            user_id: session.user_id().to_string(),
            location_id: session.location_id().to_string(),
            enemy_type_id: session.enemy_type().to_string(),
            combat_level: session.combat_level().value(),
            player_hp: session.player_hp().value(),
            enemy_hp: session.enemy_hp().value(),
            turn_number: session.turn_number(),
            outcome: session.outcome().map(|outcome| outcome.as_str().to_string()),
        }
    }
}

impl From<&AttackReport> for AttackResponse {
    fn from(report: &AttackReport) -> Self {
        Self {
            zone: report.zone.name().to_string(),
            damage_dealt: report.damage_dealt,
            damage_taken: report.damage_taken,
            session: CombatSessionResponse::from(&report.session),
        }
    }
}

impl From<&LootDrop> for LootDropResponse {
    fn from(drop: &LootDrop) -> Self {
        Self {
            kind: drop.kind().name().to_string(),
            lootable_id: drop.lootable().to_string(),
            style: drop.style().map(|style| style.as_str().to_string()),
            quantity: drop.quantity(),
        }
    }
}

impl From<&CompletionReport> for CompletionResponse {
    fn from(report: &CompletionReport) -> Self {
        Self {
            outcome: report.outcome.as_str().to_string(),
            loot: report
                .loot
                .as_ref()
                .map(|drops| drops.iter().map(LootDropResponse::from).collect()),
        }
    }
}

impl From<&PlayerCombatHistory> for HistoryResponse {
    fn from(history: &PlayerCombatHistory) -> Self {
        Self {
            user_id: history.user_id().to_string(),
            location_id: history.location_id().to_string(),
            total_attempts: history.total_attempts(),
            victories: history.victories(),
            defeats: history.defeats(),
            current_streak: history.current_streak(),
            longest_streak: history.longest_streak(),
            last_attempt: history.last_attempt(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use rstest::rstest;
    use skirmish_domain::common::{CombatLevel, Health, LocationId, UserId};
    use skirmish_domain::enemy::EnemyTypeId;
    use skirmish_domain::session::{CombatId, CombatOutcome};

    fn sample_session() -> CombatSession {
        CombatSession::open(
            CombatId::new(),
            UserId::new(),
            LocationId::new(),
            EnemyTypeId::new(),
            CombatLevel::new(2).unwrap(),
            Health::new(100).unwrap(),
            Health::new(80).unwrap(),
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        )
    }

    #[rstest]
    fn session_response_carries_hp_and_turn() {
        let session = sample_session();
        let response = CombatSessionResponse::from(&session);

        assert_eq!(response.combat_id, session.id().to_string());
        assert_eq!(response.player_hp, 100);
        assert_eq!(response.enemy_hp, 80);
        assert_eq!(response.turn_number, 0);
        assert!(response.outcome.is_none());
    }

    #[rstest]
    fn terminal_outcome_is_rendered_as_its_name() {
        let session = sample_session()
            .close(
                CombatOutcome::Escape,
                DateTime::from_timestamp(1_700_000_100, 0).unwrap(),
            )
            .unwrap();
        let response = CombatSessionResponse::from(&session);
        assert_eq!(response.outcome.as_deref(), Some("escape"));
    }

    #[rstest]
    fn completion_without_loot_maps_to_none() {
        let report = CompletionReport {
            outcome: CombatOutcome::Defeat,
            loot: None,
        };
        let response = CompletionResponse::from(&report);
        assert_eq!(response.outcome, "defeat");
        assert!(response.loot.is_none());
    }
}
