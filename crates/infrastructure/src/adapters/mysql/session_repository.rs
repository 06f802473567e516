//! MySQL-backed combat session repository.

use async_trait::async_trait;
use sqlx::Row;
use sqlx::mysql::MySqlRow;
use uuid::Uuid;

use skirmish_domain::common::{CombatLevel, Health, LocationId, UserId};
use skirmish_domain::enemy::EnemyTypeId;
use skirmish_domain::session::{CombatId, CombatOutcome, CombatSession};
use skirmish_workflow::WorkflowError;
use skirmish_workflow::ports::{SessionRepository, WorkflowResult};

use super::MySqlPool;

// =============================================================================
// MySqlSessionRepository
// =============================================================================

/// Combat session storage on the `combat_sessions` table.
///
/// The table's generated `active_user_id` column carries the user only while
/// `outcome IS NULL`; its unique index is what turns a create race into a
/// duplicate-key error for the losing writer. Updates are compare-and-set on
/// `event_sequence`, serializing turns per session.
#[derive(Clone)]
pub struct MySqlSessionRepository {
    pool: MySqlPool,
}

impl MySqlSessionRepository {
    #[must_use]
    pub const fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for MySqlSessionRepository {
    async fn insert(&self, session: &CombatSession) -> WorkflowResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO combat_sessions
                (combat_id, user_id, location_id, enemy_type_id, combat_level,
                 player_hp, enemy_hp, turn_number, outcome, finalized,
                 event_sequence, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.user_id().as_uuid())
        .bind(session.location_id().as_uuid())
        .bind(session.enemy_type().as_uuid())
        .bind(session.combat_level().value())
        .bind(session.player_hp().value())
        .bind(session.enemy_hp().value())
        .bind(session.turn_number())
        .bind(session.outcome().map(|outcome| outcome.as_str()))
        .bind(session.is_finalized())
        .bind(session.event_sequence())
        .bind(session.created_at().naive_utc())
        .bind(session.updated_at().naive_utc())
        .execute(self.pool.as_inner())
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(error) => {
                if let sqlx::Error::Database(database_error) = &error {
                    if database_error.is_unique_violation() {
                        return Err(WorkflowError::active_session_exists(
                            session.user_id().to_string(),
                        ));
                    }
                }
                Err(WorkflowError::repository("insert", error.to_string()))
            }
        }
    }

    async fn find(&self, identifier: &CombatId) -> WorkflowResult<Option<CombatSession>> {
        let row = sqlx::query(
            r#"
            SELECT combat_id, user_id, location_id, enemy_type_id, combat_level,
                   player_hp, enemy_hp, turn_number, outcome, finalized,
                   event_sequence, created_at, updated_at
            FROM combat_sessions
            WHERE combat_id = ?
            "#,
        )
        .bind(identifier.as_uuid())
        .fetch_optional(self.pool.as_inner())
        .await
        .map_err(|error| WorkflowError::repository("find", error.to_string()))?;

        row.map(|row| map_session_row(&row)).transpose()
    }

    async fn find_active(&self, user_id: &UserId) -> WorkflowResult<Option<CombatSession>> {
        let row = sqlx::query(
            r#"
            SELECT combat_id, user_id, location_id, enemy_type_id, combat_level,
                   player_hp, enemy_hp, turn_number, outcome, finalized,
                   event_sequence, created_at, updated_at
            FROM combat_sessions
            WHERE user_id = ? AND outcome IS NULL
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(self.pool.as_inner())
        .await
        .map_err(|error| WorkflowError::repository("find_active", error.to_string()))?;

        row.map(|row| map_session_row(&row)).transpose()
    }

    async fn update(
        &self,
        session: &CombatSession,
        expected_sequence: u64,
    ) -> WorkflowResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE combat_sessions
            SET player_hp = ?, enemy_hp = ?, turn_number = ?, outcome = ?,
                finalized = ?, event_sequence = ?, updated_at = ?
            WHERE combat_id = ? AND event_sequence = ?
            "#,
        )
        .bind(session.player_hp().value())
        .bind(session.enemy_hp().value())
        .bind(session.turn_number())
        .bind(session.outcome().map(|outcome| outcome.as_str()))
        .bind(session.is_finalized())
        .bind(session.event_sequence())
        .bind(session.updated_at().naive_utc())
        .bind(session.id().as_uuid())
        .bind(expected_sequence)
        .execute(self.pool.as_inner())
        .await
        .map_err(|error| WorkflowError::repository("update", error.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(WorkflowError::conflict(format!(
                "session {} moved past sequence {}",
                session.id(),
                expected_sequence
            )));
        }

        Ok(())
    }

    async fn list_stale(
        &self,
        cutoff: chrono::DateTime<chrono::Utc>,
    ) -> WorkflowResult<Vec<CombatSession>> {
        let rows = sqlx::query(
            r#"
            SELECT combat_id, user_id, location_id, enemy_type_id, combat_level,
                   player_hp, enemy_hp, turn_number, outcome, finalized,
                   event_sequence, created_at, updated_at
            FROM combat_sessions
            WHERE updated_at < ? AND (outcome IS NULL OR finalized = FALSE)
            "#,
        )
        .bind(cutoff.naive_utc())
        .fetch_all(self.pool.as_inner())
        .await
        .map_err(|error| WorkflowError::repository("list_stale", error.to_string()))?;

        rows.iter().map(map_session_row).collect()
    }
}

// =============================================================================
// Row Mapping
// =============================================================================

fn map_session_row(row: &MySqlRow) -> WorkflowResult<CombatSession> {
    let combat_id: Uuid = get(row, "combat_id")?;
    let user_id: Uuid = get(row, "user_id")?;
    let location_id: Uuid = get(row, "location_id")?;
    let enemy_type_id: Uuid = get(row, "enemy_type_id")?;
    let combat_level: u32 = get(row, "combat_level")?;
    let player_hp: u32 = get(row, "player_hp")?;
    let enemy_hp: u32 = get(row, "enemy_hp")?;
    let turn_number: u32 = get(row, "turn_number")?;
    let outcome: Option<String> = get(row, "outcome")?;
    let finalized: bool = get(row, "finalized")?;
    let event_sequence: u64 = get(row, "event_sequence")?;
    let created_at: chrono::NaiveDateTime = get(row, "created_at")?;
    let updated_at: chrono::NaiveDateTime = get(row, "updated_at")?;

    let outcome = outcome
        .map(|value| value.parse::<CombatOutcome>())
        .transpose()
        .map_err(decode_error)?;

    Ok(CombatSession::restore(
        CombatId::from_uuid(combat_id).map_err(decode_error)?,
        UserId::from_uuid(user_id).map_err(decode_error)?,
        LocationId::from_uuid(location_id).map_err(decode_error)?,
        EnemyTypeId::from_uuid(enemy_type_id).map_err(decode_error)?,
        CombatLevel::new(combat_level).map_err(decode_error)?,
        Health::new(player_hp).map_err(decode_error)?,
        Health::new(enemy_hp).map_err(decode_error)?,
        turn_number,
        outcome,
        finalized,
        event_sequence,
        created_at.and_utc(),
        updated_at.and_utc(),
    ))
}

fn get<'r, T>(row: &'r MySqlRow, column: &str) -> WorkflowResult<T>
where
    T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
{
    row.try_get(column)
        .map_err(|error| WorkflowError::repository("decode", error.to_string()))
}

fn decode_error(error: impl std::fmt::Display) -> WorkflowError {
    WorkflowError::repository("decode", error.to_string())
}
