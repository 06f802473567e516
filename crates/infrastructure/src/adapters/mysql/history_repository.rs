//! MySQL-backed player combat history repository.

use async_trait::async_trait;
use sqlx::Row;
use sqlx::mysql::MySqlRow;
use uuid::Uuid;

use skirmish_domain::common::{LocationId, UserId};
use skirmish_domain::history::PlayerCombatHistory;
use skirmish_workflow::WorkflowError;
use skirmish_workflow::ports::{HistoryRepository, WorkflowResult};

use super::MySqlPool;

// =============================================================================
// MySqlHistoryRepository
// =============================================================================

/// History storage on the `player_combat_history` table, keyed by
/// (user, location). Saves are upserts: the workflow layer owns the counting
/// rules and writes whole records.
#[derive(Clone)]
pub struct MySqlHistoryRepository {
    pool: MySqlPool,
}

impl MySqlHistoryRepository {
    #[must_use]
    pub const fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryRepository for MySqlHistoryRepository {
    async fn find(
        &self,
        user_id: &UserId,
        location_id: &LocationId,
    ) -> WorkflowResult<Option<PlayerCombatHistory>> {
        let row = sqlx::query(
            r#"
            SELECT user_id, location_id, total_attempts, victories, defeats,
                   current_streak, longest_streak, last_attempt
            FROM player_combat_history
            WHERE user_id = ? AND location_id = ?
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(location_id.as_uuid())
        .fetch_optional(self.pool.as_inner())
        .await
        .map_err(|error| WorkflowError::repository("find", error.to_string()))?;

        row.map(|row| map_history_row(&row)).transpose()
    }

    async fn save(&self, history: &PlayerCombatHistory) -> WorkflowResult<()> {
        sqlx::query(
            r#"
            INSERT INTO player_combat_history
                (user_id, location_id, total_attempts, victories, defeats,
                 current_streak, longest_streak, last_attempt)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                total_attempts = VALUES(total_attempts),
                victories = VALUES(victories),
                defeats = VALUES(defeats),
                current_streak = VALUES(current_streak),
                longest_streak = VALUES(longest_streak),
                last_attempt = VALUES(last_attempt)
            "#,
        )
        .bind(history.user_id().as_uuid())
        .bind(history.location_id().as_uuid())
        .bind(history.total_attempts())
        .bind(history.victories())
        .bind(history.defeats())
        .bind(history.current_streak())
        .bind(history.longest_streak())
        .bind(history.last_attempt().map(|at| at.naive_utc()))
        .execute(self.pool.as_inner())
        .await
        .map_err(|error| WorkflowError::repository("save", error.to_string()))?;

        Ok(())
    }
}

// =============================================================================
// Row Mapping
// =============================================================================

fn map_history_row(row: &MySqlRow) -> WorkflowResult<PlayerCombatHistory> {
    let user_id: Uuid = get(row, "user_id")?;
    let location_id: Uuid = get(row, "location_id")?;
    let total_attempts: u64 = get(row, "total_attempts")?;
    let victories: u64 = get(row, "victories")?;
    let defeats: u64 = get(row, "defeats")?;
    let current_streak: u32 = get(row, "current_streak")?;
    let longest_streak: u32 = get(row, "longest_streak")?;
    let last_attempt: Option<chrono::NaiveDateTime> = get(row, "last_attempt")?;

    Ok(PlayerCombatHistory::restore(
        UserId::from_uuid(user_id)
            .map_err(|error| WorkflowError::repository("decode", error.message()))?,
        LocationId::from_uuid(location_id)
            .map_err(|error| WorkflowError::repository("decode", error.message()))?,
        total_attempts,
        victories,
        defeats,
        current_streak,
        longest_streak,
        last_attempt.map(|at| at.and_utc()),
    ))
}

fn get<'r, T>(row: &'r MySqlRow, column: &str) -> WorkflowResult<T>
where
    T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
{
    row.try_get(column)
        .map_err(|error| WorkflowError::repository("decode", error.to_string()))
}
