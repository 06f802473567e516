//! MySQL-backed combat log store.
//!
//! Events land in `combat_log_events` with the kind serialized as a tagged
//! JSON payload next to an indexable `event_type` column. The unique
//! (combat_id, sequence_number) key is what rejects duplicate or replayed
//! sequence numbers.

use async_trait::async_trait;
use sqlx::Row;
use sqlx::mysql::MySqlRow;
use uuid::Uuid;

use skirmish_domain::session::{CombatId, CombatLogEvent, CombatLogEventKind, LogActor};
use skirmish_workflow::WorkflowError;
use skirmish_workflow::ports::{CombatLogStore, WorkflowResult};

use super::MySqlPool;

// =============================================================================
// MySqlCombatLogStore
// =============================================================================

#[derive(Clone)]
pub struct MySqlCombatLogStore {
    pool: MySqlPool,
}

impl MySqlCombatLogStore {
    #[must_use]
    pub const fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CombatLogStore for MySqlCombatLogStore {
    async fn append(&self, event: &CombatLogEvent) -> WorkflowResult<()> {
        let payload = serde_json::to_value(event.kind())
            .map_err(|error| WorkflowError::event_log("serialize", error.to_string()))?;

        let result = sqlx::query(
            r#"
            INSERT INTO combat_log_events
                (event_id, combat_id, sequence_number, occurred_at, actor, event_type, payload, amount)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(event.combat_id().as_uuid())
        .bind(event.sequence())
        .bind(event.occurred_at().naive_utc())
        .bind(event.actor().as_str())
        .bind(event.kind().name())
        .bind(payload)
        .bind(event.amount())
        .execute(self.pool.as_inner())
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(error) => {
                if let sqlx::Error::Database(database_error) = &error {
                    if database_error.is_unique_violation() {
                        return Err(WorkflowError::conflict(format!(
                            "duplicate combat log sequence {} for session {}",
                            event.sequence(),
                            event.combat_id()
                        )));
                    }
                }
                Err(WorkflowError::event_log("append", error.to_string()))
            }
        }
    }

    async fn load(&self, combat_id: &CombatId) -> WorkflowResult<Vec<CombatLogEvent>> {
        let rows = sqlx::query(
            r#"
            SELECT combat_id, sequence_number, occurred_at, actor, payload, amount
            FROM combat_log_events
            WHERE combat_id = ?
            ORDER BY sequence_number
            "#,
        )
        .bind(combat_id.as_uuid())
        .fetch_all(self.pool.as_inner())
        .await
        .map_err(|error| WorkflowError::event_log("load", error.to_string()))?;

        rows.iter().map(map_event_row).collect()
    }
}

// =============================================================================
// Row Mapping
// =============================================================================

fn map_event_row(row: &MySqlRow) -> WorkflowResult<CombatLogEvent> {
    let combat_id: Uuid = get(row, "combat_id")?;
    let sequence: u64 = get(row, "sequence_number")?;
    let occurred_at: chrono::NaiveDateTime = get(row, "occurred_at")?;
    let actor: String = get(row, "actor")?;
    let payload: serde_json::Value = get(row, "payload")?;
    let amount: i64 = get(row, "amount")?;

    let actor = match actor.as_str() {
        "player" => LogActor::Player,
        "enemy" => LogActor::Enemy,
        other => {
            return Err(WorkflowError::event_log(
                "decode",
                format!("unknown log actor '{}'", other),
            ));
        }
    };

    let kind: CombatLogEventKind = serde_json::from_value(payload)
        .map_err(|error| WorkflowError::event_log("decode", error.to_string()))?;

    let combat_id = CombatId::from_uuid(combat_id)
        .map_err(|error| WorkflowError::event_log("decode", error.message()))?;

    CombatLogEvent::new(combat_id, sequence, occurred_at.and_utc(), actor, kind, amount)
        .map_err(|error| WorkflowError::event_log("decode", error.message()))
}

fn get<'r, T>(row: &'r MySqlRow, column: &str) -> WorkflowResult<T>
where
    T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
{
    row.try_get(column)
        .map_err(|error| WorkflowError::event_log("decode", error.to_string()))
}
