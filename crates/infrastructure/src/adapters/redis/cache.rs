//! Redis-backed combat session cache.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use skirmish_domain::common::{CombatLevel, Health, LocationId, UserId, ValidationError};
use skirmish_domain::enemy::EnemyTypeId;
use skirmish_domain::session::{CombatId, CombatOutcome, CombatSession};
use skirmish_workflow::ports::SessionCache;

use super::RedisConnection;

// =============================================================================
// CachedCombatSession
// =============================================================================

/// Wire shape of a cached session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CachedCombatSession {
    combat_id: Uuid,
    user_id: Uuid,
    location_id: Uuid,
    enemy_type_id: Uuid,
    combat_level: u32,
    player_hp: u32,
    enemy_hp: u32,
    turn_number: u32,
    outcome: Option<String>,
    finalized: bool,
    event_sequence: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<&CombatSession> for CachedCombatSession {
    fn from(session: &CombatSession) -> Self {
        Self {
            combat_id: *session.id().as_uuid(),
            user_id: *session.user_id().as_uuid(),
            location_id: *session.location_id().as_uuid(),
            enemy_type_id: *session.enemy_type().as_uuid(),
            combat_level: session.combat_level().value(),
            player_hp: session.player_hp().value(),
            enemy_hp: session.enemy_hp().value(),
            turn_number: session.turn_number(),
            outcome: session.outcome().map(|outcome| outcome.as_str().to_string()),
            finalized: session.is_finalized(),
            event_sequence: session.event_sequence(),
            created_at: session.created_at(),
            updated_at: session.updated_at(),
        }
    }
}

impl CachedCombatSession {
    fn into_session(self) -> Result<CombatSession, ValidationError> {
        let outcome = self
            .outcome
            .map(|value| value.parse::<CombatOutcome>())
            .transpose()?;

        Ok(CombatSession::restore(
            CombatId::from_uuid(self.combat_id)?,
            UserId::from_uuid(self.user_id)?,
            LocationId::from_uuid(self.location_id)?,
            EnemyTypeId::from_uuid(self.enemy_type_id)?,
            CombatLevel::new(self.combat_level)?,
            Health::new(self.player_hp)?,
            Health::new(self.enemy_hp)?,
            self.turn_number,
            outcome,
            self.finalized,
            self.event_sequence,
            self.created_at,
            self.updated_at,
        ))
    }
}

// =============================================================================
// RedisSessionCache
// =============================================================================

/// Session cache on `session:{combat_id}` keys with per-entry TTL.
///
/// Every operation degrades to a miss (with a warning) on transport or
/// decode failures; the repository remains the source of truth.
#[derive(Clone, Debug)]
pub struct RedisSessionCache {
    connection: RedisConnection,
}

impl RedisSessionCache {
    #[must_use]
    pub const fn new(connection: RedisConnection) -> Self {
        Self { connection }
    }

    fn session_key(&self, identifier: &CombatId) -> String {
        self.connection
            .format_key(&format!("session:{}", identifier))
    }
}

#[async_trait]
impl SessionCache for RedisSessionCache {
    async fn get(&self, identifier: &CombatId) -> Option<CombatSession> {
        let key = self.session_key(identifier);

        let mut connection = match self.connection.get_async_connection().await {
            Ok(connection) => connection,
            Err(error) => {
                tracing::warn!("failed to reach Redis for cache get: {}", error);
                return None;
            }
        };

        let payload: Option<String> = match connection.get(&key).await {
            Ok(payload) => payload,
            Err(error) => {
                tracing::warn!("cache get for '{}' failed: {}", key, error);
                return None;
            }
        };

        let cached: CachedCombatSession = match serde_json::from_str(&payload?) {
            Ok(cached) => cached,
            Err(error) => {
                tracing::warn!("cached session under '{}' is unreadable: {}", key, error);
                return None;
            }
        };

        match cached.into_session() {
            Ok(session) => Some(session),
            Err(error) => {
                tracing::warn!("cached session under '{}' is invalid: {}", key, error);
                None
            }
        }
    }

    async fn set(&self, session: &CombatSession, time_to_live: Duration) {
        let key = self.session_key(session.id());

        let payload = match serde_json::to_string(&CachedCombatSession::from(session)) {
            Ok(payload) => payload,
            Err(error) => {
                tracing::warn!("failed to serialize session for cache: {}", error);
                return;
            }
        };

        let mut connection = match self.connection.get_async_connection().await {
            Ok(connection) => connection,
            Err(error) => {
                tracing::warn!("failed to reach Redis for cache set: {}", error);
                return;
            }
        };

        let result: Result<(), redis::RedisError> = connection
            .set_ex(&key, payload, time_to_live.as_secs())
            .await;
        if let Err(error) = result {
            tracing::warn!("cache set for '{}' failed: {}", key, error);
        }
    }

    async fn invalidate(&self, identifier: &CombatId) {
        let key = self.session_key(identifier);

        let mut connection = match self.connection.get_async_connection().await {
            Ok(connection) => connection,
            Err(error) => {
                tracing::warn!("failed to reach Redis for cache invalidate: {}", error);
                return;
            }
        };

        let result: Result<(), redis::RedisError> = connection.del(&key).await;
        if let Err(error) = result {
            tracing::warn!("cache invalidate for '{}' failed: {}", key, error);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
