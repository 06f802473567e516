//! Read-side helpers: session and history lookups with the lazy-expiry rule.

use chrono::{DateTime, Utc};

use skirmish_domain::common::{LocationId, UserId};
use skirmish_domain::history::PlayerCombatHistory;
use skirmish_domain::session::{CombatId, CombatSession};

use crate::errors::WorkflowError;
use crate::ports::{HistoryRepository, SessionCache, SessionRepository, WorkflowResult};

/// Loads a session, cache first, applying the lazy-expiry rule: an ongoing
/// session inactive past its TTL reads as absent even though the row still
/// exists. Terminal sessions stay readable so clients can collect results.
pub async fn fetch_session<Repository, Cache>(
    repository: &Repository,
    cache: &Cache,
    combat_id: &CombatId,
    now: DateTime<Utc>,
) -> WorkflowResult<CombatSession>
where
    Repository: SessionRepository,
    Cache: SessionCache,
{
    let session = match cache.get(combat_id).await {
        Some(cached) => cached,
        None => repository
            .find(combat_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("CombatSession", combat_id.to_string()))?,
    };

    if session.is_ongoing() && session.is_expired(now) {
        return Err(WorkflowError::not_found(
            "CombatSession",
            combat_id.to_string(),
        ));
    }

    Ok(session)
}

/// Loads a player's history at a location, defaulting to an empty record for
/// players who have never fought there.
pub async fn fetch_history<History>(
    history_repository: &History,
    user_id: &UserId,
    location_id: &LocationId,
) -> WorkflowResult<PlayerCombatHistory>
where
    History: HistoryRepository,
{
    Ok(history_repository
        .find(user_id, location_id)
        .await?
        .unwrap_or_else(|| PlayerCombatHistory::new(*user_id, *location_id)))
}

// =============================================================================
// Tests
// =============================================================================
