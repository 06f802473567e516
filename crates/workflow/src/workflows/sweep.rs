//! Batch expiry sweep.
//!
//! The lazy read-time expiry keeps dead sessions invisible; this sweep is
//! the eventual cleanup that closes them as abandoned so they stop holding
//! the per-user uniqueness slot. It also finalizes terminal sessions whose
//! owner never called complete, so their history is not lost.
//!
//! The sweep is unordered and idempotent. It may race a last-second attack;
//! the attack's conditional write is authoritative and simply knocks the
//! session out of the sweep's batch.

use chrono::Duration;

use skirmish_domain::session::{CombatOutcome, CombatSession};

use super::finalize::finalize_session;
use crate::ports::{
    Clock, CombatLogStore, HistoryRepository, SessionCache, SessionRepository, WorkflowResult,
};

// =============================================================================
// Sweep Workflow
// =============================================================================

/// Closes every stale session and returns how many were swept.
///
/// Sessions that lose their conditional update (because an attack or a
/// completion landed mid-sweep) are skipped, not failed: the next sweep pass
/// picks up whatever is still stale.
pub async fn sweep_expired<Repository, Log, History, Cache, Clk>(
    repository: &Repository,
    log_store: &Log,
    history_repository: &History,
    cache: &Cache,
    clock: &Clk,
) -> WorkflowResult<usize>
where
    Repository: SessionRepository,
    Log: CombatLogStore,
    History: HistoryRepository,
    Cache: SessionCache,
    Clk: Clock,
{
    let now = clock.now();
    let cutoff = now - Duration::seconds(CombatSession::TIME_TO_LIVE_SECONDS);

    let stale = repository.list_stale(cutoff).await?;
    let mut swept = 0;

    for session in stale {
        let combat_id = *session.id();
        let result = finalize_session(
            repository,
            log_store,
            history_repository,
            cache,
            session,
            CombatOutcome::Abandoned,
            now,
        )
        .await;

        match result {
            Ok(_) => swept += 1,
            Err(error) if error.is_conflict() => {
                tracing::debug!(
                    combat_id = %combat_id,
                    "session moved during sweep; skipping"
                );
            }
            Err(error) => return Err(error),
        }
    }

    if swept > 0 {
        tracing::info!(swept, "expiry sweep closed stale sessions");
    }

    Ok(swept)
}

// =============================================================================
// Tests
// =============================================================================
