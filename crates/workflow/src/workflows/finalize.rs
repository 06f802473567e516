//! Shared terminal-transition step.
//!
//! Completion, lazy expiry, and the batch sweep all funnel through this one
//! helper so the exactly-once history guarantee has a single enforcement
//! point: the compare-and-set update wins or the whole finalization loses.

use chrono::{DateTime, Utc};

use skirmish_domain::history::PlayerCombatHistory;
use skirmish_domain::session::{CombatLogEvent, CombatOutcome, CombatSession};

use crate::errors::WorkflowError;
use crate::ports::{
    CombatLogStore, HistoryRepository, SessionCache, SessionRepository, WorkflowResult,
};

/// Closes (if still ongoing) and finalizes a session, then applies the
/// terminal side effects: history update, closing log event, cache
/// invalidation.
///
/// The session row is claimed first via the compare-and-set update; a racing
/// finalizer loses with a conflict before any side effect runs, which is what
/// keeps the history applied exactly once per terminal session.
pub(crate) async fn finalize_session<Repository, Log, History, Cache>(
    repository: &Repository,
    log_store: &Log,
    history_repository: &History,
    cache: &Cache,
    session: CombatSession,
    outcome_if_ongoing: CombatOutcome,
    now: DateTime<Utc>,
) -> WorkflowResult<CombatSession>
where
    Repository: SessionRepository,
    Log: CombatLogStore,
    History: HistoryRepository,
    Cache: SessionCache,
{
    let expected_sequence = session.event_sequence();

    let closed = if session.is_ongoing() {
        session.close(outcome_if_ongoing, now)?
    } else {
        session
    };

    let Some(outcome) = closed.outcome() else {
        return Err(WorkflowError::conflict(
            "cannot finalize a session without a terminal outcome",
        ));
    };

    let finalized = closed.finalize()?.record_event();
    repository.update(&finalized, expected_sequence).await?;

    let history = history_repository
        .find(finalized.user_id(), finalized.location_id())
        .await?
        .unwrap_or_else(|| {
            PlayerCombatHistory::new(*finalized.user_id(), *finalized.location_id())
        });
    history_repository.save(&history.record(outcome, now)).await?;

    let event = CombatLogEvent::session_closed(
        *finalized.id(),
        finalized.event_sequence(),
        now,
        outcome,
    )?;
    log_store.append(&event).await?;

    cache.invalidate(finalized.id()).await;

    Ok(finalized)
}
