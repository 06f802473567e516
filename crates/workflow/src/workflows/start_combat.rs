//! Session creation workflow.
//!
//! Enforces the one-active-session invariant, draws the opponent from the
//! location's aggregated spawn pools, scales its stats by the requested
//! combat level, and persists the fresh session.

use skirmish_domain::common::{CombatLevel, LocationId, UserId};
use skirmish_domain::pools::aggregate_spawn_pools;
use skirmish_domain::selection::draw_weighted;
use skirmish_domain::session::{CombatId, CombatLogEvent, CombatOutcome, CombatSession};

use super::finalize::finalize_session;
use crate::errors::WorkflowError;
use crate::ports::{
    Clock, CombatLogStore, ContentCatalog, HistoryRepository, RandomGenerator, SessionCache,
    SessionRepository, WorkflowResult,
};

// =============================================================================
// Command
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartCombatCommand {
    pub user_id: UserId,
    pub location_id: LocationId,
    pub combat_level: CombatLevel,
}

impl StartCombatCommand {
    #[must_use]
    pub const fn new(user_id: UserId, location_id: LocationId, combat_level: CombatLevel) -> Self {
        Self {
            user_id,
            location_id,
            combat_level,
        }
    }
}

// =============================================================================
// StartCombat Workflow
// =============================================================================

/// Creates a fresh combat session for the user.
///
/// A live ongoing session rejects the request; an ongoing session that
/// outlived its TTL is closed as abandoned on the spot (history recorded)
/// before the new one is created. The storage-level uniqueness constraint
/// backs the check: the loser of a concurrent create fails with
/// [`WorkflowError::ActiveSessionExists`] even when both passed the read.
#[allow(clippy::too_many_arguments)]
pub async fn start_combat<Repository, Log, History, Catalog, Cache, Random, Clk>(
    repository: &Repository,
    log_store: &Log,
    history_repository: &History,
    catalog: &Catalog,
    cache: &Cache,
    random: &Random,
    clock: &Clk,
    command: StartCombatCommand,
) -> WorkflowResult<CombatSession>
where
    Repository: SessionRepository,
    Log: CombatLogStore,
    History: HistoryRepository,
    Catalog: ContentCatalog,
    Cache: SessionCache,
    Random: RandomGenerator,
    Clk: Clock,
{
    let now = clock.now();

    // Step 1: uniqueness check, with lazy expiry of a stale holder.
    if let Some(active) = repository.find_active(&command.user_id).await? {
        if active.is_expired(now) {
            tracing::info!(
                combat_id = %active.id(),
                user_id = %command.user_id,
                "closing expired session during create"
            );
            finalize_session(
                repository,
                log_store,
                history_repository,
                cache,
                active,
                CombatOutcome::Abandoned,
                now,
            )
            .await?;
        } else {
            return Err(WorkflowError::active_session_exists(
                command.user_id.to_string(),
            ));
        }
    }

    // Step 2: aggregate the matching spawn pools and draw the opponent.
    let pools = catalog.spawn_pools(&command.location_id).await?;
    let candidates =
        aggregate_spawn_pools(&pools, &command.location_id, command.combat_level)?;

    let seed = random.generate_seed().await;
    let (roll, _) = random.next_roll(&seed);
    let enemy_type_id = *draw_weighted(&candidates, roll)?;

    // Step 3: scale the opponent and open the session.
    let enemy = catalog.enemy_type(&enemy_type_id).await?;
    let profile = catalog.player_profile(&command.user_id).await?;
    let scaled = enemy.scaled_for(command.combat_level);

    let session = CombatSession::open(
        CombatId::new(),
        command.user_id,
        command.location_id,
        enemy_type_id,
        command.combat_level,
        profile.hp(),
        scaled.hp(),
        now,
    )
    .record_event();

    // Step 4: conditional insert; the unique index decides creation races.
    repository.insert(&session).await?;

    let opened = CombatLogEvent::session_started(
        *session.id(),
        session.event_sequence(),
        now,
        enemy_type_id,
        command.combat_level.value(),
    )?;
    log_store.append(&opened).await?;

    cache.set(&session, CombatSession::time_to_live()).await;

    tracing::info!(
        combat_id = %session.id(),
        user_id = %command.user_id,
        enemy_type = %enemy_type_id,
        "combat session started"
    );

    Ok(session)
}

// =============================================================================
// Tests
// =============================================================================
