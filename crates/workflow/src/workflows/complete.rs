//! Session completion workflow.
//!
//! Completion is the idempotent edge of the state machine: it closes an
//! ongoing session as an escape, finalizes the terminal side effects exactly
//! once, and safely absorbs client retries by replaying the stored outcome
//! with no further effects.

use skirmish_domain::common::Roll;
use skirmish_domain::loot::{LootDrop, generate_loot};
use skirmish_domain::pools::aggregate_loot_pools;
use skirmish_domain::session::{CombatId, CombatOutcome, CombatSession};

use super::finalize::finalize_session;
use crate::errors::WorkflowError;
use crate::ports::{
    Clock, CombatLogStore, ContentCatalog, HistoryRepository, RandomGenerator, SessionCache,
    SessionRepository, WorkflowResult,
};

/// Independent loot draws granted per victory.
const LOOT_DRAWS_PER_VICTORY: usize = 3;

// =============================================================================
// Command / Report
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompleteCommand {
    pub combat_id: CombatId,
}

impl CompleteCommand {
    #[must_use]
    pub const fn new(combat_id: CombatId) -> Self {
        Self { combat_id }
    }
}

/// Terminal outcome plus the loot granted on the first finalization of a
/// victory. Replayed completions carry no loot.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionReport {
    pub outcome: CombatOutcome,
    pub loot: Option<Vec<LootDrop>>,
}

// =============================================================================
// Complete Workflow
// =============================================================================

/// Completes a session.
///
/// - Already finalized: a no-op returning the stored outcome.
/// - Terminal but not finalized (the attack that ended the fight): finalizes,
///   drawing loot on victory and recording history.
/// - Still ongoing: closes as [`CombatOutcome::Escape`], records history.
///
/// History is applied exactly once across any number of calls: finalization
/// claims the session row first via the conditional update, and replays take
/// the no-op path.
pub async fn complete<Repository, Log, History, Catalog, Cache, Random, Clk>(
    repository: &Repository,
    log_store: &Log,
    history_repository: &History,
    catalog: &Catalog,
    cache: &Cache,
    random: &Random,
    clock: &Clk,
    command: CompleteCommand,
) -> WorkflowResult<CompletionReport>
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

    // Finalization must see the durable truth, not a cached copy.
    let session = repository
        .find(&command.combat_id)
        .await?
        .ok_or_else(|| {
            WorkflowError::not_found("CombatSession", command.combat_id.to_string())
        })?;

    if session.is_finalized() {
        let Some(outcome) = session.outcome() else {
            return Err(WorkflowError::conflict(
                "finalized session has no recorded outcome",
            ));
        };
        return Ok(CompletionReport {
            outcome,
            loot: None,
        });
    }

    // An ongoing session past its TTL reads as absent; the sweep owns it.
    if session.is_ongoing() && session.is_expired(now) {
        return Err(WorkflowError::not_found(
            "CombatSession",
            command.combat_id.to_string(),
        ));
    }

    let finalized = finalize_session(
        repository,
        log_store,
        history_repository,
        cache,
        session,
        CombatOutcome::Escape,
        now,
    )
    .await?;

    let Some(outcome) = finalized.outcome() else {
        return Err(WorkflowError::conflict(
            "finalized session has no recorded outcome",
        ));
    };

    let loot = if outcome.is_victory() {
        Some(draw_victory_loot(catalog, random, &finalized).await?)
    } else {
        None
    };

    tracing::info!(
        combat_id = %finalized.id(),
        outcome = %outcome,
        "combat session completed"
    );

    Ok(CompletionReport { outcome, loot })
}

/// Draws the victory loot for a finalized session.
async fn draw_victory_loot<Catalog, Random>(
    catalog: &Catalog,
    random: &Random,
    session: &CombatSession,
) -> WorkflowResult<Vec<LootDrop>>
where
    Catalog: ContentCatalog,
    Random: RandomGenerator,
{
    let pools = catalog.loot_pools(session.location_id()).await?;
    let candidates =
        aggregate_loot_pools(&pools, session.location_id(), session.combat_level());
    let tier_weights = catalog.tier_weights().await?;
    let enemy = catalog.enemy_type(session.enemy_type()).await?;

    let mut seed = random.generate_seed().await;
    let mut rolls: Vec<Roll> = Vec::with_capacity(LOOT_DRAWS_PER_VICTORY);
    for _ in 0..LOOT_DRAWS_PER_VICTORY {
        let (roll, next_seed) = random.next_roll(&seed);
        rolls.push(roll);
        seed = next_seed;
    }

    Ok(generate_loot(
        &candidates,
        &tier_weights,
        enemy.tier(),
        enemy.style(),
        &rolls,
    ))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        FixedClock, InMemoryCombatLogStore, InMemoryHistoryRepository, InMemorySessionCache,
        InMemorySessionRepository, ScriptedRandomGenerator, StubCatalog,
    };
    use crate::workflows::attack::{AttackCommand, attack};
    use crate::workflows::start_combat::{StartCombatCommand, start_combat};
    use rstest::rstest;
    use skirmish_domain::combat::WeaponBandConfig;
    use skirmish_domain::common::{
        Accuracy, Attack, CombatLevel, Defense, Health, LocationId, UserId,
    };
    use skirmish_domain::enemy::{EnemyName, EnemyTier, EnemyType, EnemyTypeId, StyleId};
    use skirmish_domain::loot::{LootKind, LootableId, TierWeight};
    use skirmish_domain::player::PlayerCombatProfile;
    use skirmish_domain::pools::{LootPool, LootPoolEntry, PoolFilter, PoolId, PoolMember, SpawnPool};

    struct Harness {
        repository: InMemorySessionRepository,
        log_store: InMemoryCombatLogStore,
        history: InMemoryHistoryRepository,
        catalog: StubCatalog,
        cache: InMemorySessionCache,
        random: ScriptedRandomGenerator,
        clock: FixedClock,
        user_id: UserId,
        location_id: LocationId,
        material: LootableId,
    }

    impl Harness {
        fn new(enemy_hp: u32) -> Self {
            let enemy = EnemyType::new(
                EnemyTypeId::new(),
                EnemyName::new("Ember Drake").unwrap(),
                Attack::new(12),
                Defense::new(5),
                Health::new(enemy_hp).unwrap(),
                EnemyTier::Elite,
                StyleId::new("ember").unwrap(),
            );
            let spawn_pool = SpawnPool::new(
                PoolId::new(),
                PoolFilter::universal(),
                vec![PoolMember::new(*enemy.id(), 10.0).unwrap()],
            );

            let material = LootableId::new();
            let loot_pool = LootPool::new(
                PoolId::new(),
                PoolFilter::universal(),
                vec![LootPoolEntry::new(material, LootKind::Material, 10.0).unwrap()],
            );

            Self {
                repository: InMemorySessionRepository::new(),
                log_store: InMemoryCombatLogStore::new(),
                history: InMemoryHistoryRepository::new(),
                catalog: StubCatalog::new(
                    PlayerCombatProfile::new(
                        Attack::new(30),
                        Defense::new(10),
                        Health::new(100).unwrap(),
                        Accuracy::zero(),
                    ),
                    WeaponBandConfig::new(5.0, 45.0, 60.0, 200.0, 50.0).unwrap(),
                    vec![enemy],
                    vec![spawn_pool],
                    vec![loot_pool],
                    vec![TierWeight::new(EnemyTier::Elite, 2.0)],
                ),
                cache: InMemorySessionCache::new(),
                random: ScriptedRandomGenerator::constant(0.0),
                clock: FixedClock::at_epoch_seconds(1_700_000_000),
                user_id: UserId::new(),
                location_id: LocationId::new(),
                material,
            }
        }

        async fn started_session(&self) -> skirmish_domain::session::CombatSession {
            start_combat(
                &self.repository,
                &self.log_store,
                &self.history,
                &self.catalog,
                &self.cache,
                &self.random,
                &self.clock,
                StartCombatCommand::new(
                    self.user_id,
                    self.location_id,
                    CombatLevel::new(1).unwrap(),
                ),
            )
            .await
            .unwrap()
        }

        async fn win(&self) -> CombatId {
            // Enemy HP is low enough for one normal hit to end it.
            let session = self.started_session().await;
            let report = attack(
                &self.repository,
                &self.log_store,
                &self.catalog,
                &self.cache,
                &self.random,
                &self.clock,
                AttackCommand::new(*session.id(), 0.5),
            )
            .await
            .unwrap();
            assert_eq!(report.session.outcome(), Some(CombatOutcome::Victory));
            *session.id()
        }

        async fn complete(&self, combat_id: CombatId) -> WorkflowResult<CompletionReport> {
            complete(
                &self.repository,
                &self.log_store,
                &self.history,
                &self.catalog,
                &self.cache,
                &self.random,
                &self.clock,
                CompleteCommand::new(combat_id),
            )
            .await
        }

        async fn history_record(&self) -> Option<skirmish_domain::history::PlayerCombatHistory> {
            self.history
                .find(&self.user_id, &self.location_id)
                .await
                .unwrap()
        }
    }

    #[rstest]
    #[tokio::test]
    async fn victory_completion_grants_styled_loot() {
        let harness = Harness::new(20);
        let combat_id = harness.win().await;

        let report = harness.complete(combat_id).await.unwrap();

        assert_eq!(report.outcome, CombatOutcome::Victory);
        let loot = report.loot.unwrap();
        assert_eq!(loot.len(), 1);
        assert_eq!(loot[0].lootable(), &harness.material);
        assert_eq!(loot[0].quantity(), 3);
        assert_eq!(loot[0].style().unwrap().as_str(), "ember");
    }

    #[rstest]
    #[tokio::test]
    async fn victory_updates_history_and_streak() {
        let harness = Harness::new(20);
        let combat_id = harness.win().await;
        harness.complete(combat_id).await.unwrap();

        let history = harness.history_record().await.unwrap();
        assert_eq!(history.total_attempts(), 1);
        assert_eq!(history.victories(), 1);
        assert_eq!(history.current_streak(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn completing_an_ongoing_session_is_an_escape() {
        let harness = Harness::new(10_000);
        let session = harness.started_session().await;

        let report = harness.complete(*session.id()).await.unwrap();

        assert_eq!(report.outcome, CombatOutcome::Escape);
        assert!(report.loot.is_none());

        let history = harness.history_record().await.unwrap();
        assert_eq!(history.total_attempts(), 1);
        assert_eq!(history.victories(), 0);
        assert_eq!(history.defeats(), 0);
        assert_eq!(history.current_streak(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn completion_is_idempotent() {
        let harness = Harness::new(20);
        let combat_id = harness.win().await;

        let first = harness.complete(combat_id).await.unwrap();
        let second = harness.complete(combat_id).await.unwrap();
        let third = harness.complete(combat_id).await.unwrap();

        assert_eq!(first.outcome, CombatOutcome::Victory);
        assert!(first.loot.is_some());

        // Replays return the stored outcome and never re-grant loot.
        assert_eq!(second.outcome, CombatOutcome::Victory);
        assert!(second.loot.is_none());
        assert_eq!(third.outcome, CombatOutcome::Victory);
        assert!(third.loot.is_none());

        // History counted the session exactly once.
        let history = harness.history_record().await.unwrap();
        assert_eq!(history.total_attempts(), 1);
        assert_eq!(history.victories(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn completion_appends_the_closing_event() {
        let harness = Harness::new(20);
        let combat_id = harness.win().await;
        harness.complete(combat_id).await.unwrap();

        let log = harness.log_store.load(&combat_id).await.unwrap();
        let closing = log.last().unwrap();
        assert_eq!(closing.kind().name(), "session_closed");
        assert_eq!(closing.sequence(), log.len() as u64);
    }

    #[rstest]
    #[tokio::test]
    async fn completing_an_expired_ongoing_session_is_not_found() {
        let harness = Harness::new(10_000);
        let session = harness.started_session().await;

        harness.clock.advance_seconds(901);
        let result = harness.complete(*session.id()).await;
        assert!(matches!(result, Err(ref error) if error.is_not_found()));
    }

    #[rstest]
    #[tokio::test]
    async fn completing_an_unknown_session_is_not_found() {
        let harness = Harness::new(20);
        let result = harness.complete(CombatId::new()).await;
        assert!(matches!(result, Err(ref error) if error.is_not_found()));
    }

    #[rstest]
    #[tokio::test]
    async fn completion_invalidates_the_cache() {
        let harness = Harness::new(20);
        let combat_id = harness.win().await;
        assert!(harness.cache.contains(&combat_id));

        harness.complete(combat_id).await.unwrap();
        assert!(!harness.cache.contains(&combat_id));
    }
}
