//! Combat provider: the workflows bound to a concrete set of ports.

use std::sync::Arc;

use async_trait::async_trait;

use skirmish_domain::common::{LocationId, UserId};
use skirmish_domain::history::PlayerCombatHistory;
use skirmish_domain::session::{CombatId, CombatSession};
use skirmish_workflow::ports::{
    Clock, CombatLogStore, ContentCatalog, HistoryRepository, RandomGenerator, SessionCache,
    SessionRepository, WorkflowResult,
};
use skirmish_workflow::{
    AttackCommand, AttackReport, CompleteCommand, CompletionReport, StartCombatCommand, attack,
    complete, fetch_history, fetch_session, start_combat, sweep_expired,
};

// =============================================================================
// CombatService
// =============================================================================

/// The combat operations exposed to the API layer.
///
/// Object-safe so the HTTP surface can hold one `Arc<dyn CombatService>`
/// regardless of which adapters back it.
#[async_trait]
pub trait CombatService: Send + Sync {
    async fn start(&self, command: StartCombatCommand) -> WorkflowResult<CombatSession>;

    async fn attack(&self, command: AttackCommand) -> WorkflowResult<AttackReport>;

    async fn complete(&self, command: CompleteCommand) -> WorkflowResult<CompletionReport>;

    async fn session(&self, combat_id: CombatId) -> WorkflowResult<CombatSession>;

    async fn history(
        &self,
        user_id: UserId,
        location_id: LocationId,
    ) -> WorkflowResult<PlayerCombatHistory>;

    async fn sweep(&self) -> WorkflowResult<usize>;
}

// =============================================================================
// CombatProvider
// =============================================================================

/// Binds the workflow functions to one set of port implementations.
pub struct CombatProvider<Repository, Log, History, Catalog, Cache, Random, Clk>
where
    Repository: SessionRepository,
    Log: CombatLogStore,
    History: HistoryRepository,
    Catalog: ContentCatalog,
    Cache: SessionCache,
    Random: RandomGenerator,
    Clk: Clock,
{
    repository: Arc<Repository>,
    log_store: Arc<Log>,
    history_repository: Arc<History>,
    catalog: Arc<Catalog>,
    cache: Arc<Cache>,
    random: Arc<Random>,
    clock: Arc<Clk>,
}

impl<Repository, Log, History, Catalog, Cache, Random, Clk> Clone
    for CombatProvider<Repository, Log, History, Catalog, Cache, Random, Clk>
where
    Repository: SessionRepository,
    Log: CombatLogStore,
    History: HistoryRepository,
    Catalog: ContentCatalog,
    Cache: SessionCache,
    Random: RandomGenerator,
    Clk: Clock,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            log_store: Arc::clone(&self.log_store),
            history_repository: Arc::clone(&self.history_repository),
            catalog: Arc::clone(&self.catalog),
            cache: Arc::clone(&self.cache),
            random: Arc::clone(&self.random),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<Repository, Log, History, Catalog, Cache, Random, Clk>
    CombatProvider<Repository, Log, History, Catalog, Cache, Random, Clk>
where
    Repository: SessionRepository,
    Log: CombatLogStore,
    History: HistoryRepository,
    Catalog: ContentCatalog,
    Cache: SessionCache,
    Random: RandomGenerator,
    Clk: Clock,
{
    pub fn new(
        repository: Repository,
        log_store: Log,
        history_repository: History,
        catalog: Catalog,
        cache: Cache,
        random: Random,
        clock: Clk,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            log_store: Arc::new(log_store),
            history_repository: Arc::new(history_repository),
            catalog: Arc::new(catalog),
            cache: Arc::new(cache),
            random: Arc::new(random),
            clock: Arc::new(clock),
        }
    }
}

#[async_trait]
impl<Repository, Log, History, Catalog, Cache, Random, Clk> CombatService
    for CombatProvider<Repository, Log, History, Catalog, Cache, Random, Clk>
where
    Repository: SessionRepository,
    Log: CombatLogStore,
    History: HistoryRepository,
    Catalog: ContentCatalog,
    Cache: SessionCache,
    Random: RandomGenerator,
    Clk: Clock,
{
    async fn start(&self, command: StartCombatCommand) -> WorkflowResult<CombatSession> {
        start_combat(
            &*self.repository,
            &*self.log_store,
            &*self.history_repository,
            &*self.catalog,
            &*self.cache,
            &*self.random,
            &*self.clock,
            command,
        )
        .await
    }

    async fn attack(&self, command: AttackCommand) -> WorkflowResult<AttackReport> {
        attack(
            &*self.repository,
            &*self.log_store,
            &*self.catalog,
            &*self.cache,
            &*self.random,
            &*self.clock,
            command,
        )
        .await
    }

    async fn complete(&self, command: CompleteCommand) -> WorkflowResult<CompletionReport> {
        complete(
            &*self.repository,
            &*self.log_store,
            &*self.history_repository,
            &*self.catalog,
            &*self.cache,
            &*self.random,
            &*self.clock,
            command,
        )
        .await
    }

    async fn session(&self, combat_id: CombatId) -> WorkflowResult<CombatSession> {
        fetch_session(
            &*self.repository,
            &*self.cache,
            &combat_id,
            self.clock.now(),
        )
        .await
    }

    async fn history(
        &self,
        user_id: UserId,
        location_id: LocationId,
    ) -> WorkflowResult<PlayerCombatHistory> {
        fetch_history(&*self.history_repository, &user_id, &location_id).await
    }

    async fn sweep(&self) -> WorkflowResult<usize> {
        sweep_expired(
            &*self.repository,
            &*self.log_store,
            &*self.history_repository,
            &*self.cache,
            &*self.clock,
        )
        .await
    }
}

// =============================================================================
// Tests
// =============================================================================
