//! In-memory port implementations shared by the workflow tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use skirmish_domain::combat::WeaponBandConfig;
use skirmish_domain::common::{LocationId, RandomSeed, Roll, UserId};
use skirmish_domain::enemy::{EnemyType, EnemyTypeId};
use skirmish_domain::history::PlayerCombatHistory;
use skirmish_domain::loot::TierWeight;
use skirmish_domain::player::PlayerCombatProfile;
use skirmish_domain::pools::{LootPool, SpawnPool};
use skirmish_domain::session::{CombatId, CombatLogEvent, CombatSession};

use crate::errors::WorkflowError;
use crate::ports::{
    Clock, CombatLogStore, ContentCatalog, HistoryRepository, RandomGenerator, SessionCache,
    SessionRepository, WorkflowResult,
};

// =============================================================================
// InMemorySessionRepository
// =============================================================================

#[derive(Clone, Default)]
pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<HashMap<CombatId, CombatSession>>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.read().unwrap().len()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn insert(&self, session: &CombatSession) -> WorkflowResult<()> {
        let mut sessions = self.sessions.write().unwrap();
        // Mirrors the storage-level unique index: any ongoing row for the
        // user blocks the insert, expired or not.
        let blocked = sessions
            .values()
            .any(|existing| existing.user_id() == session.user_id() && existing.is_ongoing());
        if blocked {
            return Err(WorkflowError::active_session_exists(
                session.user_id().to_string(),
            ));
        }
        sessions.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn find(&self, identifier: &CombatId) -> WorkflowResult<Option<CombatSession>> {
        Ok(self.sessions.read().unwrap().get(identifier).cloned())
    }

    async fn find_active(&self, user_id: &UserId) -> WorkflowResult<Option<CombatSession>> {
        Ok(self
            .sessions
            .read()
            .unwrap()
            .values()
            .find(|session| session.user_id() == user_id && session.is_ongoing())
            .cloned())
    }

    async fn update(
        &self,
        session: &CombatSession,
        expected_sequence: u64,
    ) -> WorkflowResult<()> {
        let mut sessions = self.sessions.write().unwrap();
        let Some(stored) = sessions.get(session.id()) else {
            return Err(WorkflowError::not_found(
                "CombatSession",
                session.id().to_string(),
            ));
        };
        if stored.event_sequence() != expected_sequence {
            return Err(WorkflowError::conflict(format!(
                "session moved past sequence {}",
                expected_sequence
            )));
        }
        sessions.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn list_stale(&self, cutoff: DateTime<Utc>) -> WorkflowResult<Vec<CombatSession>> {
        Ok(self
            .sessions
            .read()
            .unwrap()
            .values()
            .filter(|session| {
                session.updated_at() < cutoff
                    && (session.is_ongoing() || !session.is_finalized())
            })
            .cloned()
            .collect())
    }
}

// =============================================================================
// InMemoryCombatLogStore
// =============================================================================

#[derive(Clone, Default)]
pub struct InMemoryCombatLogStore {
    events: Arc<RwLock<HashMap<CombatId, Vec<CombatLogEvent>>>>,
}

impl InMemoryCombatLogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CombatLogStore for InMemoryCombatLogStore {
    async fn append(&self, event: &CombatLogEvent) -> WorkflowResult<()> {
        let mut events = self.events.write().unwrap();
        let log = events.entry(*event.combat_id()).or_default();
        if log.iter().any(|existing| existing.sequence() == event.sequence()) {
            return Err(WorkflowError::conflict(format!(
                "duplicate combat log sequence {}",
                event.sequence()
            )));
        }
        log.push(event.clone());
        Ok(())
    }

    async fn load(&self, combat_id: &CombatId) -> WorkflowResult<Vec<CombatLogEvent>> {
        let mut log = self
            .events
            .read()
            .unwrap()
            .get(combat_id)
            .cloned()
            .unwrap_or_default();
        log.sort_by_key(CombatLogEvent::sequence);
        Ok(log)
    }
}

// =============================================================================
// InMemoryHistoryRepository
// =============================================================================

#[derive(Clone, Default)]
pub struct InMemoryHistoryRepository {
    records: Arc<RwLock<HashMap<(UserId, LocationId), PlayerCombatHistory>>>,
}

impl InMemoryHistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryRepository {
    async fn find(
        &self,
        user_id: &UserId,
        location_id: &LocationId,
    ) -> WorkflowResult<Option<PlayerCombatHistory>> {
        Ok(self
            .records
            .read()
            .unwrap()
            .get(&(*user_id, *location_id))
            .cloned())
    }

    async fn save(&self, history: &PlayerCombatHistory) -> WorkflowResult<()> {
        self.records.write().unwrap().insert(
            (*history.user_id(), *history.location_id()),
            history.clone(),
        );
        Ok(())
    }
}

// =============================================================================
// StubCatalog
// =============================================================================

#[derive(Clone)]
pub struct StubCatalog {
    profile: PlayerCombatProfile,
    bands: WeaponBandConfig,
    enemy_types: Arc<HashMap<EnemyTypeId, EnemyType>>,
    spawn_pools: Arc<Vec<SpawnPool>>,
    loot_pools: Arc<Vec<LootPool>>,
    tier_weights: Arc<Vec<TierWeight>>,
}

impl StubCatalog {
    pub fn new(
        profile: PlayerCombatProfile,
        bands: WeaponBandConfig,
        enemy_types: Vec<EnemyType>,
        spawn_pools: Vec<SpawnPool>,
        loot_pools: Vec<LootPool>,
        tier_weights: Vec<TierWeight>,
    ) -> Self {
        Self {
            profile,
            bands,
            enemy_types: Arc::new(
                enemy_types
                    .into_iter()
                    .map(|enemy| (*enemy.id(), enemy))
                    .collect(),
            ),
            spawn_pools: Arc::new(spawn_pools),
            loot_pools: Arc::new(loot_pools),
            tier_weights: Arc::new(tier_weights),
        }
    }
}

#[async_trait]
impl ContentCatalog for StubCatalog {
    async fn player_profile(&self, _user_id: &UserId) -> WorkflowResult<PlayerCombatProfile> {
        Ok(self.profile)
    }

    async fn weapon_bands(&self, _user_id: &UserId) -> WorkflowResult<WeaponBandConfig> {
        Ok(self.bands)
    }

    async fn enemy_type(&self, identifier: &EnemyTypeId) -> WorkflowResult<EnemyType> {
        self.enemy_types.get(identifier).cloned().ok_or_else(|| {
            WorkflowError::configuration(format!("unknown enemy type {}", identifier))
        })
    }

    async fn spawn_pools(&self, _location_id: &LocationId) -> WorkflowResult<Vec<SpawnPool>> {
        Ok(self.spawn_pools.as_ref().clone())
    }

    async fn loot_pools(&self, _location_id: &LocationId) -> WorkflowResult<Vec<LootPool>> {
        Ok(self.loot_pools.as_ref().clone())
    }

    async fn tier_weights(&self) -> WorkflowResult<Vec<TierWeight>> {
        Ok(self.tier_weights.as_ref().clone())
    }
}

// =============================================================================
// InMemorySessionCache
// =============================================================================

#[derive(Clone, Default)]
pub struct InMemorySessionCache {
    entries: Arc<RwLock<HashMap<CombatId, CombatSession>>>,
}

impl InMemorySessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, identifier: &CombatId) -> bool {
        self.entries.read().unwrap().contains_key(identifier)
    }
}

#[async_trait]
impl SessionCache for InMemorySessionCache {
    async fn get(&self, identifier: &CombatId) -> Option<CombatSession> {
        self.entries.read().unwrap().get(identifier).cloned()
    }

    async fn set(&self, session: &CombatSession, _time_to_live: Duration) {
        self.entries
            .write()
            .unwrap()
            .insert(*session.id(), session.clone());
    }

    async fn invalidate(&self, identifier: &CombatId) {
        self.entries.write().unwrap().remove(identifier);
    }
}

// =============================================================================
// ScriptedRandomGenerator
// =============================================================================

/// Pops rolls from a script, falling back to a fixed value when exhausted.
#[derive(Clone)]
pub struct ScriptedRandomGenerator {
    rolls: Arc<Mutex<VecDeque<f64>>>,
    fallback: f64,
    seed_counter: Arc<AtomicU64>,
}

impl ScriptedRandomGenerator {
    pub fn with_rolls(rolls: impl IntoIterator<Item = f64>) -> Self {
        Self {
            rolls: Arc::new(Mutex::new(rolls.into_iter().collect())),
            fallback: 0.0,
            seed_counter: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn constant(roll: f64) -> Self {
        Self::with_rolls(std::iter::empty()).with_fallback(roll)
    }

    fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }
}

#[async_trait]
impl RandomGenerator for ScriptedRandomGenerator {
    async fn generate_seed(&self) -> RandomSeed {
        RandomSeed::new(self.seed_counter.fetch_add(1, Ordering::SeqCst))
    }

    fn next_roll(&self, seed: &RandomSeed) -> (Roll, RandomSeed) {
        let value = self
            .rolls
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.fallback);
        (
            Roll::new(value).unwrap(),
            RandomSeed::new(seed.value().wrapping_add(1)),
        )
    }
}

// =============================================================================
// FixedClock
// =============================================================================

#[derive(Clone)]
pub struct FixedClock {
    now: Arc<RwLock<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn at_epoch_seconds(seconds: i64) -> Self {
        Self {
            now: Arc::new(RwLock::new(
                DateTime::from_timestamp(seconds, 0).unwrap(),
            )),
        }
    }

    pub fn advance_seconds(&self, seconds: i64) {
        let mut now = self.now.write().unwrap();
        *now += chrono::Duration::seconds(seconds);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().unwrap()
    }
}
