//! Port traits the workflows depend on.
//!
//! Production adapters live in the infrastructure crate; tests use the
//! in-memory implementations from the crate's testing module. Every port is
//! `Clone + Send + Sync + 'static` so workflows can run on any executor
//! without borrowing problems.

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

// =============================================================================
// Type Aliases for Workflow Results
// =============================================================================

pub type WorkflowResult<T> = Result<T, crate::errors::WorkflowError>;

// =============================================================================
// SessionRepository
// =============================================================================

/// Durable storage of combat sessions.
///
/// The store must back [`SessionRepository::insert`] with a uniqueness
/// constraint on "ongoing session per user" so a creation race fails one of
/// the two writers, and [`SessionRepository::update`] with a compare-and-set
/// on the expected event sequence so concurrent turns on one session are
/// serialized.
#[async_trait]
pub trait SessionRepository: Clone + Send + Sync + 'static {
    /// Inserts a fresh session.
    ///
    /// Returns [`WorkflowError::ActiveSessionExists`] when the user already
    /// holds an ongoing row, including the loser of a concurrent create.
    ///
    /// [`WorkflowError::ActiveSessionExists`]: crate::errors::WorkflowError::ActiveSessionExists
    async fn insert(&self, session: &CombatSession) -> WorkflowResult<()>;

    async fn find(&self, identifier: &CombatId) -> WorkflowResult<Option<CombatSession>>;

    /// Finds the user's ongoing session, expired or not.
    async fn find_active(&self, user_id: &UserId) -> WorkflowResult<Option<CombatSession>>;

    /// Writes a mutated session, conditional on the stored row still being
    /// at `expected_sequence`. A lost race surfaces as a conflict.
    async fn update(
        &self,
        session: &CombatSession,
        expected_sequence: u64,
    ) -> WorkflowResult<()>;

    /// Lists sessions the sweep should close: ongoing rows inactive past the
    /// cutoff, plus terminal rows whose side effects were never finalized.
    async fn list_stale(&self, cutoff: DateTime<Utc>) -> WorkflowResult<Vec<CombatSession>>;
}

// =============================================================================
// CombatLogStore
// =============================================================================

/// Append-only combat log.
#[async_trait]
pub trait CombatLogStore: Clone + Send + Sync + 'static {
    /// Appends one event. A duplicate (combat, sequence) pair is a conflict;
    /// the store never reorders or overwrites.
    async fn append(&self, event: &CombatLogEvent) -> WorkflowResult<()>;

    /// Loads a session's events ordered by sequence.
    async fn load(&self, combat_id: &CombatId) -> WorkflowResult<Vec<CombatLogEvent>>;
}

// =============================================================================
// HistoryRepository
// =============================================================================

/// Durable per-player streak history.
#[async_trait]
pub trait HistoryRepository: Clone + Send + Sync + 'static {
    async fn find(
        &self,
        user_id: &UserId,
        location_id: &LocationId,
    ) -> WorkflowResult<Option<PlayerCombatHistory>>;

    async fn save(&self, history: &PlayerCombatHistory) -> WorkflowResult<()>;
}

// =============================================================================
// ContentCatalog
// =============================================================================

/// Read-only access to the game content this core consumes: player stats,
/// weapon geometry, enemy types, pools, and tier weights.
#[async_trait]
pub trait ContentCatalog: Clone + Send + Sync + 'static {
    async fn player_profile(&self, user_id: &UserId) -> WorkflowResult<PlayerCombatProfile>;

    /// Band config of the user's equipped weapon.
    async fn weapon_bands(&self, user_id: &UserId) -> WorkflowResult<WeaponBandConfig>;

    async fn enemy_type(&self, identifier: &EnemyTypeId) -> WorkflowResult<EnemyType>;

    async fn spawn_pools(&self, location_id: &LocationId) -> WorkflowResult<Vec<SpawnPool>>;

    async fn loot_pools(&self, location_id: &LocationId) -> WorkflowResult<Vec<LootPool>>;

    async fn tier_weights(&self) -> WorkflowResult<Vec<TierWeight>>;
}

// =============================================================================
// SessionCache
// =============================================================================

/// Read-through session cache with TTL semantics.
///
/// The cache is an optimization only: correctness never depends on it, so
/// its operations are infallible and adapters swallow (and log) transport
/// errors.
#[async_trait]
pub trait SessionCache: Clone + Send + Sync + 'static {
    async fn get(&self, identifier: &CombatId) -> Option<CombatSession>;

    async fn set(&self, session: &CombatSession, time_to_live: Duration);

    async fn invalidate(&self, identifier: &CombatId);
}

// =============================================================================
// RandomGenerator
// =============================================================================

/// Source of seeds and the deterministic roll sequence derived from them.
#[async_trait]
pub trait RandomGenerator: Clone + Send + Sync + 'static {
    async fn generate_seed(&self) -> RandomSeed;

    /// Steps the deterministic sequence: same seed, same roll.
    fn next_roll(&self, seed: &RandomSeed) -> (Roll, RandomSeed);
}

// =============================================================================
// Clock
// =============================================================================

/// Source of the current time, injectable so TTL logic is testable.
pub trait Clock: Clone + Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}
