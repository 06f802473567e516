//! Spawn and loot pool aggregation.
//!
//! Pools are weighted candidate sets scoped by a location/combat-level
//! filter. A location can be covered by several pools at once: a universal
//! pool (no location filter) contributes alongside an exact location match,
//! and a candidate present in more than one matching pool has its weights
//! summed, not overwritten.

pub mod errors;

pub use errors::PoolError;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{CombatLevel, LocationId, ValidationError};
use crate::enemy::EnemyTypeId;
use crate::loot::{LootCandidate, LootKind, LootableId};

// =============================================================================
// PoolId
// =============================================================================

/// Identifier of a spawn or loot pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolId(Uuid);

impl PoolId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Result<Self, ValidationError> {
        if uuid.is_nil() {
            return Err(ValidationError::empty_value("pool_id"));
        }
        Ok(Self(uuid))
    }

    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PoolId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0.hyphenated())
    }
}

impl FromStr for PoolId {
    type Err = ValidationError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::parse_str(string)
            .map_err(|_| ValidationError::invalid_format("pool_id", "valid UUID format"))?;
        Self::from_uuid(uuid)
    }
}

// =============================================================================
// PoolFilter
// =============================================================================

/// Scope of a pool: which location and combat-level range it serves.
///
/// A `None` location makes the pool universal; it matches every location and
/// contributes in addition to any location-specific pool, never instead of
/// one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolFilter {
    location: Option<LocationId>,
    min_level: u32,
    max_level: u32,
}

impl PoolFilter {
    pub fn new(
        location: Option<LocationId>,
        min_level: u32,
        max_level: u32,
    ) -> Result<Self, ValidationError> {
        if min_level > max_level {
            return Err(ValidationError::constraint_violation(
                "min_level",
                "must not exceed max_level",
            ));
        }
        Ok(Self {
            location,
            min_level,
            max_level,
        })
    }

    /// A filter matching every location and level.
    #[must_use]
    pub const fn universal() -> Self {
        Self {
            location: None,
            min_level: 0,
            max_level: u32::MAX,
        }
    }

    #[must_use]
    pub const fn location(&self) -> Option<&LocationId> {
        self.location.as_ref()
    }

    #[must_use]
    pub const fn min_level(&self) -> u32 {
        self.min_level
    }

    #[must_use]
    pub const fn max_level(&self) -> u32 {
        self.max_level
    }

    /// Returns true when the pool serves the given location and level.
    #[must_use]
    pub fn matches(&self, location: &LocationId, level: CombatLevel) -> bool {
        let location_matches = match &self.location {
            Some(scoped) => scoped == location,
            None => true,
        };
        location_matches && (self.min_level..=self.max_level).contains(&level.value())
    }
}

// =============================================================================
// Spawn pools
// =============================================================================

/// One enemy candidate inside a spawn pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolMember {
    enemy_type: EnemyTypeId,
    spawn_weight: f64,
}

impl PoolMember {
    pub fn new(enemy_type: EnemyTypeId, spawn_weight: f64) -> Result<Self, ValidationError> {
        if !spawn_weight.is_finite() || spawn_weight < 0.0 {
            return Err(ValidationError::constraint_violation(
                "spawn_weight",
                "must be a non-negative finite number",
            ));
        }
        Ok(Self {
            enemy_type,
            spawn_weight,
        })
    }

    #[must_use]
    pub const fn enemy_type(&self) -> &EnemyTypeId {
        &self.enemy_type
    }

    #[must_use]
    pub const fn spawn_weight(&self) -> f64 {
        self.spawn_weight
    }
}

/// A weighted set of spawnable enemy types for a location/level scope.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnPool {
    id: PoolId,
    filter: PoolFilter,
    members: Vec<PoolMember>,
}

impl SpawnPool {
    #[must_use]
    pub const fn new(id: PoolId, filter: PoolFilter, members: Vec<PoolMember>) -> Self {
        Self {
            id,
            filter,
            members,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &PoolId {
        &self.id
    }

    #[must_use]
    pub const fn filter(&self) -> &PoolFilter {
        &self.filter
    }

    #[must_use]
    pub fn members(&self) -> &[PoolMember] {
        &self.members
    }
}

/// Merges every spawn pool matching the location and level into one weighted
/// candidate set.
///
/// Candidates appearing in several matching pools have their weights summed.
/// First-appearance order is preserved so a seeded draw over the result is
/// deterministic.
///
/// # Errors
///
/// [`PoolError::NoMatchingPool`] when no pool covers the location and level.
pub fn aggregate_spawn_pools(
    pools: &[SpawnPool],
    location: &LocationId,
    level: CombatLevel,
) -> Result<Vec<(EnemyTypeId, f64)>, PoolError> {
    let matching: Vec<&SpawnPool> = pools
        .iter()
        .filter(|pool| pool.filter().matches(location, level))
        .collect();

    if matching.is_empty() {
        return Err(PoolError::no_matching_pool(*location, level.value()));
    }

    let mut merged: Vec<(EnemyTypeId, f64)> = Vec::new();
    for pool in matching {
        for member in pool.members() {
            match merged
                .iter_mut()
                .find(|(id, _)| id == member.enemy_type())
            {
                Some((_, weight)) => *weight += member.spawn_weight(),
                None => merged.push((*member.enemy_type(), member.spawn_weight())),
            }
        }
    }

    Ok(merged)
}

// =============================================================================
// Loot pools
// =============================================================================

/// One lootable candidate inside a loot pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LootPoolEntry {
    lootable: LootableId,
    kind: LootKind,
    drop_weight: f64,
}

impl LootPoolEntry {
    pub fn new(
        lootable: LootableId,
        kind: LootKind,
        drop_weight: f64,
    ) -> Result<Self, ValidationError> {
        if !drop_weight.is_finite() || drop_weight < 0.0 {
            return Err(ValidationError::constraint_violation(
                "drop_weight",
                "must be a non-negative finite number",
            ));
        }
        Ok(Self {
            lootable,
            kind,
            drop_weight,
        })
    }

    #[must_use]
    pub const fn lootable(&self) -> &LootableId {
        &self.lootable
    }

    #[must_use]
    pub const fn kind(&self) -> LootKind {
        self.kind
    }

    #[must_use]
    pub const fn drop_weight(&self) -> f64 {
        self.drop_weight
    }
}

/// A weighted set of lootables for a location/level scope.
#[derive(Debug, Clone, PartialEq)]
pub struct LootPool {
    id: PoolId,
    filter: PoolFilter,
    entries: Vec<LootPoolEntry>,
}

impl LootPool {
    #[must_use]
    pub const fn new(id: PoolId, filter: PoolFilter, entries: Vec<LootPoolEntry>) -> Self {
        Self {
            id,
            filter,
            entries,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &PoolId {
        &self.id
    }

    #[must_use]
    pub const fn filter(&self) -> &PoolFilter {
        &self.filter
    }

    #[must_use]
    pub fn entries(&self) -> &[LootPoolEntry] {
        &self.entries
    }
}

/// Merges every loot pool matching the location and level into one candidate
/// list, summing weights for duplicate (lootable, kind) pairs.
///
/// Unlike enemy spawning, an empty result is not an error: a location without
/// loot simply drops nothing.
#[must_use]
pub fn aggregate_loot_pools(
    pools: &[LootPool],
    location: &LocationId,
    level: CombatLevel,
) -> Vec<LootCandidate> {
    let mut merged: Vec<LootCandidate> = Vec::new();

    for pool in pools {
        if !pool.filter().matches(location, level) {
            continue;
        }
        for entry in pool.entries() {
            match merged.iter().position(|candidate| {
                candidate.lootable() == entry.lootable() && candidate.kind() == entry.kind()
            }) {
                Some(index) => {
                    let existing = merged[index];
                    merged[index] = LootCandidate::new(
                        *existing.lootable(),
                        existing.kind(),
                        existing.weight() + entry.drop_weight(),
                    );
                }
                None => merged.push(LootCandidate::new(
                    *entry.lootable(),
                    entry.kind(),
                    entry.drop_weight(),
                )),
            }
        }
    }

    merged
}

// =============================================================================
// Tests
// =============================================================================
