//! MySQL-backed content catalog.
//!
//! Read-only views over the content tables: player profiles, weapon band
//! configs, enemy types, spawn/loot pools, and tier weights. Missing or
//! malformed content surfaces as a configuration error; the combat core
//! never invents defaults for it.

use async_trait::async_trait;
use sqlx::Row;
use sqlx::mysql::MySqlRow;
use uuid::Uuid;

use skirmish_domain::combat::WeaponBandConfig;
use skirmish_domain::common::{Accuracy, Attack, Defense, Health, LocationId, UserId};
use skirmish_domain::enemy::{EnemyName, EnemyTier, EnemyType, EnemyTypeId, StyleId};
use skirmish_domain::loot::{LootKind, LootableId, TierWeight};
use skirmish_domain::player::PlayerCombatProfile;
use skirmish_domain::pools::{
    LootPool, LootPoolEntry, PoolFilter, PoolId, PoolMember, SpawnPool,
};
use skirmish_workflow::WorkflowError;
use skirmish_workflow::ports::{ContentCatalog, WorkflowResult};

use super::MySqlPool;

// =============================================================================
// MySqlContentCatalog
// =============================================================================

#[derive(Clone)]
pub struct MySqlContentCatalog {
    pool: MySqlPool,
}

impl MySqlContentCatalog {
    #[must_use]
    pub const fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentCatalog for MySqlContentCatalog {
    async fn player_profile(&self, user_id: &UserId) -> WorkflowResult<PlayerCombatProfile> {
        let row = sqlx::query(
            r#"
            SELECT attack, defense, hp, accuracy
            FROM player_combat_profiles
            WHERE user_id = ?
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(self.pool.as_inner())
        .await
        .map_err(|error| WorkflowError::repository("player_profile", error.to_string()))?
        .ok_or_else(|| {
            WorkflowError::configuration(format!("user {} has no combat profile", user_id))
        })?;

        let attack: u32 = get(&row, "attack")?;
        let defense: u32 = get(&row, "defense")?;
        let hp: u32 = get(&row, "hp")?;
        let accuracy: f64 = get(&row, "accuracy")?;

        Ok(PlayerCombatProfile::new(
            Attack::new(attack),
            Defense::new(defense),
            Health::new(hp).map_err(configuration_error)?,
            Accuracy::new(accuracy).map_err(configuration_error)?,
        ))
    }

    async fn weapon_bands(&self, user_id: &UserId) -> WorkflowResult<WeaponBandConfig> {
        let row = sqlx::query(
            r#"
            SELECT deg_injure, deg_miss, deg_graze, deg_normal, deg_crit
            FROM weapon_band_configs
            WHERE user_id = ?
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(self.pool.as_inner())
        .await
        .map_err(|error| WorkflowError::repository("weapon_bands", error.to_string()))?
        .ok_or_else(|| {
            WorkflowError::configuration(format!(
                "user {} has no equipped weapon band config",
                user_id
            ))
        })?;

        let config = WeaponBandConfig::new(
            get(&row, "deg_injure")?,
            get(&row, "deg_miss")?,
            get(&row, "deg_graze")?,
            get(&row, "deg_normal")?,
            get(&row, "deg_crit")?,
        )?;

        Ok(config)
    }

    async fn enemy_type(&self, identifier: &EnemyTypeId) -> WorkflowResult<EnemyType> {
        let row = sqlx::query(
            r#"
            SELECT enemy_type_id, name, base_attack, base_defense, base_hp, tier, style
            FROM enemy_types
            WHERE enemy_type_id = ?
            "#,
        )
        .bind(identifier.as_uuid())
        .fetch_optional(self.pool.as_inner())
        .await
        .map_err(|error| WorkflowError::repository("enemy_type", error.to_string()))?
        .ok_or_else(|| {
            WorkflowError::configuration(format!("unknown enemy type {}", identifier))
        })?;

        map_enemy_type_row(&row)
    }

    async fn spawn_pools(&self, location_id: &LocationId) -> WorkflowResult<Vec<SpawnPool>> {
        let rows = sqlx::query(
            r#"
            SELECT p.pool_id, p.location_id, p.min_level, p.max_level,
                   m.enemy_type_id, m.spawn_weight
            FROM spawn_pools p
            JOIN spawn_pool_members m ON m.pool_id = p.pool_id
            WHERE p.location_id IS NULL OR p.location_id = ?
            ORDER BY p.pool_id
            "#,
        )
        .bind(location_id.as_uuid())
        .fetch_all(self.pool.as_inner())
        .await
        .map_err(|error| WorkflowError::repository("spawn_pools", error.to_string()))?;

        let mut pools: Vec<SpawnPool> = Vec::new();
        for row in &rows {
            let (pool_id, filter) = map_pool_scope(row)?;
            let member = PoolMember::new(
                EnemyTypeId::from_uuid(get(row, "enemy_type_id")?)
                    .map_err(configuration_error)?,
                get(row, "spawn_weight")?,
            )
            .map_err(configuration_error)?;

            match pools.iter_mut().find(|pool| pool.id() == &pool_id) {
                Some(pool) => {
                    let mut members = pool.members().to_vec();
                    members.push(member);
                    *pool = SpawnPool::new(pool_id, *pool.filter(), members);
                }
                None => pools.push(SpawnPool::new(pool_id, filter, vec![member])),
            }
        }

        Ok(pools)
    }

    async fn loot_pools(&self, location_id: &LocationId) -> WorkflowResult<Vec<LootPool>> {
        let rows = sqlx::query(
            r#"
            SELECT p.pool_id, p.location_id, p.min_level, p.max_level,
                   e.lootable_id, e.kind, e.drop_weight
            FROM loot_pools p
            JOIN loot_pool_entries e ON e.pool_id = p.pool_id
            WHERE p.location_id IS NULL OR p.location_id = ?
            ORDER BY p.pool_id
            "#,
        )
        .bind(location_id.as_uuid())
        .fetch_all(self.pool.as_inner())
        .await
        .map_err(|error| WorkflowError::repository("loot_pools", error.to_string()))?;

        let mut pools: Vec<LootPool> = Vec::new();
        for row in &rows {
            let (pool_id, filter) = map_pool_scope(row)?;
            let kind: String = get(row, "kind")?;
            let entry = LootPoolEntry::new(
                LootableId::from_uuid(get(row, "lootable_id")?).map_err(configuration_error)?,
                map_loot_kind(&kind)?,
                get(row, "drop_weight")?,
            )
            .map_err(configuration_error)?;

            match pools.iter_mut().find(|pool| pool.id() == &pool_id) {
                Some(pool) => {
                    let mut entries = pool.entries().to_vec();
                    entries.push(entry);
                    *pool = LootPool::new(pool_id, *pool.filter(), entries);
                }
                None => pools.push(LootPool::new(pool_id, filter, vec![entry])),
            }
        }

        Ok(pools)
    }

    async fn tier_weights(&self) -> WorkflowResult<Vec<TierWeight>> {
        let rows = sqlx::query("SELECT tier, multiplier FROM tier_weights")
            .fetch_all(self.pool.as_inner())
            .await
            .map_err(|error| WorkflowError::repository("tier_weights", error.to_string()))?;

        rows.iter()
            .map(|row| {
                let tier: String = get(row, "tier")?;
                let multiplier: f64 = get(row, "multiplier")?;
                Ok(TierWeight::new(
                    tier.parse::<EnemyTier>().map_err(configuration_error)?,
                    multiplier,
                ))
            })
            .collect()
    }
}

// =============================================================================
// Row Mapping
// =============================================================================

fn map_enemy_type_row(row: &MySqlRow) -> WorkflowResult<EnemyType> {
    let identifier: Uuid = get(row, "enemy_type_id")?;
    let name: String = get(row, "name")?;
    let base_attack: u32 = get(row, "base_attack")?;
    let base_defense: u32 = get(row, "base_defense")?;
    let base_hp: u32 = get(row, "base_hp")?;
    let tier: String = get(row, "tier")?;
    let style: String = get(row, "style")?;

    Ok(EnemyType::new(
        EnemyTypeId::from_uuid(identifier).map_err(configuration_error)?,
        EnemyName::new(name).map_err(configuration_error)?,
        Attack::new(base_attack),
        Defense::new(base_defense),
        Health::new(base_hp).map_err(configuration_error)?,
        tier.parse::<EnemyTier>().map_err(configuration_error)?,
        StyleId::new(style).map_err(configuration_error)?,
    ))
}

fn map_pool_scope(row: &MySqlRow) -> WorkflowResult<(PoolId, PoolFilter)> {
    let pool_id: Uuid = get(row, "pool_id")?;
    let location: Option<Uuid> = get(row, "location_id")?;
    let min_level: u32 = get(row, "min_level")?;
    let max_level: u32 = get(row, "max_level")?;

    let location = location
        .map(LocationId::from_uuid)
        .transpose()
        .map_err(configuration_error)?;

    Ok((
        PoolId::from_uuid(pool_id).map_err(configuration_error)?,
        PoolFilter::new(location, min_level, max_level).map_err(configuration_error)?,
    ))
}

fn map_loot_kind(kind: &str) -> WorkflowResult<LootKind> {
    match kind {
        "material" => Ok(LootKind::Material),
        "item" => Ok(LootKind::Item),
        other => Err(WorkflowError::configuration(format!(
            "unknown loot kind '{}'",
            other
        ))),
    }
}

fn get<'r, T>(row: &'r MySqlRow, column: &str) -> WorkflowResult<T>
where
    T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
{
    row.try_get(column)
        .map_err(|error| WorkflowError::repository("decode", error.to_string()))
}

fn configuration_error(error: impl std::fmt::Display) -> WorkflowError {
    WorkflowError::configuration(error.to_string())
}
