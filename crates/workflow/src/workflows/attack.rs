//! Attack turn workflow.
//!
//! One tap, one turn: classify the tap against the accuracy-adjusted weapon
//! bands, compute damage and counterattack, apply the turn to the session,
//! and append the log event. The compare-and-set update serializes turns on
//! a session; the write that lands first is authoritative.

use skirmish_domain::combat::{
    CombatantStats, HitZone, TapPosition, resolve_attack, resolve_zone,
};
use skirmish_domain::session::{CombatId, CombatLogEvent, CombatSession};

use super::lookup::fetch_session;
use crate::errors::WorkflowError;
use crate::ports::{
    Clock, CombatLogStore, ContentCatalog, RandomGenerator, SessionCache, SessionRepository,
    WorkflowResult,
};

// =============================================================================
// Command / Report
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackCommand {
    pub combat_id: CombatId,
    pub tap_position: f64,
}

impl AttackCommand {
    #[must_use]
    pub const fn new(combat_id: CombatId, tap_position: f64) -> Self {
        Self {
            combat_id,
            tap_position,
        }
    }
}

/// What one attack turn produced, for the caller's response.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackReport {
    pub zone: HitZone,
    pub damage_dealt: u32,
    pub damage_taken: u32,
    pub session: CombatSession,
}

// =============================================================================
// Attack Workflow
// =============================================================================

/// Resolves one attack turn on an ongoing session.
///
/// An expired or missing session reads as absent; a closed session is a
/// conflict. Each applied turn refreshes the session's TTL clock.
pub async fn attack<Repository, Log, Catalog, Cache, Random, Clk>(
    repository: &Repository,
    log_store: &Log,
    catalog: &Catalog,
    cache: &Cache,
    random: &Random,
    clock: &Clk,
    command: AttackCommand,
) -> WorkflowResult<AttackReport>
where
    Repository: SessionRepository,
    Log: CombatLogStore,
    Catalog: ContentCatalog,
    Cache: SessionCache,
    Random: RandomGenerator,
    Clk: Clock,
{
    let now = clock.now();

    // Validate the tap before touching any state.
    let tap = TapPosition::new(command.tap_position)?;

    let session = fetch_session(repository, cache, &command.combat_id, now).await?;
    if session.is_terminal() {
        return Err(WorkflowError::conflict(
            "combat session is already closed",
        ));
    }

    // Resolve the tap: bands -> zone -> damage.
    let profile = catalog.player_profile(session.user_id()).await?;
    let bands_config = catalog.weapon_bands(session.user_id()).await?;
    let enemy = catalog.enemy_type(session.enemy_type()).await?;
    let scaled = enemy.scaled_for(session.combat_level());

    let bands = bands_config.adjust(profile.accuracy());
    let zone = resolve_zone(&bands, tap);

    let seed = random.generate_seed().await;
    let (crit_roll, _) = random.next_roll(&seed);

    let resolution = resolve_attack(
        zone,
        CombatantStats::new(profile.attack(), profile.defense()),
        CombatantStats::new(scaled.attack(), scaled.defense()),
        crit_roll,
    );

    // Apply the turn; the conditional update rejects a stale session value.
    let expected_sequence = session.event_sequence();
    let updated = session.apply_attack(&resolution, now)?;
    repository.update(&updated, expected_sequence).await?;

    let event = CombatLogEvent::attack_resolved(
        *updated.id(),
        updated.event_sequence(),
        now,
        zone,
        resolution.damage_to_enemy(),
        resolution.damage_to_player(),
    )?;
    log_store.append(&event).await?;

    cache.set(&updated, CombatSession::time_to_live()).await;

    tracing::debug!(
        combat_id = %updated.id(),
        turn = updated.turn_number(),
        zone = %zone,
        damage_dealt = resolution.damage_to_enemy(),
        damage_taken = resolution.damage_to_player(),
        "attack resolved"
    );

    Ok(AttackReport {
        zone,
        damage_dealt: resolution.damage_to_enemy(),
        damage_taken: resolution.damage_to_player(),
        session: updated,
    })
}

// =============================================================================
// Tests
// =============================================================================
