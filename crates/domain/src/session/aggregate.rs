//! CombatSession aggregate root.
//!
//! A session tracks one player/enemy encounter from creation to its terminal
//! outcome. All operations are pure: each returns a new session value, and
//! the storage layer decides whether the transition wins the write.
//!
//! # Invariants
//!
//! - `turn_number` and `event_sequence` only ever advance
//! - once `outcome` is set it is never overwritten
//! - `finalized` is set at most once, and only on a closed session

use chrono::{DateTime, Duration, Utc};

use crate::combat::AttackResolution;
use crate::common::{CombatLevel, Health, LocationId, UserId};
use crate::enemy::EnemyTypeId;

use super::errors::SessionError;
use super::identifier::CombatId;
use super::status::CombatOutcome;

// =============================================================================
// CombatSession
// =============================================================================

/// One combat encounter owned by a single player.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use skirmish_domain::common::{CombatLevel, Health, LocationId, UserId};
/// use skirmish_domain::enemy::EnemyTypeId;
/// use skirmish_domain::session::{CombatId, CombatSession};
///
/// let session = CombatSession::open(
///     CombatId::new(),
///     UserId::new(),
///     LocationId::new(),
///     EnemyTypeId::new(),
///     CombatLevel::new(2).unwrap(),
///     Health::new(100).unwrap(),
///     Health::new(60).unwrap(),
///     Utc::now(),
/// );
///
/// assert!(session.is_ongoing());
/// assert_eq!(session.turn_number(), 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CombatSession {
    id: CombatId,
    user_id: UserId,
    location_id: LocationId,
    enemy_type: EnemyTypeId,
    combat_level: CombatLevel,
    player_hp: Health,
    enemy_hp: Health,
    turn_number: u32,
    outcome: Option<CombatOutcome>,
    finalized: bool,
    event_sequence: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CombatSession {
    /// Inactivity window after which a session reads as absent.
    pub const TIME_TO_LIVE_SECONDS: i64 = 900;

    /// The TTL as a std duration, for cache expiry settings.
    #[must_use]
    pub const fn time_to_live() -> std::time::Duration {
        std::time::Duration::from_secs(Self::TIME_TO_LIVE_SECONDS as u64)
    }

    // =========================================================================
    // Constructors
    // =========================================================================

    /// Opens a fresh session at turn 0 with no events recorded yet.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn open(
        id: CombatId,
        user_id: UserId,
        location_id: LocationId,
        enemy_type: EnemyTypeId,
        combat_level: CombatLevel,
        player_hp: Health,
        enemy_hp: Health,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            location_id,
            enemy_type,
            combat_level,
            player_hp,
            enemy_hp,
            turn_number: 0,
            outcome: None,
            finalized: false,
            event_sequence: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rehydrates a session from persistence. No invariants are re-derived;
    /// the stored values are trusted.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: CombatId,
        user_id: UserId,
        location_id: LocationId,
        enemy_type: EnemyTypeId,
        combat_level: CombatLevel,
        player_hp: Health,
        enemy_hp: Health,
        turn_number: u32,
        outcome: Option<CombatOutcome>,
        finalized: bool,
        event_sequence: u64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            location_id,
            enemy_type,
            combat_level,
            player_hp,
            enemy_hp,
            turn_number,
            outcome,
            finalized,
            event_sequence,
            created_at,
            updated_at,
        }
    }

    // =========================================================================
    // Getters
    // =========================================================================

    #[must_use]
    pub const fn id(&self) -> &CombatId {
        &self.id
    }

    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub const fn location_id(&self) -> &LocationId {
        &self.location_id
    }

    #[must_use]
    pub const fn enemy_type(&self) -> &EnemyTypeId {
        &self.enemy_type
    }

    #[must_use]
    pub const fn combat_level(&self) -> CombatLevel {
        self.combat_level
    }

    #[must_use]
    pub const fn player_hp(&self) -> Health {
        self.player_hp
    }

    #[must_use]
    pub const fn enemy_hp(&self) -> Health {
        self.enemy_hp
    }

    #[must_use]
    pub const fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub const fn outcome(&self) -> Option<CombatOutcome> {
        self.outcome
    }

    #[must_use]
    pub const fn is_finalized(&self) -> bool {
        self.finalized
    }

    #[must_use]
    pub const fn event_sequence(&self) -> u64 {
        self.event_sequence
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[must_use]
    pub const fn is_ongoing(&self) -> bool {
        self.outcome.is_none()
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Returns true once the session has been inactive past the TTL.
    ///
    /// An expired ongoing session reads as absent; the batch sweep later
    /// closes it as abandoned so it stops holding the per-user uniqueness
    /// slot.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.updated_at) > Duration::seconds(Self::TIME_TO_LIVE_SECONDS)
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Applies one resolved tap: adjusts both HP totals, advances the turn
    /// and event sequence, and refreshes the TTL clock. Derives the terminal
    /// transition when either side drops to zero; when both do on the same
    /// turn, the player's blow landed first and the session is a victory.
    ///
    /// # Errors
    ///
    /// [`SessionError::AlreadyClosed`] when the session is terminal.
    pub fn apply_attack(
        self,
        resolution: &AttackResolution,
        now: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if let Some(outcome) = self.outcome {
            return Err(SessionError::already_closed(outcome));
        }

        let enemy_hp = self.enemy_hp.saturating_sub(resolution.damage_to_enemy());
        let player_hp = self.player_hp.saturating_sub(resolution.damage_to_player());

        let outcome = if enemy_hp.is_zero() {
            Some(CombatOutcome::Victory)
        } else if player_hp.is_zero() {
            Some(CombatOutcome::Defeat)
        } else {
            None
        };

        Ok(Self {
            player_hp,
            enemy_hp,
            turn_number: self.turn_number + 1,
            outcome,
            event_sequence: self.event_sequence.saturating_add(1),
            updated_at: now,
            ..self
        })
    }

    /// Closes an ongoing session with the given outcome.
    ///
    /// # Errors
    ///
    /// [`SessionError::AlreadyClosed`] when an outcome is already recorded.
    pub fn close(self, outcome: CombatOutcome, now: DateTime<Utc>) -> Result<Self, SessionError> {
        if let Some(existing) = self.outcome {
            return Err(SessionError::already_closed(existing));
        }

        Ok(Self {
            outcome: Some(outcome),
            updated_at: now,
            ..self
        })
    }

    /// Marks the terminal side effects (loot, history) as applied.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotClosed`] when the session has no outcome yet.
    pub fn finalize(self) -> Result<Self, SessionError> {
        if self.outcome.is_none() {
            return Err(SessionError::NotClosed);
        }

        Ok(Self {
            finalized: true,
            ..self
        })
    }

    /// Advances the event sequence by one.
    #[must_use]
    pub fn record_event(self) -> Self {
        Self {
            event_sequence: self.event_sequence.saturating_add(1),
            ..self
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{CombatantStats, HitZone, resolve_attack};
    use crate::common::{Attack, Defense, Roll};
    use rstest::{fixture, rstest};

    fn at(seconds: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + seconds, 0).unwrap()
    }

    #[fixture]
    fn session() -> CombatSession {
        CombatSession::open(
            CombatId::new(),
            UserId::new(),
            LocationId::new(),
            EnemyTypeId::new(),
            CombatLevel::new(1).unwrap(),
            Health::new(100).unwrap(),
            Health::new(50).unwrap(),
            at(0),
        )
    }

    fn resolution(damage_to_enemy: u32, damage_to_player: u32) -> AttackResolution {
        // Build a resolution through the public damage function with stats
        // chosen to produce the exact numbers.
        resolve_attack(
            HitZone::Normal,
            CombatantStats::new(Attack::new(damage_to_enemy), Defense::new(0)),
            CombatantStats::new(Attack::new(damage_to_player), Defense::new(0)),
            Roll::zero(),
        )
    }

    mod opening {
        use super::*;

        #[rstest]
        fn open_starts_ongoing_at_turn_zero(session: CombatSession) {
            assert!(session.is_ongoing());
            assert!(!session.is_terminal());
            assert!(!session.is_finalized());
            assert_eq!(session.turn_number(), 0);
            assert_eq!(session.event_sequence(), 0);
        }
    }

    mod attacks {
        use super::*;

        #[rstest]
        fn apply_attack_updates_hp_turn_and_sequence(session: CombatSession) {
            let updated = session.apply_attack(&resolution(12, 5), at(10)).unwrap();

            assert_eq!(updated.enemy_hp().value(), 38);
            assert_eq!(updated.player_hp().value(), 95);
            assert_eq!(updated.turn_number(), 1);
            assert_eq!(updated.event_sequence(), 1);
            assert!(updated.is_ongoing());
        }

        #[rstest]
        fn apply_attack_refreshes_the_ttl_clock(session: CombatSession) {
            let updated = session.apply_attack(&resolution(1, 1), at(800)).unwrap();
            assert_eq!(updated.updated_at(), at(800));
            assert!(!updated.is_expired(at(1_600)));
        }

        #[rstest]
        fn enemy_reaching_zero_is_victory(session: CombatSession) {
            let updated = session.apply_attack(&resolution(50, 1), at(10)).unwrap();
            assert_eq!(updated.outcome(), Some(CombatOutcome::Victory));
        }

        #[rstest]
        fn player_reaching_zero_is_defeat(session: CombatSession) {
            let updated = session.apply_attack(&resolution(1, 100), at(10)).unwrap();
            assert_eq!(updated.outcome(), Some(CombatOutcome::Defeat));
        }

        #[rstest]
        fn simultaneous_zero_resolves_as_victory(session: CombatSession) {
            let updated = session.apply_attack(&resolution(50, 100), at(10)).unwrap();
            assert_eq!(updated.outcome(), Some(CombatOutcome::Victory));
        }

        #[rstest]
        fn attacks_on_a_closed_session_are_rejected(session: CombatSession) {
            let closed = session.close(CombatOutcome::Escape, at(5)).unwrap();
            let result = closed.apply_attack(&resolution(1, 1), at(10));
            assert_eq!(
                result.unwrap_err(),
                SessionError::already_closed(CombatOutcome::Escape)
            );
        }
    }

    mod closing {
        use super::*;

        #[rstest]
        fn close_records_the_outcome_once(session: CombatSession) {
            let closed = session.close(CombatOutcome::Escape, at(5)).unwrap();
            assert_eq!(closed.outcome(), Some(CombatOutcome::Escape));

            let again = closed.close(CombatOutcome::Victory, at(6));
            assert_eq!(
                again.unwrap_err(),
                SessionError::already_closed(CombatOutcome::Escape)
            );
        }

        #[rstest]
        fn finalize_requires_a_terminal_outcome(session: CombatSession) {
            assert_eq!(session.clone().finalize().unwrap_err(), SessionError::NotClosed);

            let closed = session.close(CombatOutcome::Victory, at(5)).unwrap();
            let finalized = closed.finalize().unwrap();
            assert!(finalized.is_finalized());
        }
    }

    mod expiry {
        use super::*;

        #[rstest]
        fn fresh_session_is_not_expired(session: CombatSession) {
            assert!(!session.is_expired(at(0)));
            assert!(!session.is_expired(at(899)));
        }

        #[rstest]
        fn session_at_the_ttl_boundary_is_still_alive(session: CombatSession) {
            assert!(!session.is_expired(at(900)));
        }

        #[rstest]
        fn session_past_the_ttl_is_expired(session: CombatSession) {
            assert!(session.is_expired(at(901)));
        }
    }

    mod event_sequence {
        use super::*;

        #[rstest]
        fn record_event_advances_the_sequence(session: CombatSession) {
            let updated = session.record_event().record_event();
            assert_eq!(updated.event_sequence(), 2);
        }
    }
}
