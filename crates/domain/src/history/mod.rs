//! Durable per-player streak history.
//!
//! One record exists per (user, location) pair and is updated exactly once
//! per terminal session. The workflow layer's idempotent completion is what
//! protects the exactly-once guarantee; this aggregate only encodes the
//! counting rules.

use chrono::{DateTime, Utc};

use crate::common::{LocationId, UserId};
use crate::session::CombatOutcome;

// =============================================================================
// PlayerCombatHistory
// =============================================================================

/// Attempt and streak tallies for one player at one location.
///
/// Escapes and abandonments break the streak like defeats do, but are not
/// counted in `defeats`: they remain visible as the gap between
/// `total_attempts` and `victories + defeats`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCombatHistory {
    user_id: UserId,
    location_id: LocationId,
    total_attempts: u64,
    victories: u64,
    defeats: u64,
    current_streak: u32,
    longest_streak: u32,
    last_attempt: Option<DateTime<Utc>>,
}

impl PlayerCombatHistory {
    /// A fresh record with every tally at zero.
    #[must_use]
    pub const fn new(user_id: UserId, location_id: LocationId) -> Self {
        Self {
            user_id,
            location_id,
            total_attempts: 0,
            victories: 0,
            defeats: 0,
            current_streak: 0,
            longest_streak: 0,
            last_attempt: None,
        }
    }

    /// Rehydrates a record from persistence.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn restore(
        user_id: UserId,
        location_id: LocationId,
        total_attempts: u64,
        victories: u64,
        defeats: u64,
        current_streak: u32,
        longest_streak: u32,
        last_attempt: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            user_id,
            location_id,
            total_attempts,
            victories,
            defeats,
            current_streak,
            longest_streak,
            last_attempt,
        }
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
    pub const fn total_attempts(&self) -> u64 {
        self.total_attempts
    }

    #[must_use]
    pub const fn victories(&self) -> u64 {
        self.victories
    }

    #[must_use]
    pub const fn defeats(&self) -> u64 {
        self.defeats
    }

    #[must_use]
    pub const fn current_streak(&self) -> u32 {
        self.current_streak
    }

    #[must_use]
    pub const fn longest_streak(&self) -> u32 {
        self.longest_streak
    }

    #[must_use]
    pub const fn last_attempt(&self) -> Option<DateTime<Utc>> {
        self.last_attempt
    }

    /// Folds one terminal session into the tallies.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::Utc;
    /// use skirmish_domain::common::{LocationId, UserId};
    /// use skirmish_domain::history::PlayerCombatHistory;
    /// use skirmish_domain::session::CombatOutcome;
    ///
    /// let history = PlayerCombatHistory::new(UserId::new(), LocationId::new())
    ///     .record(CombatOutcome::Victory, Utc::now())
    ///     .record(CombatOutcome::Victory, Utc::now())
    ///     .record(CombatOutcome::Escape, Utc::now());
    ///
    /// assert_eq!(history.total_attempts(), 3);
    /// assert_eq!(history.victories(), 2);
    /// assert_eq!(history.defeats(), 0);
    /// assert_eq!(history.current_streak(), 0);
    /// assert_eq!(history.longest_streak(), 2);
    /// ```
    #[must_use]
    pub fn record(self, outcome: CombatOutcome, now: DateTime<Utc>) -> Self {
        let victories = self.victories + u64::from(outcome.is_victory());
        let defeats = self.defeats + u64::from(outcome.is_counted_defeat());
        let current_streak = if outcome.breaks_streak() {
            0
        } else {
            self.current_streak + 1
        };

        Self {
            total_attempts: self.total_attempts + 1,
            victories,
            defeats,
            current_streak,
            longest_streak: self.longest_streak.max(current_streak),
            last_attempt: Some(now),
            ..self
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
