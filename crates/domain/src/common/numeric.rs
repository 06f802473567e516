//! Numeric value objects for combat mechanics.
//!
//! This module provides type-safe numeric types with validation for
//! hit points, attack, defense, accuracy, and combat level.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::ValidationError;

// =============================================================================
// Health
// =============================================================================

/// Hit points for players and enemies.
///
/// Health values are constrained to 0 <= value <= MAX_HEALTH (99999).
///
/// # Examples
///
/// ```
/// use skirmish_domain::common::Health;
///
/// let health = Health::new(100).unwrap();
/// assert_eq!(health.value(), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Health(u32);

impl Health {
    /// The maximum allowed health value.
    pub const MAX_HEALTH: u32 = 99_999;

    /// Creates a new Health with the given value.
    ///
    /// Returns an error if the value exceeds MAX_HEALTH.
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if value > Self::MAX_HEALTH {
            return Err(ValidationError::out_of_range(
                "health",
                0,
                Self::MAX_HEALTH,
                value,
            ));
        }
        Ok(Self(value))
    }

    /// Returns the health value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Returns zero health.
    #[must_use]
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Subtracts health, saturating at 0.
    #[must_use]
    pub const fn saturating_sub(&self, amount: u32) -> Self {
        Self(self.0.saturating_sub(amount))
    }

    /// Multiplies health, saturating at MAX_HEALTH.
    #[must_use]
    pub const fn saturating_mul(&self, factor: u32) -> Self {
        let scaled = self.0.saturating_mul(factor);
        if scaled > Self::MAX_HEALTH {
            Self(Self::MAX_HEALTH)
        } else {
            Self(scaled)
        }
    }

    /// Returns true if health is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Health {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{} HP", self.0)
    }
}

// =============================================================================
// Attack / Defense
// =============================================================================

/// Attack power of a combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Attack(u32);

impl Attack {
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Multiplies the attack value, saturating on overflow.
    #[must_use]
    pub const fn saturating_mul(&self, factor: u32) -> Self {
        Self(self.0.saturating_mul(factor))
    }
}

/// Defense power of a combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Defense(u32);

impl Defense {
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Multiplies the defense value, saturating on overflow.
    #[must_use]
    pub const fn saturating_mul(&self, factor: u32) -> Self {
        Self(self.0.saturating_mul(factor))
    }
}

// =============================================================================
// Accuracy
// =============================================================================

/// Player accuracy on a 0-100 scale.
///
/// Values outside the scale are clamped rather than rejected: accuracy is an
/// aggregate of equipment and skill bonuses, and the band geometry must stay
/// defined for any aggregate the content pipeline produces.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Accuracy(f64);

impl Accuracy {
    /// The top of the accuracy scale.
    pub const MAX_ACCURACY: f64 = 100.0;

    /// Creates a new Accuracy, clamping the value into `[0, 100]`.
    ///
    /// Returns an error for non-finite input.
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::invalid_format("accuracy", "finite number"));
        }
        Ok(Self(value.clamp(0.0, Self::MAX_ACCURACY)))
    }

    /// Returns the accuracy value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Returns the accuracy as a fraction of the scale, in `[0, 1]`.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        self.0 / Self::MAX_ACCURACY
    }

    /// Returns the bottom of the scale.
    #[must_use]
    pub const fn zero() -> Self {
        Self(0.0)
    }
}

// =============================================================================
// CombatLevel
// =============================================================================

/// Difficulty tier of an encounter; scales enemy base stats linearly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CombatLevel(u32);

impl CombatLevel {
    /// The maximum supported combat level.
    pub const MAX_LEVEL: u32 = 100;

    /// Creates a new CombatLevel.
    ///
    /// Returns an error for level 0 or levels above MAX_LEVEL.
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if value == 0 || value > Self::MAX_LEVEL {
            return Err(ValidationError::out_of_range(
                "combat_level",
                1,
                Self::MAX_LEVEL,
                value,
            ));
        }
        Ok(Self(value))
    }

    /// Returns the level value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CombatLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "level {}", self.0)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    mod health {
        use super::*;

        #[rstest]
        fn new_accepts_valid_values() {
            assert_eq!(Health::new(100).unwrap().value(), 100);
            assert_eq!(Health::new(Health::MAX_HEALTH).unwrap().value(), Health::MAX_HEALTH);
        }

        #[rstest]
        fn new_rejects_values_above_max() {
            assert!(Health::new(Health::MAX_HEALTH + 1).is_err());
        }

        #[rstest]
        fn saturating_sub_stops_at_zero() {
            let health = Health::new(50).unwrap();
            assert!(health.saturating_sub(100).is_zero());
        }

        #[rstest]
        fn saturating_mul_caps_at_max() {
            let health = Health::new(60_000).unwrap();
            assert_eq!(health.saturating_mul(3).value(), Health::MAX_HEALTH);
        }
    }

    mod accuracy {
        use super::*;

        #[rstest]
        #[case(-20.0, 0.0)]
        #[case(0.0, 0.0)]
        #[case(55.5, 55.5)]
        #[case(100.0, 100.0)]
        #[case(250.0, 100.0)]
        fn new_clamps_into_scale(#[case] input: f64, #[case] expected: f64) {
            assert_eq!(Accuracy::new(input).unwrap().value(), expected);
        }

        #[rstest]
        fn new_rejects_non_finite_input() {
            assert!(Accuracy::new(f64::NAN).is_err());
            assert!(Accuracy::new(f64::INFINITY).is_err());
        }

        #[rstest]
        fn fraction_maps_scale_to_unit_interval() {
            assert_eq!(Accuracy::new(50.0).unwrap().fraction(), 0.5);
        }
    }

    mod combat_level {
        use super::*;

        #[rstest]
        fn new_rejects_zero() {
            assert!(CombatLevel::new(0).is_err());
        }

        #[rstest]
        fn new_rejects_levels_above_max() {
            assert!(CombatLevel::new(CombatLevel::MAX_LEVEL + 1).is_err());
        }

        #[rstest]
        fn new_accepts_valid_levels() {
            assert_eq!(CombatLevel::new(7).unwrap().value(), 7);
        }
    }
}
