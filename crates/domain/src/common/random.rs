//! Randomness value objects.
//!
//! The domain never draws random numbers itself. Callers thread a
//! [`RandomSeed`] through the random generator port and hand the resulting
//! [`Roll`] values to the pure selection and damage functions, which keeps
//! every combat computation replayable from a recorded seed.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::ValidationError;

// =============================================================================
// RandomSeed
// =============================================================================

/// Seed state of the deterministic random sequence backing a computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RandomSeed(u64);

impl RandomSeed {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RandomSeed {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "seed({})", self.0)
    }
}

// =============================================================================
// Roll
// =============================================================================

/// A uniform random draw in `[0, 1)`.
///
/// This is the only shape randomness takes inside the domain: weighted
/// selection, critical damage, and loot draws all consume rolls supplied by
/// the caller.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Roll(f64);

impl Roll {
    /// Creates a new Roll.
    ///
    /// Returns an error unless the value lies in `[0, 1)`.
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || !(0.0..1.0).contains(&value) {
            return Err(ValidationError::out_of_range("roll", 0.0, "1.0 (exclusive)", value));
        }
        Ok(Self(value))
    }

    /// Returns the drawn value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// The lowest possible roll.
    #[must_use]
    pub const fn zero() -> Self {
        Self(0.0)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0)]
    #[case(0.5)]
    #[case(0.999_999)]
    fn roll_accepts_unit_interval(#[case] value: f64) {
        assert_eq!(Roll::new(value).unwrap().value(), value);
    }

    #[rstest]
    #[case(1.0)]
    #[case(-0.1)]
    #[case(f64::NAN)]
    fn roll_rejects_out_of_range(#[case] value: f64) {
        assert!(Roll::new(value).is_err());
    }

    #[rstest]
    fn seed_round_trips_value() {
        assert_eq!(RandomSeed::new(42).value(), 42);
    }
}
