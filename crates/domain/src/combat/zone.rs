//! Tap classification onto hit zones.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::ValidationError;

use super::bands::AdjustedBands;

// =============================================================================
// HitZone
// =============================================================================

/// Classification of a timed tap.
///
/// Zones are ordered exactly as their arcs sit on the dial: injure, miss,
/// graze, normal, crit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitZone {
    Injure,

    Miss,

    Graze,

    Normal,

    Crit,
}

impl HitZone {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Injure => "injure",
            Self::Miss => "miss",
            Self::Graze => "graze",
            Self::Normal => "normal",
            Self::Crit => "crit",
        }
    }

    /// Returns true when the player's weapon connected with the enemy.
    ///
    /// Injure is the player fumbling into themself and miss is a clean
    /// whiff; neither lands on the enemy.
    #[must_use]
    pub const fn is_hit(&self) -> bool {
        matches!(self, Self::Graze | Self::Normal | Self::Crit)
    }

    /// Base damage multiplier applied to the player's attack for this zone.
    ///
    /// Crit additionally adds a random bonus on top of its base multiplier;
    /// see [`super::damage::resolve_attack`].
    #[must_use]
    pub const fn damage_multiplier(&self) -> f64 {
        match self {
            Self::Injure | Self::Miss => 0.0,
            Self::Graze => 0.6,
            Self::Normal => 1.0,
            Self::Crit => 1.6,
        }
    }
}

impl fmt::Display for HitZone {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.name())
    }
}

// =============================================================================
// TapPosition
// =============================================================================

/// Normalized position of the player's tap on the timing dial, in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TapPosition(f64);

impl TapPosition {
    /// Creates a new TapPosition.
    ///
    /// Returns an error unless the value lies in `[0, 1]`. Client input lands
    /// here directly, so out-of-range values are rejected rather than
    /// clamped.
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::out_of_range("tap_position", 0.0, 1.0, value));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Maps the tap onto the 360 degree dial.
    #[must_use]
    pub fn degrees(&self) -> f64 {
        self.0 * 360.0
    }
}

// =============================================================================
// Zone resolution
// =============================================================================

/// Locates a tap on the adjusted band partition.
///
/// The five arcs are walked in fixed order, each occupying a contiguous range
/// starting where the previous ends. Zero-width arcs are legal and simply
/// unreachable. A tap of exactly 1.0 lands in the final reachable arc, so
/// the function is total over valid input.
///
/// # Examples
///
/// ```
/// use skirmish_domain::combat::{TapPosition, WeaponBandConfig, resolve_zone, HitZone};
/// use skirmish_domain::common::Accuracy;
///
/// let bands = WeaponBandConfig::new(5.0, 45.0, 60.0, 200.0, 50.0)
///     .unwrap()
///     .adjust(Accuracy::zero());
///
/// assert_eq!(resolve_zone(&bands, TapPosition::new(0.0).unwrap()), HitZone::Injure);
/// assert_eq!(resolve_zone(&bands, TapPosition::new(0.99).unwrap()), HitZone::Crit);
/// ```
#[must_use]
pub fn resolve_zone(bands: &AdjustedBands, tap: TapPosition) -> HitZone {
    const ZONES: [HitZone; 5] = [
        HitZone::Injure,
        HitZone::Miss,
        HitZone::Graze,
        HitZone::Normal,
        HitZone::Crit,
    ];

    let degrees = tap.degrees();
    let mut cumulative = 0.0;

    for (zone, width) in ZONES.iter().zip(bands.in_order()) {
        cumulative += width;
        if degrees < cumulative {
            return *zone;
        }
    }

    // degrees == 360.0, or floating-point residue left the tap at the very
    // top of the dial.
    HitZone::Crit
}

// =============================================================================
// Tests
// =============================================================================
