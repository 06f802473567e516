//! Hit-zone band geometry.
//!
//! A weapon defines five arcs on a 360 degree dial, one per hit zone. The
//! player's accuracy reshapes the dial before a tap is classified: injure and
//! miss arcs shrink as accuracy rises, the crit arc grows, and the result is
//! renormalized so the five arcs always cover the full circle.

use crate::common::Accuracy;

use super::errors::BandConfigError;

/// How strongly full accuracy inflates the crit arc relative to its base
/// width. At accuracy 100 the pre-normalization crit width is
/// `base * (1 + CRIT_GROWTH)`.
const CRIT_GROWTH: f64 = 2.0;

// =============================================================================
// WeaponBandConfig
// =============================================================================

/// The five hit-zone arc widths of a weapon, in degrees, before accuracy
/// scaling.
///
/// # Invariants
///
/// - every width is finite and non-negative
/// - the widths sum to at most 360
/// - at least one width is positive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponBandConfig {
    injure: f64,
    miss: f64,
    graze: f64,
    normal: f64,
    crit: f64,
}

impl WeaponBandConfig {
    /// Creates a new band configuration.
    ///
    /// # Errors
    ///
    /// - [`BandConfigError::InvalidBand`] for a negative or non-finite width.
    /// - [`BandConfigError::ExceedsCircle`] when the widths sum past 360.
    /// - [`BandConfigError::Degenerate`] when every width is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use skirmish_domain::combat::WeaponBandConfig;
    ///
    /// let config = WeaponBandConfig::new(5.0, 45.0, 60.0, 200.0, 50.0).unwrap();
    /// assert!(WeaponBandConfig::new(100.0, 100.0, 100.0, 100.0, 100.0).is_err());
    /// ```
    pub fn new(
        injure: f64,
        miss: f64,
        graze: f64,
        normal: f64,
        crit: f64,
    ) -> Result<Self, BandConfigError> {
        for (name, value) in [
            ("injure", injure),
            ("miss", miss),
            ("graze", graze),
            ("normal", normal),
            ("crit", crit),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(BandConfigError::invalid_band(name, value));
            }
        }

        let total = injure + miss + graze + normal + crit;
        if total > 360.0 {
            return Err(BandConfigError::exceeds_circle(total));
        }
        if total <= 0.0 {
            return Err(BandConfigError::Degenerate);
        }

        Ok(Self {
            injure,
            miss,
            graze,
            normal,
            crit,
        })
    }

    #[must_use]
    pub const fn injure(&self) -> f64 {
        self.injure
    }

    #[must_use]
    pub const fn miss(&self) -> f64 {
        self.miss
    }

    #[must_use]
    pub const fn graze(&self) -> f64 {
        self.graze
    }

    #[must_use]
    pub const fn normal(&self) -> f64 {
        self.normal
    }

    #[must_use]
    pub const fn crit(&self) -> f64 {
        self.crit
    }

    /// Reshapes the bands for the given accuracy.
    ///
    /// With `t = accuracy / 100`, the injure and miss arcs scale by `1 - t`,
    /// the crit arc by `1 + 2t`, and graze/normal keep their base widths. The
    /// scaled arcs are then renormalized onto the full circle, which also
    /// spreads any slack a sub-360 base config left over. Renormalization
    /// preserves the direction of every arc's response to accuracy, so the
    /// output stays monotonic: injure and miss never widen, crit never
    /// narrows as accuracy climbs.
    ///
    /// The crit arc is assigned as the remainder of the circle after the
    /// first four arcs, making the five widths sum to exactly 360 with no
    /// floating-point gap for a tap to fall through.
    ///
    /// # Examples
    ///
    /// ```
    /// use skirmish_domain::combat::WeaponBandConfig;
    /// use skirmish_domain::common::Accuracy;
    ///
    /// let config = WeaponBandConfig::new(5.0, 45.0, 60.0, 200.0, 50.0).unwrap();
    ///
    /// // A full-circle base config is untouched at accuracy zero.
    /// let bands = config.adjust(Accuracy::zero());
    /// assert_eq!(bands.injure(), 5.0);
    /// assert_eq!(bands.crit(), 50.0);
    /// ```
    #[must_use]
    pub fn adjust(&self, accuracy: Accuracy) -> AdjustedBands {
        let t = accuracy.fraction();

        let injure = self.injure * (1.0 - t);
        let miss = self.miss * (1.0 - t);
        let graze = self.graze;
        let normal = self.normal;
        let crit = self.crit * (1.0 + CRIT_GROWTH * t);

        let total = injure + miss + graze + normal + crit;
        if total <= f64::EPSILON {
            // Only injure/miss arcs were positive and accuracy scaled them
            // away entirely: the perfect-accuracy limit hands the whole dial
            // to crit.
            return AdjustedBands {
                injure: 0.0,
                miss: 0.0,
                graze: 0.0,
                normal: 0.0,
                crit: 360.0,
            };
        }

        let factor = 360.0 / total;
        let injure = injure * factor;
        let miss = miss * factor;
        let graze = graze * factor;
        let normal = normal * factor;

        AdjustedBands {
            injure,
            miss,
            graze,
            normal,
            crit: (360.0 - (injure + miss + graze + normal)).max(0.0),
        }
    }
}

// =============================================================================
// AdjustedBands
// =============================================================================

/// Accuracy-scaled hit-zone arcs covering exactly 360 degrees. Ephemeral;
/// recomputed per attack and never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustedBands {
    injure: f64,
    miss: f64,
    graze: f64,
    normal: f64,
    crit: f64,
}

impl AdjustedBands {
    #[must_use]
    pub const fn injure(&self) -> f64 {
        self.injure
    }

    #[must_use]
    pub const fn miss(&self) -> f64 {
        self.miss
    }

    #[must_use]
    pub const fn graze(&self) -> f64 {
        self.graze
    }

    #[must_use]
    pub const fn normal(&self) -> f64 {
        self.normal
    }

    #[must_use]
    pub const fn crit(&self) -> f64 {
        self.crit
    }

    /// Returns the total arc width. Always exactly 360.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.injure + self.miss + self.graze + self.normal + self.crit
    }

    /// The arcs in resolution order: injure, miss, graze, normal, crit.
    #[must_use]
    pub const fn in_order(&self) -> [f64; 5] {
        [self.injure, self.miss, self.graze, self.normal, self.crit]
    }
}

// =============================================================================
// Tests
// =============================================================================
