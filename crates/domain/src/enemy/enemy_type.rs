use std::fmt;

use crate::common::{Attack, CombatLevel, Defense, Health, ValidationError};

use super::identifier::EnemyTypeId;
use super::style::StyleId;
use super::tier::EnemyTier;

// =============================================================================
// EnemyName
// =============================================================================

/// Display name of an enemy type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnemyName(String);

impl EnemyName {
    pub const MAX_LENGTH: usize = 64;

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::empty_value("enemy_name"));
        }
        if value.len() > Self::MAX_LENGTH {
            return Err(ValidationError::constraint_violation(
                "enemy_name",
                "must be 64 characters or less",
            ));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EnemyName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

// =============================================================================
// EnemyType
// =============================================================================

/// An enemy type as defined by the content catalog.
///
/// Base stats describe the enemy at combat level 1. Spawning an encounter
/// scales them linearly with the requested combat level via
/// [`EnemyType::scaled_for`].
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyType {
    id: EnemyTypeId,
    name: EnemyName,
    base_attack: Attack,
    base_defense: Defense,
    base_hp: Health,
    tier: EnemyTier,
    style: StyleId,
}

impl EnemyType {
    #[must_use]
    pub fn new(
        id: EnemyTypeId,
        name: EnemyName,
        base_attack: Attack,
        base_defense: Defense,
        base_hp: Health,
        tier: EnemyTier,
        style: StyleId,
    ) -> Self {
        Self {
            id,
            name,
            base_attack,
            base_defense,
            base_hp,
            tier,
            style,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &EnemyTypeId {
        &self.id
    }

    #[must_use]
    pub const fn name(&self) -> &EnemyName {
        &self.name
    }

    #[must_use]
    pub const fn base_attack(&self) -> Attack {
        self.base_attack
    }

    #[must_use]
    pub const fn base_defense(&self) -> Defense {
        self.base_defense
    }

    #[must_use]
    pub const fn base_hp(&self) -> Health {
        self.base_hp
    }

    #[must_use]
    pub const fn tier(&self) -> EnemyTier {
        self.tier
    }

    #[must_use]
    pub const fn style(&self) -> &StyleId {
        &self.style
    }

    /// Scales the base stats for an encounter at the given combat level.
    ///
    /// Each stat is multiplied by the level, saturating at the stat's
    /// respective ceiling.
    ///
    /// # Examples
    ///
    /// ```
    /// use skirmish_domain::common::{Attack, CombatLevel, Defense, Health};
    /// use skirmish_domain::enemy::{EnemyName, EnemyTier, EnemyType, EnemyTypeId, StyleId};
    ///
    /// let wolf = EnemyType::new(
    ///     EnemyTypeId::new(),
    ///     EnemyName::new("Dire Wolf").unwrap(),
    ///     Attack::new(8),
    ///     Defense::new(3),
    ///     Health::new(40).unwrap(),
    ///     EnemyTier::Common,
    ///     StyleId::normal(),
    /// );
    ///
    /// let scaled = wolf.scaled_for(CombatLevel::new(3).unwrap());
    /// assert_eq!(scaled.attack().value(), 24);
    /// assert_eq!(scaled.hp().value(), 120);
    /// ```
    #[must_use]
    pub fn scaled_for(&self, level: CombatLevel) -> ScaledEnemyStats {
        let factor = level.value();
        ScaledEnemyStats {
            attack: self.base_attack.saturating_mul(factor),
            defense: self.base_defense.saturating_mul(factor),
            hp: self.base_hp.saturating_mul(factor),
        }
    }
}

// =============================================================================
// ScaledEnemyStats
// =============================================================================

/// Combat stats of an enemy after level scaling. Ephemeral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaledEnemyStats {
    attack: Attack,
    defense: Defense,
    hp: Health,
}

impl ScaledEnemyStats {
    #[must_use]
    pub const fn attack(&self) -> Attack {
        self.attack
    }

    #[must_use]
    pub const fn defense(&self) -> Defense {
        self.defense
    }

    #[must_use]
    pub const fn hp(&self) -> Health {
        self.hp
    }
}

// =============================================================================
// Tests
// =============================================================================
