use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::ValidationError;

// =============================================================================
// EnemyTier
// =============================================================================

/// Power tier of an enemy type.
///
/// The tier keys the material-loot weight multipliers; it never scales the
/// enemy's combat stats (the combat level does that).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyTier {
    Common,

    Veteran,

    Elite,

    Boss,
}

impl EnemyTier {
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Common, Self::Veteran, Self::Elite, Self::Boss]
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Veteran => "veteran",
            Self::Elite => "elite",
            Self::Boss => "boss",
        }
    }
}

impl fmt::Display for EnemyTier {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.name())
    }
}

impl FromStr for EnemyTier {
    type Err = ValidationError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string {
            "common" => Ok(Self::Common),
            "veteran" => Ok(Self::Veteran),
            "elite" => Ok(Self::Elite),
            "boss" => Ok(Self::Boss),
            _ => Err(ValidationError::invalid_format(
                "tier",
                "one of: common, veteran, elite, boss",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(EnemyTier::Common, "common")]
    #[case(EnemyTier::Veteran, "veteran")]
    #[case(EnemyTier::Elite, "elite")]
    #[case(EnemyTier::Boss, "boss")]
    fn name_round_trips_through_from_str(#[case] tier: EnemyTier, #[case] name: &str) {
        assert_eq!(tier.name(), name);
        assert_eq!(name.parse::<EnemyTier>().unwrap(), tier);
    }

    #[rstest]
    fn from_str_rejects_unknown_tiers() {
        assert!("legendary".parse::<EnemyTier>().is_err());
    }
}
