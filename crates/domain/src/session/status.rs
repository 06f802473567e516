use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::ValidationError;

// =============================================================================
// CombatOutcome
// =============================================================================

/// Terminal result of a combat session.
///
/// A session without an outcome is ongoing. Once set, the outcome is never
/// overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatOutcome {
    /// The enemy's HP reached zero.
    Victory,

    /// The player's HP reached zero.
    Defeat,

    /// The player fled by completing an ongoing session.
    Escape,

    /// The session expired without resolution and was closed by the sweep.
    Abandoned,
}

impl CombatOutcome {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Victory => "victory",
            Self::Defeat => "defeat",
            Self::Escape => "escape",
            Self::Abandoned => "abandoned",
        }
    }

    #[must_use]
    pub const fn is_victory(&self) -> bool {
        matches!(self, Self::Victory)
    }

    /// Every non-victory outcome resets the player's streak, including
    /// escape and abandonment.
    #[must_use]
    pub const fn breaks_streak(&self) -> bool {
        !self.is_victory()
    }

    /// Only a genuine defeat counts in the raw defeat tally; escapes and
    /// abandonments are visible in the attempt count instead.
    #[must_use]
    pub const fn is_counted_defeat(&self) -> bool {
        matches!(self, Self::Defeat)
    }
}

impl fmt::Display for CombatOutcome {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.as_str())
    }
}

impl FromStr for CombatOutcome {
    type Err = ValidationError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string {
            "victory" => Ok(Self::Victory),
            "defeat" => Ok(Self::Defeat),
            "escape" => Ok(Self::Escape),
            "abandoned" => Ok(Self::Abandoned),
            _ => Err(ValidationError::invalid_format(
                "outcome",
                "one of: victory, defeat, escape, abandoned",
            )),
        }
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
    #[case(CombatOutcome::Victory, "victory")]
    #[case(CombatOutcome::Defeat, "defeat")]
    #[case(CombatOutcome::Escape, "escape")]
    #[case(CombatOutcome::Abandoned, "abandoned")]
    fn as_str_round_trips(#[case] outcome: CombatOutcome, #[case] name: &str) {
        assert_eq!(outcome.as_str(), name);
        assert_eq!(name.parse::<CombatOutcome>().unwrap(), outcome);
    }

    #[rstest]
    fn only_victory_preserves_the_streak() {
        assert!(!CombatOutcome::Victory.breaks_streak());
        assert!(CombatOutcome::Defeat.breaks_streak());
        assert!(CombatOutcome::Escape.breaks_streak());
        assert!(CombatOutcome::Abandoned.breaks_streak());
    }

    #[rstest]
    fn escape_and_abandonment_are_not_counted_defeats() {
        assert!(CombatOutcome::Defeat.is_counted_defeat());
        assert!(!CombatOutcome::Escape.is_counted_defeat());
        assert!(!CombatOutcome::Abandoned.is_counted_defeat());
    }
}
