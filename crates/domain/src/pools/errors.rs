use std::error::Error;
use std::fmt;

use crate::common::LocationId;

// =============================================================================
// PoolError
// =============================================================================

/// Failure modes of pool aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// No pool covers the requested location and combat level. Content gap;
    /// surfaced as a configuration failure, never papered over.
    NoMatchingPool {
        location: LocationId,
        combat_level: u32,
    },
}

impl PoolError {
    pub fn message(&self) -> String {
        match self {
            Self::NoMatchingPool {
                location,
                combat_level,
            } => {
                format!(
                    "no spawn pool matches location {} at combat level {}",
                    location, combat_level
                )
            }
        }
    }

    #[must_use]
    pub const fn no_matching_pool(location: LocationId, combat_level: u32) -> Self {
        Self::NoMatchingPool {
            location,
            combat_level,
        }
    }
}

impl fmt::Display for PoolError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.message())
    }
}

impl Error for PoolError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn message_names_location_and_level() {
        let location = LocationId::new();
        let error = PoolError::no_matching_pool(location, 7);
        assert!(error.message().contains(&location.to_string()));
        assert!(error.message().contains("level 7"));
    }
}
