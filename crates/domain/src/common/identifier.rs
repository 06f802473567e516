use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::ValidationError;

// =============================================================================
// UserId
// =============================================================================

/// Identifier of the player account that owns a combat session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Result<Self, ValidationError> {
        if uuid.is_nil() {
            return Err(ValidationError::empty_value("user_id"));
        }
        Ok(Self(uuid))
    }

    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0.hyphenated())
    }
}

impl FromStr for UserId {
    type Err = ValidationError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::parse_str(string)
            .map_err(|_| ValidationError::invalid_format("user_id", "valid UUID format"))?;
        Self::from_uuid(uuid)
    }
}

// =============================================================================
// LocationId
// =============================================================================

/// Identifier of the world location a fight takes place in.
///
/// Pool filters and history records are keyed on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationId(Uuid);

impl LocationId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Result<Self, ValidationError> {
        if uuid.is_nil() {
            return Err(ValidationError::empty_value("location_id"));
        }
        Ok(Self(uuid))
    }

    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for LocationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0.hyphenated())
    }
}

impl FromStr for LocationId {
    type Err = ValidationError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::parse_str(string)
            .map_err(|_| ValidationError::invalid_format("location_id", "valid UUID format"))?;
        Self::from_uuid(uuid)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    mod user_id {
        use super::*;

        #[rstest]
        fn new_generates_unique_identifiers() {
            assert_ne!(UserId::new(), UserId::new());
        }

        #[rstest]
        fn from_uuid_rejects_nil() {
            assert!(UserId::from_uuid(Uuid::nil()).is_err());
        }

        #[rstest]
        fn round_trips_through_string() {
            let id = UserId::new();
            let parsed: UserId = id.to_string().parse().unwrap();
            assert_eq!(id, parsed);
        }

        #[rstest]
        fn from_str_rejects_garbage() {
            assert!("not-a-uuid".parse::<UserId>().is_err());
        }
    }

    mod location_id {
        use super::*;

        #[rstest]
        fn from_uuid_rejects_nil() {
            assert!(LocationId::from_uuid(Uuid::nil()).is_err());
        }

        #[rstest]
        fn round_trips_through_string() {
            let id = LocationId::new();
            let parsed: LocationId = id.to_string().parse().unwrap();
            assert_eq!(id, parsed);
        }
    }
}
