use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::ValidationError;

// =============================================================================
// LootableId
// =============================================================================

/// Identifier of a droppable material or item in the content catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LootableId(Uuid);

impl LootableId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Result<Self, ValidationError> {
        if uuid.is_nil() {
            return Err(ValidationError::empty_value("lootable_id"));
        }
        Ok(Self(uuid))
    }

    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for LootableId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LootableId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0.hyphenated())
    }
}

impl FromStr for LootableId {
    type Err = ValidationError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::parse_str(string)
            .map_err(|_| ValidationError::invalid_format("lootable_id", "valid UUID format"))?;
        Self::from_uuid(uuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn from_uuid_rejects_nil() {
        assert!(LootableId::from_uuid(Uuid::nil()).is_err());
    }

    #[rstest]
    fn round_trips_through_string() {
        let id = LootableId::new();
        let parsed: LootableId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }
}
