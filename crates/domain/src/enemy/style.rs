use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::ValidationError;

// =============================================================================
// StyleId
// =============================================================================

/// Visual style of an enemy, inherited verbatim by material loot drops.
///
/// Unstyled enemies carry the literal style `"normal"`; it is a real style
/// value, not an absence marker, and material drops copy it like any other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyleId(String);

impl StyleId {
    /// The style carried by unstyled enemies.
    pub const NORMAL: &'static str = "normal";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::empty_value("style"));
        }
        Ok(Self(value))
    }

    /// Returns the `"normal"` style.
    #[must_use]
    pub fn normal() -> Self {
        Self(Self::NORMAL.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_normal(&self) -> bool {
        self.0 == Self::NORMAL
    }
}

impl fmt::Display for StyleId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}
