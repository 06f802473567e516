//! Error types for the common domain module.
//!
//! This module provides the validation error type used by value object
//! constructors across all subdomains.

use std::error::Error;
use std::fmt;

// =============================================================================
// ValidationError
// =============================================================================

/// Validation error variants for domain value objects.
///
/// This enum represents common validation failures that can occur when
/// constructing value objects with constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was empty.
    EmptyValue {
        /// The name of the field that was empty.
        field: String,
    },
    /// A value was outside the valid range.
    OutOfRange {
        /// The name of the field that was out of range.
        field: String,
        /// The minimum allowed value (as string for flexibility).
        min: String,
        /// The maximum allowed value (as string for flexibility).
        max: String,
        /// The actual value that was provided (as string).
        actual: String,
    },
    /// A value had an invalid format.
    InvalidFormat {
        /// The name of the field with invalid format.
        field: String,
        /// Description of the expected format.
        expected: String,
    },
    /// A constraint was violated.
    ConstraintViolation {
        /// The name of the field that violated the constraint.
        field: String,
        /// Description of the constraint that was violated.
        constraint: String,
    },
}

impl ValidationError {
    /// Returns the name of the field that caused the error.
    pub fn field(&self) -> &str {
        match self {
            Self::EmptyValue { field }
            | Self::OutOfRange { field, .. }
            | Self::InvalidFormat { field, .. }
            | Self::ConstraintViolation { field, .. } => field,
        }
    }

    /// Returns a human-readable error message.
    pub fn message(&self) -> String {
        match self {
            Self::EmptyValue { field } => {
                format!("'{}' must not be empty", field)
            }
            Self::OutOfRange {
                field,
                min,
                max,
                actual,
            } => {
                format!(
                    "'{}' must be between {} and {}, but was {}",
                    field, min, max, actual
                )
            }
            Self::InvalidFormat { field, expected } => {
                format!("'{}' has invalid format: expected {}", field, expected)
            }
            Self::ConstraintViolation { field, constraint } => {
                format!("'{}' violates constraint: {}", field, constraint)
            }
        }
    }

    /// Creates an empty value error.
    pub fn empty_value(field: impl Into<String>) -> Self {
        Self::EmptyValue {
            field: field.into(),
        }
    }

    /// Creates an out of range error.
    pub fn out_of_range(
        field: impl Into<String>,
        min: impl ToString,
        max: impl ToString,
        actual: impl ToString,
    ) -> Self {
        Self::OutOfRange {
            field: field.into(),
            min: min.to_string(),
            max: max.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(field: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field: field.into(),
            expected: expected.into(),
        }
    }

    /// Creates a constraint violation error.
    pub fn constraint_violation(field: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self::ConstraintViolation {
            field: field.into(),
            constraint: constraint.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.message())
    }
}

impl Error for ValidationError {}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn empty_value_reports_field() {
        let error = ValidationError::empty_value("style");
        assert_eq!(error.field(), "style");
        assert!(error.message().contains("must not be empty"));
    }

    #[rstest]
    fn out_of_range_reports_bounds() {
        let error = ValidationError::out_of_range("tap_position", 0.0, 1.0, 1.5);
        assert_eq!(error.field(), "tap_position");
        assert!(error.message().contains("between 0 and 1"));
        assert!(error.message().contains("1.5"));
    }

    #[rstest]
    fn invalid_format_reports_expectation() {
        let error = ValidationError::invalid_format("combat_id", "valid UUID format");
        assert!(error.message().contains("valid UUID format"));
    }

    #[rstest]
    fn constraint_violation_reports_constraint() {
        let error = ValidationError::constraint_violation("bands", "sum must not exceed 360");
        assert!(error.message().contains("sum must not exceed 360"));
    }

    #[rstest]
    fn display_matches_message() {
        let error = ValidationError::empty_value("name");
        assert_eq!(error.to_string(), error.message());
    }
}
