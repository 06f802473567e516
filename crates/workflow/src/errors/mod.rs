//! Error types for the workflow layer.
//!
//! # Error Categories
//!
//! - [`WorkflowError::Validation`]: malformed caller input, rejected up front
//! - [`WorkflowError::NotFound`]: entity missing or expired past its TTL
//! - [`WorkflowError::ActiveSessionExists`]: the per-user uniqueness invariant
//! - [`WorkflowError::Conflict`]: state conflicts (closed session, stale turn,
//!   duplicate log sequence)
//! - [`WorkflowError::Configuration`]: broken content (bands past 360, empty
//!   or zero-weight pools); logged and surfaced, never silently defaulted
//! - [`WorkflowError::Repository`] / [`WorkflowError::EventLog`]: storage
//!   failures

use std::error::Error;
use std::fmt;

use skirmish_domain::combat::BandConfigError;
use skirmish_domain::common::ValidationError;
use skirmish_domain::pools::PoolError;
use skirmish_domain::selection::SelectionError;
use skirmish_domain::session::SessionError;

// =============================================================================
// WorkflowError
// =============================================================================

/// Error type for every workflow operation.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowError {
    /// Caller input failed validation.
    Validation {
        field: String,
        message: String,
    },

    /// The requested entity was not found (or has expired).
    NotFound {
        entity_type: String,
        identifier: String,
    },

    /// The user already holds a live ongoing session.
    ActiveSessionExists {
        user_id: String,
    },

    /// A state conflict occurred (e.g. concurrent turn, closed session).
    Conflict {
        reason: String,
    },

    /// Game content is broken; a data-integrity failure, not a caller error.
    Configuration {
        reason: String,
    },

    /// A repository operation failed.
    Repository {
        operation: String,
        message: String,
    },

    /// A combat log operation failed.
    EventLog {
        operation: String,
        message: String,
    },
}

// =============================================================================
// Factory Methods
// =============================================================================

impl WorkflowError {
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn not_found(entity_type: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            identifier: identifier.into(),
        }
    }

    #[must_use]
    pub fn active_session_exists(user_id: impl Into<String>) -> Self {
        Self::ActiveSessionExists {
            user_id: user_id.into(),
        }
    }

    #[must_use]
    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn repository(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Repository {
            operation: operation.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn event_log(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::EventLog {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

// =============================================================================
// Query Methods
// =============================================================================

impl WorkflowError {
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. } | Self::ActiveSessionExists { .. })
    }

    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}

// =============================================================================
// Display / Error
// =============================================================================

impl fmt::Display for WorkflowError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation { field, message } => {
                write!(formatter, "invalid '{}': {}", field, message)
            }
            Self::NotFound {
                entity_type,
                identifier,
            } => {
                write!(formatter, "{} '{}' not found", entity_type, identifier)
            }
            Self::ActiveSessionExists { user_id } => {
                write!(formatter, "user '{}' already has an active combat session", user_id)
            }
            Self::Conflict { reason } => write!(formatter, "conflict: {}", reason),
            Self::Configuration { reason } => {
                write!(formatter, "configuration error: {}", reason)
            }
            Self::Repository { operation, message } => {
                write!(formatter, "repository operation '{}' failed: {}", operation, message)
            }
            Self::EventLog { operation, message } => {
                write!(formatter, "combat log operation '{}' failed: {}", operation, message)
            }
        }
    }
}

impl Error for WorkflowError {}

// =============================================================================
// Domain Error Conversions
// =============================================================================

impl From<ValidationError> for WorkflowError {
    fn from(error: ValidationError) -> Self {
        Self::validation(error.field().to_string(), error.message())
    }
}

impl From<PoolError> for WorkflowError {
    fn from(error: PoolError) -> Self {
        Self::configuration(error.message())
    }
}

impl From<SelectionError> for WorkflowError {
    fn from(error: SelectionError) -> Self {
        Self::configuration(error.message())
    }
}

impl From<BandConfigError> for WorkflowError {
    fn from(error: BandConfigError) -> Self {
        Self::configuration(error.message())
    }
}

impl From<SessionError> for WorkflowError {
    fn from(error: SessionError) -> Self {
        Self::conflict(error.message())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    mod factory_methods {
        use super::*;

        #[rstest]
        fn not_found_is_queryable() {
            let error = WorkflowError::not_found("CombatSession", "abc");
            assert!(error.is_not_found());
            assert!(!error.is_conflict());
        }

        #[rstest]
        fn active_session_exists_counts_as_conflict() {
            let error = WorkflowError::active_session_exists("user-1");
            assert!(error.is_conflict());
        }

        #[rstest]
        fn configuration_is_queryable() {
            let error = WorkflowError::configuration("zero-weight pool");
            assert!(error.is_configuration());
        }
    }

    mod conversions {
        use super::*;
        use skirmish_domain::common::LocationId;
        use skirmish_domain::session::CombatOutcome;

        #[rstest]
        fn validation_errors_keep_their_field() {
            let error: WorkflowError = ValidationError::empty_value("tap_position").into();
            assert!(matches!(
                error,
                WorkflowError::Validation { ref field, .. } if field == "tap_position"
            ));
        }

        #[rstest]
        fn pool_errors_become_configuration_errors() {
            let error: WorkflowError = PoolError::no_matching_pool(LocationId::new(), 3).into();
            assert!(error.is_configuration());
        }

        #[rstest]
        fn selection_errors_become_configuration_errors() {
            let error: WorkflowError = SelectionError::zero_total_weight(2).into();
            assert!(error.is_configuration());
        }

        #[rstest]
        fn session_errors_become_conflicts() {
            let error: WorkflowError =
                SessionError::already_closed(CombatOutcome::Victory).into();
            assert!(error.is_conflict());
        }
    }

    mod display {
        use super::*;

        #[rstest]
        fn not_found_display() {
            let error = WorkflowError::not_found("CombatSession", "abc-123");
            assert_eq!(error.to_string(), "CombatSession 'abc-123' not found");
        }

        #[rstest]
        fn active_session_display_names_the_user() {
            let error = WorkflowError::active_session_exists("user-9");
            assert!(error.to_string().contains("user-9"));
        }
    }
}
