//! Infrastructure error types.
//!
//! These cover bootstrap failures (pool and client construction). Failures
//! during port operations are mapped into `WorkflowError` at the adapter
//! boundary instead, so the workflow layer never sees transport types.

use thiserror::Error;

// =============================================================================
// ConnectionTarget
// =============================================================================

/// Which external system failed to connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionTarget {
    /// MySQL.
    Database,
    /// Redis.
    Cache,
}

impl std::fmt::Display for ConnectionTarget {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Database => write!(formatter, "database"),
            Self::Cache => write!(formatter, "cache"),
        }
    }
}

// =============================================================================
// InfraError
// =============================================================================

/// Error types for infrastructure bootstrap operations.
#[derive(Debug, Clone, Error)]
pub enum InfraError {
    /// A connection to an external system could not be established.
    #[error("{target} connection failed: {message}")]
    Connection {
        target: ConnectionTarget,
        message: String,
    },

    /// The supplied configuration was unusable.
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl InfraError {
    #[must_use]
    pub fn database_connection(message: impl Into<String>) -> Self {
        Self::Connection {
            target: ConnectionTarget::Database,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn cache_connection(message: impl Into<String>) -> Self {
        Self::Connection {
            target: ConnectionTarget::Cache,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }
}

impl From<redis::RedisError> for InfraError {
    fn from(error: redis::RedisError) -> Self {
        Self::cache_connection(error.to_string())
    }
}

impl From<sqlx::Error> for InfraError {
    fn from(error: sqlx::Error) -> Self {
        Self::database_connection(error.to_string())
    }
}

// =============================================================================
// Tests
// =============================================================================
