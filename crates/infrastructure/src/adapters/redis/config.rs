//! Redis connection configuration.

use std::time::Duration;

// =============================================================================
// RedisConfig
// =============================================================================

/// Configuration for the Redis connection.
///
/// # Examples
///
/// ```
/// use skirmish_infrastructure::adapters::redis::RedisConfig;
/// use std::time::Duration;
///
/// let config = RedisConfig::with_url("redis://localhost:6379")
///     .with_key_prefix("prod:skirmish:")
///     .with_connection_timeout(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisConfig {
    /// The Redis connection URL.
    ///
    /// Format: `redis://[user[:password]@]host[:port][/database]`
    pub url: String,

    /// Key prefix for all Redis keys, used for environment isolation.
    /// Defaults to `dev:skirmish:`.
    pub key_prefix: String,

    /// Maximum time to wait for a connection. Defaults to 30 seconds.
    pub connection_timeout: Duration,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            key_prefix: "dev:skirmish:".to_string(),
            connection_timeout: Duration::from_secs(30),
        }
    }
}

// =============================================================================
// Builder Methods
// =============================================================================

impl RedisConfig {
    /// Creates a config with the given URL and default settings.
    #[must_use]
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_key_prefix(mut self, key_prefix: impl Into<String>) -> Self {
        self.key_prefix = key_prefix.into();
        self
    }

    #[must_use]
    pub fn with_connection_timeout(mut self, connection_timeout: Duration) -> Self {
        self.connection_timeout = connection_timeout;
        self
    }
}

// =============================================================================
// Tests
// =============================================================================
