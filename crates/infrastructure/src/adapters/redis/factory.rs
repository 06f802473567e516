//! Redis connection factory.

use redis::Client;

use super::{RedisConfig, RedisConnection};
use crate::errors::InfraError;

// =============================================================================
// RedisConnectionFactory
// =============================================================================

/// Factory for creating Redis connections from a [`RedisConfig`].
#[derive(Debug, Clone, Copy)]
pub struct RedisConnectionFactory;

impl RedisConnectionFactory {
    /// Creates the client object. The TCP connection itself is established
    /// lazily when the first operation runs.
    ///
    /// # Errors
    ///
    /// Returns [`InfraError::Connection`] for a malformed URL.
    pub fn create_client(config: &RedisConfig) -> Result<RedisConnection, InfraError> {
        let client = Client::open(config.url.as_str()).map_err(InfraError::from)?;
        Ok(RedisConnection::new(client, config.clone()))
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
    fn create_client_accepts_a_valid_url() {
        let config = RedisConfig::with_url("redis://localhost:6379");
        assert!(RedisConnectionFactory::create_client(&config).is_ok());
    }

    #[rstest]
    fn create_client_rejects_a_malformed_url() {
        let config = RedisConfig::with_url("not-a-redis-url");
        assert!(RedisConnectionFactory::create_client(&config).is_err());
    }
}
