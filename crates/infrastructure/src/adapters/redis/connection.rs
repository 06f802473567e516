//! Redis connection wrapper.

use std::sync::Arc;

use redis::aio::MultiplexedConnection;

use super::RedisConfig;
use crate::errors::InfraError;

// =============================================================================
// RedisConnection
// =============================================================================

/// A shareable Redis client plus its configuration.
///
/// The client object is cheap to clone; the TCP connection is established
/// lazily per operation through the multiplexed connection.
#[derive(Clone)]
pub struct RedisConnection {
    client: Arc<redis::Client>,
    config: Arc<RedisConfig>,
}

impl RedisConnection {
    #[must_use]
    pub fn new(client: redis::Client, config: RedisConfig) -> Self {
        Self {
            client: Arc::new(client),
            config: Arc::new(config),
        }
    }

    pub async fn get_async_connection(&self) -> Result<MultiplexedConnection, InfraError> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(InfraError::from)
    }

    /// Applies the configured environment prefix to a key suffix.
    #[must_use]
    pub fn format_key(&self, suffix: &str) -> String {
        format!("{}{}", self.config.key_prefix, suffix)
    }

    #[must_use]
    pub fn config(&self) -> &RedisConfig {
        &self.config
    }
}

impl std::fmt::Debug for RedisConnection {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("RedisConnection")
            .field("url", &self.config.url)
            .field("key_prefix", &self.config.key_prefix)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================
