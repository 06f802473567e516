//! MySQL connection pool factory.

use sqlx::mysql::MySqlPoolOptions;

use crate::adapters::mysql::{MySqlPool, MySqlPoolConfig};
use crate::errors::InfraError;

// =============================================================================
// MySqlPoolFactory
// =============================================================================

/// Factory for creating MySQL connection pools from a [`MySqlPoolConfig`].
#[derive(Debug, Clone, Copy)]
pub struct MySqlPoolFactory;

impl MySqlPoolFactory {
    /// Creates a pool and establishes the initial connection.
    ///
    /// # Errors
    ///
    /// Returns [`InfraError::Connection`] when the database is unreachable
    /// or the URL is malformed.
    pub async fn create_pool(config: &MySqlPoolConfig) -> Result<MySqlPool, InfraError> {
        if config.url.is_empty() {
            return Err(InfraError::configuration("MySQL URL must not be empty"));
        }

        let pool = Self::pool_options(config)
            .connect(&config.url)
            .await
            .map_err(InfraError::from)?;

        Ok(MySqlPool::new(pool))
    }

    /// Creates a pool without connecting; connections are established on
    /// first use. Useful during startup when the database may still be
    /// coming up.
    pub fn create_pool_lazy(config: &MySqlPoolConfig) -> Result<MySqlPool, InfraError> {
        if config.url.is_empty() {
            return Err(InfraError::configuration("MySQL URL must not be empty"));
        }

        let pool = Self::pool_options(config)
            .connect_lazy(&config.url)
            .map_err(InfraError::from)?;

        Ok(MySqlPool::new(pool))
    }

    fn pool_options(config: &MySqlPoolConfig) -> MySqlPoolOptions {
        MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(config.idle_timeout)
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
    fn empty_url_is_a_configuration_error() {
        let config = MySqlPoolConfig::default();
        let result = MySqlPoolFactory::create_pool_lazy(&config);
        assert!(matches!(result, Err(InfraError::Configuration { .. })));
    }

    #[rstest]
    fn lazy_pool_creation_succeeds_without_a_server() {
        let config = MySqlPoolConfig::with_url("mysql://skirmish@localhost:3306/skirmish");
        let pool = MySqlPoolFactory::create_pool_lazy(&config).unwrap();
        assert!(!pool.is_closed());
    }
}
