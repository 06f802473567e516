//! MySQL connection pool wrapper.

use std::sync::Arc;

// =============================================================================
// MySqlPool
// =============================================================================

/// A wrapper around `sqlx::MySqlPool` with Arc-based sharing.
///
/// Cloning shares the same underlying pool; no new connections are created.
#[derive(Clone)]
pub struct MySqlPool {
    inner: Arc<sqlx::MySqlPool>,
}

impl MySqlPool {
    #[must_use]
    pub fn new(pool: sqlx::MySqlPool) -> Self {
        Self {
            inner: Arc::new(pool),
        }
    }

    /// Returns the underlying sqlx pool for query execution.
    #[must_use]
    pub fn as_inner(&self) -> &sqlx::MySqlPool {
        &self.inner
    }

    /// Returns whether the pool has been explicitly closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    /// Closes the pool, waiting for in-flight connections to finish.
    pub async fn close(&self) {
        self.inner.close().await;
    }
}

impl std::fmt::Debug for MySqlPool {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("MySqlPool")
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}
