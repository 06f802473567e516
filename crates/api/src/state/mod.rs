//! Application state shared across handlers.

use std::sync::Arc;

use skirmish_providers::CombatService;

// =============================================================================
// AppState
// =============================================================================

/// Handler state: the combat service behind a trait object, so the router
/// stays non-generic no matter which adapters back the service.
#[derive(Clone)]
pub struct AppState {
    service: Arc<dyn CombatService>,
}

impl AppState {
    #[must_use]
    pub fn new(service: impl CombatService + 'static) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    #[must_use]
    pub fn from_arc(service: Arc<dyn CombatService>) -> Self {
        Self { service }
    }

    #[must_use]
    pub fn service(&self) -> &dyn CombatService {
        self.service.as_ref()
    }
}
