//! Routing definitions for the combat API.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::{RequestIdLayer, ResponseTimeLayer};
use crate::state::AppState;

// =============================================================================
// Router Creation
// =============================================================================

/// Creates the API router with all routes and middleware.
///
/// # Examples
///
/// ```ignore
/// use skirmish_api::routes::create_router;
/// use skirmish_api::state::AppState;
///
/// let state = AppState::new(provider);
/// let router = create_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
/// axum::serve(listener, router).await?;
/// ```
pub fn create_router(state: AppState) -> Router {
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Combat session lifecycle
        .route("/combat", post(handlers::start_combat))
        .route("/combat/sweep", post(handlers::sweep_expired))
        .route("/combat/{combat_id}", get(handlers::get_combat))
        .route("/combat/{combat_id}/attack", post(handlers::attack))
        .route("/combat/{combat_id}/complete", post(handlers::complete_combat))
        // Player history
        .route(
            "/users/{user_id}/locations/{location_id}/history",
            get(handlers::get_history),
        );

    Router::new()
        .nest("/api/v1", api_v1)
        .layer(ResponseTimeLayer::new())
        .layer(RequestIdLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer())
        .with_state(state)
}

/// Creates the CORS layer configuration.
///
/// Origins should be restricted per environment in production deployments.
fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

// =============================================================================
// Tests
// =============================================================================
