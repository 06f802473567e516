//! Combat session handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use skirmish_domain::common::{CombatLevel, LocationId, UserId};
use skirmish_domain::session::CombatId;
use skirmish_workflow::{AttackCommand, CompleteCommand, StartCombatCommand};

use crate::dto::request::{AttackRequest, StartCombatRequest};
use crate::dto::response::{
    AttackResponse, CombatSessionResponse, CompletionResponse, SweepResponse,
};
use crate::errors::ApiError;
use crate::state::AppState;

// =============================================================================
// Start Combat Handler
// =============================================================================

pub async fn start_combat(
    State(state): State<AppState>,
    Json(request): Json<StartCombatRequest>,
) -> Result<(StatusCode, Json<CombatSessionResponse>), ApiError> {
    let user_id: UserId = request
        .user_id
        .parse()
        .map_err(|_| ApiError::validation_field("user_id", "must be a valid UUID"))?;
    let location_id: LocationId = request
        .location_id
        .parse()
        .map_err(|_| ApiError::validation_field("location_id", "must be a valid UUID"))?;
    let combat_level = CombatLevel::new(request.combat_level).map_err(|error| {
        ApiError::validation_field("combat_level", error.message())
    })?;

    let session = state
        .service()
        .start(StartCombatCommand::new(user_id, location_id, combat_level))
        .await?;

    Ok((StatusCode::CREATED, Json(CombatSessionResponse::from(&session))))
}

// =============================================================================
// Get Combat Handler
// =============================================================================

pub async fn get_combat(
    State(state): State<AppState>,
    Path(combat_id): Path<String>,
) -> Result<Json<CombatSessionResponse>, ApiError> {
    let combat_id = parse_combat_id(&combat_id)?;
    let session = state.service().session(combat_id).await?;

    Ok(Json(CombatSessionResponse::from(&session)))
}

// =============================================================================
// Attack Handler
// =============================================================================

pub async fn attack(
    State(state): State<AppState>,
    Path(combat_id): Path<String>,
    Json(request): Json<AttackRequest>,
) -> Result<Json<AttackResponse>, ApiError> {
    let combat_id = parse_combat_id(&combat_id)?;

    let report = state
        .service()
        .attack(AttackCommand::new(combat_id, request.tap_position))
        .await?;

    Ok(Json(AttackResponse::from(&report)))
}

// =============================================================================
// Complete Handler
// =============================================================================

pub async fn complete_combat(
    State(state): State<AppState>,
    Path(combat_id): Path<String>,
) -> Result<Json<CompletionResponse>, ApiError> {
    let combat_id = parse_combat_id(&combat_id)?;

    let report = state
        .service()
        .complete(CompleteCommand::new(combat_id))
        .await?;

    Ok(Json(CompletionResponse::from(&report)))
}

// =============================================================================
// Sweep Handler
// =============================================================================

/// Operational endpoint driving the batch expiry sweep; intended to be
/// called by a scheduler, not by game clients.
pub async fn sweep_expired(
    State(state): State<AppState>,
) -> Result<Json<SweepResponse>, ApiError> {
    let expired_sessions = state.service().sweep().await?;

    Ok(Json(SweepResponse { expired_sessions }))
}

fn parse_combat_id(raw: &str) -> Result<CombatId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::validation_field("combat_id", "must be a valid UUID"))
}
