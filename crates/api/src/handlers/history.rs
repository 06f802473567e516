//! Player history handlers.

use axum::Json;
use axum::extract::{Path, State};

use skirmish_domain::common::{LocationId, UserId};

use crate::dto::response::HistoryResponse;
use crate::errors::ApiError;
use crate::state::AppState;

pub async fn get_history(
    State(state): State<AppState>,
    Path((user_id, location_id)): Path<(String, String)>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let user_id: UserId = user_id
        .parse()
        .map_err(|_| ApiError::validation_field("user_id", "must be a valid UUID"))?;
    let location_id: LocationId = location_id
        .parse()
        .map_err(|_| ApiError::validation_field("location_id", "must be a valid UUID"))?;

    let history = state.service().history(user_id, location_id).await?;

    Ok(Json(HistoryResponse::from(&history)))
}
