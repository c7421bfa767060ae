//! Estate endpoints: creation and tree height statistics.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use plantation_core::{compute_stats, CreateEstateRequest, Estate, EstateStats};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Parse the `:id` path segment.
pub(crate) fn parse_estate_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| {
        tracing::warn!(estate_id = raw, "Invalid estate ID format");
        ApiError::InvalidIdentifier
    })
}

/// Fetch an estate or fail with 404/500.
pub(crate) async fn require_estate(state: &AppState, id: Uuid) -> Result<Estate, ApiError> {
    match state.provider().get_estate(id).await {
        Ok(Some(estate)) => Ok(estate),
        Ok(None) => {
            tracing::warn!(estate_id = %id, "Estate not found");
            Err(ApiError::NotFound)
        }
        Err(err) => Err(ApiError::upstream(
            "Database error while retrieving estate",
            err,
        )),
    }
}

/// Create a new estate.
pub async fn create_estate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateEstateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Estate>), ApiError> {
    let Json(req) = payload.map_err(|err| {
        tracing::warn!("Failed to bind estate: {}", err);
        ApiError::invalid_parameter("Invalid input format")
    })?;

    let estate = req.into_estate()?;

    state
        .provider()
        .create_estate(&estate)
        .await
        .map_err(|err| ApiError::upstream("Failed to store estate in database", err))?;

    tracing::info!(
        estate_id = %estate.id,
        width = estate.width,
        length = estate.length,
        "Created estate"
    );
    Ok((StatusCode::CREATED, Json(estate)))
}

/// Count, max, min and median tree height of an estate.
pub async fn get_estate_stats(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<EstateStats>, ApiError> {
    let estate_id = parse_estate_id(&id)?;
    require_estate(&state, estate_id).await?;

    let heights = state
        .provider()
        .get_tree_heights(estate_id)
        .await
        .map_err(|err| ApiError::upstream("Database error while fetching tree heights", err))?;

    let stats = compute_stats(&heights);
    tracing::debug!(estate_id = %estate_id, count = stats.count, "Computed estate stats");
    Ok(Json(stats))
}
