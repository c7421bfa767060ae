//! Tree planting endpoint.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use plantation_core::CreateTreeRequest;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::estates::{parse_estate_id, require_estate};
use crate::error::ApiError;
use crate::state::{AddTreeOutcome, AppState};

#[derive(Debug, Serialize)]
pub struct CreateTreeResponse {
    pub id: Uuid,
}

/// Plant a tree on a vacant plot of an existing estate.
pub async fn add_tree(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<CreateTreeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateTreeResponse>), ApiError> {
    let Json(req) = payload.map_err(|err| {
        tracing::warn!("Failed to bind tree: {}", err);
        ApiError::invalid_parameter("Invalid input format")
    })?;

    let (plot, _) = req.validate().map_err(|err| {
        tracing::warn!(x = req.x, y = req.y, height = req.height, "{}", err);
        ApiError::from(err)
    })?;

    let estate_id = parse_estate_id(&id)?;
    let estate = require_estate(&state, estate_id).await?;

    let tree = req.into_tree(&estate).map_err(|err| {
        tracing::warn!(x = plot.x, y = plot.y, "{}", err);
        ApiError::from(err)
    })?;

    let existing = state
        .provider()
        .get_tree_at(estate_id, plot)
        .await
        .map_err(|err| ApiError::upstream("Database error while checking existing tree", err))?;
    if existing.is_some() {
        tracing::warn!(estate_id = %estate_id, x = plot.x, y = plot.y, "Plot already planted");
        return Err(ApiError::invalid_parameter(
            "A tree already exists at this location",
        ));
    }

    let outcome = state
        .provider()
        .add_tree(&tree)
        .await
        .map_err(|err| ApiError::upstream("Failed to store tree in database", err))?;
    if outcome == AddTreeOutcome::PlotTaken {
        tracing::warn!(estate_id = %estate_id, x = plot.x, y = plot.y, "Plot planted concurrently");
        return Err(ApiError::invalid_parameter(
            "A tree already exists at this location",
        ));
    }

    tracing::info!(estate_id = %estate_id, tree_id = %tree.id, "Tree added");
    Ok((StatusCode::CREATED, Json(CreateTreeResponse { id: tree.id })))
}
