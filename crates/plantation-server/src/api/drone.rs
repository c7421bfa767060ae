//! Drone flight plan endpoint.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use plantation_core::{plan_flight_cancellable, FlightPlan};
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::api::estates::{parse_estate_id, require_estate};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DronePlanQuery {
    /// Kept raw so a malformed value gets our own error body
    pub max_distance: Option<String>,
}

/// Positive integer budget, `None` when absent or empty.
pub(crate) fn parse_max_distance(raw: Option<&str>) -> Result<Option<u64>, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse::<u64>()
            .ok()
            .filter(|d| *d > 0)
            .map(Some)
            .ok_or_else(|| {
                tracing::warn!(max_distance = value, "Invalid max_distance value");
                ApiError::invalid_parameter("Invalid max_distance value")
            }),
    }
}

/// Total drone travel distance over an estate, with an optional budget.
pub async fn calculate_drone_plan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<DronePlanQuery>,
) -> Result<Json<FlightPlan>, ApiError> {
    tracing::info!(
        estate_id = %id,
        max_distance = ?query.max_distance,
        "Received request to calculate drone plan"
    );

    let max_distance = parse_max_distance(query.max_distance.as_deref())?;
    let estate_id = parse_estate_id(&id)?;
    let estate = require_estate(&state, estate_id).await?;

    let heights = state
        .provider()
        .get_tree_heights(estate_id)
        .await
        .map_err(|err| ApiError::upstream("Database error while fetching tree heights", err))?;
    tracing::debug!(
        estate_id = %estate_id,
        trees = heights.len(),
        plots = estate.plot_count(),
        "Fetched tree heights"
    );

    let policy = state.config().cutoff_policy;
    let (width, length) = (estate.width, estate.length);
    let cancel = Arc::new(AtomicBool::new(false));
    let task = tokio::task::spawn_blocking({
        let cancel = Arc::clone(&cancel);
        move || plan_flight_cancellable(width, length, &heights, max_distance, policy, &cancel)
    });

    let plan = match tokio::time::timeout(state.config().plan_timeout, task).await {
        Ok(Ok(Some(plan))) => plan,
        // Only reachable if the flag was set, which happens below after timing out.
        Ok(Ok(None)) => return Err(ApiError::Timeout),
        // The planner panicked.
        Ok(Err(err)) => {
            return Err(ApiError::upstream(
                "Flight plan computation failed",
                err.into(),
            ))
        }
        Err(_) => {
            cancel.store(true, Ordering::Relaxed);
            tracing::warn!(estate_id = %estate_id, width, length, "Flight plan timed out");
            return Err(ApiError::Timeout);
        }
    };

    match plan.rest {
        Some(rest) => tracing::info!(
            estate_id = %estate_id,
            landing_x = rest.x,
            landing_y = rest.y,
            total_distance = plan.distance,
            "Drone landed"
        ),
        None => tracing::info!(
            estate_id = %estate_id,
            total_distance = plan.distance,
            "Drone completed the plan"
        ),
    }

    Ok(Json(plan))
}
