//! REST API routes.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::api::{drone, estates, request_id, trees};
use crate::state::AppState;

/// Create the API router.
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/estate", post(estates::create_estate))
        .route("/estate/:id/tree", post(trees::add_tree))
        .route("/estate/:id/stats", get(estates::get_estate_stats))
        .route("/estate/:id/drone-plan", get(drone::calculate_drone_plan))
        .layer(
            ServiceBuilder::new()
                .layer(request_id::set_layer())
                .layer(TraceLayer::new_for_http().make_span_with(request_id::request_span))
                .layer(request_id::propagate_layer()),
        )
}
