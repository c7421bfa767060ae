//! API routes for the plantation server.

pub mod drone;
pub mod estates;
pub mod request_id;
mod routes;
pub mod trees;

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    routes::create_router()
}
