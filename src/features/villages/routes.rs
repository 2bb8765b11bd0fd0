use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::villages::handlers;
use crate::features::villages::services::VillageService;

/// Public read and search routes (no authentication required)
pub fn public_routes(service: Arc<VillageService>) -> Router {
    Router::new()
        .route("/api/villages", get(handlers::list_villages))
        .route("/api/villages/{id}", get(handlers::get_village))
        .route("/api/search/name", get(handlers::search_by_name))
        .route("/api/search/district", get(handlers::search_by_district))
        .with_state(service)
}

/// Write routes, mounted behind the auth middleware
///
/// Note: handlers additionally require the `ManageVillages` capability
pub fn admin_routes(service: Arc<VillageService>) -> Router {
    Router::new()
        .route("/api/villages", post(handlers::create_village))
        .route(
            "/api/villages/{id}",
            put(handlers::update_village).delete(handlers::delete_village),
        )
        .with_state(service)
}
