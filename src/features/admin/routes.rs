use std::sync::Arc;

use axum::{
    routing::{delete, get},
    Router,
};

use crate::features::admin::handlers;
use crate::features::admin::services::AdminService;

/// Create admin routes (all require admin access), nested under `/api/admin`
pub fn routes(admin_service: Arc<AdminService>) -> Router {
    Router::new()
        .route("/analytics", get(handlers::get_analytics))
        .route("/users/{id}", delete(handlers::delete_user))
        .with_state(admin_service)
}
