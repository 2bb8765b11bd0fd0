use crate::features::users::handlers::profile_handler;
use crate::features::users::services::UserProfileService;
use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

/// Account routes (all require JWT authentication)
pub fn routes(service: Arc<UserProfileService>) -> Router {
    Router::new()
        .route("/api/auth/current", get(profile_handler::get_current_user))
        .route("/api/auth/profile", put(profile_handler::update_profile))
        .route("/api/auth/users", get(profile_handler::list_users))
        .with_state(service)
}
