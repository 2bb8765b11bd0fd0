use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::reviews::handlers;
use crate::features::reviews::services::ReviewService;

/// Public review listing
pub fn public_routes(service: Arc<ReviewService>) -> Router {
    Router::new()
        .route("/api/reviews/{village_id}", get(handlers::list_reviews))
        .with_state(service)
}

/// Review posting, mounted behind the auth middleware
pub fn protected_routes(service: Arc<ReviewService>) -> Router {
    Router::new()
        .route("/api/reviews/{village_id}", post(handlers::add_review))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{lazy_pool, with_user_auth};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn server() -> TestServer {
        let service = Arc::new(ReviewService::new(lazy_pool()));
        TestServer::new(with_user_auth(protected_routes(service))).unwrap()
    }

    #[tokio::test]
    async fn test_out_of_range_rating_is_rejected() {
        let response = server()
            .post("/api/reviews/0195f3c2-7b1a-7c3e-9a4d-2f6b8e1d0c55")
            .json(&json!({ "rating": 0, "comment": "Meh" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "rating: Rating must be between 1 and 5");
    }

    #[tokio::test]
    async fn test_empty_comment_is_rejected() {
        let response = server()
            .post("/api/reviews/0195f3c2-7b1a-7c3e-9a4d-2f6b8e1d0c55")
            .json(&json!({ "rating": 4, "comment": "" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
