use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireWriteReviews;
use crate::features::reviews::dtos::{CreateReviewDto, ReviewResponseDto};
use crate::features::reviews::services::ReviewService;
use crate::shared::types::{ApiResponse, Meta};

/// List reviews of a village, newest first
#[utoipa::path(
    get,
    path = "/api/reviews/{village_id}",
    params(
        ("village_id" = Uuid, Path, description = "Village ID")
    ),
    responses(
        (status = 200, description = "Reviews of the village", body = ApiResponse<Vec<ReviewResponseDto>>)
    ),
    tag = "reviews"
)]
pub async fn list_reviews(
    State(service): State<Arc<ReviewService>>,
    Path(village_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<ReviewResponseDto>>>> {
    let reviews = service.list_for_village(village_id).await?;
    let total = reviews.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(reviews),
        None,
        Some(Meta { total }),
    )))
}

/// Post a review on a village
#[utoipa::path(
    post,
    path = "/api/reviews/{village_id}",
    params(
        ("village_id" = Uuid, Path, description = "Village ID")
    ),
    request_body = CreateReviewDto,
    responses(
        (status = 201, description = "Review added", body = ApiResponse<ReviewResponseDto>),
        (status = 400, description = "Invalid rating or empty comment"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Village not found")
    ),
    tag = "reviews",
    security(("bearer_auth" = []))
)]
pub async fn add_review(
    RequireWriteReviews(user): RequireWriteReviews,
    State(service): State<Arc<ReviewService>>,
    Path(village_id): Path<Uuid>,
    AppJson(dto): AppJson<CreateReviewDto>,
) -> Result<(StatusCode, Json<ApiResponse<ReviewResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let review = service.create(user.user_id, village_id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(review), None, None)),
    ))
}
