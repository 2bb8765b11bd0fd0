use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::reviews::models::Review;

/// Request DTO for posting a review
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateReviewDto {
    /// Whole stars, 1 to 5
    #[schema(minimum = 1, maximum = 5)]
    pub rating: i32,

    #[validate(
        length(max = 5000, message = "Comment must be at most 5000 characters"),
        custom(function = "crate::shared::validation::not_blank", message = "Comment is required")
    )]
    pub comment: String,
}

/// Author summary embedded in a review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReviewAuthorDto {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponseDto {
    pub id: Uuid,
    pub village_id: Uuid,
    pub user: ReviewAuthorDto,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponseDto {
    fn from(r: Review) -> Self {
        Self {
            id: r.id,
            village_id: r.village_id,
            user: ReviewAuthorDto {
                id: r.user_id,
                name: r.user_name,
            },
            rating: r.rating,
            comment: r.comment,
            created_at: r.created_at,
        }
    }
}
