use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::reviews::dtos::{CreateReviewDto, ReviewResponseDto};
use crate::features::reviews::models::Review;
use crate::shared::constants::{MAX_RATING, MIN_RATING};

/// Service for village reviews
pub struct ReviewService {
    pool: PgPool,
}

impl ReviewService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Reviews of one village, newest first
    pub async fn list_for_village(&self, village_id: Uuid) -> Result<Vec<ReviewResponseDto>> {
        let reviews = sqlx::query_as::<_, Review>(
            r#"
            SELECT r.id, r.user_id, u.name AS user_name, r.village_id, r.rating, r.comment, r.created_at
            FROM reviews r
            JOIN users u ON u.id = r.user_id
            WHERE r.village_id = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(village_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list reviews for village {}: {:?}", village_id, e);
            AppError::Database(e)
        })?;

        Ok(reviews.into_iter().map(Into::into).collect())
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        village_id: Uuid,
        dto: CreateReviewDto,
    ) -> Result<ReviewResponseDto> {
        check_rating(dto.rating)?;

        let village_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM villages WHERE id = $1)")
                .bind(village_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to check village {}: {:?}", village_id, e);
                    AppError::Database(e)
                })?;

        if !village_exists {
            return Err(AppError::NotFound("Village not found".to_string()));
        }

        let review = sqlx::query_as::<_, Review>(
            r#"
            WITH inserted AS (
                INSERT INTO reviews (user_id, village_id, rating, comment)
                VALUES ($1, $2, $3, $4)
                RETURNING id, user_id, village_id, rating, comment, created_at
            )
            SELECT i.id, i.user_id, u.name AS user_name, i.village_id, i.rating, i.comment, i.created_at
            FROM inserted i
            JOIN users u ON u.id = i.user_id
            "#,
        )
        .bind(user_id)
        .bind(village_id)
        .bind(dto.rating)
        .bind(dto.comment.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create review: {:?}", e);
            AppError::Database(e)
        })?;

        // No row means the author's account vanished after the token was issued
        let review = review.ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        tracing::info!(
            "Review added: id={}, village={}, user={}, rating={}",
            review.id,
            review.village_id,
            review.user_id,
            review.rating
        );

        Ok(review.into())
    }
}

fn check_rating(rating: i32) -> Result<()> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "rating: Rating must be between {} and {}",
            MIN_RATING, MAX_RATING
        )))
    }
}
