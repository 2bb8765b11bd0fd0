use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::admin::dtos::*;

/// Service for admin queries
pub struct AdminService {
    pool: PgPool,
}

impl AdminService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // ANALYTICS
    // =========================================================================

    pub async fn analytics(&self) -> Result<AnalyticsDto> {
        let (total_villages, total_users, total_reviews) =
            sqlx::query_as::<_, (i64, i64, i64)>(
                r#"
                SELECT
                    (SELECT COUNT(*) FROM villages),
                    (SELECT COUNT(*) FROM users),
                    (SELECT COUNT(*) FROM reviews)
                "#,
            )
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count analytics: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(AnalyticsDto {
            total_villages,
            total_users,
            total_reviews,
            monthly_visitors: None,
        })
    }

    // =========================================================================
    // USERS
    // =========================================================================

    /// Delete a user together with every review they wrote
    pub async fn delete_user(&self, user_id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let deleted_reviews = sqlx::query("DELETE FROM reviews WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete reviews of user {}: {:?}", user_id, e);
                AppError::Database(e)
            })?
            .rows_affected();

        let email = sqlx::query_scalar::<_, String>(
            "DELETE FROM users WHERE id = $1 RETURNING email",
        )
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete user {}: {:?}", user_id, e);
            AppError::Database(e)
        })?;

        let Some(email) = email else {
            tracing::warn!("delete_user: no user found with id {}", user_id);
            return Err(AppError::NotFound(format!("User not found: {}", user_id)));
        };

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit user deletion: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "User deleted: id={}, email={}, reviews_removed={}",
            user_id,
            email,
            deleted_reviews
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    async fn insert_user(pool: &PgPool, email: &str) -> Uuid {
        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO users (name, email, password_hash) VALUES ('Test', $1, 'x') RETURNING id",
        )
        .bind(email)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    async fn insert_review(pool: &PgPool, user_id: Uuid) {
        sqlx::query(
            "INSERT INTO reviews (user_id, village_id, rating, comment) VALUES ($1, $2, 4, 'Good')",
        )
        .bind(user_id)
        .bind(Uuid::new_v4())
        .execute(pool)
        .await
        .unwrap();
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_delete_user_removes_their_reviews_only(pool: PgPool) {
        let svc = AdminService::new(pool.clone());
        let doomed = insert_user(&pool, "doomed@example.com").await;
        let kept = insert_user(&pool, "kept@example.com").await;
        insert_review(&pool, doomed).await;
        insert_review(&pool, doomed).await;
        insert_review(&pool, kept).await;

        svc.delete_user(doomed).await.unwrap();

        let analytics = svc.analytics().await.unwrap();
        assert_eq!(analytics.total_users, 1);
        assert_eq!(analytics.total_reviews, 1);
        assert_eq!(analytics.total_villages, 0);
        assert_eq!(analytics.monthly_visitors, None);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_delete_unknown_user_is_not_found(pool: PgPool) {
        let svc = AdminService::new(pool);
        let id = Uuid::new_v4();

        let err = svc.delete_user(id).await.unwrap_err();

        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        match err {
            AppError::NotFound(msg) => assert_eq!(msg, format!("User not found: {}", id)),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
