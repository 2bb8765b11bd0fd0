use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::users::dtos::{UpdateProfileDto, UserResponseDto};
use crate::features::users::models::{user::USER_COLUMNS, User};

/// Service for reading and updating user profiles
pub struct UserProfileService {
    pool: PgPool,
}

impl UserProfileService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the caller's own account
    pub async fn get_current(&self, user_id: Uuid) -> Result<UserResponseDto> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get user {}: {:?}", user_id, e);
            AppError::Database(e)
        })?;

        user.map(Into::into)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Apply a whitelisted profile update and return the stored result
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        dto: UpdateProfileDto,
    ) -> Result<UserResponseDto> {
        if dto.is_empty() {
            return Err(AppError::BadRequest(
                "No valid fields provided for update".to_string(),
            ));
        }

        if let Some(email) = dto.email.as_deref() {
            let taken = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1) AND id <> $2)",
            )
            .bind(email)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to check email availability: {:?}", e);
                AppError::Database(e)
            })?;

            if taken {
                return Err(AppError::BadRequest("Email is already in use".to_string()));
            }
        }

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                designation = COALESCE($5, designation),
                organization = COALESCE($6, organization),
                location = COALESCE($7, location),
                bio = COALESCE($8, bio),
                avatar_url = COALESCE($9, avatar_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(user_id)
        .bind(dto.name.as_deref().map(str::trim))
        .bind(dto.email.as_deref().map(str::trim))
        .bind(dto.phone)
        .bind(dto.designation)
        .bind(dto.organization)
        .bind(dto.location)
        .bind(dto.bio)
        .bind(dto.avatar_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update profile for {}: {:?}", user_id, e);
            AppError::Database(e)
        })?;

        let user = user.ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        tracing::info!("Profile updated: id={}", user.id);

        Ok(user.into())
    }

    /// List every account, newest first
    pub async fn list_users(&self) -> Result<Vec<UserResponseDto>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY created_at DESC",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list users: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(users.into_iter().map(Into::into).collect())
    }
}
