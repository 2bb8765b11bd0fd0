use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::{RequireEditOwnProfile, RequireManageUsers};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::users::dtos::{UpdateProfileDto, UserResponseDto};
use crate::features::users::services::UserProfileService;
use crate::shared::types::{ApiResponse, Meta};
use axum::{extract::State, Json};
use std::sync::Arc;
use validator::Validate;

/// Get the account behind the bearer token
#[utoipa::path(
    get,
    path = "/api/auth/current",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User no longer exists")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_current_user(
    user: AuthenticatedUser,
    State(service): State<Arc<UserProfileService>>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    let current = service.get_current(user.user_id).await?;
    Ok(Json(ApiResponse::success(Some(current), None, None)))
}

#[utoipa::path(
    put,
    path = "/api/auth/profile",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated successfully", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Validation error, no fields, or email in use"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_profile(
    RequireEditOwnProfile(user): RequireEditOwnProfile,
    State(service): State<Arc<UserProfileService>>,
    AppJson(dto): AppJson<UpdateProfileDto>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let profile = service.update_profile(user.user_id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(profile),
        Some("Profile updated successfully".to_string()),
        None,
    )))
}

/// List all accounts (admin only)
#[utoipa::path(
    get,
    path = "/api/auth/users",
    responses(
        (status = 200, description = "All accounts, newest first", body = ApiResponse<Vec<UserResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin privileges required")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_users(
    RequireManageUsers(admin): RequireManageUsers,
    State(service): State<Arc<UserProfileService>>,
) -> Result<Json<ApiResponse<Vec<UserResponseDto>>>> {
    tracing::debug!("Listing users for admin {}", admin.user_id);
    let users = service.list_users().await?;
    let total = users.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(users),
        None,
        Some(Meta { total }),
    )))
}
