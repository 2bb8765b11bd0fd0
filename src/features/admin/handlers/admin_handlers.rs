use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::admin::dtos::*;
use crate::features::admin::services::AdminService;
use crate::features::auth::guards::{RequireManageUsers, RequireViewAnalytics};
use crate::shared::types::{ApiResponse, MessageDto};

/// Dashboard counters
#[utoipa::path(
    get,
    path = "/api/admin/analytics",
    responses(
        (status = 200, description = "Analytics counters", body = ApiResponse<AnalyticsDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_analytics(
    RequireViewAnalytics(_user): RequireViewAnalytics,
    State(service): State<Arc<AdminService>>,
) -> Result<Json<ApiResponse<AnalyticsDto>>> {
    let analytics = service.analytics().await?;
    Ok(Json(ApiResponse::success(Some(analytics), None, None)))
}

/// Delete a user and their review history
#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User and related history deleted", body = ApiResponse<MessageDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "User not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_user(
    RequireManageUsers(admin): RequireManageUsers,
    State(service): State<Arc<AdminService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageDto>>> {
    tracing::info!("Admin {} deleting user {}", admin.user_id, id);
    service.delete_user(id).await?;

    let message = MessageDto::new("User and related history deleted");
    Ok(Json(ApiResponse::success(
        Some(message.clone()),
        Some(message.message),
        None,
    )))
}
