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
use crate::features::auth::guards::RequireManageVillages;
use crate::features::villages::dtos::{VillagePayloadDto, VillageResponseDto};
use crate::features::villages::services::VillageService;
use crate::shared::types::{ApiResponse, MessageDto, Meta};

/// List all villages sorted by name
#[utoipa::path(
    get,
    path = "/api/villages",
    responses(
        (status = 200, description = "All villages", body = ApiResponse<Vec<VillageResponseDto>>)
    ),
    tag = "villages"
)]
pub async fn list_villages(
    State(service): State<Arc<VillageService>>,
) -> Result<Json<ApiResponse<Vec<VillageResponseDto>>>> {
    let villages = service.list().await?;
    let total = villages.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(villages),
        None,
        Some(Meta { total }),
    )))
}

/// Get a village by id
#[utoipa::path(
    get,
    path = "/api/villages/{id}",
    params(
        ("id" = Uuid, Path, description = "Village ID")
    ),
    responses(
        (status = 200, description = "Village details", body = ApiResponse<VillageResponseDto>),
        (status = 404, description = "Village not found")
    ),
    tag = "villages"
)]
pub async fn get_village(
    State(service): State<Arc<VillageService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<VillageResponseDto>>> {
    let village = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(village), None, None)))
}

/// Create a village (admin only)
#[utoipa::path(
    post,
    path = "/api/villages",
    request_body = VillagePayloadDto,
    responses(
        (status = 201, description = "Village created", body = ApiResponse<VillageResponseDto>),
        (status = 400, description = "Missing required fields"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin privileges required")
    ),
    tag = "villages",
    security(("bearer_auth" = []))
)]
pub async fn create_village(
    RequireManageVillages(admin): RequireManageVillages,
    State(service): State<Arc<VillageService>>,
    AppJson(dto): AppJson<VillagePayloadDto>,
) -> Result<(StatusCode, Json<ApiResponse<VillageResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    tracing::debug!("Admin {} creating village '{}'", admin.user_id, dto.name);
    let village = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(village), None, None)),
    ))
}

/// Replace a village's content (admin only)
#[utoipa::path(
    put,
    path = "/api/villages/{id}",
    params(
        ("id" = Uuid, Path, description = "Village ID")
    ),
    request_body = VillagePayloadDto,
    responses(
        (status = 200, description = "Village updated", body = ApiResponse<VillageResponseDto>),
        (status = 400, description = "Missing required fields"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin privileges required"),
        (status = 404, description = "Village not found")
    ),
    tag = "villages",
    security(("bearer_auth" = []))
)]
pub async fn update_village(
    RequireManageVillages(_admin): RequireManageVillages,
    State(service): State<Arc<VillageService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<VillagePayloadDto>,
) -> Result<Json<ApiResponse<VillageResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let village = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(village), None, None)))
}

/// Delete a village (admin only)
#[utoipa::path(
    delete,
    path = "/api/villages/{id}",
    params(
        ("id" = Uuid, Path, description = "Village ID")
    ),
    responses(
        (status = 200, description = "Village removed", body = ApiResponse<MessageDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin privileges required"),
        (status = 404, description = "Village not found")
    ),
    tag = "villages",
    security(("bearer_auth" = []))
)]
pub async fn delete_village(
    RequireManageVillages(admin): RequireManageVillages,
    State(service): State<Arc<VillageService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageDto>>> {
    service.delete(id).await?;
    tracing::debug!("Village {} removed by admin {}", id, admin.user_id);

    let message = MessageDto::new("Village removed");
    Ok(Json(ApiResponse::success(
        Some(message.clone()),
        Some(message.message),
        None,
    )))
}
