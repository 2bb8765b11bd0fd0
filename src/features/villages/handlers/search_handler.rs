use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::core::error::Result;
use crate::features::villages::dtos::{DistrictSearchQuery, NameSearchQuery, VillageResponseDto};
use crate::features::villages::services::VillageService;
use crate::shared::types::{ApiResponse, Meta};

/// Search villages by name
#[utoipa::path(
    get,
    path = "/api/search/name",
    params(NameSearchQuery),
    responses(
        (status = 200, description = "Matching villages sorted by name", body = ApiResponse<Vec<VillageResponseDto>>),
        (status = 400, description = "Name parameter is required")
    ),
    tag = "search"
)]
pub async fn search_by_name(
    State(service): State<Arc<VillageService>>,
    Query(query): Query<NameSearchQuery>,
) -> Result<Json<ApiResponse<Vec<VillageResponseDto>>>> {
    let villages = service.search_by_name(query.name.as_deref()).await?;
    let total = villages.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(villages),
        None,
        Some(Meta { total }),
    )))
}

/// Search villages by district
#[utoipa::path(
    get,
    path = "/api/search/district",
    params(DistrictSearchQuery),
    responses(
        (status = 200, description = "Matching villages sorted by name", body = ApiResponse<Vec<VillageResponseDto>>),
        (status = 400, description = "District parameter is required")
    ),
    tag = "search"
)]
pub async fn search_by_district(
    State(service): State<Arc<VillageService>>,
    Query(query): Query<DistrictSearchQuery>,
) -> Result<Json<ApiResponse<Vec<VillageResponseDto>>>> {
    let villages = service
        .search_by_district(query.district.as_deref())
        .await?;
    let total = villages.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(villages),
        None,
        Some(Meta { total }),
    )))
}
