use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::villages::models::{GeoPoint, Sections, Village};

/// Body accepted by the village create and update endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct VillagePayloadDto {
    #[validate(custom(
        function = "crate::shared::validation::not_blank",
        message = "Name is required"
    ))]
    pub name: String,

    #[validate(custom(
        function = "crate::shared::validation::not_blank",
        message = "District is required"
    ))]
    pub district: String,

    #[validate(custom(
        function = "crate::shared::validation::not_blank",
        message = "Description is required"
    ))]
    pub description: String,

    #[validate(custom(
        function = "crate::shared::validation::not_blank",
        message = "Image is required"
    ))]
    pub image: String,

    #[serde(default)]
    pub sections: Sections,

    #[serde(default)]
    pub location: GeoPoint,
}

/// Response DTO for a stored village
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VillageResponseDto {
    pub id: Uuid,
    pub name: String,
    pub district: String,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub sections: Sections,
    #[serde(default)]
    pub location: GeoPoint,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Village> for VillageResponseDto {
    fn from(v: Village) -> Self {
        Self {
            id: v.id,
            name: v.name,
            district: v.district,
            description: v.description,
            image: v.image,
            sections: v.sections.0,
            location: GeoPoint::new(v.longitude, v.latitude),
            created_at: v.created_at,
            updated_at: v.updated_at,
        }
    }
}

/// Query parameters for `GET /api/search/name`
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct NameSearchQuery {
    /// Case-insensitive substring of the village name
    #[param(example = "hampi")]
    pub name: Option<String>,
}

/// Query parameters for `GET /api/search/district`
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct DistrictSearchQuery {
    /// Case-insensitive substring of the district
    #[param(example = "vijayanagara")]
    pub district: Option<String>,
}
