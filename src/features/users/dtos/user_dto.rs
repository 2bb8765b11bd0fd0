use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::auth::model::Role;

/// A user account as seen by clients (never includes the password hash)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Self-service profile update. Only these fields can be changed; anything
/// else in the request body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileDto {
    #[validate(
        length(max = 128, message = "Name must not exceed 128 characters"),
        custom(function = "crate::shared::validation::not_blank", message = "Name must not be blank")
    )]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[validate(length(max = 32, message = "Phone must not exceed 32 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[validate(length(max = 128, message = "Designation must not exceed 128 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,

    #[validate(length(max = 128, message = "Organization must not exceed 128 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,

    #[validate(length(max = 128, message = "Location must not exceed 128 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[validate(length(max = 2000, message = "Bio must not exceed 2000 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl UpdateProfileDto {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.designation.is_none()
            && self.organization.is_none()
            && self.location.is_none()
            && self.bio.is_none()
            && self.avatar_url.is_none()
    }
}
