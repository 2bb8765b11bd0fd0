use serde::{Deserialize, Serialize};
use sqlx::Type;
use utoipa::ToSchema;
use uuid::Uuid;

/// Account role, stored as the `user_role` database enum
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Type, ToSchema,
)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// A named permission derived from a role.
///
/// Every authorization decision, on the server guards and in the client
/// session store, goes through [`has_capability`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Create, update and delete villages
    ManageVillages,
    /// List and delete user accounts
    ManageUsers,
    /// Read the admin analytics counters
    ViewAnalytics,
    /// Post reviews on villages
    WriteReviews,
    /// Update one's own profile
    EditOwnProfile,
}

pub fn has_capability(role: Role, capability: Capability) -> bool {
    match capability {
        Capability::ManageVillages | Capability::ManageUsers | Capability::ViewAnalytics => {
            role == Role::Admin
        }
        Capability::WriteReviews | Capability::EditOwnProfile => true,
    }
}

/// Caller identity extracted from a validated bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn can(&self, capability: Capability) -> bool {
        has_capability(self.role, capability)
    }
}
