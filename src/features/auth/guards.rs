//! Capability guards for handlers.
//!
//! Each guard extracts the authenticated user inserted by the auth middleware
//! and checks a single [`Capability`] through [`has_capability`]:
//!
//! - `RequireManageVillages`: create, update and delete villages
//! - `RequireManageUsers`: list and delete accounts
//! - `RequireViewAnalytics`: admin dashboard counters
//! - `RequireWriteReviews`: post reviews
//! - `RequireEditOwnProfile`: update one's own profile
//!
//! [`has_capability`]: crate::features::auth::model::has_capability

use crate::core::error::AppError;
use crate::features::auth::model::{AuthenticatedUser, Capability};
use crate::shared::constants::ADMIN_REQUIRED_MESSAGE;
use axum::{extract::FromRequestParts, http::request::Parts};

fn authorize(parts: &Parts, capability: Capability) -> Result<AuthenticatedUser, AppError> {
    let user = parts
        .extensions
        .get::<AuthenticatedUser>()
        .ok_or_else(|| AppError::Unauthorized("No token, authorization denied".to_string()))?;

    if !user.can(capability) {
        tracing::warn!(
            "User {} with role {} denied {:?}",
            user.user_id,
            user.role,
            capability
        );
        return Err(AppError::Forbidden(ADMIN_REQUIRED_MESSAGE.to_string()));
    }

    Ok(user.clone())
}

/// Guard for village write operations.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireManageVillages(user): RequireManageVillages) { ... }
/// ```
pub struct RequireManageVillages(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireManageVillages
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        authorize(parts, Capability::ManageVillages).map(RequireManageVillages)
    }
}

/// Guard for account administration.
pub struct RequireManageUsers(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireManageUsers
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        authorize(parts, Capability::ManageUsers).map(RequireManageUsers)
    }
}

/// Guard for the analytics dashboard.
pub struct RequireViewAnalytics(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireViewAnalytics
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        authorize(parts, Capability::ViewAnalytics).map(RequireViewAnalytics)
    }
}

/// Guard for posting reviews. Any signed-in account passes.
pub struct RequireWriteReviews(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireWriteReviews
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        authorize(parts, Capability::WriteReviews).map(RequireWriteReviews)
    }
}

/// Guard for profile updates. Any signed-in account passes.
pub struct RequireEditOwnProfile(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireEditOwnProfile
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        authorize(parts, Capability::EditOwnProfile).map(RequireEditOwnProfile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::Role;
    use axum::http::{Request, StatusCode};
    use uuid::Uuid;

    fn parts_with(user: Option<AuthenticatedUser>) -> Parts {
        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();
        if let Some(user) = user {
            parts.extensions.insert(user);
        }
        parts
    }

    #[tokio::test]
    async fn test_admin_passes_manage_villages() {
        let admin = AuthenticatedUser {
            user_id: Uuid::new_v4(),
            role: Role::Admin,
        };
        let mut parts = parts_with(Some(admin.clone()));
        let RequireManageVillages(user) = RequireManageVillages::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(user, admin);
    }

    #[tokio::test]
    async fn test_user_is_forbidden_from_admin_guards() {
        let user = AuthenticatedUser {
            user_id: Uuid::new_v4(),
            role: Role::User,
        };
        let mut parts = parts_with(Some(user));
        let err = RequireManageUsers::from_request_parts(&mut parts, &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_missing_identity_is_unauthorized() {
        let mut parts = parts_with(None);
        let err = RequireWriteReviews::from_request_parts(&mut parts, &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_plain_user_may_edit_own_profile() {
        let plain = AuthenticatedUser {
            user_id: Uuid::new_v4(),
            role: Role::User,
        };
        let mut parts = parts_with(Some(plain.clone()));
        let RequireEditOwnProfile(user) = RequireEditOwnProfile::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(user, plain);

        let mut anonymous = parts_with(None);
        let err = RequireEditOwnProfile::from_request_parts(&mut anonymous, &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }
}
