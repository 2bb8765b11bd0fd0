use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admin::{dtos as admin_dtos, handlers as admin_handlers};
use crate::features::auth;
use crate::features::reviews::{dtos as reviews_dtos, handlers as reviews_handlers};
use crate::features::users::{dtos as users_dtos, handlers::profile_handler};
use crate::features::villages::{
    dtos as villages_dtos, handlers as villages_handlers, models as villages_models,
};
use crate::shared::types::{ApiResponse, MessageDto, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::register,
        auth::handlers::register_admin,
        auth::handlers::login,
        // Users
        profile_handler::get_current_user,
        profile_handler::update_profile,
        profile_handler::list_users,
        // Villages
        villages_handlers::list_villages,
        villages_handlers::get_village,
        villages_handlers::create_village,
        villages_handlers::update_village,
        villages_handlers::delete_village,
        // Search
        villages_handlers::search_by_name,
        villages_handlers::search_by_district,
        // Reviews
        reviews_handlers::list_reviews,
        reviews_handlers::add_review,
        // Admin
        admin_handlers::get_analytics,
        admin_handlers::delete_user,
    ),
    components(
        schemas(
            // Shared
            Meta,
            MessageDto,
            ApiResponse<MessageDto>,
            // Auth
            auth::model::Role,
            auth::model::AuthenticatedUser,
            auth::dtos::RegisterRequestDto,
            auth::dtos::RegisterAdminRequestDto,
            auth::dtos::LoginRequestDto,
            auth::dtos::AuthResponseDto,
            ApiResponse<auth::dtos::AuthResponseDto>,
            // Users
            users_dtos::UserResponseDto,
            users_dtos::UpdateProfileDto,
            ApiResponse<users_dtos::UserResponseDto>,
            ApiResponse<Vec<users_dtos::UserResponseDto>>,
            // Villages
            villages_models::Sections,
            villages_models::NameOrigin,
            villages_models::NamePart,
            villages_models::History,
            villages_models::TimelineEntry,
            villages_models::Geography,
            villages_models::GeographyFeature,
            villages_models::NamedItem,
            villages_models::Economy,
            villages_models::Profile,
            villages_models::Fact,
            villages_models::PointKind,
            villages_models::GeoPoint,
            villages_dtos::VillagePayloadDto,
            villages_dtos::VillageResponseDto,
            ApiResponse<villages_dtos::VillageResponseDto>,
            ApiResponse<Vec<villages_dtos::VillageResponseDto>>,
            // Reviews
            reviews_dtos::CreateReviewDto,
            reviews_dtos::ReviewAuthorDto,
            reviews_dtos::ReviewResponseDto,
            ApiResponse<reviews_dtos::ReviewResponseDto>,
            ApiResponse<Vec<reviews_dtos::ReviewResponseDto>>,
            // Admin
            admin_dtos::AnalyticsDto,
            ApiResponse<admin_dtos::AnalyticsDto>,
        )
    ),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "users", description = "Current account and profile management"),
        (name = "villages", description = "Village records"),
        (name = "search", description = "Village search by name or district (public)"),
        (name = "reviews", description = "Village reviews"),
        (name = "admin", description = "Admin endpoints (admin only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "VillageHub API",
        version = "0.1.0",
        description = "API documentation for VillageHub",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/auth/register",
            "/api/auth/register-admin",
            "/api/auth/login",
            "/api/auth/current",
            "/api/auth/profile",
            "/api/auth/users",
            "/api/villages",
            "/api/villages/{id}",
            "/api/search/name",
            "/api/search/district",
            "/api/reviews/{village_id}",
            "/api/admin/analytics",
            "/api/admin/users/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
