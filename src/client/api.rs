//! Typed HTTP access to the VillageHub REST API.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::client::error::{ClientError, Result};
use crate::client::session::TokenStore;
use crate::features::admin::dtos::AnalyticsDto;
use crate::features::auth::dtos::{
    AuthResponseDto, LoginRequestDto, RegisterAdminRequestDto, RegisterRequestDto,
};
use crate::features::reviews::dtos::{CreateReviewDto, ReviewResponseDto};
use crate::features::users::dtos::{UpdateProfileDto, UserResponseDto};
use crate::features::villages::dtos::{VillagePayloadDto, VillageResponseDto};
use crate::shared::types::{ApiResponse, MessageDto};

const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root including the `/api` prefix
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// Read `VILLAGEHUB_API_URL`, falling back to the local development server
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("VILLAGEHUB_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(base_url)
    }
}

/// Village writes used by the editor
#[async_trait]
pub trait VillageApi: Send + Sync {
    async fn create_village(&self, payload: &VillagePayloadDto) -> Result<VillageResponseDto>;

    async fn update_village(
        &self,
        id: Uuid,
        payload: &VillagePayloadDto,
    ) -> Result<VillageResponseDto>;
}

/// Identity calls used by the session store.
///
/// Implementations attach the persisted bearer token themselves.
#[async_trait]
pub trait IdentityApi: Send + Sync {
    async fn login(&self, credentials: &LoginRequestDto) -> Result<AuthResponseDto>;

    async fn register(&self, request: &RegisterRequestDto) -> Result<AuthResponseDto>;

    /// Create an admin account; needs the server's admin secret
    async fn register_admin(&self, request: &RegisterAdminRequestDto) -> Result<AuthResponseDto>;

    async fn current_user(&self) -> Result<UserResponseDto>;

    async fn update_profile(&self, fields: &UpdateProfileDto) -> Result<UserResponseDto>;
}

/// Error body shape shared by the envelope and bare `{ message }` replies
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP client for every endpoint of the service
pub struct ApiClient {
    http_client: Client,
    base_url: String,
    token_store: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, token_store: Arc<dyn TokenStore>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token_store,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token_store.load() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request and unwrap the `data` of the response envelope
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.authorized(request).send().await?;
        let status = response.status();

        if status.is_success() {
            let envelope = response.json::<ApiResponse<T>>().await.map_err(|e| {
                tracing::warn!("Failed to decode API response: {}", e);
                ClientError::Transport
            })?;
            return envelope.data.ok_or_else(|| {
                tracing::warn!("API response carried no data");
                ClientError::Transport
            });
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message);

        tracing::debug!("API error: HTTP {} - {:?}", status, message);
        Err(ClientError::from_status(status.as_u16(), message))
    }

    // ==================== Villages ====================

    pub async fn list_villages(&self) -> Result<Vec<VillageResponseDto>> {
        self.send(self.http_client.get(self.url("/villages"))).await
    }

    pub async fn get_village(&self, id: Uuid) -> Result<VillageResponseDto> {
        self.send(self.http_client.get(self.url(&format!("/villages/{}", id))))
            .await
    }

    pub async fn delete_village(&self, id: Uuid) -> Result<MessageDto> {
        self.send(self.http_client.delete(self.url(&format!("/villages/{}", id))))
            .await
    }

    pub async fn search_by_name(&self, name: &str) -> Result<Vec<VillageResponseDto>> {
        self.send(
            self.http_client
                .get(self.url("/search/name"))
                .query(&[("name", name)]),
        )
        .await
    }

    pub async fn search_by_district(&self, district: &str) -> Result<Vec<VillageResponseDto>> {
        self.send(
            self.http_client
                .get(self.url("/search/district"))
                .query(&[("district", district)]),
        )
        .await
    }

    // ==================== Reviews ====================

    pub async fn list_reviews(&self, village_id: Uuid) -> Result<Vec<ReviewResponseDto>> {
        self.send(
            self.http_client
                .get(self.url(&format!("/reviews/{}", village_id))),
        )
        .await
    }

    pub async fn add_review(
        &self,
        village_id: Uuid,
        review: &CreateReviewDto,
    ) -> Result<ReviewResponseDto> {
        self.send(
            self.http_client
                .post(self.url(&format!("/reviews/{}", village_id)))
                .json(review),
        )
        .await
    }

    // ==================== Accounts & admin ====================

    pub async fn list_users(&self) -> Result<Vec<UserResponseDto>> {
        self.send(self.http_client.get(self.url("/auth/users"))).await
    }

    pub async fn analytics(&self) -> Result<AnalyticsDto> {
        self.send(self.http_client.get(self.url("/admin/analytics")))
            .await
    }

    pub async fn delete_user(&self, id: Uuid) -> Result<MessageDto> {
        self.send(
            self.http_client
                .delete(self.url(&format!("/admin/users/{}", id))),
        )
        .await
    }
}

#[async_trait]
impl VillageApi for ApiClient {
    async fn create_village(&self, payload: &VillagePayloadDto) -> Result<VillageResponseDto> {
        self.send(self.http_client.post(self.url("/villages")).json(payload))
            .await
    }

    async fn update_village(
        &self,
        id: Uuid,
        payload: &VillagePayloadDto,
    ) -> Result<VillageResponseDto> {
        self.send(
            self.http_client
                .put(self.url(&format!("/villages/{}", id)))
                .json(payload),
        )
        .await
    }
}

#[async_trait]
impl IdentityApi for ApiClient {
    async fn login(&self, credentials: &LoginRequestDto) -> Result<AuthResponseDto> {
        self.send(self.http_client.post(self.url("/auth/login")).json(credentials))
            .await
    }

    async fn register(&self, request: &RegisterRequestDto) -> Result<AuthResponseDto> {
        self.send(self.http_client.post(self.url("/auth/register")).json(request))
            .await
    }

    async fn register_admin(&self, request: &RegisterAdminRequestDto) -> Result<AuthResponseDto> {
        self.send(
            self.http_client
                .post(self.url("/auth/register-admin"))
                .json(request),
        )
        .await
    }

    async fn current_user(&self) -> Result<UserResponseDto> {
        self.send(self.http_client.get(self.url("/auth/current")))
            .await
    }

    async fn update_profile(&self, fields: &UpdateProfileDto) -> Result<UserResponseDto> {
        self.send(self.http_client.put(self.url("/auth/profile")).json(fields))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::session::MemoryTokenStore;
    use crate::core::error::AppError;
    use crate::features::auth::model::Role;
    use axum::{
        extract::Path,
        http::{HeaderMap, StatusCode},
        routing::{get, post},
        Json, Router,
    };
    use chrono::Utc;
    use serde_json::json;

    fn sample_user(role: Role) -> UserResponseDto {
        UserResponseDto {
            id: Uuid::nil(),
            name: "Meera".to_string(),
            email: "meera@example.com".to_string(),
            role,
            phone: None,
            designation: None,
            organization: None,
            location: None,
            bio: None,
            avatar_url: None,
            created_at: Utc::now(),
        }
    }

    async fn current(
        headers: HeaderMap,
    ) -> std::result::Result<Json<ApiResponse<UserResponseDto>>, AppError> {
        match headers.get("authorization").and_then(|h| h.to_str().ok()) {
            Some("Bearer good-token") => Ok(Json(ApiResponse::success(
                Some(sample_user(Role::Admin)),
                None,
                None,
            ))),
            _ => Err(AppError::Unauthorized("Token is not valid".to_string())),
        }
    }

    async fn village(
        Path(id): Path<Uuid>,
    ) -> std::result::Result<Json<ApiResponse<VillageResponseDto>>, AppError> {
        Err(AppError::NotFound(format!("Village {} not found", id)))
    }

    async fn create(Json(payload): Json<VillagePayloadDto>) -> (StatusCode, Json<serde_json::Value>) {
        (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "data": {
                    "id": Uuid::nil(),
                    "name": payload.name,
                    "district": payload.district,
                    "description": payload.description,
                    "image": payload.image,
                    "sections": payload.sections,
                    "location": payload.location,
                    "createdAt": Utc::now(),
                    "updatedAt": Utc::now()
                },
                "message": null,
                "meta": null,
                "errors": null
            })),
        )
    }

    async fn broken() -> (StatusCode, &'static str) {
        (StatusCode::INTERNAL_SERVER_ERROR, "stack trace here")
    }

    async fn spawn_server() -> String {
        let app = Router::new()
            .route("/api/auth/current", get(current))
            .route("/api/villages", post(create))
            .route("/api/villages/{id}", get(village))
            .route("/api/admin/analytics", get(broken));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/api", addr)
    }

    fn client(base_url: String, token: Option<&str>) -> ApiClient {
        let store = Arc::new(MemoryTokenStore::new(token.map(str::to_string)));
        ApiClient::new(ClientConfig::new(base_url), store).unwrap()
    }

    #[tokio::test]
    async fn test_bearer_token_is_attached() {
        let base = spawn_server().await;

        let user = client(base.clone(), Some("good-token"))
            .current_user()
            .await
            .unwrap();
        assert_eq!(user.role, Role::Admin);

        let err = client(base, None).current_user().await.unwrap_err();
        assert_eq!(err, ClientError::Unauthorized("Token is not valid".to_string()));
    }

    #[tokio::test]
    async fn test_server_message_is_surfaced_verbatim() {
        let base = spawn_server().await;
        let id = Uuid::new_v4();

        let err = client(base, None).get_village(id).await.unwrap_err();
        assert_eq!(err.to_string(), format!("Village {} not found", id));
    }

    #[tokio::test]
    async fn test_server_failure_collapses_to_generic_message() {
        let base = spawn_server().await;
        let err = client(base, None).analytics().await.unwrap_err();
        assert_eq!(err.to_string(), "Server error");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(format!("http://{}/api", addr), None)
            .list_villages()
            .await
            .unwrap_err();
        assert_eq!(err, ClientError::Transport);
    }

    #[tokio::test]
    async fn test_create_village_round_trips_payload() {
        let base = spawn_server().await;
        let payload = VillagePayloadDto {
            name: "Test".to_string(),
            district: "X".to_string(),
            description: "Y".to_string(),
            image: "z.jpg".to_string(),
            ..Default::default()
        };

        let created = client(base, Some("good-token"))
            .create_village(&payload)
            .await
            .unwrap();
        assert_eq!(created.name, "Test");
        assert_eq!(created.location.coordinates, [0.0, 0.0]);
    }

    #[test]
    fn test_config_trims_trailing_slash() {
        let api = ApiClient::new(
            ClientConfig::new("http://example.test/api/"),
            Arc::new(MemoryTokenStore::default()),
        )
        .unwrap();
        assert_eq!(api.url("/villages"), "http://example.test/api/villages");
    }
}
