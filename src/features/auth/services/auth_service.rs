use sqlx::PgPool;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{
    AuthResponseDto, LoginRequestDto, RegisterAdminRequestDto, RegisterRequestDto,
};
use crate::features::auth::jwt::JwtService;
use crate::features::auth::model::Role;
use crate::features::auth::password::{hash_password, verify_password};
use crate::features::users::models::{user::USER_COLUMNS, User};

/// Service for registration and login
pub struct AuthService {
    pool: PgPool,
    jwt: Arc<JwtService>,
    admin_secret: Option<String>,
}

impl AuthService {
    pub fn new(pool: PgPool, jwt: Arc<JwtService>, admin_secret: Option<String>) -> Self {
        Self {
            pool,
            jwt,
            admin_secret,
        }
    }

    /// Register a plain user account
    pub async fn register(&self, dto: RegisterRequestDto) -> Result<AuthResponseDto> {
        let user = self
            .create_account(&dto.name, &dto.email, &dto.password, Role::User)
            .await?;
        self.auth_response(user)
    }

    /// Register an admin account; requires the configured shared secret
    pub async fn register_admin(&self, dto: RegisterAdminRequestDto) -> Result<AuthResponseDto> {
        self.check_admin_secret(&dto.admin_secret)?;

        let user = self
            .create_account(&dto.name, &dto.email, &dto.password, Role::Admin)
            .await?;
        self.auth_response(user)
    }

    pub async fn login(&self, dto: LoginRequestDto) -> Result<AuthResponseDto> {
        let user = self.find_by_email(&dto.email).await?.ok_or_else(|| {
            tracing::debug!("Login for unknown email");
            AppError::BadRequest("Invalid credentials".to_string())
        })?;

        if !verify_password(&dto.password, &user.password_hash)? {
            tracing::debug!("Login with wrong password for user {}", user.id);
            return Err(AppError::BadRequest("Invalid credentials".to_string()));
        }

        tracing::info!("User logged in: id={}, role={}", user.id, user.role);
        self.auth_response(user)
    }

    fn check_admin_secret(&self, provided: &str) -> Result<()> {
        match self.admin_secret.as_deref() {
            Some(expected) if expected == provided => Ok(()),
            Some(_) => {
                tracing::warn!("Admin registration attempted with an invalid secret");
                Err(AppError::Forbidden("Invalid admin secret".to_string()))
            }
            None => Err(AppError::Forbidden(
                "Admin registration is disabled".to_string(),
            )),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE LOWER(email) = LOWER($1)",
            USER_COLUMNS
        ))
        .bind(email.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up user by email: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn create_account(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<User> {
        if self.find_by_email(email).await?.is_some() {
            return Err(AppError::BadRequest("User already exists".to_string()));
        }

        let password_hash = hash_password(password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (name, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(name.trim())
        .bind(email.trim())
        .bind(password_hash)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // A concurrent registration can still hit the unique index
            if let sqlx::Error::Database(ref db) = e {
                if db.is_unique_violation() {
                    return AppError::BadRequest("User already exists".to_string());
                }
            }
            tracing::error!("Failed to create user: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("User registered: id={}, role={}", user.id, user.role);
        Ok(user)
    }

    fn auth_response(&self, user: User) -> Result<AuthResponseDto> {
        let token = self.jwt.issue_token(user.id, user.role)?;
        Ok(AuthResponseDto::bearer(
            token,
            self.jwt.expires_in(),
            user.into(),
        ))
    }
}
