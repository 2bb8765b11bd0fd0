use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

use super::navigator::{Navigator, View};
use super::token_store::TokenStore;
use crate::client::api::IdentityApi;
use crate::client::error::{ClientError, Result};
use crate::features::auth::dtos::{
    AuthResponseDto, LoginRequestDto, RegisterAdminRequestDto, RegisterRequestDto,
};
use crate::features::auth::model::{has_capability, Capability, Role};
use crate::features::users::dtos::{UpdateProfileDto, UserResponseDto};
use crate::shared::constants::ADMIN_REQUIRED_MESSAGE;

const SUPERSEDED_SIGN_IN_MESSAGE: &str = "Sign-in was superseded by a newer session change";

/// Which accounts a store accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionScope {
    /// Any signed-in account
    User,
    /// Admin accounts only; other roles are treated as signed out
    Admin,
}

impl SessionScope {
    pub fn admits(self, role: Role) -> bool {
        match self {
            SessionScope::User => true,
            SessionScope::Admin => role == Role::Admin,
        }
    }
}

/// Snapshot published to observers
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub identity: Option<UserResponseDto>,
    /// True until bootstrap resolves and while a login is in flight
    pub loading: bool,
}

impl SessionState {
    fn unresolved() -> Self {
        Self {
            identity: None,
            loading: true,
        }
    }

    fn resolved(identity: Option<UserResponseDto>) -> Self {
        Self {
            identity,
            loading: false,
        }
    }
}

/// Outcome of gating a view on a capability
#[derive(Debug, Clone, PartialEq)]
pub enum ViewAccess {
    /// Bootstrap has not resolved; render a placeholder
    Loading,
    Granted(UserResponseDto),
    Redirect(View),
}

/// Single source of truth for the signed-in identity
pub struct SessionStore {
    api: Arc<dyn IdentityApi>,
    token_store: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
    scope: SessionScope,
    state: watch::Sender<SessionState>,
    // Bumped whenever the identity is replaced, so late responses can be dropped
    generation: AtomicU64,
}

impl SessionStore {
    pub fn new(
        api: Arc<dyn IdentityApi>,
        token_store: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
        scope: SessionScope,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::unresolved());
        Self {
            api,
            token_store,
            navigator,
            scope,
            state,
            generation: AtomicU64::new(0),
        }
    }

    pub fn scope(&self) -> SessionScope {
        self.scope
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn identity(&self) -> Option<UserResponseDto> {
        self.state.borrow().identity.clone()
    }

    /// Bootstrap from the persisted token.
    ///
    /// Always leaves the store not loading. Without a token no request is made.
    /// Any failure, or a role the scope does not admit, clears both the
    /// identity and the persisted token.
    pub async fn init(&self) -> SessionState {
        let generation = self.generation.load(Ordering::SeqCst);
        self.set_loading(true);

        if self.token_store.load().is_none() {
            tracing::debug!("No persisted token; session is anonymous");
            return self.resolve_if_current(generation, None);
        }

        match self.api.current_user().await {
            Ok(user) if self.scope.admits(user.role) => {
                tracing::debug!("Session restored for user {}", user.id);
                self.resolve_if_current(generation, Some(user))
            }
            Ok(user) => {
                tracing::warn!(
                    "Persisted session for user {} has role {}, not admitted by {:?} scope",
                    user.id,
                    user.role,
                    self.scope
                );
                self.forget_if_current(generation)
            }
            Err(e) => {
                tracing::warn!("Identity check failed, clearing session: {}", e);
                self.forget_if_current(generation)
            }
        }
    }

    /// Drop in-memory state. The persisted token is left alone.
    pub fn dispose(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.state.send_replace(SessionState::unresolved());
    }

    /// Wait until bootstrap (or an in-flight login) has resolved
    pub async fn ready(&self) -> SessionState {
        let mut rx = self.state.subscribe();
        let state = match rx.wait_for(|s| !s.loading).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        state
    }

    pub async fn login(&self, credentials: LoginRequestDto) -> Result<UserResponseDto> {
        let generation = self.begin_sign_in();
        let result = self.api.login(&credentials).await;
        self.accept(generation, result)
    }

    pub async fn register(&self, request: RegisterRequestDto) -> Result<UserResponseDto> {
        let generation = self.begin_sign_in();
        let result = self.api.register(&request).await;
        self.accept(generation, result)
    }

    /// Create an admin account and sign in as it
    pub async fn register_admin(&self, request: RegisterAdminRequestDto) -> Result<UserResponseDto> {
        let generation = self.begin_sign_in();
        let result = self.api.register_admin(&request).await;
        self.accept(generation, result)
    }

    /// Clear identity and token, then reset navigation to the home view
    pub fn logout(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.clear_token();
        self.state.send_replace(SessionState::resolved(None));
        tracing::debug!("Signed out");
        self.navigator.reset_to(View::Home);
    }

    /// Send the whitelisted profile fields; the server's reply replaces the
    /// cached identity.
    pub async fn update_profile(&self, fields: UpdateProfileDto) -> Result<UserResponseDto> {
        if self.identity().is_none() {
            return Err(ClientError::Unauthorized(
                "No token, authorization denied".to_string(),
            ));
        }
        if fields.is_empty() {
            return Err(ClientError::Validation(
                "No valid fields provided for update".to_string(),
            ));
        }

        let generation = self.generation.load(Ordering::SeqCst);
        let user = self.api.update_profile(&fields).await?;

        if self.generation.load(Ordering::SeqCst) == generation {
            self.state.send_modify(|s| s.identity = Some(user.clone()));
        }
        Ok(user)
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.state
            .borrow()
            .identity
            .as_ref()
            .is_some_and(|u| has_capability(u.role, capability))
    }

    /// Decide what a view gated on `capability` should render
    pub fn guard(&self, capability: Capability) -> ViewAccess {
        let state = self.state.borrow();
        if state.loading {
            return ViewAccess::Loading;
        }
        match state.identity.as_ref() {
            Some(user) if has_capability(user.role, capability) => ViewAccess::Granted(user.clone()),
            _ => ViewAccess::Redirect(View::Login),
        }
    }

    /// [`guard`](Self::guard), performing the redirect through the navigator
    pub fn enforce(&self, capability: Capability) -> ViewAccess {
        let access = self.guard(capability);
        if let ViewAccess::Redirect(view) = access {
            self.navigator.redirect(view);
        }
        access
    }

    fn begin_sign_in(&self) -> u64 {
        let generation = self.generation.load(Ordering::SeqCst);
        self.set_loading(true);
        generation
    }

    /// Apply a sign-in reply, unless a logout or another sign-in landed first
    fn accept(&self, generation: u64, result: Result<AuthResponseDto>) -> Result<UserResponseDto> {
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("Discarding stale sign-in response");
            return Err(ClientError::Unauthorized(SUPERSEDED_SIGN_IN_MESSAGE.to_string()));
        }

        let auth = match result {
            Ok(auth) => auth,
            Err(e) => {
                self.set_loading(false);
                return Err(e);
            }
        };

        if !self.scope.admits(auth.user.role) {
            tracing::warn!(
                "Sign-in as {} rejected: role {} not admitted by {:?} scope",
                auth.user.id,
                auth.user.role,
                self.scope
            );
            self.generation.fetch_add(1, Ordering::SeqCst);
            self.clear_token();
            self.state.send_replace(SessionState::resolved(None));
            return Err(ClientError::AccessDenied(ADMIN_REQUIRED_MESSAGE.to_string()));
        }

        if let Err(e) = self.token_store.save(&auth.token) {
            tracing::warn!("Failed to persist token; session will not survive restart: {}", e);
        }
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.state
            .send_replace(SessionState::resolved(Some(auth.user.clone())));
        tracing::debug!("Signed in as {} ({})", auth.user.id, auth.user.role);

        Ok(auth.user)
    }

    fn set_loading(&self, loading: bool) {
        self.state.send_modify(|s| s.loading = loading);
    }

    fn clear_token(&self) {
        if let Err(e) = self.token_store.clear() {
            tracing::warn!("Failed to clear persisted token: {}", e);
        }
    }

    fn resolve_if_current(&self, generation: u64, identity: Option<UserResponseDto>) -> SessionState {
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("Discarding stale identity check");
            return self.state();
        }
        let state = SessionState::resolved(identity);
        self.state.send_replace(state.clone());
        state
    }

    fn forget_if_current(&self, generation: u64) -> SessionState {
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("Discarding stale identity check");
            return self.state();
        }
        self.clear_token();
        self.resolve_if_current(generation, None)
    }
}
