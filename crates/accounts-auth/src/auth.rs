//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Main authentication module

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::config::AuthConfig;
use crate::guard::{AccessGuard, Requirement};
use crate::jwt::{Clock, JwtManager, SystemClock, INVALID_TOKEN_MESSAGE};
use crate::notify::{Notification, Notifier};
use crate::roles::{Role, RoleRegistry};
use crate::users::{Principal, SignUp, UserManager, UserStore};

/// Message returned for every failed login
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid user email or password";

/// Path of the password reset page, relative to the public base URL
pub const RESET_PASSWORD_PATH: &str = "/v1/users/me/reset_password_template";

/// Authentication result type
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication error
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Duplicate identity: {0}")]
    DuplicateIdentity(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Authentication failed: {0}")]
    Unauthenticated(String),

    #[error("Authorization failed: {0}")]
    Unauthorized(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Token generation failed: {0}")]
    TokenGeneration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn duplicate_identity(msg: String) -> Self {
        Self::DuplicateIdentity(msg)
    }

    pub fn not_found(msg: String) -> Self {
        Self::NotFound(msg)
    }

    pub fn invalid_credentials(msg: String) -> Self {
        Self::InvalidCredentials(msg)
    }

    pub fn unauthenticated(msg: String) -> Self {
        Self::Unauthenticated(msg)
    }

    pub fn unauthorized(msg: String) -> Self {
        Self::Unauthorized(msg)
    }

    pub fn validation(msg: String) -> Self {
        Self::Validation(msg)
    }

    pub fn configuration(msg: String) -> Self {
        Self::Configuration(msg)
    }

    pub fn token_generation(msg: String) -> Self {
        Self::TokenGeneration(msg)
    }

    pub fn internal(msg: String) -> Self {
        Self::Internal(msg)
    }

    /// Whether the error stems from a server-side fault rather than the request
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_) | Self::TokenGeneration(_) | Self::Internal(_)
        )
    }
}

/// Authentication manager
pub struct AuthManager {
    /// Configuration
    config: AuthConfig,

    /// JWT manager
    jwt_manager: JwtManager,

    /// Access guard
    guard: AccessGuard,

    /// User manager
    user_manager: UserManager,

    /// Statistics
    stats: Arc<RwLock<AuthStats>>,
}

impl AuthManager {
    /// Create new authentication manager
    pub async fn new(
        config: AuthConfig,
        store: Arc<dyn UserStore>,
        notifier: Arc<dyn Notifier>,
    ) -> AuthResult<Self> {
        Self::with_clock(config, store, notifier, Arc::new(SystemClock)).await
    }

    /// Create new authentication manager with an explicit time source
    pub async fn with_clock(
        config: AuthConfig,
        store: Arc<dyn UserStore>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> AuthResult<Self> {
        info!("Creating authentication manager");
        config.validate()?;

        let jwt_manager = JwtManager::new(config.jwt.clone(), clock)?;
        let guard = AccessGuard::new(Arc::new(RoleRegistry::standard()?));
        let user_manager = UserManager::new(config.users.clone(), store, notifier).await?;

        Ok(Self {
            config,
            jwt_manager,
            guard,
            user_manager,
            stats: Arc::new(RwLock::new(AuthStats::default())),
        })
    }

    /// Authenticate with email and password
    ///
    /// Unknown emails and wrong passwords yield the same error.
    pub async fn authenticate(&self, email: &str, password: &str) -> AuthResult<Principal> {
        let result = self.user_manager.verify_credentials(email, password).await?;

        // Update statistics
        {
            let mut stats = self.stats.write().await;
            match &result {
                Some(_) => stats.successful_authentications += 1,
                None => stats.failed_authentications += 1,
            }
            stats.last_authentication = Some(Utc::now());
        }

        match result {
            Some(principal) => {
                info!("Authenticated user: {}", principal.email);
                Ok(principal)
            }
            None => {
                debug!("Rejected login for {}", email);
                Err(AuthError::invalid_credentials(
                    INVALID_CREDENTIALS_MESSAGE.to_string(),
                ))
            }
        }
    }

    /// Issue a session token for an authenticated principal
    pub async fn issue_session_token(&self, principal: &Principal) -> AuthResult<String> {
        self.jwt_manager.issue_token(&principal.email, None).await
    }

    /// Issue a short-lived password reset token for a registered user
    pub async fn issue_reset_token(&self, email: &str) -> AuthResult<String> {
        let principal = self.user_manager.get(email).await?;
        self.jwt_manager
            .issue_token(
                &principal.email,
                Some(self.config.users.reset_token_expire_minutes),
            )
            .await
    }

    /// Resolve a bearer token to the principal it names
    pub async fn current_principal(&self, token: &str) -> AuthResult<Principal> {
        let subject = self.jwt_manager.resolve_token(token).await?;
        match self.user_manager.find(&subject).await? {
            Some(principal) => Ok(principal),
            None => {
                debug!("Token subject {} is no longer registered", subject);
                Err(AuthError::unauthenticated(INVALID_TOKEN_MESSAGE.to_string()))
            }
        }
    }

    /// Authorize a principal against a requirement
    pub async fn authorize(
        &self,
        principal: Principal,
        requirement: &Requirement,
    ) -> AuthResult<Principal> {
        let result = self.guard.authorize(principal, requirement).await;

        {
            let mut stats = self.stats.write().await;
            match &result {
                Ok(_) => stats.authorizations += 1,
                Err(_) => stats.denied_authorizations += 1,
            }
            stats.last_authorization = Some(Utc::now());
        }

        result
    }

    /// Authenticate a bearer token and authorize its principal in one step
    pub async fn require(&self, token: &str, requirement: &Requirement) -> AuthResult<Principal> {
        let principal = self.current_principal(token).await?;
        self.authorize(principal, requirement).await
    }

    /// Every defined role
    pub fn roles(&self) -> Vec<Role> {
        Role::all().to_vec()
    }

    /// Canonical permission names granted to a role, sorted
    pub fn permissions_for(&self, role: Role) -> AuthResult<Vec<String>> {
        Ok(self
            .guard
            .registry()
            .resolve(role)?
            .iter()
            .cloned()
            .collect())
    }

    /// Register the configured startup administrator
    ///
    /// Yields the new principal, or `None` when no administrator is configured
    /// or the email is already registered.
    pub async fn bootstrap_admin(&self) -> AuthResult<Option<Principal>> {
        let admin = match &self.config.users.bootstrap_admin {
            Some(admin) => admin,
            None => {
                debug!("No bootstrap administrator configured");
                return Ok(None);
            }
        };

        if admin.password.is_none() {
            warn!(
                "No password configured for {}, a generated one goes out through the notifier",
                admin.email
            );
        }

        let signup = SignUp {
            email: admin.email.clone(),
            password: admin.password.clone(),
            name: admin.name.clone(),
            surname: None,
            role: Role::Administrator,
        };

        match self.user_manager.signup(signup).await {
            Ok(principal) => {
                info!("Registered bootstrap administrator {}", principal.email);
                Ok(Some(principal))
            }
            Err(AuthError::DuplicateIdentity(_)) => {
                info!("Bootstrap administrator {} already registered", admin.email);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Send a password reset link when the email is registered
    ///
    /// Always completes the same way, so callers cannot learn which emails
    /// are registered; failures are only logged.
    pub async fn forgot_password(&self, email: &str, base_url: &str) {
        {
            let mut stats = self.stats.write().await;
            stats.password_resets_requested += 1;
        }

        let principal = match self.user_manager.find(email).await {
            Ok(Some(principal)) => principal,
            Ok(None) => {
                debug!("Password reset requested for unknown email {}", email);
                return;
            }
            Err(e) => {
                warn!("Password reset lookup failed: {}", e);
                return;
            }
        };

        let token = match self.issue_reset_token(&principal.email).await {
            Ok(token) => token,
            Err(e) => {
                warn!("Could not issue reset token for {}: {}", principal.email, e);
                return;
            }
        };

        let url = reset_password_url(base_url, &token);
        let notification = Notification::password_reset(
            &principal.email,
            &principal.name,
            &url,
            self.config.users.reset_token_expire_minutes,
        );
        self.user_manager.notify(&notification).await;
    }

    /// Replace the password of the user named by a reset token
    pub async fn reset_password(&self, token: &str, new_password: &str) -> AuthResult<Principal> {
        let principal = self.current_principal(token).await?;
        let principal = self
            .user_manager
            .reset_password(&principal.email, new_password)
            .await?;

        {
            let mut stats = self.stats.write().await;
            stats.password_resets += 1;
        }

        Ok(principal)
    }

    /// Get authentication statistics
    pub async fn get_stats(&self) -> AuthStats {
        let stats = self.stats.read().await;
        stats.clone()
    }

    /// Get configuration
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Get JWT manager
    pub fn jwt_manager(&self) -> &JwtManager {
        &self.jwt_manager
    }

    /// Get access guard
    pub fn guard(&self) -> &AccessGuard {
        &self.guard
    }

    /// Get user manager
    pub fn user_manager(&self) -> &UserManager {
        &self.user_manager
    }

    /// Shutdown authentication manager
    pub async fn shutdown(&self) -> AuthResult<()> {
        info!("Shutting down authentication manager");

        info!("{}", self.stats_summary().await);

        info!("Authentication manager shutdown completed");
        Ok(())
    }

    /// One-line summary of logins, token checks and authorizations
    pub async fn stats_summary(&self) -> String {
        let stats = self.get_stats().await;
        let jwt_stats = self.jwt_manager.get_stats().await;
        let guard_stats = self.guard.get_stats().await;

        format!(
            "Served {} logins ({} rejected), validated {} tokens ({:.1}% accepted) \
             and checked {} authorizations ({:.1}% granted)",
            stats.successful_authentications + stats.failed_authentications,
            stats.failed_authentications,
            jwt_stats.tokens_validated + jwt_stats.validation_failures,
            jwt_stats.validation_success_rate() * 100.0,
            guard_stats.checks,
            guard_stats.grant_rate() * 100.0
        )
    }
}

impl std::fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthManager")
            .field("config", &"<sensitive>")
            .field("jwt_manager", &"<sensitive>")
            .field("guard", &self.guard)
            .field("user_manager", &"<sensitive>")
            .field("stats", &self.stats)
            .finish()
    }
}

/// Build the password reset link for a token
pub fn reset_password_url(base_url: &str, token: &str) -> String {
    format!(
        "{}{}?access_token={}",
        base_url.trim_end_matches('/'),
        RESET_PASSWORD_PATH,
        token
    )
}

/// Authentication statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthStats {
    /// Number of successful authentications
    pub successful_authentications: u64,

    /// Number of failed authentications
    pub failed_authentications: u64,

    /// Number of granted authorizations
    pub authorizations: u64,

    /// Number of denied authorizations
    pub denied_authorizations: u64,

    /// Number of forgot-password requests
    pub password_resets_requested: u64,

    /// Number of completed password resets
    pub password_resets: u64,

    /// Last authentication
    pub last_authentication: Option<DateTime<Utc>>,

    /// Last authorization
    pub last_authorization: Option<DateTime<Utc>>,
}
