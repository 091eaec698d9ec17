//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Authentication, role-based authorization and user management for the
//! accounts service
//!
//! Every user holds exactly one [`Role`]. Roles map to groups of
//! fine-grained, resource-scoped permissions such as `USERS_VIEW_ME`, and
//! each operation declares the permissions it needs as a [`Requirement`].
//!
//! # Features
//!
//! - **Permission Catalogs**: CRUD plus resource-specific permissions derived per resource kind
//! - **Role Registry**: Static role table resolved once into flattened permission sets
//! - **Access Guard**: Request-time checks of a principal against a requirement
//! - **JWT Authentication**: Signed, time-limited bearer tokens (HS256/HS384/HS512)
//! - **User Management**: Signup with generated passwords, updates, password change and reset
//! - **Notifications**: Best-effort registration and password reset messages
//! - **HTTP Glue**: Axum extractor for the current principal and error responses
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use accounts_auth::{
//!     require, AuthConfig, JwtAlgorithm, JwtConfig, Role, SignUp, USERS,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let jwt = JwtConfig::new("your-super-secret-key", JwtAlgorithm::HS256, 30);
//!     let config = AuthConfig::new(jwt);
//!     let auth_manager = accounts_auth::init_auth_system(config).await?;
//!
//!     auth_manager
//!         .user_manager()
//!         .signup(SignUp {
//!             email: "ada@example.com".to_string(),
//!             password: Some("correct horse".to_string()),
//!             name: "Ada".to_string(),
//!             surname: None,
//!             role: Role::User,
//!         })
//!         .await?;
//!
//!     let principal = auth_manager.authenticate("ada@example.com", "correct horse").await?;
//!     let token = auth_manager.issue_session_token(&principal).await?;
//!
//!     let requirement = require([USERS.required_extra("VIEW_ME")?]);
//!     let me = auth_manager.require(&token, &requirement).await?;
//!     println!("Authenticated as {}", me.email);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! [`AuthConfig::from_env`] reads `ACCOUNTS_`-prefixed environment variables;
//! the signing secret, algorithm and session lifetime are required.
//!
//! # Error Handling
//!
//! Every operation returns [`AuthResult`]. [`AuthError`] implements
//! `IntoResponse`, mapping each variant to an HTTP status and a JSON body;
//! server-side faults never expose their detail to clients.
//!
//! # Monitoring and Observability
//!
//! ```rust,no_run
//! # async fn report(auth_manager: &accounts_auth::AuthManager) {
//! let auth_stats = auth_manager.get_stats().await;
//! println!("Successful authentications: {}", auth_stats.successful_authentications);
//!
//! let jwt_stats = auth_manager.jwt_manager().get_stats().await;
//! println!("Tokens issued: {}", jwt_stats.tokens_issued);
//!
//! let guard_stats = auth_manager.guard().get_stats().await;
//! println!("Denied checks: {}", guard_stats.denials);
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod credentials;
pub mod guard;
pub mod jwt;
pub mod middleware;
pub mod notify;
pub mod permissions;
pub mod roles;
pub mod users;

// Re-export commonly used types
pub use auth::{AuthError, AuthManager, AuthResult, AuthStats};
pub use config::{
    AdminBootstrap, AuthConfig, JwtAlgorithm, JwtConfig, PasswordHashingConfig, UserConfig,
};
pub use credentials::{generate_password, CredentialHasher};
pub use guard::{require, AccessGuard, GuardStats, Requirement};
pub use jwt::{Clock, JwtClaims, JwtManager, JwtStats, ManualClock, SystemClock};
pub use middleware::{bearer_token, CurrentPrincipal, ErrorResponse};
pub use notify::{LogNotifier, MemoryNotifier, Notification, NotificationTemplate, Notifier};
pub use permissions::{permission_matches, Action, Permission, PermissionSet, ResourceKind, USERS};
pub use roles::{Role, RoleRegistry};
pub use users::{
    ChangePassword, InMemoryUserStore, Principal, SignUp, UserManager, UserStats, UserStore,
    UserUpdate, UserUpdateMe,
};

/// Authentication and authorization version
pub const AUTH_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize authentication system
///
/// Creates an [`AuthManager`] backed by an in-memory user store that
/// delivers notifications to the log, then registers the configured
/// startup administrator.
pub async fn init_auth_system(
    config: AuthConfig,
) -> Result<AuthManager, Box<dyn std::error::Error + Send + Sync>> {
    tracing::info!("Initializing authentication system v{}", AUTH_VERSION);

    let auth_manager = AuthManager::new(
        config,
        std::sync::Arc::new(InMemoryUserStore::new()),
        std::sync::Arc::new(LogNotifier),
    )
    .await?;
    auth_manager.bootstrap_admin().await?;

    tracing::info!("Authentication system initialization completed");
    Ok(auth_manager)
}

/// Shutdown authentication system
pub async fn shutdown_auth_system(
    auth_manager: &AuthManager,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing::info!("Shutting down authentication system");

    auth_manager.shutdown().await?;

    tracing::info!("Authentication system shutdown completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AuthConfig {
        let mut config = AuthConfig::new(JwtConfig::new("test-secret", JwtAlgorithm::HS256, 30));
        config.users.hashing = PasswordHashingConfig::fast();
        config
    }

    #[tokio::test]
    async fn test_auth_system_initialization() {
        let result = init_auth_system(config()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_auth_system_registers_admin() {
        let mut config = config();
        config.users.bootstrap_admin = Some(AdminBootstrap::new(
            "root@example.com",
            Some("root-password".to_string()),
        ));

        let auth_manager = init_auth_system(config).await.unwrap();
        let admin = auth_manager
            .authenticate("root@example.com", "root-password")
            .await
            .unwrap();
        assert_eq!(admin.role, Role::Administrator);
    }

    #[tokio::test]
    async fn test_auth_system_shutdown() {
        let auth_manager = init_auth_system(config()).await.unwrap();
        let result = shutdown_auth_system(&auth_manager).await;
        assert!(result.is_ok());
    }
}
