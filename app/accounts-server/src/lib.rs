//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! HTTP server for the accounts service
//!
//! Exposes signup, login, role-gated user management and the
//! forgot/reset password flow under the `/v1` prefix.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod types;

// Re-export main types
pub use config::ServerConfig;
pub use error::ServerError;
pub use routes::create_router;
pub use state::AppState;

use std::sync::Arc;

use accounts_auth::{AuthConfig, AuthManager, InMemoryUserStore, LogNotifier};
use tracing::warn;

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;

/// Server version information
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Server name
pub const SERVER_NAME: &str = "accounts-server";

/// Build the application state with an in-memory store and log notifications
///
/// The configured startup administrator is registered before the state is
/// returned, so the first token can be obtained through `/v1/token`.
pub async fn init_state(config: ServerConfig, auth_config: AuthConfig) -> ServerResult<AppState> {
    let auth = AuthManager::new(
        auth_config,
        Arc::new(InMemoryUserStore::new()),
        Arc::new(LogNotifier),
    )
    .await?;

    if auth.config().users.bootstrap_admin.is_none() {
        warn!("No ACCOUNTS_ADMIN_EMAIL configured, no account can sign in");
    }
    auth.bootstrap_admin().await?;

    Ok(AppState::new(Arc::new(auth), config))
}
