//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Shared request state

use axum::extract::FromRef;
use std::sync::Arc;

use accounts_auth::AuthManager;

use crate::config::ServerConfig;

/// State shared by every handler
#[derive(Debug, Clone)]
pub struct AppState {
    /// Authentication manager
    pub auth: Arc<AuthManager>,

    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create new application state
    pub fn new(auth: Arc<AuthManager>, config: ServerConfig) -> Self {
        Self {
            auth,
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for Arc<AuthManager> {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}
