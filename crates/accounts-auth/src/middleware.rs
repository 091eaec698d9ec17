//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Authentication glue for HTTP requests

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

use crate::auth::{AuthError, AuthManager};
use crate::users::Principal;

/// Message returned to clients for server-side faults
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Extract the bearer token from the Authorization header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

impl AuthError {
    /// Get HTTP status code for the error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::DuplicateIdentity(_) => StatusCode::CONFLICT,
            AuthError::NotFound(_) => StatusCode::NOT_FOUND,
            AuthError::InvalidCredentials(_) => StatusCode::UNAUTHORIZED,
            AuthError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AuthError::Unauthorized(_) => StatusCode::FORBIDDEN,
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::TokenGeneration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for the error
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::DuplicateIdentity(_) => "DUPLICATE_IDENTITY",
            AuthError::NotFound(_) => "NOT_FOUND",
            AuthError::InvalidCredentials(_) => "INVALID_CREDENTIALS",
            AuthError::Unauthenticated(_) => "UNAUTHENTICATED",
            AuthError::Unauthorized(_) => "UNAUTHORIZED",
            AuthError::Validation(_) => "VALIDATION_ERROR",
            AuthError::Configuration(_) => "CONFIGURATION_ERROR",
            AuthError::TokenGeneration(_) => "TOKEN_GENERATION_ERROR",
            AuthError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to show to clients
    pub fn public_message(&self) -> String {
        match self {
            AuthError::DuplicateIdentity(msg)
            | AuthError::NotFound(msg)
            | AuthError::InvalidCredentials(msg)
            | AuthError::Unauthenticated(msg)
            | AuthError::Unauthorized(msg)
            | AuthError::Validation(msg) => msg.clone(),
            AuthError::Configuration(_)
            | AuthError::TokenGeneration(_)
            | AuthError::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code
    pub code: String,

    /// Error message
    pub message: String,

    /// Timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: &AuthError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.public_message(),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if self.is_internal() {
            error!("Request failed: {}", self);
        }

        let status_code = self.status_code();
        let mut response = (status_code, Json(ErrorResponse::new(&self))).into_response();

        if matches!(self, AuthError::Unauthenticated(_) | AuthError::InvalidCredentials(_)) {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

/// The principal named by the request's bearer token
///
/// Rejects with `Unauthenticated` when the header is missing or the token
/// does not resolve to a registered user. Permission checks are left to the
/// handler, which knows what it needs.
#[derive(Debug, Clone)]
pub struct CurrentPrincipal(pub Principal);

impl<S> FromRequestParts<S> for CurrentPrincipal
where
    Arc<AuthManager>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let manager = Arc::<AuthManager>::from_ref(state);
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| AuthError::unauthenticated("Not authenticated".to_string()))?;

        let principal = manager.current_principal(token).await?;
        Ok(Self(principal))
    }
}
