//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Request and response bodies

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use accounts_auth::{Principal, Role};

/// Path the reset form posts to
pub const RESET_PASSWORD_FORM_PATH: &str = "/v1/users/me/reset_password";

/// Public view of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserOut {
    pub email: String,
    pub name: String,
    pub surname: Option<String>,
    pub role: Role,
    pub register_date: NaiveDate,
}

impl From<Principal> for UserOut {
    fn from(principal: Principal) -> Self {
        Self {
            email: principal.email,
            name: principal.name,
            surname: principal.surname,
            role: principal.role,
            register_date: principal.register_date,
        }
    }
}

/// The current user, with the permissions their role grants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMe {
    pub email: String,
    pub name: String,
    pub surname: Option<String>,
    pub register_date: NaiveDate,
    pub role: Role,
    pub permissions: Vec<String>,
}

impl UserMe {
    /// Combine a principal with its resolved permissions
    pub fn new(principal: Principal, permissions: Vec<String>) -> Self {
        Self {
            email: principal.email,
            name: principal.name,
            surname: principal.surname,
            register_date: principal.register_date,
            role: principal.role,
            permissions,
        }
    }
}

/// Issued bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

impl Token {
    /// Wrap a bearer token
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Login form
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Reset password form
#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordForm {
    pub new_password: String,
}

/// `?user_email=` query
#[derive(Debug, Clone, Deserialize)]
pub struct UserEmailQuery {
    pub user_email: String,
}

/// `?access_token=` query
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenQuery {
    pub access_token: String,
}

/// What a client needs to render the password reset form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordPage {
    pub email: String,
    pub name: String,

    /// Target of the form submission, token included
    pub form_action: String,

    pub form_method: String,

    /// Name of the password field
    pub form_field: String,
}

impl ResetPasswordPage {
    pub fn new(principal: Principal, access_token: &str) -> Self {
        Self {
            email: principal.email,
            name: principal.name,
            form_action: format!("{}?access_token={}", RESET_PASSWORD_FORM_PATH, access_token),
            form_method: "POST".to_string(),
            form_field: "new_password".to_string(),
        }
    }
}

/// Human-readable outcome of an operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultMessage {
    pub result: String,
}

impl ResultMessage {
    pub fn new(result: impl Into<String>) -> Self {
        Self {
            result: result.into(),
        }
    }
}

/// Liveness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
