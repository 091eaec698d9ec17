//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! User configuration

use serde::{Deserialize, Serialize};

use super::jwt::MAX_TOKEN_EXPIRE_MINUTES;

/// User management configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    /// Length of passwords generated at signup
    pub generated_password_length: usize,

    /// Lifetime of password reset tokens in minutes
    pub reset_token_expire_minutes: i64,

    /// Minimum length of user-chosen passwords
    pub min_password_length: usize,

    /// Argon2 cost parameters
    pub hashing: PasswordHashingConfig,

    /// Administrator registered at startup
    #[serde(default)]
    pub bootstrap_admin: Option<AdminBootstrap>,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            generated_password_length: 10,
            reset_token_expire_minutes: 10,
            min_password_length: 8,
            hashing: PasswordHashingConfig::default(),
            bootstrap_admin: None,
        }
    }
}

impl UserConfig {
    /// Validate the user configuration
    pub fn validate(&self) -> crate::AuthResult<()> {
        if self.generated_password_length < self.min_password_length {
            return Err(crate::AuthError::configuration(format!(
                "Generated password length {} is below the minimum password length {}",
                self.generated_password_length, self.min_password_length
            )));
        }

        if self.reset_token_expire_minutes <= 0
            || self.reset_token_expire_minutes > MAX_TOKEN_EXPIRE_MINUTES
        {
            return Err(crate::AuthError::configuration(format!(
                "Reset token lifetime must be between 1 and {} minutes, got {}",
                MAX_TOKEN_EXPIRE_MINUTES, self.reset_token_expire_minutes
            )));
        }

        if let Some(admin) = &self.bootstrap_admin {
            admin.validate(self.min_password_length)?;
        }

        Ok(())
    }
}

/// Default display name of the startup administrator
pub const DEFAULT_ADMIN_NAME: &str = "Administrator";

/// Administrator account created when the service starts
///
/// Without a password, one is generated and sent through the registration
/// notification.
#[derive(Clone, Serialize, Deserialize)]
pub struct AdminBootstrap {
    /// Administrator email
    pub email: String,

    /// Initial password
    #[serde(default)]
    pub password: Option<String>,

    /// Display name
    pub name: String,
}

impl AdminBootstrap {
    /// Administrator with the default display name
    pub fn new(email: impl Into<String>, password: Option<String>) -> Self {
        Self {
            email: email.into(),
            password,
            name: DEFAULT_ADMIN_NAME.to_string(),
        }
    }

    /// Validate the bootstrap settings
    pub fn validate(&self, min_password_length: usize) -> crate::AuthResult<()> {
        crate::users::normalize_email(&self.email).map_err(|_| {
            crate::AuthError::configuration(format!(
                "Bootstrap administrator email '{}' is not a valid email address",
                self.email
            ))
        })?;

        if self.name.trim().is_empty() {
            return Err(crate::AuthError::configuration(
                "Bootstrap administrator name cannot be empty".to_string(),
            ));
        }

        if let Some(password) = &self.password {
            if password.chars().count() < min_password_length {
                return Err(crate::AuthError::configuration(format!(
                    "Bootstrap administrator password must be at least {} characters long",
                    min_password_length
                )));
            }
        }

        Ok(())
    }
}

impl std::fmt::Debug for AdminBootstrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminBootstrap")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<sensitive>"))
            .field("name", &self.name)
            .finish()
    }
}

/// Argon2 cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordHashingConfig {
    /// Memory cost in KiB
    pub memory_kib: u32,

    /// Number of iterations
    pub iterations: u32,

    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for PasswordHashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: argon2::Params::DEFAULT_M_COST,
            iterations: argon2::Params::DEFAULT_T_COST,
            parallelism: argon2::Params::DEFAULT_P_COST,
        }
    }
}

impl PasswordHashingConfig {
    /// Cheap parameters for tests
    pub fn fast() -> Self {
        Self {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        }
    }
}
