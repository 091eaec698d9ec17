//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! User model definitions

use chrono::{NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::roles::Role;

static EMAIL_PATTERN: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$"));

/// Authenticated user record
#[derive(Clone, PartialEq, Eq)]
pub struct Principal {
    /// Email, the unique identity of the user
    pub email: String,

    /// Argon2 PHC string
    pub password_hash: String,

    /// Display name
    pub name: String,

    /// Surname
    pub surname: Option<String>,

    /// Assigned role
    pub role: Role,

    /// Registration date (UTC)
    pub register_date: NaiveDate,
}

impl Principal {
    /// Create a principal registered today
    pub fn new(
        email: String,
        password_hash: String,
        name: String,
        surname: Option<String>,
        role: Role,
    ) -> Self {
        Self {
            email,
            password_hash,
            name,
            surname,
            role,
            register_date: Utc::now().date_naive(),
        }
    }

    /// Apply a set of changes in place
    pub fn apply(&mut self, changes: UserChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(surname) = changes.surname {
            self.surname = Some(surname);
        }
        if let Some(role) = changes.role {
            self.role = role;
        }
        if let Some(password_hash) = changes.password_hash {
            self.password_hash = password_hash;
        }
    }
}

impl std::fmt::Debug for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Principal")
            .field("email", &self.email)
            .field("password_hash", &"<sensitive>")
            .field("name", &self.name)
            .field("surname", &self.surname)
            .field("role", &self.role)
            .field("register_date", &self.register_date)
            .finish()
    }
}

/// Signup request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUp {
    pub email: String,

    /// Plaintext password; a random one is generated when absent or empty
    #[serde(default)]
    pub password: Option<String>,

    pub name: String,

    #[serde(default)]
    pub surname: Option<String>,

    pub role: Role,
}

/// Administrative update of a user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub surname: Option<String>,

    #[serde(default)]
    pub role: Option<Role>,
}

/// Self-service update of the current user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdateMe {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub surname: Option<String>,
}

/// Password change of the current user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePassword {
    pub old_password: String,
    pub new_password: String,
}

/// Partial set of fields written by the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub role: Option<Role>,
    pub password_hash: Option<String>,
}

impl UserChanges {
    /// Changes that only replace the password hash
    pub fn password(password_hash: String) -> Self {
        Self {
            password_hash: Some(password_hash),
            ..Self::default()
        }
    }

    /// Check whether the changes touch no field
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl From<UserUpdate> for UserChanges {
    fn from(update: UserUpdate) -> Self {
        Self {
            name: update.name,
            surname: update.surname,
            role: update.role,
            password_hash: None,
        }
    }
}

impl From<UserUpdateMe> for UserChanges {
    fn from(update: UserUpdateMe) -> Self {
        Self {
            name: update.name,
            surname: update.surname,
            role: None,
            password_hash: None,
        }
    }
}

/// Trim, lowercase and validate an email address
pub fn normalize_email(email: &str) -> crate::AuthResult<String> {
    let email = email.trim().to_lowercase();
    let pattern = EMAIL_PATTERN
        .as_ref()
        .map_err(|e| crate::AuthError::internal(format!("Invalid email pattern: {}", e)))?;

    if !pattern.is_match(&email) {
        return Err(crate::AuthError::validation(format!(
            "{} is not a valid email address",
            email
        )));
    }

    Ok(email)
}
