//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Role model definitions

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Role assigned to every user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Administrator,
    User,
}

impl Role {
    /// Every defined role, in declaration order
    pub fn all() -> &'static [Role] {
        &[Role::Administrator, Role::User]
    }

    /// Names of every defined role
    pub fn names() -> Vec<String> {
        Self::all().iter().map(|role| role.to_string()).collect()
    }

    /// Wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => "ADMINISTRATOR",
            Role::User => "USER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = crate::AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| crate::AuthError::validation(format!("Unknown role: {}", s)))
    }
}
