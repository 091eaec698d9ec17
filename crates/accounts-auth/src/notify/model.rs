//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Notification model definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Notification template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationTemplate {
    /// Sent after signup, carries the initial password
    Registration,

    /// Sent on forgot-password, carries the reset link
    PasswordReset,
}

impl NotificationTemplate {
    /// Template name
    pub fn name(&self) -> &'static str {
        match self {
            NotificationTemplate::Registration => "registration",
            NotificationTemplate::PasswordReset => "password_reset",
        }
    }

    /// Subject line
    pub fn subject(&self) -> &'static str {
        match self {
            NotificationTemplate::Registration => "Your new account",
            NotificationTemplate::PasswordReset => "Reset your password",
        }
    }
}

impl std::fmt::Display for NotificationTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A rendered-on-delivery message for a single recipient
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Template
    pub template: NotificationTemplate,

    /// Recipient email
    pub recipient: String,

    /// Template variables
    pub variables: BTreeMap<String, String>,
}

impl Notification {
    /// Registration notification carrying the plaintext password
    pub fn registration(email: &str, password: &str) -> Self {
        let mut variables = BTreeMap::new();
        variables.insert("email".to_string(), email.to_string());
        variables.insert("password".to_string(), password.to_string());

        Self {
            template: NotificationTemplate::Registration,
            recipient: email.to_string(),
            variables,
        }
    }

    /// Password reset notification carrying the reset link
    pub fn password_reset(email: &str, name: &str, url: &str, expire_in_minutes: i64) -> Self {
        let mut variables = BTreeMap::new();
        variables.insert("name".to_string(), name.to_string());
        variables.insert("url".to_string(), url.to_string());
        variables.insert(
            "expire_in_minutes".to_string(),
            expire_in_minutes.to_string(),
        );

        Self {
            template: NotificationTemplate::PasswordReset,
            recipient: email.to_string(),
            variables,
        }
    }

    /// Get a template variable
    pub fn variable(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }
}

impl std::fmt::Debug for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notification")
            .field("template", &self.template)
            .field("recipient", &self.recipient)
            .field("variables", &"<sensitive>")
            .finish()
    }
}
