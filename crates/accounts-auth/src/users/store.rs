//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! User record storage

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::model::{Principal, UserChanges};

/// Persistence boundary for user records, keyed by email.
///
/// Implementations must enforce email uniqueness themselves: `insert` of an
/// existing email fails with `DuplicateIdentity` and never overwrites.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug {
    /// Find a user by email
    async fn find_by_email(&self, email: &str) -> crate::AuthResult<Option<Principal>>;

    /// Insert a new user
    async fn insert(&self, principal: Principal) -> crate::AuthResult<Principal>;

    /// Apply changes to an existing user
    async fn update(&self, email: &str, changes: UserChanges) -> crate::AuthResult<Principal>;

    /// Delete a user
    async fn delete(&self, email: &str) -> crate::AuthResult<()>;

    /// List every user, ordered by email
    async fn list(&self) -> crate::AuthResult<Vec<Principal>>;
}

/// In-memory user store
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<String, Principal>>>,
}

impl InMemoryUserStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Check whether the store is empty
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> crate::AuthResult<Option<Principal>> {
        let users = self.users.read().await;
        Ok(users.get(email).cloned())
    }

    async fn insert(&self, principal: Principal) -> crate::AuthResult<Principal> {
        let mut users = self.users.write().await;
        if users.contains_key(&principal.email) {
            return Err(crate::AuthError::duplicate_identity(format!(
                "Email {} is already attached to a registered user",
                principal.email
            )));
        }

        users.insert(principal.email.clone(), principal.clone());
        debug!("Stored user: {}", principal.email);
        Ok(principal)
    }

    async fn update(&self, email: &str, changes: UserChanges) -> crate::AuthResult<Principal> {
        let mut users = self.users.write().await;
        let principal = users.get_mut(email).ok_or_else(|| {
            crate::AuthError::not_found(format!("There is no user with email {}", email))
        })?;

        principal.apply(changes);
        Ok(principal.clone())
    }

    async fn delete(&self, email: &str) -> crate::AuthResult<()> {
        let mut users = self.users.write().await;
        users.remove(email).map(|_| ()).ok_or_else(|| {
            crate::AuthError::not_found(format!("There is no user with email {}", email))
        })
    }

    async fn list(&self) -> crate::AuthResult<Vec<Principal>> {
        let users = self.users.read().await;
        let mut all: Vec<Principal> = users.values().cloned().collect();
        all.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(all)
    }
}
