//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! User management functionality

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::config::UserConfig;
use crate::credentials::{generate_password, CredentialHasher};
use crate::notify::{deliver, Notification, Notifier};

use super::model::{normalize_email, Principal, SignUp, UserChanges, UserUpdate, UserUpdateMe};
use super::stats::UserStats;
use super::store::UserStore;

/// User manager
#[derive(Debug)]
pub struct UserManager {
    /// User configuration
    config: UserConfig,

    /// User records
    store: Arc<dyn UserStore>,

    /// Password hasher
    hasher: CredentialHasher,

    /// Outbound notifications
    notifier: Arc<dyn Notifier>,

    /// Statistics
    stats: Arc<RwLock<UserStats>>,
}

impl UserManager {
    /// Create new user manager
    pub async fn new(
        config: UserConfig,
        store: Arc<dyn UserStore>,
        notifier: Arc<dyn Notifier>,
    ) -> crate::AuthResult<Self> {
        config.validate()?;
        let hasher = CredentialHasher::new(&config.hashing)?;

        Ok(Self {
            config,
            store,
            hasher,
            notifier,
            stats: Arc::new(RwLock::new(UserStats::default())),
        })
    }

    /// Register a new user
    ///
    /// A random password is generated when none (or an empty one) is given.
    /// The plaintext password is only ever sent in the registration
    /// notification; delivery failures do not undo the signup.
    pub async fn signup(&self, signup: SignUp) -> crate::AuthResult<Principal> {
        let email = normalize_email(&signup.email)?;
        let name = signup.name.trim().to_string();
        if name.is_empty() {
            return Err(crate::AuthError::validation(
                "Name cannot be empty".to_string(),
            ));
        }

        let password = match signup.password {
            Some(password) if !password.is_empty() => {
                self.validate_password(&password)?;
                password
            }
            _ => generate_password(self.config.generated_password_length),
        };

        let password_hash = self.hasher.hash_password(&password)?;
        let principal = Principal::new(email, password_hash, name, signup.surname, signup.role);
        let principal = self.store.insert(principal).await?;

        // Update statistics
        {
            let mut stats = self.stats.write().await;
            stats.increment_users_created();
        }

        info!("Created user: {} ({})", principal.email, principal.role);

        let notification = Notification::registration(&principal.email, &password);
        self.notify(&notification).await;

        Ok(principal)
    }

    /// Find a user by email
    pub async fn find(&self, email: &str) -> crate::AuthResult<Option<Principal>> {
        self.store.find_by_email(&email_key(email)).await
    }

    /// Get a user by email
    pub async fn get(&self, email: &str) -> crate::AuthResult<Principal> {
        self.find(email).await?.ok_or_else(|| {
            crate::AuthError::not_found(format!("There is no user with email {}", email))
        })
    }

    /// List every user
    pub async fn list(&self) -> crate::AuthResult<Vec<Principal>> {
        self.store.list().await
    }

    /// Administrative update of a user
    pub async fn update(&self, email: &str, update: UserUpdate) -> crate::AuthResult<Principal> {
        self.apply_changes(email, update.into()).await
    }

    /// Self-service update, limited to name and surname
    pub async fn update_me(
        &self,
        email: &str,
        update: UserUpdateMe,
    ) -> crate::AuthResult<Principal> {
        self.apply_changes(email, update.into()).await
    }

    /// Delete a user
    pub async fn delete(&self, email: &str) -> crate::AuthResult<()> {
        let email = email_key(email);
        self.store.delete(&email).await?;

        {
            let mut stats = self.stats.write().await;
            stats.increment_users_deleted();
        }

        info!("Deleted user: {}", email);
        Ok(())
    }

    /// Verify a user's password, yielding the user when it matches
    ///
    /// Unknown users and wrong passwords are indistinguishable to the caller.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> crate::AuthResult<Option<Principal>> {
        let principal = match self.find(email).await? {
            Some(principal) => principal,
            None => return Ok(None),
        };

        let verified = self.hasher.verify_password(password, &principal.password_hash);

        {
            let mut stats = self.stats.write().await;
            stats.record_password_verification(verified);
        }

        Ok(verified.then_some(principal))
    }

    /// Change a user's password after checking the old one
    pub async fn change_password(
        &self,
        email: &str,
        old_password: &str,
        new_password: &str,
    ) -> crate::AuthResult<Principal> {
        let principal = self.get(email).await?;
        let verified = self
            .hasher
            .verify_password(old_password, &principal.password_hash);

        {
            let mut stats = self.stats.write().await;
            stats.record_password_verification(verified);
        }

        if !verified {
            return Err(crate::AuthError::validation(
                "Old password is incorrect".to_string(),
            ));
        }

        self.store_password(&principal.email, new_password).await
    }

    /// Replace a user's password without checking the old one
    pub async fn reset_password(
        &self,
        email: &str,
        new_password: &str,
    ) -> crate::AuthResult<Principal> {
        self.store_password(&email_key(email), new_password).await
    }

    /// Send a notification, recording failures
    pub async fn notify(&self, notification: &Notification) -> bool {
        let delivered = deliver(self.notifier.as_ref(), notification).await;
        if !delivered {
            let mut stats = self.stats.write().await;
            stats.increment_failed_notifications();
        }
        delivered
    }

    /// Get user configuration
    pub fn config(&self) -> &UserConfig {
        &self.config
    }

    /// Get user statistics
    pub async fn get_stats(&self) -> UserStats {
        let stats = self.stats.read().await;
        stats.clone()
    }

    async fn apply_changes(
        &self,
        email: &str,
        changes: UserChanges,
    ) -> crate::AuthResult<Principal> {
        if let Some(name) = &changes.name {
            if name.trim().is_empty() {
                return Err(crate::AuthError::validation(
                    "Name cannot be empty".to_string(),
                ));
            }
        }

        let principal = self.store.update(&email_key(email), changes).await?;

        {
            let mut stats = self.stats.write().await;
            stats.increment_users_updated();
        }

        info!("Updated user: {}", principal.email);
        Ok(principal)
    }

    async fn store_password(&self, email: &str, password: &str) -> crate::AuthResult<Principal> {
        self.validate_password(password)?;
        let password_hash = self.hasher.hash_password(password)?;
        let principal = self
            .store
            .update(email, UserChanges::password(password_hash))
            .await?;

        {
            let mut stats = self.stats.write().await;
            stats.increment_password_changes();
        }

        info!("Changed password of user: {}", principal.email);
        Ok(principal)
    }

    fn validate_password(&self, password: &str) -> crate::AuthResult<()> {
        if password.chars().count() < self.config.min_password_length {
            return Err(crate::AuthError::validation(format!(
                "Password must be at least {} characters long",
                self.config.min_password_length
            )));
        }

        Ok(())
    }
}

fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}
