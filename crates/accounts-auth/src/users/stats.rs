//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! User statistics

use chrono::{DateTime, Utc};
use serde::Serialize;

/// User statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserStats {
    /// Number of users created
    pub users_created: u64,

    /// Number of users updated
    pub users_updated: u64,

    /// Number of users deleted
    pub users_deleted: u64,

    /// Number of password changes and resets
    pub password_changes: u64,

    /// Number of password verifications
    pub password_verifications: u64,

    /// Number of failed password verifications
    pub failed_verifications: u64,

    /// Number of notifications that could not be delivered
    pub failed_notifications: u64,

    /// Last user created
    pub last_user_created: Option<DateTime<Utc>>,

    /// Last password verification
    pub last_password_verification: Option<DateTime<Utc>>,
}

impl UserStats {
    /// Create new user statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment users created count
    pub fn increment_users_created(&mut self) {
        self.users_created += 1;
        self.last_user_created = Some(Utc::now());
    }

    /// Increment users updated count
    pub fn increment_users_updated(&mut self) {
        self.users_updated += 1;
    }

    /// Increment users deleted count
    pub fn increment_users_deleted(&mut self) {
        self.users_deleted += 1;
    }

    /// Increment password changes count
    pub fn increment_password_changes(&mut self) {
        self.password_changes += 1;
    }

    /// Record a password verification outcome
    pub fn record_password_verification(&mut self, success: bool) {
        self.password_verifications += 1;
        self.last_password_verification = Some(Utc::now());
        if !success {
            self.failed_verifications += 1;
        }
    }

    /// Increment failed notifications count
    pub fn increment_failed_notifications(&mut self) {
        self.failed_notifications += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_stats_creation() {
        let stats = UserStats::new();
        assert_eq!(stats.users_created, 0);
        assert_eq!(stats.password_verifications, 0);
        assert!(stats.last_user_created.is_none());
    }

    #[test]
    fn test_user_stats_increment() {
        let mut stats = UserStats::new();

        stats.increment_users_created();
        assert_eq!(stats.users_created, 1);
        assert!(stats.last_user_created.is_some());

        stats.record_password_verification(true);
        stats.record_password_verification(false);
        assert_eq!(stats.password_verifications, 2);
        assert_eq!(stats.failed_verifications, 1);
        assert!(stats.last_password_verification.is_some());

        stats.increment_failed_notifications();
        assert_eq!(stats.failed_notifications, 1);
    }
}
