//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Access guard

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::roles::RoleRegistry;
use crate::users::Principal;

use super::requirement::Requirement;
use super::stats::GuardStats;

/// Access guard
///
/// Authorizes an authenticated principal against a [`Requirement`] by
/// resolving the principal's role through the registry.
#[derive(Debug)]
pub struct AccessGuard {
    /// Role registry
    registry: Arc<RoleRegistry>,

    /// Statistics
    stats: Arc<RwLock<GuardStats>>,
}

impl AccessGuard {
    /// Create new access guard
    pub fn new(registry: Arc<RoleRegistry>) -> Self {
        Self {
            registry,
            stats: Arc::new(RwLock::new(GuardStats::default())),
        }
    }

    /// Authorize a principal, yielding it back when every permission is held
    ///
    /// A requirement naming no permission is a configuration error, never an
    /// open gate.
    pub async fn authorize(
        &self,
        principal: Principal,
        requirement: &Requirement,
    ) -> crate::AuthResult<Principal> {
        if requirement.is_empty() {
            warn!("Refused to authorize {} against an empty requirement", principal.email);
            return Err(crate::AuthError::configuration(
                "Operation declares no required permissions".to_string(),
            ));
        }

        let granted = self.registry.resolve(principal.role)?;
        let missing: Vec<String> = requirement
            .missing(granted)
            .iter()
            .map(|permission| permission.canonical_name().to_string())
            .collect();

        {
            let mut stats = self.stats.write().await;
            stats.record_check(missing.is_empty());
        }

        if !missing.is_empty() {
            warn!(
                "Denied {} ({}): missing {}",
                principal.email,
                principal.role,
                missing.join(", ")
            );
            return Err(crate::AuthError::unauthorized(format!(
                "Missing permissions: {}",
                missing.join(", ")
            )));
        }

        debug!(
            "Authorized {} for {} permissions",
            principal.email,
            requirement.permissions().len()
        );
        Ok(principal)
    }

    /// Get role registry
    pub fn registry(&self) -> &RoleRegistry {
        &self.registry
    }

    /// Get guard statistics
    pub async fn get_stats(&self) -> GuardStats {
        self.stats.read().await.clone()
    }
}
