//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! JWT claims definitions

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtConfig;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user email)
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Issued at
    pub iat: i64,

    /// Expiration time
    pub exp: i64,

    /// JWT ID
    pub jti: String,
}

impl JwtClaims {
    /// Create claims valid for `ttl_minutes` from `now`
    pub fn new(
        subject: String,
        config: &JwtConfig,
        now: DateTime<Utc>,
        ttl_minutes: i64,
    ) -> crate::AuthResult<Self> {
        let exp = TimeDelta::try_minutes(ttl_minutes)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                crate::AuthError::token_generation(format!(
                    "Token lifetime of {} minutes is out of range",
                    ttl_minutes
                ))
            })?;

        Ok(Self {
            sub: subject,
            iss: config.issuer.clone(),
            aud: config.audience.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        })
    }

    /// Check if the token is expired at the given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Get expiration time as DateTime
    pub fn expiration_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
