//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! JWT configuration

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default token issuer
pub const DEFAULT_ISSUER: &str = "accounts";

/// Default token audience
pub const DEFAULT_AUDIENCE: &str = "accounts-users";

/// Longest accepted token lifetime, one year
pub const MAX_TOKEN_EXPIRE_MINUTES: i64 = 60 * 24 * 365;

/// JWT configuration
///
/// There is no default secret: a configuration is only obtained from an
/// explicit secret, either through [`JwtConfig::new`] or the environment.
#[derive(Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// JWT secret key
    pub secret: String,

    /// Algorithm to use for JWT signing
    pub algorithm: JwtAlgorithm,

    /// Lifetime of session tokens in minutes
    pub access_token_expire_minutes: i64,

    /// JWT issuer
    pub issuer: String,

    /// JWT audience
    pub audience: String,
}

impl JwtConfig {
    /// Create a JWT configuration with the default issuer and audience
    pub fn new(
        secret: impl Into<String>,
        algorithm: JwtAlgorithm,
        access_token_expire_minutes: i64,
    ) -> Self {
        Self {
            secret: secret.into(),
            algorithm,
            access_token_expire_minutes,
            issuer: DEFAULT_ISSUER.to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
        }
    }

    /// Validate the JWT configuration
    pub fn validate(&self) -> crate::AuthResult<()> {
        if self.secret.is_empty() {
            return Err(crate::AuthError::configuration(
                "JWT secret cannot be empty".to_string(),
            ));
        }

        if self.access_token_expire_minutes <= 0
            || self.access_token_expire_minutes > MAX_TOKEN_EXPIRE_MINUTES
        {
            return Err(crate::AuthError::configuration(format!(
                "Access token lifetime must be between 1 and {} minutes, got {}",
                MAX_TOKEN_EXPIRE_MINUTES, self.access_token_expire_minutes
            )));
        }

        if self.issuer.is_empty() || self.audience.is_empty() {
            return Err(crate::AuthError::configuration(
                "JWT issuer and audience cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<sensitive>")
            .field("algorithm", &self.algorithm)
            .field("access_token_expire_minutes", &self.access_token_expire_minutes)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

/// JWT algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JwtAlgorithm {
    HS256,
    HS384,
    HS512,
}

impl JwtAlgorithm {
    /// Matching `jsonwebtoken` algorithm
    pub fn as_jsonwebtoken(&self) -> jsonwebtoken::Algorithm {
        match self {
            JwtAlgorithm::HS256 => jsonwebtoken::Algorithm::HS256,
            JwtAlgorithm::HS384 => jsonwebtoken::Algorithm::HS384,
            JwtAlgorithm::HS512 => jsonwebtoken::Algorithm::HS512,
        }
    }
}

impl FromStr for JwtAlgorithm {
    type Err = crate::AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "HS256" => Ok(JwtAlgorithm::HS256),
            "HS384" => Ok(JwtAlgorithm::HS384),
            "HS512" => Ok(JwtAlgorithm::HS512),
            _ => Err(crate::AuthError::configuration(format!(
                "Unsupported JWT algorithm: {}",
                s
            ))),
        }
    }
}
