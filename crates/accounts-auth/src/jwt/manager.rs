//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! JWT management functionality

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::JwtConfig;

use super::claims::JwtClaims;
use super::clock::Clock;
use super::stats::JwtStats;

/// Message returned for every rejected bearer token
pub const INVALID_TOKEN_MESSAGE: &str = "Could not validate bearer token";

/// JWT manager
///
/// Tokens are stateless: a token is valid when its signature, issuer and
/// audience check out and the injected clock has not reached its expiry.
pub struct JwtManager {
    /// JWT configuration
    config: JwtConfig,

    /// Encoding key
    encoding_key: EncodingKey,

    /// Decoding key
    decoding_key: DecodingKey,

    /// Decoding rules, without the library's own expiry check
    validation: Validation,

    /// Time source for issuance and expiry
    clock: Arc<dyn Clock>,

    /// Statistics
    stats: Arc<RwLock<JwtStats>>,
}

impl JwtManager {
    /// Create new JWT manager
    pub fn new(config: JwtConfig, clock: Arc<dyn Clock>) -> crate::AuthResult<Self> {
        config.validate()?;

        let algorithm = config.algorithm.as_jsonwebtoken();
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(algorithm);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);
        validation.set_audience(&[&config.audience]);
        validation.set_issuer(&[&config.issuer]);

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
            clock,
            stats: Arc::new(RwLock::new(JwtStats::default())),
        })
    }

    /// Issue a token for `subject`, valid for `ttl_minutes` or the configured default
    pub async fn issue_token(
        &self,
        subject: &str,
        ttl_minutes: Option<i64>,
    ) -> crate::AuthResult<String> {
        let ttl = ttl_minutes.unwrap_or(self.config.access_token_expire_minutes);
        let claims = JwtClaims::new(subject.to_string(), &self.config, self.clock.now(), ttl)?;

        let header = Header::new(self.config.algorithm.as_jsonwebtoken());
        let token = encode(&header, &claims, &self.encoding_key)
            .map_err(|e| crate::AuthError::token_generation(e.to_string()))?;

        // Update statistics
        {
            let mut stats = self.stats.write().await;
            stats.increment_tokens_issued();
        }

        debug!("Issued token for {} valid for {} minutes", claims.sub, ttl);
        Ok(token)
    }

    /// Resolve a token to its subject
    pub async fn resolve_token(&self, token: &str) -> crate::AuthResult<String> {
        match self.decode_claims(token) {
            Ok(claims) => {
                {
                    let mut stats = self.stats.write().await;
                    stats.increment_tokens_validated();
                }
                Ok(claims.sub)
            }
            Err(reason) => {
                {
                    let mut stats = self.stats.write().await;
                    stats.increment_validation_failures();
                }
                debug!("Rejected bearer token: {}", reason);
                Err(crate::AuthError::unauthenticated(
                    INVALID_TOKEN_MESSAGE.to_string(),
                ))
            }
        }
    }

    fn decode_claims(&self, token: &str) -> Result<JwtClaims, String> {
        let claims = decode::<JwtClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| e.to_string())?
            .claims;

        if claims.is_expired_at(self.clock.now()) {
            return Err(format!("token expired at {}", claims.exp));
        }

        if claims.sub.trim().is_empty() {
            return Err("token carries an empty subject".to_string());
        }

        Ok(claims)
    }

    /// Get JWT configuration
    pub fn config(&self) -> &JwtConfig {
        &self.config
    }

    /// Get JWT statistics
    pub async fn get_stats(&self) -> JwtStats {
        self.stats.read().await.clone()
    }
}

impl std::fmt::Debug for JwtManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtManager")
            .field("config", &self.config)
            .field("clock", &self.clock)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtAlgorithm;
    use crate::jwt::clock::{ManualClock, SystemClock};
    use chrono::Utc;

    fn manager_with_clock(clock: Arc<dyn Clock>) -> JwtManager {
        JwtManager::new(JwtConfig::new("test-secret", JwtAlgorithm::HS256, 30), clock).unwrap()
    }

    #[tokio::test]
    async fn test_token_round_trip() {
        let manager = manager_with_clock(Arc::new(SystemClock));
        let token = manager.issue_token("ada@example.com", None).await.unwrap();

        let subject = manager.resolve_token(&token).await.unwrap();
        assert_eq!(subject, "ada@example.com");

        let stats = manager.get_stats().await;
        assert_eq!(stats.tokens_issued, 1);
        assert_eq!(stats.tokens_validated, 1);
    }

    #[tokio::test]
    async fn test_token_expires_after_ttl() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let manager = manager_with_clock(clock.clone());
        let token = manager.issue_token("ada@example.com", Some(10)).await.unwrap();

        clock.advance(chrono::Duration::minutes(9));
        assert!(manager.resolve_token(&token).await.is_ok());

        clock.advance(chrono::Duration::minutes(2));
        let result = manager.resolve_token(&token).await;
        assert!(matches!(result, Err(crate::AuthError::Unauthenticated(_))));
    }

    #[tokio::test]
    async fn test_out_of_range_ttl_fails_without_panicking() {
        let manager = manager_with_clock(Arc::new(SystemClock));
        let result = manager.issue_token("ada@example.com", Some(i64::MAX)).await;
        assert!(matches!(result, Err(crate::AuthError::TokenGeneration(_))));
        assert_eq!(manager.get_stats().await.tokens_issued, 0);
    }

    #[tokio::test]
    async fn test_default_ttl_comes_from_config() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let manager = manager_with_clock(clock.clone());
        let token = manager.issue_token("ada@example.com", None).await.unwrap();

        clock.advance(chrono::Duration::minutes(29));
        assert!(manager.resolve_token(&token).await.is_ok());

        clock.advance(chrono::Duration::minutes(2));
        assert!(manager.resolve_token(&token).await.is_err());
    }

    #[tokio::test]
    async fn test_rejects_foreign_and_malformed_tokens() {
        let manager = manager_with_clock(Arc::new(SystemClock));
        let other = JwtManager::new(
            JwtConfig::new("other-secret", JwtAlgorithm::HS256, 30),
            Arc::new(SystemClock),
        )
        .unwrap();

        let foreign = other.issue_token("ada@example.com", None).await.unwrap();
        for token in [foreign.as_str(), "not-a-token", ""] {
            match manager.resolve_token(token).await {
                Err(crate::AuthError::Unauthenticated(msg)) => {
                    assert_eq!(msg, INVALID_TOKEN_MESSAGE)
                }
                other => panic!("expected unauthenticated, got {:?}", other),
            }
        }

        assert_eq!(manager.get_stats().await.validation_failures, 3);
    }

    #[tokio::test]
    async fn test_rejects_wrong_audience() {
        let manager = manager_with_clock(Arc::new(SystemClock));
        let mut config = JwtConfig::new("test-secret", JwtAlgorithm::HS256, 30);
        config.audience = "someone-else".to_string();
        let other = JwtManager::new(config, Arc::new(SystemClock)).unwrap();

        let token = other.issue_token("ada@example.com", None).await.unwrap();
        assert!(manager.resolve_token(&token).await.is_err());
    }

    #[tokio::test]
    async fn test_rejects_empty_subject() {
        let manager = manager_with_clock(Arc::new(SystemClock));
        let token = manager.issue_token("", None).await.unwrap();
        assert!(manager.resolve_token(&token).await.is_err());
    }

    #[tokio::test]
    async fn test_rejects_algorithm_mismatch() {
        let manager = manager_with_clock(Arc::new(SystemClock));
        let other = JwtManager::new(
            JwtConfig::new("test-secret", JwtAlgorithm::HS512, 30),
            Arc::new(SystemClock),
        )
        .unwrap();

        let token = other.issue_token("ada@example.com", None).await.unwrap();
        assert!(manager.resolve_token(&token).await.is_err());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = JwtManager::new(
            JwtConfig::new("", JwtAlgorithm::HS256, 30),
            Arc::new(SystemClock),
        );
        assert!(matches!(result, Err(crate::AuthError::Configuration(_))));
    }
}
