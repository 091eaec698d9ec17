//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Main authentication configuration

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::jwt::{JwtAlgorithm, JwtConfig};
use super::user::{AdminBootstrap, UserConfig};

/// Prefix of every environment variable read by [`AuthConfig::from_env`]
pub const ENV_PREFIX: &str = "ACCOUNTS_";

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// User management configuration
    pub users: UserConfig,
}

impl AuthConfig {
    /// Create a configuration with default user settings
    pub fn new(jwt: JwtConfig) -> Self {
        Self {
            jwt,
            users: UserConfig::default(),
        }
    }

    /// Validate the authentication configuration
    pub fn validate(&self) -> crate::AuthResult<()> {
        self.jwt.validate()?;
        self.users.validate()?;
        Ok(())
    }

    /// Create configuration from environment variables
    ///
    /// # Environment Variables
    ///
    /// ## Required
    /// - `ACCOUNTS_SECRET_KEY`: token signing secret
    /// - `ACCOUNTS_ALGORITHM`: one of HS256, HS384, HS512
    /// - `ACCOUNTS_ACCESS_TOKEN_EXPIRE_MINUTES`: session token lifetime
    ///
    /// ## Optional
    /// - `ACCOUNTS_JWT_ISSUER`: token issuer (default: "accounts")
    /// - `ACCOUNTS_JWT_AUDIENCE`: token audience (default: "accounts-users")
    /// - `ACCOUNTS_RESET_TOKEN_EXPIRE_MINUTES`: reset link lifetime (default: 10)
    /// - `ACCOUNTS_GENERATED_PASSWORD_LENGTH`: signup password length (default: 10)
    /// - `ACCOUNTS_MIN_PASSWORD_LENGTH`: minimum chosen password length (default: 8)
    /// - `ACCOUNTS_ADMIN_EMAIL`: administrator registered at startup
    /// - `ACCOUNTS_ADMIN_PASSWORD`: its initial password (generated when unset)
    /// - `ACCOUNTS_ADMIN_NAME`: its display name (default: "Administrator")
    ///
    /// # Example
    ///
    /// ```bash
    /// export ACCOUNTS_SECRET_KEY="your-super-secret-key"
    /// export ACCOUNTS_ALGORITHM="HS256"
    /// export ACCOUNTS_ACCESS_TOKEN_EXPIRE_MINUTES="30"
    /// ```
    pub fn from_env() -> crate::AuthResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> crate::AuthResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));
        let required = |name: &str| {
            var(name).ok_or_else(|| {
                crate::AuthError::configuration(format!(
                    "{}{} environment variable is required",
                    ENV_PREFIX, name
                ))
            })
        };

        // JWT Configuration
        let secret = required("SECRET_KEY")?;
        let algorithm = JwtAlgorithm::from_str(&required("ALGORITHM")?)?;
        let expire_minutes = parse_number(
            "ACCESS_TOKEN_EXPIRE_MINUTES",
            &required("ACCESS_TOKEN_EXPIRE_MINUTES")?,
        )?;

        let mut config = Self::new(JwtConfig::new(secret, algorithm, expire_minutes));

        if let Some(issuer) = var("JWT_ISSUER") {
            config.jwt.issuer = issuer;
        }

        if let Some(audience) = var("JWT_AUDIENCE") {
            config.jwt.audience = audience;
        }

        // User Configuration
        if let Some(value) = var("RESET_TOKEN_EXPIRE_MINUTES") {
            config.users.reset_token_expire_minutes =
                parse_number("RESET_TOKEN_EXPIRE_MINUTES", &value)?;
        }

        if let Some(value) = var("GENERATED_PASSWORD_LENGTH") {
            config.users.generated_password_length =
                parse_number("GENERATED_PASSWORD_LENGTH", &value)?;
        }

        if let Some(value) = var("MIN_PASSWORD_LENGTH") {
            config.users.min_password_length = parse_number("MIN_PASSWORD_LENGTH", &value)?;
        }

        // Startup administrator
        if let Some(email) = var("ADMIN_EMAIL") {
            let password = var("ADMIN_PASSWORD").filter(|password| !password.is_empty());
            let mut admin = AdminBootstrap::new(email, password);
            if let Some(name) = var("ADMIN_NAME") {
                admin.name = name;
            }
            config.users.bootstrap_admin = Some(admin);
        }

        // Validate the configuration
        config.validate()?;

        Ok(config)
    }
}

fn parse_number<T: FromStr>(name: &str, value: &str) -> crate::AuthResult<T> {
    value.trim().parse().map_err(|_| {
        crate::AuthError::configuration(format!(
            "{}{} must be a valid number, got '{}'",
            ENV_PREFIX, name, value
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn required_vars() -> Vec<(&'static str, &'static str)> {
        vec![
            ("ACCOUNTS_SECRET_KEY", "test-secret"),
            ("ACCOUNTS_ALGORITHM", "HS256"),
            ("ACCOUNTS_ACCESS_TOKEN_EXPIRE_MINUTES", "30"),
        ]
    }

    #[test]
    fn test_auth_config_from_lookup() {
        let config = AuthConfig::from_lookup(lookup(&required_vars())).unwrap();
        assert_eq!(config.jwt.secret, "test-secret");
        assert_eq!(config.jwt.algorithm, JwtAlgorithm::HS256);
        assert_eq!(config.jwt.access_token_expire_minutes, 30);
        assert_eq!(config.jwt.issuer, super::super::jwt::DEFAULT_ISSUER);
        assert_eq!(config.users.reset_token_expire_minutes, 10);
        assert_eq!(config.users.generated_password_length, 10);
    }

    #[test]
    fn test_auth_config_optional_overrides() {
        let mut vars = required_vars();
        vars.push(("ACCOUNTS_JWT_ISSUER", "issuer"));
        vars.push(("ACCOUNTS_JWT_AUDIENCE", "audience"));
        vars.push(("ACCOUNTS_RESET_TOKEN_EXPIRE_MINUTES", "5"));
        vars.push(("ACCOUNTS_GENERATED_PASSWORD_LENGTH", "16"));
        vars.push(("ACCOUNTS_MIN_PASSWORD_LENGTH", "12"));

        let config = AuthConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.jwt.issuer, "issuer");
        assert_eq!(config.jwt.audience, "audience");
        assert_eq!(config.users.reset_token_expire_minutes, 5);
        assert_eq!(config.users.generated_password_length, 16);
        assert_eq!(config.users.min_password_length, 12);
    }

    #[test]
    fn test_auth_config_bootstrap_admin() {
        let config = AuthConfig::from_lookup(lookup(&required_vars())).unwrap();
        assert!(config.users.bootstrap_admin.is_none());

        let mut vars = required_vars();
        vars.push(("ACCOUNTS_ADMIN_EMAIL", "root@example.com"));
        let config = AuthConfig::from_lookup(lookup(&vars)).unwrap();
        let admin = config.users.bootstrap_admin.unwrap();
        assert_eq!(admin.email, "root@example.com");
        assert!(admin.password.is_none());
        assert_eq!(admin.name, crate::config::DEFAULT_ADMIN_NAME);

        vars.push(("ACCOUNTS_ADMIN_PASSWORD", "root-password"));
        vars.push(("ACCOUNTS_ADMIN_NAME", "Root"));
        let config = AuthConfig::from_lookup(lookup(&vars)).unwrap();
        let admin = config.users.bootstrap_admin.unwrap();
        assert_eq!(admin.password.as_deref(), Some("root-password"));
        assert_eq!(admin.name, "Root");

        let mut vars = required_vars();
        vars.push(("ACCOUNTS_ADMIN_EMAIL", "root@example.com"));
        vars.push(("ACCOUNTS_ADMIN_PASSWORD", "short"));
        assert!(AuthConfig::from_lookup(lookup(&vars)).is_err());
    }

    #[test]
    fn test_auth_config_missing_required() {
        for missing in [
            "ACCOUNTS_SECRET_KEY",
            "ACCOUNTS_ALGORITHM",
            "ACCOUNTS_ACCESS_TOKEN_EXPIRE_MINUTES",
        ] {
            let vars: Vec<_> = required_vars()
                .into_iter()
                .filter(|(k, _)| *k != missing)
                .collect();
            let result = AuthConfig::from_lookup(lookup(&vars));
            match result {
                Err(crate::AuthError::Configuration(msg)) => assert!(msg.contains(missing)),
                other => panic!("expected configuration error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_auth_config_malformed_values() {
        let mut vars = required_vars();
        vars[2] = ("ACCOUNTS_ACCESS_TOKEN_EXPIRE_MINUTES", "thirty");
        assert!(AuthConfig::from_lookup(lookup(&vars)).is_err());

        let mut vars = required_vars();
        vars[1] = ("ACCOUNTS_ALGORITHM", "RS256");
        assert!(AuthConfig::from_lookup(lookup(&vars)).is_err());

        let mut vars = required_vars();
        vars.push(("ACCOUNTS_MIN_PASSWORD_LENGTH", "-1"));
        assert!(AuthConfig::from_lookup(lookup(&vars)).is_err());
    }

    #[test]
    fn test_auth_config_rejects_oversized_lifetimes() {
        let mut vars = required_vars();
        vars[2] = ("ACCOUNTS_ACCESS_TOKEN_EXPIRE_MINUTES", "9223372036854775807");
        assert!(matches!(
            AuthConfig::from_lookup(lookup(&vars)),
            Err(crate::AuthError::Configuration(_))
        ));

        let mut vars = required_vars();
        vars.push(("ACCOUNTS_RESET_TOKEN_EXPIRE_MINUTES", "9223372036854775807"));
        assert!(matches!(
            AuthConfig::from_lookup(lookup(&vars)),
            Err(crate::AuthError::Configuration(_))
        ));
    }

    #[test]
    fn test_auth_config_validation() {
        let mut config = AuthConfig::new(JwtConfig::new("secret", JwtAlgorithm::HS256, 30));
        assert!(config.validate().is_ok());

        config.jwt.secret = String::new();
        assert!(config.validate().is_err());
    }
}
