//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Configuration for the accounts server

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use crate::error::ServerError;

/// Default listen address
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:9999";

/// Default public base URL used in emailed links
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:9999";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    pub bind_address: String,

    /// Base URL clients reach the server at
    pub public_base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            public_base_url: DEFAULT_PUBLIC_BASE_URL.to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// - `ACCOUNTS_BIND_ADDRESS` (default: `0.0.0.0:9999`)
    /// - `ACCOUNTS_PUBLIC_BASE_URL` (default: `http://localhost:9999`)
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(bind_address) = lookup("ACCOUNTS_BIND_ADDRESS") {
            config.bind_address = bind_address;
        }

        if let Some(public_base_url) = lookup("ACCOUNTS_PUBLIC_BASE_URL") {
            config.public_base_url = public_base_url.trim_end_matches('/').to_string();
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ServerError> {
        self.socket_addr()?;

        if !(self.public_base_url.starts_with("http://")
            || self.public_base_url.starts_with("https://"))
        {
            return Err(ServerError::configuration(format!(
                "Public base URL must be http(s), got '{}'",
                self.public_base_url
            )));
        }

        Ok(())
    }

    /// Parsed listen address
    pub fn socket_addr(&self) -> Result<SocketAddr, ServerError> {
        self.bind_address.parse().map_err(|e| {
            ServerError::configuration(format!(
                "Invalid bind address '{}': {}",
                self.bind_address, e
            ))
        })
    }
}
