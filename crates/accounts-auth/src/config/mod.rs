//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Authentication configuration module

pub mod auth;
pub mod jwt;
pub mod user;

// Re-export commonly used types
pub use auth::AuthConfig;
pub use jwt::{JwtAlgorithm, JwtConfig, MAX_TOKEN_EXPIRE_MINUTES};
pub use user::{AdminBootstrap, PasswordHashingConfig, UserConfig, DEFAULT_ADMIN_NAME};
