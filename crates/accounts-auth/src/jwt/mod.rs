//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! JWT (JSON Web Token) bearer token module

pub mod claims;
pub mod clock;
pub mod manager;
pub mod stats;

// Re-export commonly used types
pub use claims::JwtClaims;
pub use clock::{Clock, ManualClock, SystemClock};
pub use manager::{JwtManager, INVALID_TOKEN_MESSAGE};
pub use stats::JwtStats;
