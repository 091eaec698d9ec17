//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Request-time permission checks

pub mod manager;
pub mod requirement;
pub mod stats;

// Re-export commonly used types
pub use manager::AccessGuard;
pub use requirement::{require, Requirement};
pub use stats::GuardStats;
