//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! User management module

pub mod manager;
pub mod model;
pub mod stats;
pub mod store;

// Re-export commonly used types
pub use manager::UserManager;
pub use model::{
    normalize_email, ChangePassword, Principal, SignUp, UserChanges, UserUpdate, UserUpdateMe,
};
pub use stats::UserStats;
pub use store::{InMemoryUserStore, UserStore};
