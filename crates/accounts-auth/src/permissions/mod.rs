//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Permission model and per-resource catalogs

pub mod catalog;
pub mod model;

// Re-export commonly used types
pub use catalog::{catalog_for, PermissionSet, USERS};
pub use model::{permission_matches, Action, Permission, ResourceKind, USERS_RESOURCE};
