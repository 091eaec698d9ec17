//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Roles and the role registry

pub mod model;
pub mod registry;

// Re-export commonly used types
pub use model::Role;
pub use registry::{PermissionGroup, RoleRegistry};
