//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Permission requirements attached to operations

use std::collections::BTreeSet;

use crate::permissions::Permission;

/// Permissions an operation needs, all of which must be held
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Requirement {
    permissions: Vec<Permission>,
}

impl Requirement {
    /// Required permissions, in declaration order
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    /// Check whether the requirement names no permission
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }

    /// Required permissions absent from `granted`
    pub fn missing<'a>(&'a self, granted: &BTreeSet<String>) -> Vec<&'a Permission> {
        self.permissions
            .iter()
            .filter(|permission| !granted.contains(permission.canonical_name()))
            .collect()
    }

    /// Check whether `granted` covers every required permission
    pub fn is_satisfied_by(&self, granted: &BTreeSet<String>) -> bool {
        self.missing(granted).is_empty()
    }
}

/// Build a requirement from a list of permissions
pub fn require<I>(permissions: I) -> Requirement
where
    I: IntoIterator<Item = Permission>,
{
    let mut permissions: Vec<Permission> = permissions.into_iter().collect();
    let mut seen = BTreeSet::new();
    permissions.retain(|permission| seen.insert(permission.canonical_name().to_string()));
    Requirement { permissions }
}
