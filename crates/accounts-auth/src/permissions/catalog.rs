//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Per-resource permission catalogs

use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::warn;

use super::model::{Action, Permission, ResourceKind, USERS_RESOURCE};

/// Catalog of the user records resource, built once per process
pub static USERS: Lazy<PermissionSet> = Lazy::new(|| catalog_for(&USERS_RESOURCE));

/// Permissions derived for one resource kind
#[derive(Debug, Clone)]
pub struct PermissionSet {
    /// Resource kind the set was derived from
    resource: ResourceKind,

    /// Standard CRUD permissions in catalog order
    standard: [Permission; 5],

    /// Extra permissions keyed by declared action name
    extras: HashMap<String, Permission>,

    /// Standard permissions followed by extras in declaration order
    full: Vec<Permission>,
}

/// Derive the standard CRUD permissions plus resource-declared extras
pub fn catalog_for(resource: &ResourceKind) -> PermissionSet {
    let standard = Action::STANDARD.map(|action| Permission::new(resource, &action));

    let mut extras = HashMap::new();
    let mut full: Vec<Permission> = standard.to_vec();

    for action in resource.extra_actions {
        let permission = Permission::new(resource, &Action::extra(*action));
        if full.contains(&permission) {
            warn!(
                "Ignoring duplicate permission {} declared by resource {}",
                permission, resource.name
            );
            continue;
        }
        extras.insert(action.to_string(), permission.clone());
        full.push(permission);
    }

    PermissionSet {
        resource: *resource,
        standard,
        extras,
        full,
    }
}

impl PermissionSet {
    /// Resource kind this set belongs to
    pub fn resource(&self) -> &ResourceKind {
        &self.resource
    }

    pub fn create(&self) -> &Permission {
        &self.standard[0]
    }

    pub fn view_list(&self) -> &Permission {
        &self.standard[1]
    }

    pub fn view_details(&self) -> &Permission {
        &self.standard[2]
    }

    pub fn edit(&self) -> &Permission {
        &self.standard[3]
    }

    pub fn delete(&self) -> &Permission {
        &self.standard[4]
    }

    /// Look up a resource-declared permission by action name
    pub fn extra(&self, action: &str) -> Option<&Permission> {
        self.extras.get(action)
    }

    /// Resource-declared permission that must exist
    pub fn required_extra(&self, action: &str) -> crate::AuthResult<Permission> {
        self.extra(action).cloned().ok_or_else(|| {
            crate::AuthError::configuration(format!(
                "Resource {} does not declare {}",
                self.resource.name, action
            ))
        })
    }

    /// Look up any permission of this set by action name
    pub fn get(&self, action: &str) -> Option<&Permission> {
        Action::STANDARD
            .iter()
            .position(|standard| standard.as_str() == action)
            .map(|index| &self.standard[index])
            .or_else(|| self.extra(action))
    }

    /// Every permission of the resource (FULL_PERMISSIONS)
    pub fn full_permissions(&self) -> &[Permission] {
        &self.full
    }

    /// Check whether the set contains the given permission
    pub fn contains(&self, permission: &Permission) -> bool {
        self.full.contains(permission)
    }
}
