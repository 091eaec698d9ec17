//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Static role to permission mapping

use std::collections::{BTreeSet, HashMap};
use tracing::info;

use crate::permissions::{Permission, USERS};

use super::model::Role;

/// Ordered group of permissions granted together
pub type PermissionGroup = Vec<Permission>;

/// Role registry
///
/// Built once at startup from a table covering every [`Role`]. The flattened
/// permission set of each role is computed at construction, so resolution is
/// a read-only lookup that needs no locking.
#[derive(Debug, Clone)]
pub struct RoleRegistry {
    /// Permission groups per role, as declared
    table: HashMap<Role, Vec<PermissionGroup>>,

    /// Deduplicated canonical names per role
    resolved: HashMap<Role, BTreeSet<String>>,
}

impl RoleRegistry {
    /// Create a registry from a role table
    pub fn new(table: HashMap<Role, Vec<PermissionGroup>>) -> crate::AuthResult<Self> {
        let missing: Vec<String> = Role::all()
            .iter()
            .filter(|role| !table.contains_key(*role))
            .map(|role| role.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(crate::AuthError::configuration(format!(
                "No permission groups declared for roles: {}",
                missing.join(", ")
            )));
        }

        let resolved = table
            .iter()
            .map(|(role, groups)| (*role, flatten(groups)))
            .collect();

        Ok(Self { table, resolved })
    }

    /// Registry with the built-in role table
    pub fn standard() -> crate::AuthResult<Self> {
        let mut table = HashMap::new();
        table.insert(
            Role::Administrator,
            vec![USERS.full_permissions().to_vec()],
        );
        table.insert(
            Role::User,
            vec![vec![
                USERS.required_extra("CHANGE_PASSWORD")?,
                USERS.required_extra("VIEW_ME")?,
                USERS.required_extra("EDIT_ME")?,
            ]],
        );

        let registry = Self::new(table)?;
        info!("Initialized role registry with {} roles", registry.table.len());
        Ok(registry)
    }

    /// Resolve a role to its flattened set of permission names
    pub fn resolve(&self, role: Role) -> crate::AuthResult<&BTreeSet<String>> {
        self.resolved.get(&role).ok_or_else(|| {
            crate::AuthError::configuration(format!("Role {} is not registered", role))
        })
    }

    /// Check whether a role holds a permission
    pub fn role_has_permission(&self, role: Role, permission: &Permission) -> bool {
        self.resolve(role)
            .map(|names| names.contains(permission.canonical_name()))
            .unwrap_or(false)
    }

    /// Permission groups declared for a role
    pub fn groups(&self, role: Role) -> Option<&[PermissionGroup]> {
        self.table.get(&role).map(Vec::as_slice)
    }

    /// Roles covered by the registry
    pub fn roles(&self) -> Vec<Role> {
        let mut roles: Vec<Role> = self.table.keys().copied().collect();
        roles.sort();
        roles
    }
}

fn flatten(groups: &[PermissionGroup]) -> BTreeSet<String> {
    groups
        .iter()
        .flatten()
        .map(|permission| permission.canonical_name().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_resolution() {
        let registry = RoleRegistry::standard().unwrap();

        let admin = registry.resolve(Role::Administrator).unwrap();
        assert_eq!(admin.len(), USERS.full_permissions().len());
        assert!(admin.contains("USERS_DELETE"));
        assert!(admin.contains("USERS_VIEW_ROLES"));

        let user = registry.resolve(Role::User).unwrap();
        let expected: BTreeSet<String> = ["USERS_CHANGE_PASSWORD", "USERS_VIEW_ME", "USERS_EDIT_ME"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(user, &expected);
    }

    #[test]
    fn test_administrator_is_superset_of_user() {
        let registry = RoleRegistry::standard().unwrap();
        let admin = registry.resolve(Role::Administrator).unwrap();
        let user = registry.resolve(Role::User).unwrap();
        assert!(admin.is_superset(user));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let first = RoleRegistry::standard().unwrap();
        let second = RoleRegistry::standard().unwrap();

        for role in Role::all() {
            let once = first.resolve(*role).unwrap().clone();
            let twice = first.resolve(*role).unwrap().clone();
            assert_eq!(once, twice);
            assert_eq!(&once, second.resolve(*role).unwrap());
        }
    }

    #[test]
    fn test_groups_are_deduplicated() {
        let mut table = HashMap::new();
        table.insert(
            Role::Administrator,
            vec![
                USERS.full_permissions().to_vec(),
                vec![USERS.delete().clone(), USERS.create().clone()],
            ],
        );
        table.insert(Role::User, vec![vec![USERS.view_list().clone()], vec![]]);

        let registry = RoleRegistry::new(table).unwrap();
        assert_eq!(
            registry.resolve(Role::Administrator).unwrap().len(),
            USERS.full_permissions().len()
        );
        assert_eq!(registry.resolve(Role::User).unwrap().len(), 1);
        assert_eq!(registry.groups(Role::Administrator).map(|g| g.len()), Some(2));
    }

    #[test]
    fn test_uncovered_role_is_a_configuration_error() {
        let mut table = HashMap::new();
        table.insert(Role::Administrator, vec![USERS.full_permissions().to_vec()]);

        let result = RoleRegistry::new(table);
        assert!(matches!(result, Err(crate::AuthError::Configuration(_))));
    }

    #[test]
    fn test_role_has_permission() {
        let registry = RoleRegistry::standard().unwrap();
        assert!(registry.role_has_permission(Role::User, USERS.extra("VIEW_ME").unwrap()));
        assert!(!registry.role_has_permission(Role::User, USERS.delete()));
        assert_eq!(registry.roles(), vec![Role::Administrator, Role::User]);
    }
}
