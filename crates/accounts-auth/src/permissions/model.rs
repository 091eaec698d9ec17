//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Permission model definitions

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Action a permission grants on a resource kind
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    Create,
    ViewList,
    ViewDetails,
    Edit,
    Delete,

    /// Resource-declared action such as `VIEW_ME`
    Extra(Cow<'static, str>),
}

impl Action {
    /// Standard actions every resource kind carries, in catalog order
    pub const STANDARD: [Action; 5] = [
        Action::Create,
        Action::ViewList,
        Action::ViewDetails,
        Action::Edit,
        Action::Delete,
    ];

    /// Create a resource-specific action
    pub fn extra(name: impl Into<Cow<'static, str>>) -> Self {
        Action::Extra(name.into())
    }

    /// Action name as declared
    pub fn as_str(&self) -> &str {
        match self {
            Action::Create => "CREATE",
            Action::ViewList => "VIEW_LIST",
            Action::ViewDetails => "VIEW_DETAILS",
            Action::Edit => "EDIT",
            Action::Delete => "DELETE",
            Action::Extra(name) => name,
        }
    }

    /// Check whether this is one of the five standard actions
    pub fn is_standard(&self) -> bool {
        !matches!(self, Action::Extra(_))
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named entity type for which permissions are derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceKind {
    /// Resource name in CamelCase (e.g. `Users`)
    pub name: &'static str,

    /// Extra actions beyond the standard CRUD set, in declaration order
    pub extra_actions: &'static [&'static str],
}

impl ResourceKind {
    /// Declare a resource kind
    pub const fn new(name: &'static str, extra_actions: &'static [&'static str]) -> Self {
        Self {
            name,
            extra_actions,
        }
    }

    /// Name used as the permission prefix (e.g. `ApiKeys` -> `API_KEYS`)
    pub fn permission_prefix(&self) -> String {
        snake_upper(self.name)
    }
}

/// The user records resource
pub const USERS_RESOURCE: ResourceKind = ResourceKind::new(
    "Users",
    &["VIEW_ME", "EDIT_ME", "CHANGE_PASSWORD", "VIEW_ROLES"],
);

/// A single capability, identified by its canonical name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission {
    name: String,
}

impl Permission {
    /// Create a permission scoped to a resource kind
    pub fn new(resource: &ResourceKind, action: &Action) -> Self {
        Self {
            name: format!(
                "{}_{}",
                resource.permission_prefix(),
                action.as_str().to_uppercase()
            ),
        }
    }

    /// Create a permission from a raw name, used verbatim
    pub fn raw(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Canonical `<RESOURCE>_<ACTION>` name
    pub fn canonical_name(&self) -> &str {
        &self.name
    }

    /// Check whether this permission carries the given name
    pub fn matches(&self, name: &str) -> bool {
        permission_matches(self, name)
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Compare a permission against a plain permission name
pub fn permission_matches(permission: &Permission, name: &str) -> bool {
    permission.canonical_name() == name
}

/// Convert a CamelCase name to SEPARATED_UPPER form.
///
/// An underscore goes before every ASCII uppercase letter except the first
/// character, then the whole string is uppercased.
fn snake_upper(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            out.push('_');
        }
        out.push(c);
    }
    out.to_uppercase()
}
