//! Viewer role context.
//!
//! Identity and session resolution happen elsewhere; the kernel only receives
//! the already-resolved set of roles the current viewer holds.

use std::collections::{BTreeSet, HashSet};

use atrium_sdk::RoleType;

/// Roles held by the viewer of the current request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerRoles {
    roles: HashSet<RoleType>,
}

impl ViewerRoles {
    /// A viewer holding no roles.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A viewer holding exactly `roles`.
    pub fn from_roles(roles: impl IntoIterator<Item = RoleType>) -> Self {
        Self {
            roles: roles.into_iter().collect(),
        }
    }

    /// True if the viewer holds `role`.
    pub fn has_role(&self, role: RoleType) -> bool {
        self.roles.contains(&role)
    }

    /// True if the viewer holds at least one of `required`.
    pub fn has_any_role<'a>(&self, required: impl IntoIterator<Item = &'a RoleType>) -> bool {
        required.into_iter().any(|r| self.roles.contains(r))
    }

    /// Whether an item gated by `required_roles` is visible.
    ///
    /// Absent or empty requirements mean visible to everyone.
    pub fn satisfies(&self, required_roles: Option<&BTreeSet<RoleType>>) -> bool {
        match required_roles {
            None => true,
            Some(required) if required.is_empty() => true,
            Some(required) => self.has_any_role(required),
        }
    }

    /// True for an anonymous viewer.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Roles held, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = RoleType> + '_ {
        self.roles.iter().copied()
    }
}

impl FromIterator<RoleType> for ViewerRoles {
    fn from_iter<T: IntoIterator<Item = RoleType>>(iter: T) -> Self {
        Self::from_roles(iter)
    }
}
