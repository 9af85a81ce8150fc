//! Roles and capabilities — declarative access control.
//!
//! DESIGN
//! ======
//! All access decisions flow through one static table instead of string
//! comparisons scattered across handlers. A route asks `role.can(capability)`
//! and the websocket layer asks `role.observes(kind)`; both read the same
//! declarations, so adding a role or capability is a one-table change.

use serde::{Deserialize, Serialize};

use crate::update::UpdateKind;

#[cfg(test)]
#[path = "roles_test.rs"]
mod tests;

/// The four user roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Admin,
    Engineer,
    Customer,
    InteriorDesigner,
}

/// What a route group requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ViewDashboard,
    ManageProjects,
    ManageMaterials,
    ViewFinance,
    EditFloorPlans,
}

/// The access table: capability → roles allowed to exercise it.
const ACCESS: &[(Capability, &[Role])] = &[
    (Capability::ViewDashboard, &[Role::Admin, Role::Engineer, Role::Customer, Role::InteriorDesigner]),
    (Capability::ManageProjects, &[Role::Admin, Role::Engineer]),
    (Capability::ManageMaterials, &[Role::Admin, Role::Engineer]),
    (Capability::ViewFinance, &[Role::Admin]),
    (Capability::EditFloorPlans, &[Role::Admin, Role::InteriorDesigner]),
];

/// Which update kinds each role's dashboard receives over the websocket.
const OBSERVED: &[(Role, &[UpdateKind])] = &[
    (
        Role::Admin,
        &[
            UpdateKind::ProjectUpdate,
            UpdateKind::MilestoneUpdate,
            UpdateKind::MaterialUpdate,
            UpdateKind::DashboardUpdate,
        ],
    ),
    (
        Role::Engineer,
        &[
            UpdateKind::ProjectUpdate,
            UpdateKind::MilestoneUpdate,
            UpdateKind::MaterialUpdate,
            UpdateKind::DashboardUpdate,
        ],
    ),
    (
        Role::Customer,
        &[UpdateKind::ProjectUpdate, UpdateKind::MilestoneUpdate, UpdateKind::DashboardUpdate],
    ),
    (Role::InteriorDesigner, &[UpdateKind::DashboardUpdate]),
];

impl Role {
    /// Parse a stored role string. Accepts the legacy `"interior"` alias
    /// still present in old user rows.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "engineer" => Some(Self::Engineer),
            "customer" => Some(Self::Customer),
            "interior-designer" | "interior" => Some(Self::InteriorDesigner),
            _ => None,
        }
    }

    /// Canonical stored form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Engineer => "engineer",
            Self::Customer => "customer",
            Self::InteriorDesigner => "interior-designer",
        }
    }

    /// Whether this role may exercise `capability`, per the access table.
    #[must_use]
    pub fn can(self, capability: Capability) -> bool {
        ACCESS
            .iter()
            .find(|(c, _)| *c == capability)
            .is_some_and(|(_, roles)| roles.contains(&self))
    }

    /// Update kinds this role's dashboard receives.
    #[must_use]
    pub fn observes(self, kind: UpdateKind) -> bool {
        OBSERVED
            .iter()
            .find(|(r, _)| *r == self)
            .is_some_and(|(_, kinds)| kinds.contains(&kind))
    }

    /// Per-role dashboard redirect target after login.
    #[must_use]
    pub fn dashboard_path(self) -> &'static str {
        match self {
            Self::Admin => "/dashboard/admin",
            Self::Engineer => "/dashboard/engineer",
            Self::Customer => "/dashboard/customer",
            Self::InteriorDesigner => "/dashboard/interior",
        }
    }
}
