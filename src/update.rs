//! Update — the dashboard broadcast message type.
//!
//! DESIGN
//! ======
//! Every push from the server to a connected dashboard is an `Update`: a
//! `kind` discriminator (the wire `type` field) plus a flat JSON payload.
//! Consumers route on `kind` and treat `data` as opaque — the server never
//! promises payload shape beyond the discriminator.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Flat key-value payload. Alias to reduce noise in signatures.
pub type Data = HashMap<String, serde_json::Value>;

/// Wire discriminator for dashboard updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpdateKind {
    ProjectUpdate,
    MilestoneUpdate,
    MaterialUpdate,
    DashboardUpdate,
}

impl UpdateKind {
    /// The wire string for this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProjectUpdate => "project-update",
            Self::MilestoneUpdate => "milestone-update",
            Self::MaterialUpdate => "material-update",
            Self::DashboardUpdate => "dashboard-update",
        }
    }
}

/// One dashboard push message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    #[serde(rename = "type")]
    pub kind: UpdateKind,
    pub data: Data,
}

impl Update {
    #[must_use]
    pub fn new(kind: UpdateKind) -> Self {
        Self { kind, data: Data::new() }
    }

    /// Project change notification.
    #[must_use]
    pub fn project(data: Data) -> Self {
        Self { kind: UpdateKind::ProjectUpdate, data }
    }

    /// Milestone / progress change notification.
    #[must_use]
    pub fn milestone(data: Data) -> Self {
        Self { kind: UpdateKind::MilestoneUpdate, data }
    }

    /// Material stock change notification.
    #[must_use]
    pub fn material(data: Data) -> Self {
        Self { kind: UpdateKind::MaterialUpdate, data }
    }

    /// Whole-dashboard refresh carrying an aggregated snapshot.
    #[must_use]
    pub fn dashboard(snapshot: serde_json::Value) -> Self {
        Self::new(UpdateKind::DashboardUpdate).with_data("snapshot", snapshot)
    }

    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
#[path = "update_test.rs"]
mod tests;
