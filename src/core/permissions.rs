//! Role-based access checks.

use serde::{Deserialize, Serialize};

/// System role of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    DungeonMaster,
    #[default]
    Member,
}

/// Something a role may or may not be allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    UseCoPilot,
    ManageUsers,
    ManageGroups,
    SeePrivateGroups,
    ManageCampaigns,
    JoinTables,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::DungeonMaster, Role::Member];

    pub fn can(&self, capability: Capability) -> bool {
        match capability {
            Capability::UseCoPilot | Capability::ManageCampaigns => {
                matches!(self, Role::Admin | Role::DungeonMaster)
            }
            Capability::ManageUsers | Capability::ManageGroups | Capability::SeePrivateGroups => {
                *self == Role::Admin
            }
            Capability::JoinTables => true,
        }
    }

    pub fn is_admin(&self) -> bool {
        *self == Role::Admin
    }

    /// Short badge text.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::DungeonMaster => "DM",
            Role::Member => "Player",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Role::Admin => "Full access to system settings and user management.",
            Role::DungeonMaster => "Access to AI Co-Pilot and campaign tools.",
            Role::Member => "Standard player access.",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
