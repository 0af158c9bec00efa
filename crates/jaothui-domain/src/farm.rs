//! Farm ownership and membership types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::UnknownVariant;

/// Role a user holds on a farm.
///
/// Stored in `farm_members.role` and sent on the wire as `"OWNER"` / `"MEMBER"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FarmRole {
    Owner,
    Member,
}

impl FarmRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "OWNER",
            Self::Member => "MEMBER",
        }
    }
}

impl fmt::Display for FarmRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FarmRole {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OWNER" => Ok(Self::Owner),
            "MEMBER" => Ok(Self::Member),
            other => Err(UnknownVariant::new("farm role", other)),
        }
    }
}

/// Coarse privilege tag consumed by handlers to gate mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Full,
    Limited,
}

impl AccessLevel {
    /// Access level is a pure function of the role.
    pub fn for_role(role: FarmRole) -> Self {
        match role {
            FarmRole::Owner => Self::Full,
            FarmRole::Member => Self::Limited,
        }
    }

    pub fn is_full(self) -> bool {
        matches!(self, Self::Full)
    }
}
