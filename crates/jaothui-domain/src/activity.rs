//! Care activity types: feeding, vaccination, health checks and the like.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::UnknownVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
    Overdue,
}

impl ActivityStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
            Self::Overdue => "OVERDUE",
        }
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            "OVERDUE" => Ok(Self::Overdue),
            other => Err(UnknownVariant::new("activity status", other)),
        }
    }
}

/// What kind of care an activity records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityKind {
    Feeding,
    Vaccination,
    HealthCheck,
    Breeding,
    Treatment,
    Other,
}

impl ActivityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Feeding => "FEEDING",
            Self::Vaccination => "VACCINATION",
            Self::HealthCheck => "HEALTH_CHECK",
            Self::Breeding => "BREEDING",
            Self::Treatment => "TREATMENT",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FEEDING" => Ok(Self::Feeding),
            "VACCINATION" => Ok(Self::Vaccination),
            "HEALTH_CHECK" => Ok(Self::HealthCheck),
            "BREEDING" => Ok(Self::Breeding),
            "TREATMENT" => Ok(Self::Treatment),
            "OTHER" => Ok(Self::Other),
            other => Err(UnknownVariant::new("activity kind", other)),
        }
    }
}
