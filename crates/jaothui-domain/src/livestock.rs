//! Animal record types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::UnknownVariant;

/// Lifecycle status of an animal record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnimalStatus {
    #[default]
    Active,
    Transferred,
    Deceased,
    Sold,
}

impl AnimalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Transferred => "TRANSFERRED",
            Self::Deceased => "DECEASED",
            Self::Sold => "SOLD",
        }
    }
}

impl fmt::Display for AnimalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnimalStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "TRANSFERRED" => Ok(Self::Transferred),
            "DECEASED" => Ok(Self::Deceased),
            "SOLD" => Ok(Self::Sold),
            other => Err(UnknownVariant::new("animal status", other)),
        }
    }
}

/// Species of an animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnimalType {
    Buffalo,
    Cattle,
    Goat,
    Pig,
    Chicken,
    Other,
}

impl AnimalType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Buffalo => "BUFFALO",
            Self::Cattle => "CATTLE",
            Self::Goat => "GOAT",
            Self::Pig => "PIG",
            Self::Chicken => "CHICKEN",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for AnimalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnimalType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUFFALO" => Ok(Self::Buffalo),
            "CATTLE" => Ok(Self::Cattle),
            "GOAT" => Ok(Self::Goat),
            "PIG" => Ok(Self::Pig),
            "CHICKEN" => Ok(Self::Chicken),
            "OTHER" => Ok(Self::Other),
            other => Err(UnknownVariant::new("animal type", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MALE" => Ok(Self::Male),
            "FEMALE" => Ok(Self::Female),
            "UNKNOWN" => Ok(Self::Unknown),
            other => Err(UnknownVariant::new("gender", other)),
        }
    }
}
