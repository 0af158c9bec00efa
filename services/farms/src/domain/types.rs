use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use jaothui_domain::activity::{ActivityKind, ActivityStatus};
use jaothui_domain::farm::{AccessLevel, FarmRole};
use jaothui_domain::livestock::{AnimalStatus, AnimalType, Gender};

use crate::error::FarmsServiceError;

/// Province recorded on auto-provisioned farms until the owner edits it.
pub const DEFAULT_PROVINCE: &str = "ไม่ระบุ";
pub const DEFAULT_FARM_DESCRIPTION: &str = "ฟาร์มที่สร้างอัตโนมัติเมื่อเข้าสู่ระบบครั้งแรก";
const DEFAULT_FARM_NAME_PREFIX: &str = "ฟาร์มของ";

/// Account as issued by the auth provider.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// First name when set, otherwise the username.
    pub fn display_name(&self) -> &str {
        self.first_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(self.username.as_str())
    }

    pub fn default_farm_name(&self) -> String {
        format!("{DEFAULT_FARM_NAME_PREFIX}{}", self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Farm {
    pub id: Uuid,
    pub name: String,
    pub owner_id: String,
    pub province: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `Some(None)` on a nullable field clears it.
#[derive(Debug, Clone, Default)]
pub struct FarmPatch {
    pub name: Option<String>,
    pub province: Option<String>,
    pub description: Option<Option<String>>,
}

impl FarmPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.province.is_none() && self.description.is_none()
    }
}

/// A user's link to a farm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FarmMember {
    pub id: Uuid,
    pub farm_id: Uuid,
    pub user_id: String,
    pub role: FarmRole,
    pub created_at: DateTime<Utc>,
}

/// Which farm a user acts on behalf of, and with what privilege.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FarmContext {
    pub farm: Farm,
    pub role: FarmRole,
    pub access_level: AccessLevel,
}

impl FarmContext {
    pub fn new(farm: Farm, role: FarmRole) -> Self {
        Self {
            farm,
            role,
            access_level: AccessLevel::for_role(role),
        }
    }

    pub fn farm_id(&self) -> Uuid {
        self.farm.id
    }

    /// Gate for mutations reserved to owners.
    pub fn require_full(&self) -> Result<(), FarmsServiceError> {
        if self.access_level.is_full() {
            Ok(())
        } else {
            Err(FarmsServiceError::InsufficientAccess)
        }
    }
}

/// Optional narrowing of farm context resolution to one farm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FarmContextParams {
    pub farm_id: Option<Uuid>,
}

impl FarmContextParams {
    pub fn for_farm(farm_id: Uuid) -> Self {
        Self {
            farm_id: Some(farm_id),
        }
    }
}

/// How the default farm of a user is looked up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupStrategy {
    /// Ownership lookup, then membership lookup.
    Sequential,
    /// One UNION query over ownership and membership rows.
    #[default]
    Union,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Animal {
    pub id: Uuid,
    pub farm_id: Uuid,
    pub tag_id: String,
    pub name: String,
    pub animal_type: AnimalType,
    pub gender: Gender,
    pub birth_date: Option<NaiveDate>,
    pub color: Option<String>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub mother_tag: Option<String>,
    pub father_tag: Option<String>,
    pub notes: Option<String>,
    pub status: AnimalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct AnimalPatch {
    pub tag_id: Option<String>,
    pub name: Option<String>,
    pub animal_type: Option<AnimalType>,
    pub gender: Option<Gender>,
    pub birth_date: Option<Option<NaiveDate>>,
    pub color: Option<Option<String>>,
    pub weight_kg: Option<Option<f64>>,
    pub height_cm: Option<Option<f64>>,
    pub mother_tag: Option<Option<String>>,
    pub father_tag: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub status: Option<AnimalStatus>,
}

impl AnimalPatch {
    pub fn is_empty(&self) -> bool {
        self.tag_id.is_none()
            && self.name.is_none()
            && self.animal_type.is_none()
            && self.gender.is_none()
            && self.birth_date.is_none()
            && self.color.is_none()
            && self.weight_kg.is_none()
            && self.height_cm.is_none()
            && self.mother_tag.is_none()
            && self.father_tag.is_none()
            && self.notes.is_none()
            && self.status.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnimalFilter {
    pub status: Option<AnimalStatus>,
    /// Case-insensitive substring of tag or name.
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub id: Uuid,
    pub farm_id: Uuid,
    pub animal_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub kind: ActivityKind,
    pub status: ActivityStatus,
    pub activity_date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ActivityPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub kind: Option<ActivityKind>,
    pub status: Option<ActivityStatus>,
    pub activity_date: Option<DateTime<Utc>>,
    pub due_date: Option<Option<DateTime<Utc>>>,
}

impl ActivityPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.kind.is_none()
            && self.status.is_none()
            && self.activity_date.is_none()
            && self.due_date.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ActivityFilter {
    pub status: Option<ActivityStatus>,
    pub animal_id: Option<Uuid>,
}

/// Badge counts shown in the navigation bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationCounts {
    pub overdue: u64,
    pub due_today: u64,
    pub total: u64,
}

impl NotificationCounts {
    pub fn new(overdue: u64, due_today: u64) -> Self {
        Self {
            overdue,
            due_today,
            total: overdue + due_today,
        }
    }
}
