#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use jaothui_domain::farm::FarmRole;
use jaothui_domain::pagination::PageRequest;

use crate::domain::types::{
    Activity, ActivityFilter, Animal, AnimalFilter, Farm, FarmMember, FarmPatch, User,
};
use crate::error::FarmsServiceError;

/// Lookups the farm context resolver needs.
///
/// Membership lookups that return `(FarmMember, Farm)` only match rows whose
/// farm still exists.
pub trait FarmAccessRepository: Send + Sync {
    /// Oldest farm owned by the user.
    async fn find_owned_farm(&self, user_id: &str) -> Result<Option<Farm>, FarmsServiceError>;

    async fn find_owned_farm_by_id(
        &self,
        farm_id: Uuid,
        user_id: &str,
    ) -> Result<Option<Farm>, FarmsServiceError>;

    /// Oldest membership of the user, joined with its farm.
    async fn find_membership(
        &self,
        user_id: &str,
    ) -> Result<Option<(FarmMember, Farm)>, FarmsServiceError>;

    async fn find_membership_in_farm(
        &self,
        farm_id: Uuid,
        user_id: &str,
    ) -> Result<Option<(FarmMember, Farm)>, FarmsServiceError>;

    async fn list_owned_farms(&self, user_id: &str) -> Result<Vec<Farm>, FarmsServiceError>;

    /// All memberships of the user; the farm is `None` when its row is gone.
    async fn list_memberships(
        &self,
        user_id: &str,
    ) -> Result<Vec<(FarmMember, Option<Farm>)>, FarmsServiceError>;

    /// Ownership-first lookup in a single round trip.
    async fn find_first_accessible(
        &self,
        user_id: &str,
    ) -> Result<Option<(Farm, FarmRole)>, FarmsServiceError>;
}

pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, FarmsServiceError>;
}

pub trait FarmRepository: Send + Sync {
    /// Insert the farm and its `OWNER` membership row atomically.
    async fn create_with_owner(
        &self,
        farm: &Farm,
        owner: &FarmMember,
    ) -> Result<(), FarmsServiceError>;

    async fn update(&self, farm_id: Uuid, patch: &FarmPatch) -> Result<Farm, FarmsServiceError>;
}

pub trait MemberRepository: Send + Sync {
    async fn list(&self, farm_id: Uuid) -> Result<Vec<FarmMember>, FarmsServiceError>;

    async fn find(
        &self,
        farm_id: Uuid,
        user_id: &str,
    ) -> Result<Option<FarmMember>, FarmsServiceError>;

    /// Fails with `MemberAlreadyExists` on a duplicate `(farm_id, user_id)`.
    async fn create(&self, member: &FarmMember) -> Result<(), FarmsServiceError>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, farm_id: Uuid, user_id: &str) -> Result<bool, FarmsServiceError>;
}

pub trait AnimalRepository: Send + Sync {
    async fn list(
        &self,
        farm_id: Uuid,
        filter: &AnimalFilter,
        page: PageRequest,
    ) -> Result<Vec<Animal>, FarmsServiceError>;

    async fn get(&self, farm_id: Uuid, id: Uuid) -> Result<Option<Animal>, FarmsServiceError>;

    /// Fails with `AnimalTagTaken` when the tag already exists on the farm.
    async fn create(&self, animal: &Animal) -> Result<(), FarmsServiceError>;

    /// Overwrite every mutable column. Same tag rule as `create`.
    async fn update(&self, animal: &Animal) -> Result<(), FarmsServiceError>;

    async fn delete(&self, farm_id: Uuid, id: Uuid) -> Result<bool, FarmsServiceError>;
}

pub trait ActivityRepository: Send + Sync {
    async fn list(
        &self,
        farm_id: Uuid,
        filter: &ActivityFilter,
        page: PageRequest,
    ) -> Result<Vec<Activity>, FarmsServiceError>;

    async fn get(&self, farm_id: Uuid, id: Uuid) -> Result<Option<Activity>, FarmsServiceError>;

    async fn create(&self, activity: &Activity) -> Result<(), FarmsServiceError>;

    async fn update(&self, activity: &Activity) -> Result<(), FarmsServiceError>;

    async fn delete(&self, farm_id: Uuid, id: Uuid) -> Result<bool, FarmsServiceError>;
}

/// Counts behind the notification badge.
pub trait NotificationRepository: Send + Sync {
    /// `OVERDUE` activities plus `PENDING` ones whose due date is before `now`.
    async fn count_overdue(
        &self,
        farm_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<u64, FarmsServiceError>;

    /// `PENDING` activities due in `[from, to)`.
    async fn count_pending_due_between(
        &self,
        farm_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<u64, FarmsServiceError>;
}
