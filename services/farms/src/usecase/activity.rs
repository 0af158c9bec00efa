use chrono::{DateTime, Utc};
use uuid::Uuid;

use jaothui_domain::activity::{ActivityKind, ActivityStatus};
use jaothui_domain::pagination::PageRequest;

use crate::domain::repository::{ActivityRepository, AnimalRepository};
use crate::domain::types::{Activity, ActivityFilter, ActivityPatch, FarmContext};
use crate::error::FarmsServiceError;

/// `completed_at` follows the status: stamped on `COMPLETED`, cleared otherwise.
fn apply_status(activity: &mut Activity, status: ActivityStatus, now: DateTime<Utc>) {
    activity.completed_at = (status == ActivityStatus::Completed).then_some(now);
    activity.status = status;
}

fn validate_title(title: &str) -> Result<String, FarmsServiceError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(FarmsServiceError::InvalidInput("title must not be blank"));
    }
    Ok(title.to_owned())
}

// ── ListActivities ───────────────────────────────────────────────────────────

pub struct ListActivitiesUseCase<R: ActivityRepository> {
    pub repo: R,
}

impl<R: ActivityRepository> ListActivitiesUseCase<R> {
    pub async fn execute(
        &self,
        context: &FarmContext,
        filter: ActivityFilter,
        page: PageRequest,
    ) -> Result<Vec<Activity>, FarmsServiceError> {
        self.repo
            .list(context.farm_id(), &filter, page.clamped())
            .await
    }
}

// ── GetActivity ──────────────────────────────────────────────────────────────

pub struct GetActivityUseCase<R: ActivityRepository> {
    pub repo: R,
}

impl<R: ActivityRepository> GetActivityUseCase<R> {
    pub async fn execute(
        &self,
        context: &FarmContext,
        id: Uuid,
    ) -> Result<Activity, FarmsServiceError> {
        self.repo
            .get(context.farm_id(), id)
            .await?
            .ok_or(FarmsServiceError::ActivityNotFound)
    }
}

// ── CreateActivity ───────────────────────────────────────────────────────────

pub struct CreateActivityInput {
    pub animal_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub kind: ActivityKind,
    pub activity_date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
}

pub struct CreateActivityUseCase<A: AnimalRepository, R: ActivityRepository> {
    pub animals: A,
    pub repo: R,
}

impl<A: AnimalRepository, R: ActivityRepository> CreateActivityUseCase<A, R> {
    pub async fn execute(
        &self,
        context: &FarmContext,
        created_by: &str,
        input: CreateActivityInput,
    ) -> Result<Activity, FarmsServiceError> {
        let title = validate_title(&input.title)?;
        if self
            .animals
            .get(context.farm_id(), input.animal_id)
            .await?
            .is_none()
        {
            return Err(FarmsServiceError::AnimalNotFound);
        }

        let now = Utc::now();
        let activity = Activity {
            id: Uuid::now_v7(),
            farm_id: context.farm_id(),
            animal_id: input.animal_id,
            title,
            description: input.description,
            kind: input.kind,
            status: ActivityStatus::Pending,
            activity_date: input.activity_date,
            due_date: input.due_date,
            completed_at: None,
            created_by: created_by.to_owned(),
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&activity).await?;
        Ok(activity)
    }
}

// ── UpdateActivity ───────────────────────────────────────────────────────────

pub struct UpdateActivityUseCase<R: ActivityRepository> {
    pub repo: R,
}

impl<R: ActivityRepository> UpdateActivityUseCase<R> {
    pub async fn execute(
        &self,
        context: &FarmContext,
        id: Uuid,
        patch: ActivityPatch,
    ) -> Result<Activity, FarmsServiceError> {
        if patch.is_empty() {
            return Err(FarmsServiceError::MissingData);
        }
        let mut activity = self
            .repo
            .get(context.farm_id(), id)
            .await?
            .ok_or(FarmsServiceError::ActivityNotFound)?;

        let now = Utc::now();
        if let Some(title) = patch.title {
            activity.title = validate_title(&title)?;
        }
        if let Some(description) = patch.description {
            activity.description = description;
        }
        if let Some(kind) = patch.kind {
            activity.kind = kind;
        }
        if let Some(activity_date) = patch.activity_date {
            activity.activity_date = activity_date;
        }
        if let Some(due_date) = patch.due_date {
            activity.due_date = due_date;
        }
        if let Some(status) = patch.status {
            apply_status(&mut activity, status, now);
        }

        activity.updated_at = now;
        self.repo.update(&activity).await?;
        Ok(activity)
    }
}

// ── DeleteActivity ───────────────────────────────────────────────────────────

pub struct DeleteActivityUseCase<R: ActivityRepository> {
    pub repo: R,
}

impl<R: ActivityRepository> DeleteActivityUseCase<R> {
    pub async fn execute(&self, context: &FarmContext, id: Uuid) -> Result<(), FarmsServiceError> {
        context.require_full()?;
        if !self.repo.delete(context.farm_id(), id).await? {
            return Err(FarmsServiceError::ActivityNotFound);
        }
        Ok(())
    }
}
