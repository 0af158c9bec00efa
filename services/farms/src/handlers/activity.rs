use axum::{
    Json,
    extract::{Path, RawQuery, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use jaothui_auth_types::identity::IdentityHeaders;
use jaothui_domain::activity::{ActivityKind, ActivityStatus};
use jaothui_domain::pagination::PageRequest;

use crate::domain::types::{Activity, ActivityFilter, ActivityPatch, FarmContextParams};
use crate::error::FarmsServiceError;
use crate::handlers::{json_body, parse_id, parse_query, resolve_context};
use crate::state::AppState;
use crate::usecase::activity::{
    CreateActivityInput, CreateActivityUseCase, DeleteActivityUseCase, GetActivityUseCase,
    ListActivitiesUseCase, UpdateActivityUseCase,
};

const ACTIVITY_ID_REASON: &str = "activity_id must be a UUID";

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ActivityResponse {
    pub id: String,
    pub farm_id: String,
    pub animal_id: String,
    pub title: String,
    pub description: Option<String>,
    pub kind: ActivityKind,
    pub status: ActivityStatus,
    #[serde(serialize_with = "jaothui_core::serde::to_rfc3339_ms")]
    pub activity_date: DateTime<Utc>,
    #[serde(serialize_with = "jaothui_core::serde::to_rfc3339_ms_opt")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(serialize_with = "jaothui_core::serde::to_rfc3339_ms_opt")]
    pub completed_at: Option<DateTime<Utc>>,
    pub created_by: String,
    #[serde(serialize_with = "jaothui_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "jaothui_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Activity> for ActivityResponse {
    fn from(activity: Activity) -> Self {
        Self {
            id: activity.id.to_string(),
            farm_id: activity.farm_id.to_string(),
            animal_id: activity.animal_id.to_string(),
            title: activity.title,
            description: activity.description,
            kind: activity.kind,
            status: activity.status,
            activity_date: activity.activity_date,
            due_date: activity.due_date,
            completed_at: activity.completed_at,
            created_by: activity.created_by,
            created_at: activity.created_at,
            updated_at: activity.updated_at,
        }
    }
}

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ActivityListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub status: Option<ActivityStatus>,
    pub animal_id: Option<Uuid>,
}

// ── GET /activities ──────────────────────────────────────────────────────────

pub async fn list_activities(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<ActivityResponse>>, FarmsServiceError> {
    let query: ActivityListQuery = parse_query(raw_query)?;
    let context = resolve_context(&state, &identity, FarmContextParams::default()).await?;
    let usecase = ListActivitiesUseCase {
        repo: state.activity_repo(),
    };
    let activities = usecase
        .execute(
            &context,
            ActivityFilter {
                status: query.status,
                animal_id: query.animal_id,
            },
            PageRequest::new(query.per_page, query.page),
        )
        .await?;
    Ok(Json(activities.into_iter().map(Into::into).collect()))
}

// ── GET /activities/{activity_id} ────────────────────────────────────────────

pub async fn get_activity(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(activity_id): Path<String>,
) -> Result<Json<ActivityResponse>, FarmsServiceError> {
    let activity_id = parse_id(&activity_id, ACTIVITY_ID_REASON)?;
    let context = resolve_context(&state, &identity, FarmContextParams::default()).await?;
    let usecase = GetActivityUseCase {
        repo: state.activity_repo(),
    };
    let activity = usecase.execute(&context, activity_id).await?;
    Ok(Json(activity.into()))
}

// ── POST /activities ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateActivityRequest {
    pub animal_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub kind: ActivityKind,
    pub activity_date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
}

pub async fn create_activity(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    body: Result<Json<CreateActivityRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ActivityResponse>), FarmsServiceError> {
    let body = json_body(body)?;
    let context = resolve_context(&state, &identity, FarmContextParams::default()).await?;
    let usecase = CreateActivityUseCase {
        animals: state.animal_repo(),
        repo: state.activity_repo(),
    };
    let activity = usecase
        .execute(
            &context,
            &identity.user_id,
            CreateActivityInput {
                animal_id: body.animal_id,
                title: body.title,
                description: body.description,
                kind: body.kind,
                activity_date: body.activity_date,
                due_date: body.due_date,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(activity.into())))
}

// ── PATCH /activities/{activity_id} ──────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct UpdateActivityRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "jaothui_core::serde::double_option")]
    pub description: Option<Option<String>>,
    pub kind: Option<ActivityKind>,
    pub status: Option<ActivityStatus>,
    pub activity_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "jaothui_core::serde::double_option")]
    pub due_date: Option<Option<DateTime<Utc>>>,
}

pub async fn update_activity(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(activity_id): Path<String>,
    body: Result<Json<UpdateActivityRequest>, JsonRejection>,
) -> Result<Json<ActivityResponse>, FarmsServiceError> {
    let body = json_body(body)?;
    let activity_id = parse_id(&activity_id, ACTIVITY_ID_REASON)?;
    let context = resolve_context(&state, &identity, FarmContextParams::default()).await?;
    let usecase = UpdateActivityUseCase {
        repo: state.activity_repo(),
    };
    let activity = usecase
        .execute(
            &context,
            activity_id,
            ActivityPatch {
                title: body.title,
                description: body.description,
                kind: body.kind,
                status: body.status,
                activity_date: body.activity_date,
                due_date: body.due_date,
            },
        )
        .await?;
    Ok(Json(activity.into()))
}

// ── DELETE /activities/{activity_id} ─────────────────────────────────────────

pub async fn delete_activity(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(activity_id): Path<String>,
) -> Result<StatusCode, FarmsServiceError> {
    let activity_id = parse_id(&activity_id, ACTIVITY_ID_REASON)?;
    let context = resolve_context(&state, &identity, FarmContextParams::default()).await?;
    let usecase = DeleteActivityUseCase {
        repo: state.activity_repo(),
    };
    usecase.execute(&context, activity_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
