use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use jaothui_auth_types::identity::IdentityHeaders;
use jaothui_domain::farm::{AccessLevel, FarmRole};

use crate::domain::types::{Farm, FarmContext, FarmContextParams, FarmPatch};
use crate::error::FarmsServiceError;
use crate::handlers::{json_body, parse_id, resolve_context};
use crate::state::AppState;
use crate::usecase::farm::{
    CreateFarmInput, CreateFarmUseCase, EnsureFarmUseCase, UpdateFarmUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct FarmResponse {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub province: String,
    pub description: Option<String>,
    #[serde(serialize_with = "jaothui_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "jaothui_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Farm> for FarmResponse {
    fn from(farm: Farm) -> Self {
        Self {
            id: farm.id.to_string(),
            name: farm.name,
            owner_id: farm.owner_id,
            province: farm.province,
            description: farm.description,
            created_at: farm.created_at,
            updated_at: farm.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct FarmContextResponse {
    pub farm: FarmResponse,
    pub role: FarmRole,
    pub access_level: AccessLevel,
}

impl From<FarmContext> for FarmContextResponse {
    fn from(context: FarmContext) -> Self {
        Self {
            farm: context.farm.into(),
            role: context.role,
            access_level: context.access_level,
        }
    }
}

// ── GET /farms ───────────────────────────────────────────────────────────────

pub async fn list_farms(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Vec<FarmContextResponse>>, FarmsServiceError> {
    let contexts = state
        .resolver()
        .resolve_all(identity.user_id.as_str())
        .await?;
    Ok(Json(contexts.into_iter().map(Into::into).collect()))
}

// ── POST /farms ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateFarmRequest {
    pub name: String,
    pub province: Option<String>,
    pub description: Option<String>,
}

pub async fn create_farm(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    body: Result<Json<CreateFarmRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<FarmContextResponse>), FarmsServiceError> {
    let body = json_body(body)?;
    let usecase = CreateFarmUseCase {
        access: state.farm_access_repo(),
        users: state.user_repo(),
        farms: state.farm_repo(),
    };
    let context = usecase
        .execute(
            &identity.user_id,
            CreateFarmInput {
                name: body.name,
                province: body.province,
                description: body.description,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(context.into())))
}

// ── GET /farms/@me ───────────────────────────────────────────────────────────

pub async fn get_my_farm(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<FarmContextResponse>, FarmsServiceError> {
    let context = resolve_context(&state, &identity, FarmContextParams::default()).await?;
    Ok(Json(context.into()))
}

// ── POST /farms/@me ──────────────────────────────────────────────────────────

pub async fn ensure_farm(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<FarmContextResponse>), FarmsServiceError> {
    let usecase = EnsureFarmUseCase {
        resolver: state.resolver(),
        users: state.user_repo(),
        farms: state.farm_repo(),
    };
    let output = usecase.execute(&identity.user_id).await?;
    let status = if output.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(output.context.into())))
}

// ── PATCH /farms/@me ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateFarmRequest {
    pub name: Option<String>,
    pub province: Option<String>,
    #[serde(default, deserialize_with = "jaothui_core::serde::double_option")]
    pub description: Option<Option<String>>,
}

pub async fn update_my_farm(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    body: Result<Json<UpdateFarmRequest>, JsonRejection>,
) -> Result<Json<FarmResponse>, FarmsServiceError> {
    let body = json_body(body)?;
    let context = resolve_context(&state, &identity, FarmContextParams::default()).await?;
    let usecase = UpdateFarmUseCase {
        farms: state.farm_repo(),
    };
    let farm = usecase
        .execute(
            &context,
            FarmPatch {
                name: body.name,
                province: body.province,
                description: body.description,
            },
        )
        .await?;
    Ok(Json(farm.into()))
}

// ── GET /farms/{farm_id} ─────────────────────────────────────────────────────

pub async fn get_farm(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(farm_id): Path<String>,
) -> Result<Json<FarmContextResponse>, FarmsServiceError> {
    let farm_id = parse_id(&farm_id, "farm_id must be a UUID")?;
    let context = resolve_context(&state, &identity, FarmContextParams::for_farm(farm_id)).await?;
    Ok(Json(context.into()))
}

// ── GET /farms/{farm_id}/access ──────────────────────────────────────────────

#[derive(Serialize)]
pub struct FarmAccessResponse {
    pub has_access: bool,
}

pub async fn check_farm_access(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(farm_id): Path<String>,
) -> Result<Json<FarmAccessResponse>, FarmsServiceError> {
    let farm_id = parse_id(&farm_id, "farm_id must be a UUID")?;
    let has_access = state
        .resolver()
        .check_access(
            identity.user_id.as_str(),
            FarmContextParams::for_farm(farm_id),
        )
        .await?;
    Ok(Json(FarmAccessResponse { has_access }))
}
