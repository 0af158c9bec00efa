use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use jaothui_auth_types::identity::IdentityHeaders;
use jaothui_domain::farm::FarmRole;

use crate::domain::types::{FarmContextParams, FarmMember};
use crate::error::FarmsServiceError;
use crate::handlers::{json_body, resolve_context};
use crate::state::AppState;
use crate::usecase::member::{AddMemberUseCase, ListMembersUseCase, RemoveMemberUseCase};

#[derive(Serialize)]
pub struct MemberResponse {
    pub id: String,
    pub farm_id: String,
    pub user_id: String,
    pub role: FarmRole,
    #[serde(serialize_with = "jaothui_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<FarmMember> for MemberResponse {
    fn from(member: FarmMember) -> Self {
        Self {
            id: member.id.to_string(),
            farm_id: member.farm_id.to_string(),
            user_id: member.user_id,
            role: member.role,
            created_at: member.created_at,
        }
    }
}

// ── GET /farms/@me/members ───────────────────────────────────────────────────

pub async fn list_members(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Vec<MemberResponse>>, FarmsServiceError> {
    let context = resolve_context(&state, &identity, FarmContextParams::default()).await?;
    let usecase = ListMembersUseCase {
        members: state.member_repo(),
    };
    let members = usecase.execute(&context).await?;
    Ok(Json(members.into_iter().map(Into::into).collect()))
}

// ── POST /farms/@me/members ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AddMemberRequest {
    pub user_id: String,
}

pub async fn add_member(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    body: Result<Json<AddMemberRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MemberResponse>), FarmsServiceError> {
    let body = json_body(body)?;
    let context = resolve_context(&state, &identity, FarmContextParams::default()).await?;
    let usecase = AddMemberUseCase {
        users: state.user_repo(),
        members: state.member_repo(),
    };
    let member = usecase.execute(&context, &body.user_id).await?;
    Ok((StatusCode::CREATED, Json(member.into())))
}

// ── DELETE /farms/@me/members/{user_id} ──────────────────────────────────────

pub async fn remove_member(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, FarmsServiceError> {
    let context = resolve_context(&state, &identity, FarmContextParams::default()).await?;
    let usecase = RemoveMemberUseCase {
        members: state.member_repo(),
    };
    usecase.execute(&context, &user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
