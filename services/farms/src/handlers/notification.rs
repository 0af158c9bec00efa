use axum::{Json, extract::State};
use chrono::Utc;
use serde::Serialize;

use jaothui_auth_types::identity::IdentityHeaders;

use crate::domain::types::FarmContextParams;
use crate::error::FarmsServiceError;
use crate::handlers::resolve_context;
use crate::state::AppState;
use crate::usecase::notification::NotificationCountUseCase;

#[derive(Serialize)]
pub struct NotificationCountResponse {
    pub overdue: u64,
    pub due_today: u64,
    pub total: u64,
}

// ── GET /notifications/count ─────────────────────────────────────────────────

pub async fn get_notification_count(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<NotificationCountResponse>, FarmsServiceError> {
    let context = resolve_context(&state, &identity, FarmContextParams::default()).await?;
    let usecase = NotificationCountUseCase {
        repo: state.notification_repo(),
    };
    let counts = usecase.execute(&context, Utc::now()).await?;
    Ok(Json(NotificationCountResponse {
        overdue: counts.overdue,
        due_today: counts.due_today,
        total: counts.total,
    }))
}
