use axum::{extract::State, http::StatusCode};

use jaothui_core::health::readiness_status;

use crate::state::AppState;

/// Handler for `GET /readyz`: ready once the database answers a ping.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    readiness_status(state.db.ping().await)
}
