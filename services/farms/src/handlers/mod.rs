pub mod activity;
pub mod animal;
pub mod farm;
pub mod health;
pub mod member;
pub mod notification;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use jaothui_auth_types::identity::IdentityHeaders;

use crate::domain::types::{FarmContext, FarmContextParams};
use crate::error::FarmsServiceError;
use crate::state::AppState;

/// Resolve the caller's farm; every scoped route starts here.
pub(crate) async fn resolve_context(
    state: &AppState,
    identity: &IdentityHeaders,
    params: FarmContextParams,
) -> Result<FarmContext, FarmsServiceError> {
    Ok(state
        .resolver()
        .resolve(identity.user_id.as_str(), params)
        .await?)
}

pub(crate) fn parse_id(raw: &str, reason: &'static str) -> Result<Uuid, FarmsServiceError> {
    raw.parse().map_err(|_| FarmsServiceError::InvalidInput(reason))
}

/// Query strings are parsed by hand so malformed ones answer in the service envelope.
pub(crate) fn parse_query<T: DeserializeOwned + Default>(
    raw_query: Option<String>,
) -> Result<T, FarmsServiceError> {
    Ok(raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|e| {
            tracing::debug!(error = %e, "rejected query string");
            FarmsServiceError::InvalidInput("malformed query string")
        })?
        .unwrap_or_default())
}

pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, FarmsServiceError> {
    match body {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "rejected request body");
            Err(FarmsServiceError::InvalidInput("malformed JSON body"))
        }
    }
}
