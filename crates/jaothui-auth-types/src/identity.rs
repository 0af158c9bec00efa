//! Gateway-injected identity header extractor.

use axum::extract::FromRequestParts;
use http::request::Parts;

use jaothui_core::error::AppError;

pub const USER_ID_HEADER: &str = "x-jaothui-user-id";

/// User identity injected by the gateway via `x-jaothui-user-id`.
///
/// Rejects with 401 when the header is absent or not valid UTF-8. The value is
/// passed through untrimmed; validating it is the farm context resolver's job.
#[derive(Debug, Clone)]
pub struct IdentityHeaders {
    pub user_id: String,
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = AppError;

    // axum-core 0.5 declares `fn -> impl Future + Send`; read the header
    // synchronously and return a 'static future.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        async move {
            let user_id = user_id.ok_or(AppError::Unauthorized)?;
            Ok(Self { user_id })
        }
    }
}
