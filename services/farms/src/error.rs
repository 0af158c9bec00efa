use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use jaothui_core::error::error_response;

/// Failure to resolve which farm a user acts on behalf of.
///
/// Route handlers interpret only [`FarmContextError::code`]; the message is
/// English and meant for logs and API clients, not end users.
#[derive(Debug, thiserror::Error)]
pub enum FarmContextError {
    #[error("user id is missing or empty")]
    InvalidUser,
    #[error("{}", no_access_message(.farm_id))]
    NoAccess { farm_id: Option<Uuid> },
    /// Reserved: the resolver currently returns the first owned farm.
    #[error("user owns more than one farm")]
    MultipleFarms,
    #[error("failed to look up farm context")]
    Database(#[source] anyhow::Error),
}

fn no_access_message(farm_id: &Option<Uuid>) -> String {
    match farm_id {
        Some(id) => format!("user has no access to farm {id}"),
        None => "user has no farm access".to_owned(),
    }
}

impl FarmContextError {
    pub fn no_access() -> Self {
        Self::NoAccess { farm_id: None }
    }

    pub fn no_access_to(farm_id: Uuid) -> Self {
        Self::NoAccess {
            farm_id: Some(farm_id),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidUser => "INVALID_USER",
            Self::NoAccess { .. } => "NO_ACCESS",
            Self::MultipleFarms => "MULTIPLE_FARMS",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidUser => StatusCode::BAD_REQUEST,
            Self::NoAccess { .. } => StatusCode::FORBIDDEN,
            Self::MultipleFarms => StatusCode::CONFLICT,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Farms service error variants.
#[derive(Debug, thiserror::Error)]
pub enum FarmsServiceError {
    #[error(transparent)]
    FarmContext(#[from] FarmContextError),
    #[error("user not found")]
    UserNotFound,
    #[error("animal not found")]
    AnimalNotFound,
    #[error("activity not found")]
    ActivityNotFound,
    #[error("member not found")]
    MemberNotFound,
    #[error("animal tag already in use on this farm")]
    AnimalTagTaken,
    #[error("member already exists")]
    MemberAlreadyExists,
    #[error("full farm access required")]
    InsufficientAccess,
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    #[error("missing data")]
    MissingData,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl FarmsServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FarmContext(e) => e.code(),
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::AnimalNotFound => "ANIMAL_NOT_FOUND",
            Self::ActivityNotFound => "ACTIVITY_NOT_FOUND",
            Self::MemberNotFound => "MEMBER_NOT_FOUND",
            Self::AnimalTagTaken => "ANIMAL_TAG_TAKEN",
            Self::MemberAlreadyExists => "MEMBER_ALREADY_EXISTS",
            Self::InsufficientAccess => "INSUFFICIENT_ACCESS",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::MissingData => "MISSING_DATA",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for FarmsServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::FarmContext(e) => e.status(),
            Self::UserNotFound
            | Self::AnimalNotFound
            | Self::ActivityNotFound
            | Self::MemberNotFound => StatusCode::NOT_FOUND,
            Self::AnimalTagTaken | Self::MemberAlreadyExists => StatusCode::CONFLICT,
            Self::InsufficientAccess => StatusCode::FORBIDDEN,
            Self::InvalidInput(_) | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        match &self {
            Self::Internal(e) | Self::FarmContext(FarmContextError::Database(e)) => {
                tracing::error!(error = format!("{e:#}"), kind = self.kind(), "internal error");
            }
            _ => {}
        }
        error_response(status, self.kind(), self.to_string())
    }
}
