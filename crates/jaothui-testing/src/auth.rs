//! Mock gateway identity for HTTP tests.
//!
//! Services behind the gateway receive `x-jaothui-user-id`. `MockAuth` builds
//! that header directly so tests need no session provider.

use axum::http::{HeaderName, HeaderValue};

use jaothui_auth_types::identity::USER_ID_HEADER;

pub struct MockAuth {
    pub user_id: String,
}

impl MockAuth {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    /// The header pair as the gateway would inject it.
    pub fn header(&self) -> (HeaderName, HeaderValue) {
        (
            HeaderName::from_static(USER_ID_HEADER),
            HeaderValue::from_str(&self.user_id).expect("user id must be a valid header value"),
        )
    }
}
