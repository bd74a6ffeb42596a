//! Error types for the HTTP layer.
//!
//! [`ApiError`] unifies registry and body-decoding failures into a single
//! enum that converts into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. Every
//! error body has the shape `{"error": "<message>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use roster_core::RegistryError;
use roster_types::InputError;

/// Errors that can occur while serving a user route.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A registry operation failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The JSON body did not decode into the expected payload.
    #[error(transparent)]
    Input(#[from] InputError),

    /// The path segment was not a user id, so no record can match it.
    #[error("User not found")]
    InvalidUserId(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Registry(RegistryError::Validation(_)) | Self::Input(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Registry(RegistryError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Registry(RegistryError::NotFound(_)) | Self::InvalidUserId(_) => {
                StatusCode::NOT_FOUND
            }
            Self::Registry(RegistryError::IdSpaceExhausted) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }

        let body = serde_json::json!({ "error": self.to_string() });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use roster_types::UserId;

    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        let cases = [
            (ApiError::from(RegistryError::missing_fields()), StatusCode::BAD_REQUEST),
            (ApiError::from(InputError::NotAnObject), StatusCode::BAD_REQUEST),
            (ApiError::from(RegistryError::duplicate_email("a@x.com")), StatusCode::CONFLICT),
            (ApiError::from(RegistryError::NotFound(UserId::new(3))), StatusCode::NOT_FOUND),
            (ApiError::InvalidUserId("abc".to_owned()), StatusCode::NOT_FOUND),
            (ApiError::from(RegistryError::IdSpaceExhausted), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, status) in cases {
            assert_eq!(error.status(), status, "{error:?}");
        }
    }

    #[test]
    fn messages_pass_through() {
        assert_eq!(
            ApiError::from(RegistryError::duplicate_email("a@x.com")).to_string(),
            "Email a@x.com already exists."
        );
        assert_eq!(
            ApiError::from(RegistryError::NotFound(UserId::new(3))).to_string(),
            "User not found"
        );
        assert_eq!(
            ApiError::from(InputError::InvalidField("age")).to_string(),
            "Invalid value for field 'age'"
        );
    }
}
