//! HTTP error mapping.
//!
//! # Invariants
//! - Every failure body is `{"detail": "<message>"}`.
//! - Storage failures are logged with their cause and answered with a
//!   generic message.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use todo_core::{RepoError, ServiceError, ValidationError};

const INTERNAL_DETAIL: &str = "Internal server error";

#[derive(Debug)]
pub enum ApiError {
    /// Malformed or invalid input (422).
    Validation(String),
    /// Unresolvable identifier (404).
    NotFound(String),
    /// Duplicate unique value (400).
    Conflict(String),
    /// Storage or runtime failure (500).
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    detail: &'a str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub(crate) fn internal(context: &str, err: impl Display) -> Self {
        Self::Internal(format!("{context}: {err}"))
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(detail)
            | Self::NotFound(detail)
            | Self::Conflict(detail)
            | Self::Internal(detail) => f.write_str(detail),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            Self::Internal(cause) => {
                error!(
                    "event=request_failed module=api status=error http_status={} error={}",
                    status.as_u16(),
                    cause
                );
                INTERNAL_DETAIL
            }
            Self::Validation(detail) | Self::NotFound(detail) | Self::Conflict(detail) => detail,
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::Validation(err) => Self::Validation(err.to_string()),
            ServiceError::NotFound(detail) => Self::NotFound(detail),
            ServiceError::Conflict(detail) => Self::Conflict(detail),
            ServiceError::Repo(err) => Self::internal("storage", err),
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        ServiceError::from(value).into()
    }
}

impl From<ValidationError> for ApiError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::Validation(value.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        Self::Validation(value.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(value: PathRejection) -> Self {
        Self::Validation(value.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use axum::http::StatusCode;
    use todo_core::ServiceError;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (
                ServiceError::NotFound("User not found".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                ServiceError::Conflict("Username already registered".to_string()),
                StatusCode::BAD_REQUEST,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn internal_detail_is_not_exposed() {
        let err = ApiError::internal("storage", "disk I/O error");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "storage: disk I/O error");
    }
}
