use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

use crate::domain::error::DomainError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("malformatted Id")]
    MalformedId,

    #[error("token missing")]
    Unauthorized,

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

pub(crate) type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            AppError::Domain(err) => match &err {
                DomainError::Validation { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
                // duplicate username is a client error, not a conflict
                DomainError::AlreadyExists(_) => (StatusCode::BAD_REQUEST, err.to_string()),
                DomainError::InvalidCredentials => (StatusCode::UNAUTHORIZED, err.to_string()),
                DomainError::InvalidToken => (StatusCode::UNAUTHORIZED, err.to_string()),
                DomainError::TokenExpired => (StatusCode::UNAUTHORIZED, err.to_string()),
                // ownership mismatches answer 401, not 403, on this API
                DomainError::Forbidden => (StatusCode::UNAUTHORIZED, err.to_string()),
                DomainError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
                DomainError::Unexpected(detail) => {
                    error!(%detail, "unexpected domain error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal error".to_string(),
                    )
                }
            },
            AppError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::MalformedId => (StatusCode::BAD_REQUEST, "malformatted Id".to_string()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "token missing".to_string()),
            AppError::Internal(err) => {
                error!(%err, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: msg })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use serde_json::Value;

    use super::AppError;
    use crate::domain::error::DomainError;

    async fn response_parts(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body must be readable");
        let body = serde_json::from_slice(&bytes).expect("body must be JSON");
        (status, body)
    }

    #[tokio::test]
    async fn validation_failures_are_bad_requests_naming_the_field() {
        let (status, body) = response_parts(AppError::Domain(DomainError::Validation {
            field: "title",
            message: "must not be empty",
        }))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "validation failed for 'title': must not be empty"
        );
    }

    #[tokio::test]
    async fn duplicate_username_is_a_bad_request() {
        let (status, body) = response_parts(AppError::Domain(DomainError::AlreadyExists(
            "username".to_string(),
        )))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "expected `username` to be unique");
    }

    #[tokio::test]
    async fn ownership_mismatch_keeps_the_compat_401() {
        let (status, _) = response_parts(AppError::Domain(DomainError::Forbidden)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn token_failures_are_distinguishable_by_message() {
        let (invalid_status, invalid_body) =
            response_parts(AppError::Domain(DomainError::InvalidToken)).await;
        let (expired_status, expired_body) =
            response_parts(AppError::Domain(DomainError::TokenExpired)).await;

        assert_eq!(invalid_status, StatusCode::UNAUTHORIZED);
        assert_eq!(expired_status, StatusCode::UNAUTHORIZED);
        assert_eq!(invalid_body["error"], "token invalid");
        assert_eq!(expired_body["error"], "token expired");
    }

    #[tokio::test]
    async fn login_failure_has_the_fixed_message() {
        let (status, body) =
            response_parts(AppError::Domain(DomainError::InvalidCredentials)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "invalid username or password");
    }

    #[tokio::test]
    async fn malformed_id_is_a_bad_request() {
        let (status, body) = response_parts(AppError::MalformedId).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "malformatted Id");
    }

    #[tokio::test]
    async fn unrecognized_failures_fall_through_to_internal() {
        let (status, body) = response_parts(AppError::Domain(DomainError::Unexpected(
            "wire exploded".to_string(),
        )))
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal error");
    }
}
