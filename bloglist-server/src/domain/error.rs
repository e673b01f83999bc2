use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("validation failed for '{field}': {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("expected `{0}` to be unique")]
    AlreadyExists(String),

    #[error("only the creator can modify a blog")]
    Forbidden,

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("token invalid")]
    InvalidToken,

    #[error("token expired")]
    TokenExpired,

    #[error("unexpected domain error: {0}")]
    Unexpected(String),
}
